//! Ranked extraction from caption-identified statistics tables.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ShapeMismatch};
use crate::extract::fields::{assign_ranks, element_text, parse_count, parse_selector};
use crate::models::{CaptionMatch, PhoneListItem, RecordBuilder, StatsSchema};

/// Extracts ranked phones from one table of the statistics page.
#[derive(Debug, Clone)]
pub struct StatsExtractor {
    table: Selector,
    caption: Selector,
    caption_match: CaptionMatch,
    row: Selector,
    link: Selector,
    link_attr: String,
    metric_cell: Selector,
    metric_offset_from_end: usize,
    interest_caption: String,
    fans_caption: String,
    link_extensions: Vec<String>,
}

impl StatsExtractor {
    /// Compile the selectors of a stats schema.
    pub fn new(schema: &StatsSchema) -> Result<Self> {
        Ok(Self {
            table: parse_selector(&schema.table_selector)?,
            caption: parse_selector(&schema.caption_selector)?,
            caption_match: schema.caption_match,
            row: parse_selector(&schema.row_selector)?,
            link: parse_selector(&schema.link_selector)?,
            link_attr: schema.link_attr.clone(),
            metric_cell: parse_selector(&schema.metric_cell_selector)?,
            metric_offset_from_end: schema.metric_offset_from_end,
            interest_caption: schema.interest_caption.clone(),
            fans_caption: schema.fans_caption.clone(),
            link_extensions: schema.link_extensions.clone(),
        })
    }

    /// Ranked rows of the first table whose caption matches `caption_text`.
    ///
    /// Rows without a link are dropped before ranking, so ranks are always
    /// 1..=N over the kept rows. A missing table yields an empty list.
    pub fn extract(&self, document: &Html, caption_text: &str) -> Vec<PhoneListItem> {
        let Some(table) = self.find_table(document, caption_text) else {
            log::debug!("No stats table captioned '{}'", caption_text);
            return Vec::new();
        };

        let rows = table
            .select(&self.row)
            .filter_map(|row| match self.build_row(row) {
                Ok(item) => Some(item),
                Err(reason) => {
                    log::debug!("Skipping stats row: {}", reason);
                    None
                }
            })
            .collect();

        assign_ranks(rows)
    }

    /// Phones ranked by daily hits.
    pub fn top_by_interest(&self, document: &Html) -> Vec<PhoneListItem> {
        self.extract(document, &self.interest_caption)
    }

    /// Phones ranked by total favorites.
    pub fn top_by_fans(&self, document: &Html) -> Vec<PhoneListItem> {
        self.extract(document, &self.fans_caption)
    }

    fn find_table<'a>(&self, document: &'a Html, caption_text: &str) -> Option<ElementRef<'a>> {
        let mut matching = document.select(&self.table).filter(|table| {
            table
                .select(&self.caption)
                .next()
                .is_some_and(|caption| {
                    let text: String = caption.text().collect();
                    self.caption_match.matches(&text, caption_text)
                })
        });

        let first = matching.next()?;
        if matching.next().is_some() {
            log::warn!(
                "Several stats tables match caption '{}'; using the first",
                caption_text
            );
        }
        Some(first)
    }

    fn build_row(&self, row: ElementRef<'_>) -> std::result::Result<PhoneListItem, ShapeMismatch> {
        let link = row.select(&self.link).next();
        let listing = RecordBuilder::new()
            .href(link.and_then(|a| a.value().attr(&self.link_attr)))
            .name(link.map(|a| element_text(&a)).unwrap_or_default())
            .build(&self.link_extensions)?;

        let mut item = PhoneListItem::from(listing);
        item.hits = Some(self.metric(row));
        Ok(item)
    }

    /// Counts back from the last metric cell over sibling elements, so a
    /// `th` between data cells takes a position too.
    fn metric(&self, row: ElementRef<'_>) -> u64 {
        let Some(last) = row.select(&self.metric_cell).last() else {
            return 0;
        };
        std::iter::successors(Some(last), |cell| {
            cell.prev_siblings().find_map(ElementRef::wrap)
        })
        .nth(self.metric_offset_from_end)
        .map(|cell| parse_count(&element_text(&cell)))
        .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS: &str = r#"
        <html><body>
          <table>
            <caption>Top 10 By daily hits</caption>
            <thead><tr><th>#</th><th>Device</th><th>Daily hits</th><th></th></tr></thead>
            <tbody>
              <tr><td>1.</td><th><a href="samsung_galaxy_s24_ultra-12771.php">Galaxy S24 Ultra</a></th><td>12,345</td><td class="bar"></td></tr>
              <tr><td>2.</td><th>Sponsored</th><td>9,999</td><td class="bar"></td></tr>
              <tr><td>3.</td><th><a href="apple_iphone_15_pro_max-12548.php">iPhone 15 Pro Max</a></th><td>n/a</td><td class="bar"></td></tr>
              <tr><td>4.</td><th><a href="xiaomi_14-12626.php">Xiaomi 14</a></th><td>7,001</td><td class="bar"></td></tr>
            </tbody>
          </table>
          <table>
            <caption>Top 10 By total favorites</caption>
            <tbody>
              <tr><td>1.</td><th><a href="apple_iphone_13-11103.php">iPhone 13</a></th><td>3,210</td><td class="bar"></td></tr>
              <tr><td>2.</td><th><a href="nokia_3310-1.php">3310</a></th></tr>
            </tbody>
          </table>
        </body></html>
    "#;

    fn extractor() -> StatsExtractor {
        StatsExtractor::new(&StatsSchema::default()).unwrap()
    }

    #[test]
    fn test_ranks_are_dense_over_kept_rows() {
        let doc = Html::parse_document(STATS);
        let top = extractor().top_by_interest(&doc);

        let summary: Vec<_> = top
            .iter()
            .map(|p| (p.rank, p.slug.as_str(), p.hits))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some(1), "samsung_galaxy_s24_ultra-12771", Some(12345)),
                (Some(2), "apple_iphone_15_pro_max-12548", Some(0)),
                (Some(3), "xiaomi_14-12626", Some(7001)),
            ]
        );
    }

    #[test]
    fn test_caption_selects_table() {
        let doc = Html::parse_document(STATS);
        let fans = extractor().top_by_fans(&doc);
        assert_eq!(fans.len(), 2);
        assert_eq!(fans[0].name, "iPhone 13");
        assert_eq!(fans[0].hits, Some(3210));
        assert_eq!(fans[0].detail_url, "/apple_iphone_13-11103");
        // Only the position cell, no metric.
        assert_eq!(fans[1].hits, Some(0));
        assert_eq!(fans[1].rank, Some(2));
    }

    #[test]
    fn test_caption_match_is_case_sensitive() {
        let doc = Html::parse_document(STATS);
        assert!(extractor().extract(&doc, "BY DAILY HITS").is_empty());
        assert!(extractor().extract(&doc, "by daily hits").is_empty());
    }

    #[test]
    fn test_default_captions_find_both_tables() {
        let doc = Html::parse_document(STATS);
        let ex = extractor();
        assert_eq!(ex.top_by_interest(&doc).len(), 3);
        assert_eq!(ex.top_by_fans(&doc).len(), 2);
    }

    #[test]
    fn test_exact_caption_match() {
        let schema = StatsSchema {
            caption_match: CaptionMatch::Exact,
            ..StatsSchema::default()
        };
        let ex = StatsExtractor::new(&schema).unwrap();
        let doc = Html::parse_document(STATS);
        assert!(ex.extract(&doc, "daily hits").is_empty());
        assert_eq!(ex.extract(&doc, "Top 10 By daily hits").len(), 3);
    }

    #[test]
    fn test_first_matching_table_wins() {
        let doc = Html::parse_document(STATS);
        // "Top 10" matches both captions.
        let top = extractor().extract(&doc, "Top 10");
        assert_eq!(top[0].slug, "samsung_galaxy_s24_ultra-12771");
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn test_missing_table_is_empty() {
        let doc = Html::parse_document("<html><body><p>maintenance</p></body></html>");
        assert!(extractor().top_by_interest(&doc).is_empty());
    }

    #[test]
    fn test_metric_offset_is_configurable() {
        let schema = StatsSchema {
            metric_offset_from_end: 0,
            ..StatsSchema::default()
        };
        let doc = Html::parse_document(
            r#"<table><caption>By daily hits</caption><tbody>
                 <tr><td>1.</td><th><a href="a-1.php">A</a></th><td>1,000</td></tr>
               </tbody></table>"#,
        );
        let top = StatsExtractor::new(&schema).unwrap().top_by_interest(&doc);
        assert_eq!(top[0].hits, Some(1000));
    }

    #[test]
    fn test_header_cell_before_metric_counts_as_cell() {
        let doc = Html::parse_document(
            r#"<table><caption>Top 10 By daily hits</caption><tbody>
                 <tr><td>7.</td><th><a href="a-1.php">A</a></th><td>12,345</td></tr>
               </tbody></table>"#,
        );
        let top = extractor().top_by_interest(&doc);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].hits, Some(0));
    }

    #[test]
    fn test_ranks_restart_after_skipped_first_row() {
        let doc = Html::parse_document(
            r#"<table><caption>Top 10 By daily hits</caption><tbody>
                 <tr><td>1.</td><th>Advertisement</th><td>99,999</td><td class="bar"></td></tr>
                 <tr><td>2.</td><th><a href="google_pixel_8-12546.php">Pixel 8</a></th><td>5,000</td><td class="bar"></td></tr>
                 <tr><td>3.</td><th><a href="">Broken</a></th><td>4,000</td><td class="bar"></td></tr>
                 <tr><td>4.</td><th><a href="oneplus_12-12725.php">OnePlus 12</a></th><td>3,000</td><td class="bar"></td></tr>
               </tbody></table>"#,
        );
        let top = extractor().top_by_interest(&doc);
        let summary: Vec<_> = top
            .iter()
            .map(|p| (p.rank, p.slug.as_str(), p.hits))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some(1), "google_pixel_8-12546", Some(5000)),
                (Some(2), "oneplus_12-12725", Some(3000)),
            ]
        );
    }

    #[test]
    fn test_extract_is_idempotent() {
        let doc = Html::parse_document(STATS);
        let ex = extractor();
        assert_eq!(ex.top_by_interest(&doc), ex.top_by_interest(&doc));
    }
}
