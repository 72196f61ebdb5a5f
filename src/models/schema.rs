// src/models/schema.rs

//! Declarative page shapes for the upstream catalog.
//!
//! Each schema names the CSS selectors and attributes the extractors read.
//! When the upstream markup changes, only these values need to change.

use serde::{Deserialize, Serialize};

/// Current schema revision understood by the extractors.
pub const SCHEMA_VERSION: u32 = 1;

/// All page schemas, keyed by page shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSchemas {
    /// Schema revision, bumped when the upstream shape changes
    #[serde(default = "defaults::version")]
    pub version: u32,

    /// Brand roster and latest-phones pages
    #[serde(default)]
    pub list: ListSchema,

    /// Search results page
    #[serde(default = "ListSchema::search")]
    pub search: ListSchema,

    /// Statistics page
    #[serde(default)]
    pub stats: StatsSchema,

    /// Makers index page
    #[serde(default)]
    pub brands: BrandSchema,

    /// Phone detail page
    #[serde(default)]
    pub details: DetailSchema,
}

impl Default for PageSchemas {
    fn default() -> Self {
        Self {
            version: defaults::version(),
            list: ListSchema::default(),
            search: ListSchema::search(),
            stats: StatsSchema::default(),
            brands: BrandSchema::default(),
            details: DetailSchema::default(),
        }
    }
}

/// Shape of a maker-list page: one `<li>` per phone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSchema {
    /// Selector for each item inside the maker-list container
    #[serde(default = "defaults::list_item")]
    pub item_selector: String,

    /// Selector for the link element within an item
    #[serde(default = "defaults::link")]
    pub link_selector: String,

    /// HTML attribute holding the link target
    #[serde(default = "defaults::href")]
    pub link_attr: String,

    /// Selector for the display label within an item
    #[serde(default = "defaults::list_name")]
    pub name_selector: String,

    /// Selector for the thumbnail within an item
    #[serde(default = "defaults::image")]
    pub image_selector: String,

    /// HTML attribute holding the thumbnail source
    #[serde(default = "defaults::src")]
    pub image_attr: String,

    /// Join `<br>`-separated name variants with a space
    #[serde(default)]
    pub flatten_name_variants: bool,

    /// Page extensions stripped from link targets to form slugs
    #[serde(default = "defaults::link_extensions")]
    pub link_extensions: Vec<String>,
}

impl Default for ListSchema {
    fn default() -> Self {
        Self {
            item_selector: defaults::list_item(),
            link_selector: defaults::link(),
            link_attr: defaults::href(),
            name_selector: defaults::list_name(),
            image_selector: defaults::image(),
            image_attr: defaults::src(),
            flatten_name_variants: false,
            link_extensions: defaults::link_extensions(),
        }
    }
}

impl ListSchema {
    /// Search results share the list shape but carry multi-line names.
    pub fn search() -> Self {
        Self {
            flatten_name_variants: true,
            ..Self::default()
        }
    }
}

/// How a stats table caption is compared with the requested caption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionMatch {
    /// Caption contains the requested text (case-sensitive)
    #[default]
    Contains,
    /// Trimmed caption equals the requested text
    Exact,
}

impl CaptionMatch {
    pub fn matches(self, caption: &str, wanted: &str) -> bool {
        match self {
            Self::Contains => caption.contains(wanted),
            Self::Exact => caption.trim() == wanted,
        }
    }
}

/// Shape of the statistics page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSchema {
    #[serde(default = "defaults::table")]
    pub table_selector: String,

    #[serde(default = "defaults::caption")]
    pub caption_selector: String,

    #[serde(default)]
    pub caption_match: CaptionMatch,

    /// Selector for body rows within the chosen table
    #[serde(default = "defaults::stats_row")]
    pub row_selector: String,

    /// Selector for the header-cell link within a row
    #[serde(default = "defaults::stats_link")]
    pub link_selector: String,

    #[serde(default = "defaults::href")]
    pub link_attr: String,

    /// Selector for data cells; the last match anchors the metric lookup
    #[serde(default = "defaults::stats_cell")]
    pub metric_cell_selector: String,

    /// Sibling cells (`td` or `th`) to step back from the anchor (0 = anchor)
    #[serde(default = "defaults::metric_offset")]
    pub metric_offset_from_end: usize,

    /// Caption of the daily-hits table
    #[serde(default = "defaults::interest_caption")]
    pub interest_caption: String,

    /// Caption of the total-favorites table
    #[serde(default = "defaults::fans_caption")]
    pub fans_caption: String,

    #[serde(default = "defaults::link_extensions")]
    pub link_extensions: Vec<String>,
}

impl Default for StatsSchema {
    fn default() -> Self {
        Self {
            table_selector: defaults::table(),
            caption_selector: defaults::caption(),
            caption_match: CaptionMatch::default(),
            row_selector: defaults::stats_row(),
            link_selector: defaults::stats_link(),
            link_attr: defaults::href(),
            metric_cell_selector: defaults::stats_cell(),
            metric_offset_from_end: defaults::metric_offset(),
            interest_caption: defaults::interest_caption(),
            fans_caption: defaults::fans_caption(),
            link_extensions: defaults::link_extensions(),
        }
    }
}

/// Shape of the makers index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandSchema {
    /// Selector for each brand link
    #[serde(default = "defaults::brand_link")]
    pub link_selector: String,

    #[serde(default = "defaults::href")]
    pub link_attr: String,

    /// Selector for the device-count label within a brand link
    #[serde(default = "defaults::brand_count")]
    pub count_selector: String,

    #[serde(default = "defaults::link_extensions")]
    pub link_extensions: Vec<String>,
}

impl Default for BrandSchema {
    fn default() -> Self {
        Self {
            link_selector: defaults::brand_link(),
            link_attr: defaults::href(),
            count_selector: defaults::brand_count(),
            link_extensions: defaults::link_extensions(),
        }
    }
}

/// Shape of a phone detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailSchema {
    #[serde(default = "defaults::detail_name")]
    pub name_selector: String,

    #[serde(default = "defaults::detail_image")]
    pub image_selector: String,

    #[serde(default = "defaults::src")]
    pub image_attr: String,

    /// Selector for each spec category table
    #[serde(default = "defaults::detail_table")]
    pub table_selector: String,

    /// Selector for the category heading within a table
    #[serde(default = "defaults::detail_category")]
    pub category_selector: String,

    #[serde(default = "defaults::detail_row")]
    pub row_selector: String,

    #[serde(default = "defaults::detail_label")]
    pub label_selector: String,

    #[serde(default = "defaults::detail_value")]
    pub value_selector: String,
}

impl Default for DetailSchema {
    fn default() -> Self {
        Self {
            name_selector: defaults::detail_name(),
            image_selector: defaults::detail_image(),
            image_attr: defaults::src(),
            table_selector: defaults::detail_table(),
            category_selector: defaults::detail_category(),
            row_selector: defaults::detail_row(),
            label_selector: defaults::detail_label(),
            value_selector: defaults::detail_value(),
        }
    }
}

mod defaults {
    pub fn version() -> u32 {
        super::SCHEMA_VERSION
    }

    // Shared
    pub fn link() -> String {
        "a".into()
    }
    pub fn href() -> String {
        "href".into()
    }
    pub fn image() -> String {
        "img".into()
    }
    pub fn src() -> String {
        "src".into()
    }
    pub fn link_extensions() -> Vec<String> {
        vec![".php".into()]
    }

    // Maker list
    pub fn list_item() -> String {
        ".makers ul li".into()
    }
    pub fn list_name() -> String {
        "span".into()
    }

    // Stats
    pub fn table() -> String {
        "table".into()
    }
    pub fn caption() -> String {
        "caption".into()
    }
    pub fn stats_row() -> String {
        "tbody tr".into()
    }
    pub fn stats_link() -> String {
        "th a".into()
    }
    pub fn stats_cell() -> String {
        "td".into()
    }
    pub fn metric_offset() -> usize {
        1
    }
    pub fn interest_caption() -> String {
        "By daily hits".into()
    }
    pub fn fans_caption() -> String {
        "By total favorites".into()
    }

    // Makers index
    pub fn brand_link() -> String {
        ".st-text table td a".into()
    }
    pub fn brand_count() -> String {
        "span".into()
    }

    // Detail page
    pub fn detail_name() -> String {
        "h1.specs-phone-name-title".into()
    }
    pub fn detail_image() -> String {
        ".specs-photo-main img".into()
    }
    pub fn detail_table() -> String {
        "#specs-list table".into()
    }
    pub fn detail_category() -> String {
        "th".into()
    }
    pub fn detail_row() -> String {
        "tr".into()
    }
    pub fn detail_label() -> String {
        "td.ttl".into()
    }
    pub fn detail_value() -> String {
        "td.nfo".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_schema_flattens_names() {
        let schemas = PageSchemas::default();
        assert!(!schemas.list.flatten_name_variants);
        assert!(schemas.search.flatten_name_variants);
        assert_eq!(schemas.search.item_selector, schemas.list.item_selector);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let schemas: PageSchemas = toml::from_str(
            r#"
            version = 2

            [stats]
            caption_match = "exact"
            metric_offset_from_end = 0
            "#,
        )
        .unwrap();

        assert_eq!(schemas.version, 2);
        assert_eq!(schemas.stats.caption_match, CaptionMatch::Exact);
        assert_eq!(schemas.stats.metric_offset_from_end, 0);
        assert_eq!(schemas.stats.row_selector, "tbody tr");
        assert!(schemas.search.flatten_name_variants);
    }

    #[test]
    fn test_caption_match() {
        assert!(CaptionMatch::Contains.matches("Top 10 by daily hits", "daily hits"));
        assert!(!CaptionMatch::Contains.matches("Top 10 by daily hits", "Daily Hits"));
        assert!(CaptionMatch::Exact.matches(" By daily hits ", "By daily hits"));
        assert!(!CaptionMatch::Exact.matches("Top 10 By daily hits", "By daily hits"));
    }
}
