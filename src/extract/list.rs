//! Maker-list extraction (brand roster, latest phones, search results).

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ShapeMismatch};
use crate::extract::fields::{element_text, flattened_text, parse_selector};
use crate::models::{ListSchema, Listing, PhoneListItem, RecordBuilder, SearchResult};

/// Extracts one record per item of a maker-list container.
#[derive(Debug, Clone)]
pub struct ListExtractor {
    item_selector: String,
    item: Selector,
    link: Selector,
    name: Selector,
    image: Selector,
    link_attr: String,
    image_attr: String,
    flatten_name_variants: bool,
    link_extensions: Vec<String>,
}

impl ListExtractor {
    /// Compile the selectors of a list schema.
    pub fn new(schema: &ListSchema) -> Result<Self> {
        Ok(Self {
            item_selector: schema.item_selector.clone(),
            item: parse_selector(&schema.item_selector)?,
            link: parse_selector(&schema.link_selector)?,
            name: parse_selector(&schema.name_selector)?,
            image: parse_selector(&schema.image_selector)?,
            link_attr: schema.link_attr.clone(),
            image_attr: schema.image_attr.clone(),
            flatten_name_variants: schema.flatten_name_variants,
            link_extensions: schema.link_extensions.clone(),
        })
    }

    /// Validated listings in document order.
    ///
    /// Items that fail validation are dropped; a missing container yields
    /// an empty list.
    pub fn listings(&self, document: &Html) -> Vec<Listing> {
        let mut seen = 0usize;
        let listings: Vec<Listing> = document
            .select(&self.item)
            .inspect(|_| seen += 1)
            .filter_map(|item| match self.build(item) {
                Ok(listing) => Some(listing),
                Err(reason) => {
                    log::debug!("Skipping list item: {}", reason);
                    None
                }
            })
            .collect();

        if seen == 0 {
            log::debug!("No items matched '{}'", self.item_selector);
        }
        listings
    }

    /// Phone records for roster and latest pages.
    pub fn extract(&self, document: &Html) -> Vec<PhoneListItem> {
        self.listings(document)
            .into_iter()
            .map(PhoneListItem::from)
            .collect()
    }

    /// Search candidates in document order, before ranking.
    pub fn extract_search(&self, document: &Html) -> Vec<SearchResult> {
        self.listings(document)
            .into_iter()
            .map(SearchResult::from)
            .collect()
    }

    fn build(&self, item: ElementRef<'_>) -> std::result::Result<Listing, ShapeMismatch> {
        let href = item
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr(&self.link_attr));

        let name = item
            .select(&self.name)
            .next()
            .map(|label| {
                if self.flatten_name_variants {
                    flattened_text(&label)
                } else {
                    element_text(&label)
                }
            })
            .unwrap_or_default();

        let image = item
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr(&self.image_attr));

        RecordBuilder::new()
            .href(href)
            .name(name)
            .image_url(image)
            .build(&self.link_extensions)
    }
}
