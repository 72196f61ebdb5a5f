//! Brand roster extraction from the makers index.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result, ShapeMismatch};
use crate::extract::fields::{element_text, parse_selector};
use crate::models::{Brand, BrandSchema, RecordBuilder};

#[derive(Debug, Clone)]
pub struct BrandExtractor {
    link: Selector,
    link_attr: String,
    count: Selector,
    count_pattern: Regex,
    link_extensions: Vec<String>,
}

impl BrandExtractor {
    pub fn new(schema: &BrandSchema) -> Result<Self> {
        let count_pattern =
            Regex::new(r"\d+").map_err(|e| AppError::config(format!("count pattern: {e}")))?;
        Ok(Self {
            link: parse_selector(&schema.link_selector)?,
            link_attr: schema.link_attr.clone(),
            count: parse_selector(&schema.count_selector)?,
            count_pattern,
            link_extensions: schema.link_extensions.clone(),
        })
    }

    /// Brands in document order. Links without a target are dropped.
    pub fn extract(&self, document: &Html) -> Vec<Brand> {
        document
            .select(&self.link)
            .filter_map(|link| match self.build(link) {
                Ok(brand) => Some(brand),
                Err(reason) => {
                    log::debug!("Skipping brand link: {}", reason);
                    None
                }
            })
            .collect()
    }

    fn build(&self, link: ElementRef<'_>) -> std::result::Result<Brand, ShapeMismatch> {
        // The name is the anchor's own text; the count label is a child element.
        let own_text: String = link
            .children()
            .filter_map(|node| node.value().as_text().map(|t| &**t))
            .collect();
        let name = if own_text.trim().is_empty() {
            element_text(&link)
        } else {
            own_text
        };

        let listing = RecordBuilder::new()
            .href(link.value().attr(&self.link_attr))
            .name(name)
            .build(&self.link_extensions)?;

        let devices = link
            .select(&self.count)
            .next()
            .map(|label| element_text(&label))
            .and_then(|text| {
                self.count_pattern
                    .find(&text)
                    .and_then(|m| m.as_str().parse().ok())
            });

        Ok(Brand {
            detail_url: format!("/brands/{}", listing.slug),
            name: listing.name,
            slug: listing.slug,
            devices,
        })
    }
}
