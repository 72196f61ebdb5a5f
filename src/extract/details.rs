//! Spec-sheet extraction from a phone detail page.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ShapeMismatch};
use crate::extract::fields::{element_text, parse_selector, text_segments};
use crate::models::{DetailSchema, PhoneDetails, SpecCategory, SpecField};

#[derive(Debug, Clone)]
pub struct DetailExtractor {
    name: Selector,
    image: Selector,
    image_attr: String,
    table: Selector,
    category: Selector,
    row: Selector,
    label: Selector,
    value: Selector,
}

impl DetailExtractor {
    pub fn new(schema: &DetailSchema) -> Result<Self> {
        Ok(Self {
            name: parse_selector(&schema.name_selector)?,
            image: parse_selector(&schema.image_selector)?,
            image_attr: schema.image_attr.clone(),
            table: parse_selector(&schema.table_selector)?,
            category: parse_selector(&schema.category_selector)?,
            row: parse_selector(&schema.row_selector)?,
            label: parse_selector(&schema.label_selector)?,
            value: parse_selector(&schema.value_selector)?,
        })
    }

    /// Build the spec sheet for `slug`.
    ///
    /// Fails only when the page carries no phone name, which is how the
    /// upstream site renders unknown slugs.
    pub fn extract(
        &self,
        document: &Html,
        slug: &str,
    ) -> std::result::Result<PhoneDetails, ShapeMismatch> {
        let name = document
            .select(&self.name)
            .next()
            .map(|el| element_text(&el))
            .unwrap_or_default();
        if name.is_empty() {
            return Err(ShapeMismatch::EmptyName(slug.to_string()));
        }

        let image_url = document
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr(&self.image_attr))
            .map(str::to_string);

        let specs = document
            .select(&self.table)
            .filter_map(|table| self.category(table))
            .collect();

        Ok(PhoneDetails {
            name,
            slug: slug.to_string(),
            image_url,
            specs,
        })
    }

    fn category(&self, table: ElementRef<'_>) -> Option<SpecCategory> {
        let category = table
            .select(&self.category)
            .next()
            .map(|th| element_text(&th))
            .filter(|text| !text.is_empty())?;

        let mut fields: Vec<SpecField> = Vec::new();
        for row in table.select(&self.row) {
            let Some(value_cell) = row.select(&self.value).next() else {
                continue;
            };
            let value = text_segments(&value_cell).join("\n");
            let label = row
                .select(&self.label)
                .next()
                .map(|td| element_text(&td))
                .unwrap_or_default();

            match fields.last_mut() {
                // Unlabelled rows continue the previous field.
                Some(previous) if label.is_empty() => {
                    if !value.is_empty() {
                        previous.value.push('\n');
                        previous.value.push_str(&value);
                    }
                }
                _ => fields.push(SpecField {
                    label: if label.is_empty() {
                        category.clone()
                    } else {
                        label
                    },
                    value,
                }),
            }
        }

        Some(SpecCategory { category, fields })
    }
}
