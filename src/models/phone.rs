//! Phone, brand, and detail records produced by the extractors.

use serde::{Deserialize, Serialize};

use crate::error::ShapeMismatch;
use crate::utils::url::slug_from_href;

/// A phone entry from a roster, latest, or stats page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhoneListItem {
    /// 1-based position, only set for ranked listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,

    /// Display name
    pub name: String,

    /// Catalog identifier
    pub slug: String,

    /// Thumbnail source as found in the page
    #[serde(
        rename = "imageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,

    /// Popularity metric, only set for ranked listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<u64>,

    /// Always `"/" + slug`
    pub detail_url: String,
}

/// A phone entry from a search results page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Display name, name variants joined by a single space
    pub name: String,

    /// Catalog identifier
    pub slug: String,

    /// Thumbnail source as found in the page
    #[serde(
        rename = "imageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,

    /// Always `"/" + slug`
    pub detail_url: String,
}

/// A manufacturer from the makers index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Brand {
    pub name: String,
    pub slug: String,

    /// Device count advertised next to the brand name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<u32>,

    /// Always `"/brands/" + slug`
    pub detail_url: String,
}

/// Full specification sheet for one phone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhoneDetails {
    pub name: String,
    pub slug: String,

    #[serde(
        rename = "imageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,

    pub specs: Vec<SpecCategory>,
}

/// One spec table, e.g. "Display" or "Battery".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecCategory {
    pub category: String,
    pub fields: Vec<SpecField>,
}

/// A label/value pair inside a spec table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecField {
    pub label: String,
    pub value: String,
}

/// A validated name + slug + image triple shared by every listing kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
}

impl Listing {
    pub fn detail_url(&self) -> String {
        format!("/{}", self.slug)
    }
}

/// Collects raw field values for one element and validates them as a unit.
///
/// `build` fails closed: any missing mandatory field rejects the whole
/// record instead of emitting a partial one.
#[derive(Debug, Default)]
pub struct RecordBuilder<'a> {
    href: Option<&'a str>,
    name: Option<String>,
    image_url: Option<String>,
}

impl<'a> RecordBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn href(mut self, href: Option<&'a str>) -> Self {
        self.href = href;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn image_url(mut self, src: Option<&str>) -> Self {
        self.image_url = src.map(str::to_string);
        self
    }

    /// Validate and produce a [`Listing`].
    pub fn build(self, extensions: &[String]) -> Result<Listing, ShapeMismatch> {
        let href = self.href.ok_or(ShapeMismatch::MissingLink)?;
        let slug = slug_from_href(href, extensions);
        if slug.is_empty() {
            return Err(ShapeMismatch::EmptySlug(href.to_string()));
        }

        let name = self.name.unwrap_or_default().trim().to_string();
        if name.is_empty() {
            return Err(ShapeMismatch::EmptyName(slug));
        }

        Ok(Listing {
            name,
            slug,
            image_url: self.image_url,
        })
    }
}

impl From<Listing> for PhoneListItem {
    fn from(listing: Listing) -> Self {
        Self {
            rank: None,
            detail_url: listing.detail_url(),
            name: listing.name,
            slug: listing.slug,
            image_url: listing.image_url,
            hits: None,
        }
    }
}

impl From<Listing> for SearchResult {
    fn from(listing: Listing) -> Self {
        Self {
            detail_url: listing.detail_url(),
            name: listing.name,
            slug: listing.slug,
            image_url: listing.image_url,
        }
    }
}
