// src/services/catalog.rs

//! Query facade over the upstream catalog.
//!
//! Each operation performs exactly one fetch followed by one extraction
//! (and, for search, one ranking pass).

use scraper::Html;
use url::Url;

use crate::error::{AppError, Result};
use crate::extract::Extractors;
use crate::models::{Brand, Config, PhoneDetails, PhoneListItem, SearchResult};
use crate::ranking::rank_search_results;
use crate::utils::url::{is_valid_slug, page_url, search_url};
use crate::utils::{HttpFetcher, PageFetcher};

const MAKERS_PAGE: &str = "makers.php3";
const LATEST_PAGE: &str = "new.php3";
const STATS_PAGE: &str = "stats.php3";
const SEARCH_PAGE: &str = "results.php3";

/// Named catalog operations backed by a [`PageFetcher`].
pub struct Catalog {
    fetcher: Box<dyn PageFetcher>,
    base_url: Url,
    extractors: Extractors,
}

impl Catalog {
    /// Create a catalog that fetches over HTTP.
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.catalog)?;
        Self::with_fetcher(config, Box::new(fetcher))
    }

    /// Create a catalog with a custom page source.
    pub fn with_fetcher(config: &Config, fetcher: Box<dyn PageFetcher>) -> Result<Self> {
        Ok(Self {
            fetcher,
            base_url: config.catalog.base_url()?,
            extractors: Extractors::compile(&config.schema)?,
        })
    }

    /// All manufacturers from the makers index.
    pub async fn brands(&self) -> Result<Vec<Brand>> {
        let document = self.fetch_document(page_url(&self.base_url, MAKERS_PAGE)?).await?;
        let brands = self.extractors.brands.extract(&document);
        log::info!("Extracted {} brands", brands.len());
        Ok(brands)
    }

    /// Phones on a brand roster page, in page order.
    pub async fn phones_by_brand(&self, brand_slug: &str) -> Result<Vec<PhoneListItem>> {
        let brand_slug = Self::require_slug("brand", brand_slug)?;
        let url = page_url(&self.base_url, &format!("{brand_slug}.php"))?;
        let document = self.fetch_document(url).await?;
        let phones = self.extractors.list.extract(&document);
        log::info!("Extracted {} phones for brand {}", phones.len(), brand_slug);
        Ok(phones)
    }

    /// Newly announced phones, in page order.
    pub async fn latest(&self) -> Result<Vec<PhoneListItem>> {
        let document = self.fetch_document(page_url(&self.base_url, LATEST_PAGE)?).await?;
        let phones = self.extractors.list.extract(&document);
        log::info!("Extracted {} latest phones", phones.len());
        Ok(phones)
    }

    /// Phones ranked by daily hits.
    pub async fn top_by_interest(&self) -> Result<Vec<PhoneListItem>> {
        let document = self.fetch_document(page_url(&self.base_url, STATS_PAGE)?).await?;
        let phones = self.extractors.stats.top_by_interest(&document);
        log::info!("Extracted {} phones by daily hits", phones.len());
        Ok(phones)
    }

    /// Phones ranked by total favorites.
    pub async fn top_by_fans(&self) -> Result<Vec<PhoneListItem>> {
        let document = self.fetch_document(page_url(&self.base_url, STATS_PAGE)?).await?;
        let phones = self.extractors.stats.top_by_fans(&document);
        log::info!("Extracted {} phones by total favorites", phones.len());
        Ok(phones)
    }

    /// Free-text search, most relevant first.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(AppError::validation("Query parameter is required"));
        }

        let url = search_url(&self.base_url, SEARCH_PAGE, query)?;
        let document = self.fetch_document(url).await?;
        let results = rank_search_results(&self.extractors.search, &document, query);
        log::info!("Search '{}' returned {} results", query, results.len());
        Ok(results)
    }

    /// Full spec sheet for one phone.
    pub async fn phone_details(&self, slug: &str) -> Result<PhoneDetails> {
        let slug = Self::require_slug("phone", slug)?;
        let url = page_url(&self.base_url, &format!("{slug}.php"))?;
        let document = self.fetch_document(url).await?;
        self.extractors
            .details
            .extract(&document, slug)
            .map_err(|reason| {
                log::debug!("Detail page for {} did not match: {}", slug, reason);
                AppError::not_found(format!("phone '{slug}'"))
            })
    }

    async fn fetch_document(&self, url: Url) -> Result<Html> {
        let html = self.fetcher.fetch_text(url.as_str()).await?;
        Ok(Html::parse_document(&html))
    }

    fn require_slug<'a>(kind: &str, slug: &'a str) -> Result<&'a str> {
        let slug = slug.trim();
        if is_valid_slug(slug) {
            Ok(slug)
        } else {
            Err(AppError::validation(format!("Invalid {kind} slug: '{slug}'")))
        }
    }
}
