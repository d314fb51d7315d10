//! The scrape sequence: navigate, select a region, read the four fields.

use std::path::PathBuf;
use std::time::Duration;

use pricewatch_core::{AppConfig, ExtractedField, ProductSnapshot, ScrapeRequest, SelectorMap};

use crate::browser::{BrowserLauncher, BrowserSession, PageDriver};
use crate::error::ScraperError;
use crate::extract::TextExtractor;
use crate::region::RegionSelector;
use crate::screenshot::Checkpoints;

/// Timing and side-effect settings for a scrape.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub navigation_timeout: Duration,
    pub element_timeout: Duration,
    pub settle_timeout: Duration,
    pub poll_interval: Duration,
    pub screenshot_dir: Option<PathBuf>,
}

impl ScrapeOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
            element_timeout: Duration::from_secs(config.element_timeout_secs),
            settle_timeout: Duration::from_millis(config.settle_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            screenshot_dir: config.screenshot_dir.clone(),
        }
    }
}

/// Drives one product page scrape.
///
/// Only a field element that never appears is recovered (as an absent
/// field). Everything else, including a field whose text has no number,
/// aborts the scrape.
#[derive(Debug, Clone)]
pub struct ProductScraper {
    selectors: SelectorMap,
    options: ScrapeOptions,
    extractor: TextExtractor,
    region: RegionSelector,
    checkpoints: Checkpoints,
}

impl ProductScraper {
    #[must_use]
    pub fn new(selectors: SelectorMap, options: ScrapeOptions) -> Self {
        let extractor = TextExtractor::new(options.element_timeout, options.poll_interval);
        let region = RegionSelector::new(
            selectors.region.clone(),
            options.element_timeout,
            options.settle_timeout,
            options.poll_interval,
        )
        .with_screenshot_dir(options.screenshot_dir.clone());
        let checkpoints = Checkpoints::new(options.screenshot_dir.clone());

        Self {
            selectors,
            options,
            extractor,
            region,
            checkpoints,
        }
    }

    /// Launches a browser session, scrapes `request` and closes the session.
    ///
    /// The session is closed whether the scrape succeeds or fails; a failure
    /// to close is logged and does not replace the scrape result.
    ///
    /// # Errors
    ///
    /// Returns the launch error, or any error from [`ProductScraper::scrape`].
    pub async fn run<L: BrowserLauncher>(
        &self,
        launcher: &L,
        request: &ScrapeRequest,
    ) -> Result<ProductSnapshot, ScraperError> {
        let session = launcher.launch().await?;
        let result = self.scrape(session.page(), request).await;

        if let Err(e) = session.close().await {
            tracing::warn!(error = %e, "failed to close browser session");
        }

        result
    }

    /// Runs the scrape sequence against an already-open page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NavigationTimeout`] / [`ScraperError::Navigation`] if
    ///   the page does not load.
    /// - [`ScraperError::ControlNotFound`] if the region picker is missing.
    /// - [`ScraperError::MalformedContent`] if a field's text has no number.
    /// - Any driver error.
    pub async fn scrape<P: PageDriver>(
        &self,
        page: &P,
        request: &ScrapeRequest,
    ) -> Result<ProductSnapshot, ScraperError> {
        self.navigate(page, request.target_url()).await?;

        self.region.select_region(page, request.region_name()).await?;

        let fields = &self.selectors.fields;
        let price = self.extract_price(page).await?;
        let price_old = self.extract_field(page, "price_old", &fields.price_old).await?;
        let rating = self.extract_field(page, "rating", &fields.rating).await?;
        let review_count = self
            .extract_field(page, "review_count", &fields.review_count)
            .await?;

        self.checkpoints.capture(page, "product.jpg").await;

        let snapshot = ProductSnapshot::new(price, price_old, rating, review_count);
        tracing::info!(
            price = %snapshot.price(),
            price_old = %snapshot.price_old(),
            rating = %snapshot.rating(),
            review_count = %snapshot.review_count(),
            "product scraped"
        );
        Ok(snapshot)
    }

    async fn navigate<P: PageDriver>(&self, page: &P, url: &str) -> Result<(), ScraperError> {
        tracing::info!(url, "navigating");
        let timeout = self.options.navigation_timeout;
        tokio::time::timeout(timeout, page.goto(url))
            .await
            .map_err(|_| ScraperError::NavigationTimeout {
                url: url.to_string(),
                timeout,
            })?
    }

    /// The discounted-price selector, then once the regular-price selector
    /// when the product is not on sale.
    async fn extract_price<P: PageDriver>(&self, page: &P) -> Result<ExtractedField, ScraperError> {
        let fields = &self.selectors.fields;
        let price = self.extract_field(page, "price", &fields.price).await?;
        if !price.is_absent() {
            return Ok(price);
        }

        let Some(fallback) = &fields.price_fallback else {
            return Ok(price);
        };

        tracing::debug!(selector = %fallback, "discounted price absent; trying regular price");
        self.extract_field(page, "price_fallback", fallback).await
    }

    async fn extract_field<P: PageDriver>(
        &self,
        page: &P,
        field: &'static str,
        selector: &str,
    ) -> Result<ExtractedField, ScraperError> {
        let result = self.extractor.extract(page, selector).await;
        match &result {
            Ok(value) => tracing::debug!(field, %value, "field extracted"),
            Err(e) => tracing::error!(field, selector, error = %e, "field extraction failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
