//! Delivery-region selection through the page's region picker.

use std::path::PathBuf;
use std::time::Duration;

use pricewatch_core::RegionSelectors;

use crate::browser::PageDriver;
use crate::error::ScraperError;
use crate::extract::wait_for_visible;
use crate::screenshot::Checkpoints;

/// Result of a region selection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionOutcome {
    pub selected: bool,
    pub entries_scanned: usize,
}

/// Opens the region picker and clicks the entry whose text matches exactly.
#[derive(Debug, Clone)]
pub struct RegionSelector {
    selectors: RegionSelectors,
    element_timeout: Duration,
    settle_timeout: Duration,
    poll_interval: Duration,
    checkpoints: Checkpoints,
}

impl RegionSelector {
    #[must_use]
    pub fn new(
        selectors: RegionSelectors,
        element_timeout: Duration,
        settle_timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            selectors,
            element_timeout,
            settle_timeout,
            poll_interval,
            checkpoints: Checkpoints::disabled(),
        }
    }

    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.checkpoints = Checkpoints::new(dir);
        self
    }

    /// Selects `region_name` on the page.
    ///
    /// Entries are scanned once in document order; the first whose trimmed
    /// text equals `region_name` (case-sensitive) is clicked and the scan
    /// stops. When nothing matches a warning is logged and the outcome has
    /// `selected: false`; the page keeps its default region.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::ControlNotFound`] if the picker control, its trigger
    ///   or the region list never becomes visible.
    /// - Any driver error raised while reading or clicking entries.
    pub async fn select_region<P: PageDriver>(
        &self,
        page: &P,
        region_name: &str,
    ) -> Result<RegionOutcome, ScraperError> {
        self.require_visible(page, &self.selectors.control).await?;
        self.checkpoints.capture(page, "landing.jpg").await;

        // The page re-renders once after first load; opening the picker before that is lost.
        self.settle(page, "initial load").await;

        let trigger = self.require_visible(page, &self.selectors.trigger).await?;
        page.click(&trigger).await?;
        self.checkpoints.capture(page, "region-picker.jpg").await;

        self.require_visible(page, &self.selectors.list).await?;

        let entries = page.find_all(&self.selectors.entries).await?;
        let mut entries_scanned = 0usize;

        for entry in &entries {
            entries_scanned += 1;
            let text = page.text_content(entry).await?;
            if text.trim() != region_name {
                continue;
            }

            self.checkpoints.capture(page, "region-selected.jpg").await;
            page.click(entry).await?;
            tracing::info!(region = region_name, entries_scanned, "region selected");

            if !self.settle(page, "region change").await {
                tracing::warn!(
                    region = region_name,
                    timeout = ?self.settle_timeout,
                    "page did not reload after region change"
                );
            }

            return Ok(RegionOutcome {
                selected: true,
                entries_scanned,
            });
        }

        tracing::warn!(
            region = region_name,
            entries_scanned,
            "no region entry matched; continuing with the page default"
        );

        Ok(RegionOutcome {
            selected: false,
            entries_scanned,
        })
    }

    async fn require_visible<P: PageDriver>(
        &self,
        page: &P,
        selector: &str,
    ) -> Result<P::Element, ScraperError> {
        wait_for_visible(page, selector, self.element_timeout, self.poll_interval)
            .await?
            .ok_or_else(|| ScraperError::ControlNotFound {
                selector: selector.to_string(),
                timeout: self.element_timeout,
            })
    }

    /// Waits for a navigation bounded by the settle timeout. Returns whether it settled.
    async fn settle<P: PageDriver>(&self, page: &P, reason: &str) -> bool {
        match tokio::time::timeout(self.settle_timeout, page.wait_for_navigation()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::debug!(reason, error = %e, "navigation wait failed");
                false
            }
            Err(_) => {
                tracing::debug!(reason, timeout = ?self.settle_timeout, "no navigation to settle");
                false
            }
        }
    }
}
