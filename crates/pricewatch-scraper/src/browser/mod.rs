//! Browser engine abstraction.
//!
//! [`PageDriver`] is the page-level capability the scrape logic depends on;
//! [`BrowserSession`] owns one page for the duration of a scrape and
//! [`BrowserLauncher`] creates sessions. The production engine is Chromium
//! via chromiumoxide (see [`chromium`]).

pub mod chromium;

use std::path::Path;

use async_trait::async_trait;

use crate::error::ScraperError;

/// Page interactions used by the scraper. Every call is a single probe or
/// command; waiting and timeouts are layered on top by the callers.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Handle to an element in the current document.
    type Element: Send + Sync;

    /// Navigate to `url` and wait for the load to finish.
    async fn goto(&self, url: &str) -> Result<(), ScraperError>;

    /// Wait for the next navigation of the page to finish.
    async fn wait_for_navigation(&self) -> Result<(), ScraperError>;

    /// First element matching `selector` if it is present and visible right now.
    async fn find_visible(&self, selector: &str) -> Result<Option<Self::Element>, ScraperError>;

    /// All elements matching `selector`, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>, ScraperError>;

    /// Raw (untrimmed) text content of `element`.
    async fn text_content(&self, element: &Self::Element) -> Result<String, ScraperError>;

    /// Activate `element` as a user click would.
    async fn click(&self, element: &Self::Element) -> Result<(), ScraperError>;

    /// Capture a full-page screenshot to `path`.
    async fn screenshot(&self, path: &Path) -> Result<(), ScraperError>;
}

/// An exclusively-owned browser session with one page.
#[async_trait]
pub trait BrowserSession: Send {
    type Page: PageDriver;

    fn page(&self) -> &Self::Page;

    /// Close the page and shut the browser down.
    async fn close(self) -> Result<(), ScraperError>;
}

#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    type Session: BrowserSession;

    async fn launch(&self) -> Result<Self::Session, ScraperError>;
}
