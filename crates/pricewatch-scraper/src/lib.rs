pub mod browser;
pub mod error;
pub mod extract;
pub mod output;
pub mod parse;
pub mod region;
pub mod scrape;
pub mod screenshot;

#[cfg(test)]
pub(crate) mod fake;

pub use browser::chromium::{ChromiumLauncher, ChromiumPage, ChromiumSession};
pub use browser::{BrowserLauncher, BrowserSession, PageDriver};
pub use error::ScraperError;
pub use extract::TextExtractor;
pub use output::persist;
pub use region::{RegionOutcome, RegionSelector};
pub use scrape::{ProductScraper, ScrapeOptions};
