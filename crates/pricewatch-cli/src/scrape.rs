//! The `pricewatch` scrape command: load selectors, run the browser, write the snapshot.

use anyhow::Context;
use pricewatch_core::{AppConfig, ScrapeRequest};
use pricewatch_scraper::{ChromiumLauncher, ProductScraper, ScrapeOptions};

/// Scrape `request` with a Chromium session and persist the snapshot to the
/// configured output path.
///
/// Nothing is written unless the scrape succeeds.
///
/// # Errors
///
/// Returns an error if the selector map cannot be loaded, the screenshot
/// directory cannot be created, the scrape fails, or the output cannot be written.
pub(crate) async fn run_scrape(config: &AppConfig, request: &ScrapeRequest) -> anyhow::Result<()> {
    let selectors = pricewatch_core::load_selectors(&config.selectors_path)?;

    if let Some(dir) = &config.screenshot_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create screenshot dir {}", dir.display()))?;
    }

    tracing::info!(
        url = %request.target_url(),
        region = %request.region_name(),
        selectors = %config.selectors_path.display(),
        "starting scrape"
    );

    let scraper = ProductScraper::new(selectors, ScrapeOptions::from_app_config(config));
    let launcher = ChromiumLauncher::from_app_config(config);
    let snapshot = scraper.run(&launcher, request).await?;

    pricewatch_scraper::persist(&snapshot, &config.output_path)?;
    Ok(())
}
