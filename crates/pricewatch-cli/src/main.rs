mod scrape;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricewatch")]
#[command(about = "Scrape price, rating and review count from a product page for a region")]
struct Cli {
    /// Product page URL.
    target_url: String,

    /// Region to select in the page's region picker (exact, case-sensitive).
    region: String,

    /// Output file (overrides PRICEWATCH_OUTPUT_PATH).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Selector map YAML (overrides PRICEWATCH_SELECTORS_PATH).
    #[arg(long)]
    selectors: Option<PathBuf>,

    /// Run the browser without a window (overrides PRICEWATCH_HEADLESS).
    #[arg(long)]
    headless: bool,

    /// Directory for checkpoint screenshots (overrides PRICEWATCH_SCREENSHOT_DIR).
    #[arg(long)]
    screenshot_dir: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut pricewatch_core::AppConfig) {
        if let Some(output) = &self.output {
            config.output_path.clone_from(output);
        }
        if let Some(selectors) = &self.selectors {
            config.selectors_path.clone_from(selectors);
        }
        if self.headless {
            config.headless = true;
        }
        if let Some(dir) = &self.screenshot_dir {
            config.screenshot_dir = Some(dir.clone());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Usage errors exit here, before any config is read or output touched.
    let cli = Cli::parse();

    let mut config = pricewatch_core::load_app_config()?;
    cli.apply_overrides(&mut config);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let request = pricewatch_core::ScrapeRequest::new(cli.target_url, cli.region)?;

    scrape::run_scrape(&config, &request).await
}
