use std::path::PathBuf;

/// Browser window size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub selectors_path: PathBuf,
    pub output_path: PathBuf,
    pub log_level: String,
    /// The browser runs with a visible window unless this is set.
    pub headless: bool,
    pub chromium_path: Option<PathBuf>,
    pub viewport: Viewport,
    pub navigation_timeout_secs: u64,
    pub element_timeout_secs: u64,
    pub settle_timeout_ms: u64,
    pub poll_interval_ms: u64,
    /// Checkpoint screenshots are only captured when this is set.
    pub screenshot_dir: Option<PathBuf>,
}
