use std::path::PathBuf;

use crate::browser::PageDriver;

/// Optional full-page screenshots at fixed points of a scrape.
///
/// Captures are best effort: a failure is logged and never fails the run.
#[derive(Debug, Clone, Default)]
pub struct Checkpoints {
    dir: Option<PathBuf>,
}

impl Checkpoints {
    #[must_use]
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    pub async fn capture<P: PageDriver>(&self, page: &P, name: &str) {
        let Some(dir) = &self.dir else {
            return;
        };

        let path = dir.join(name);
        match page.screenshot(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "screenshot saved"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "screenshot failed"),
        }
    }
}
