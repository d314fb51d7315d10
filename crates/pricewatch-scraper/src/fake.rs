//! In-memory page used by unit tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::browser::{BrowserLauncher, BrowserSession, PageDriver};
use crate::error::ScraperError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FakeElement {
    pub id: usize,
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GotoBehavior {
    Load,
    Fail,
    Hang,
}

/// A page whose DOM is a map from selector to the elements it matches.
#[derive(Debug)]
pub(crate) struct FakePage {
    elements: Mutex<HashMap<String, Vec<FakeElement>>>,
    next_id: AtomicUsize,
    goto: GotoBehavior,
    navigation_settles: bool,
    broken_selectors: HashSet<String>,
    pub visited: Mutex<Vec<String>>,
    pub clicks: Mutex<Vec<usize>>,
    pub probes: Mutex<Vec<String>>,
    pub screenshots: Mutex<Vec<PathBuf>>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            elements: Mutex::new(HashMap::new()),
            next_id: AtomicUsize::new(1),
            goto: GotoBehavior::Load,
            navigation_settles: true,
            broken_selectors: HashSet::new(),
            visited: Mutex::new(Vec::new()),
            clicks: Mutex::new(Vec::new()),
            probes: Mutex::new(Vec::new()),
            screenshots: Mutex::new(Vec::new()),
        }
    }
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_goto(mut self, goto: GotoBehavior) -> Self {
        self.goto = goto;
        self
    }

    /// Navigation waits never complete; callers must time out.
    pub fn with_stuck_navigation(mut self) -> Self {
        self.navigation_settles = false;
        self
    }

    /// Queries for `selector` fail the way an unparsable selector or a dead
    /// connection does in a real browser.
    pub fn with_broken_selector(mut self, selector: &str) -> Self {
        self.broken_selectors.insert(selector.to_string());
        self
    }

    fn query_error(&self, selector: &str) -> Result<(), ScraperError> {
        if self.broken_selectors.contains(selector) {
            return Err(ScraperError::driver(
                "find_all",
                format!("DOM Error while querying \"{selector}\""),
            ));
        }
        Ok(())
    }

    /// Adds a visible element matching `selector` and returns its id.
    pub fn add(&self, selector: &str, text: &str) -> usize {
        self.add_with_visibility(selector, text, true)
    }

    pub fn add_hidden(&self, selector: &str, text: &str) -> usize {
        self.add_with_visibility(selector, text, false)
    }

    fn add_with_visibility(&self, selector: &str, text: &str, visible: bool) -> usize {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.elements
            .lock()
            .unwrap()
            .entry(selector.to_string())
            .or_default()
            .push(FakeElement {
                id,
                text: text.to_string(),
                visible,
            });
        id
    }

    pub fn clicked(&self) -> Vec<usize> {
        self.clicks.lock().unwrap().clone()
    }

    pub fn probe_count(&self, selector: &str) -> usize {
        self.probes
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.as_str() == selector)
            .count()
    }
}

#[async_trait]
impl PageDriver for FakePage {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> Result<(), ScraperError> {
        self.visited.lock().unwrap().push(url.to_string());
        match self.goto {
            GotoBehavior::Load => Ok(()),
            GotoBehavior::Fail => Err(ScraperError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            }),
            GotoBehavior::Hang => std::future::pending().await,
        }
    }

    async fn wait_for_navigation(&self) -> Result<(), ScraperError> {
        if self.navigation_settles {
            Ok(())
        } else {
            std::future::pending().await
        }
    }

    async fn find_visible(&self, selector: &str) -> Result<Option<FakeElement>, ScraperError> {
        self.probes.lock().unwrap().push(selector.to_string());
        self.query_error(selector)?;
        Ok(self
            .elements
            .lock()
            .unwrap()
            .get(selector)
            .and_then(|matches| matches.first())
            .filter(|e| e.visible)
            .cloned())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<FakeElement>, ScraperError> {
        self.query_error(selector)?;
        Ok(self
            .elements
            .lock()
            .unwrap()
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }

    async fn text_content(&self, element: &FakeElement) -> Result<String, ScraperError> {
        Ok(element.text.clone())
    }

    async fn click(&self, element: &FakeElement) -> Result<(), ScraperError> {
        self.clicks.lock().unwrap().push(element.id);
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), ScraperError> {
        self.screenshots.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// Session over a shared [`FakePage`] that records whether it was closed.
pub(crate) struct FakeSession {
    page: Arc<FakePage>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl BrowserSession for FakeSession {
    type Page = FakePage;

    fn page(&self) -> &FakePage {
        &self.page
    }

    async fn close(self) -> Result<(), ScraperError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub(crate) struct FakeLauncher {
    pub page: Arc<FakePage>,
    pub closed: Arc<AtomicBool>,
}

impl FakeLauncher {
    pub fn new(page: FakePage) -> Self {
        Self {
            page: Arc::new(page),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    type Session = FakeSession;

    async fn launch(&self) -> Result<FakeSession, ScraperError> {
        Ok(FakeSession {
            page: Arc::clone(&self.page),
            closed: Arc::clone(&self.closed),
        })
    }
}
