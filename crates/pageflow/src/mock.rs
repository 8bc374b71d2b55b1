// Mock session - scripted page model for offline tests
//
// Implements Session over an in-memory element table so the page-object
// layer can be exercised deterministically: elements can appear after a
// number of polls (AJAX-style), stay hidden until a click reveals them, open
// new windows, or navigate. Also records clicks, scripts, and close calls
// for assertions.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::session::{ElementRef, Session, WindowRef};

/// Side effect applied when a scripted element is clicked.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Change the active window's URL.
    Navigate(String),
    /// Open a new window with the given URL without switching to it.
    OpenWindow(String),
    /// Make elements guarded by `revealed_by(key)` matchable.
    Reveal(String),
}

/// One scripted element in the mock document.
#[derive(Debug, Clone)]
pub struct MockElement {
    locator: Locator,
    text: String,
    displayed: bool,
    enabled: bool,
    appear_after: u32,
    reveal_key: Option<String>,
    on_click: Vec<Effect>,
}

impl MockElement {
    pub fn new(locator: Locator) -> Self {
        Self {
            locator,
            text: String::new(),
            displayed: true,
            enabled: true,
            appear_after: 0,
            reveal_key: None,
            on_click: Vec::new(),
        }
    }

    /// Rendered text returned by `read_text`.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Present in the document but not visible.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Starts matching its locator only after `polls` resolve calls,
    /// simulating content that renders asynchronously.
    #[must_use]
    pub fn appears_after_polls(mut self, polls: u32) -> Self {
        self.appear_after = polls;
        self
    }

    /// Hidden from resolution until an [`Effect::Reveal`] with `key` fires.
    #[must_use]
    pub fn revealed_by(mut self, key: &str) -> Self {
        self.reveal_key = Some(key.to_string());
        self
    }

    #[must_use]
    pub fn on_click(mut self, effect: Effect) -> Self {
        self.on_click.push(effect);
        self
    }
}

#[derive(Debug, Default)]
struct State {
    window_urls: Vec<String>,
    active_window: usize,
    elements: Vec<MockElement>,
    resolve_counts: HashMap<Locator, u32>,
    revealed: HashSet<String>,
    clicks: Vec<Locator>,
    scripts: Vec<String>,
    keys_sent: Vec<(Locator, String)>,
    ready_after_polls: u32,
    ready_polls_seen: u32,
    fail_screenshots: bool,
    close_calls: u32,
}

/// Scripted in-memory [`Session`].
#[derive(Debug, Default)]
pub struct MockSession {
    state: Mutex<State>,
}

impl MockSession {
    pub fn builder() -> MockSessionBuilder {
        MockSessionBuilder::default()
    }

    /// Locators of every element clicked so far, in order.
    pub fn clicks(&self) -> Vec<Locator> {
        self.state.lock().clicks.clone()
    }

    /// Scripts passed to `execute_script`, in order.
    pub fn scripts(&self) -> Vec<String> {
        self.state.lock().scripts.clone()
    }

    /// Number of times `close` was called.
    pub fn close_calls(&self) -> u32 {
        self.state.lock().close_calls
    }

    /// How many times `locator` has been resolved.
    pub fn resolve_count(&self, locator: &Locator) -> u32 {
        self.state
            .lock()
            .resolve_counts
            .get(locator)
            .copied()
            .unwrap_or(0)
    }

    /// Index of the currently active window.
    pub fn active_window(&self) -> usize {
        self.state.lock().active_window
    }

    fn matching_indices(state: &State, locator: &Locator, polls: u32) -> Vec<usize> {
        state
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| {
                el.locator == *locator
                    && polls > el.appear_after
                    && el
                        .reveal_key
                        .as_ref()
                        .is_none_or(|key| state.revealed.contains(key))
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    fn element_index(element: &ElementRef) -> Result<usize> {
        element
            .id()
            .strip_prefix("el-")
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| Error::Driver(format!("unknown element ref {:?}", element.id())))
    }

    fn with_element<T>(&self, element: &ElementRef, f: impl FnOnce(&MockElement) -> T) -> Result<T> {
        let state = self.state.lock();
        let idx = Self::element_index(element)?;
        state
            .elements
            .get(idx)
            .map(f)
            .ok_or_else(|| Error::Driver(format!("element ref {:?} out of range", element.id())))
    }
}

#[async_trait]
impl Session for MockSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock();
        let active = state.active_window;
        state.window_urls[active] = url.to_string();
        Ok(())
    }

    async fn resolve(&self, locator: &Locator) -> Result<Vec<ElementRef>> {
        let mut state = self.state.lock();
        let polls = state.resolve_counts.entry(locator.clone()).or_insert(0);
        *polls += 1;
        let polls = *polls;
        Ok(Self::matching_indices(&state, locator, polls)
            .into_iter()
            .map(|idx| ElementRef::new(format!("el-{idx}")))
            .collect())
    }

    async fn click(&self, element: &ElementRef) -> Result<()> {
        let mut state = self.state.lock();
        let idx = Self::element_index(element)?;
        let (locator, effects) = {
            let el = state
                .elements
                .get(idx)
                .ok_or_else(|| Error::Driver(format!("element ref {:?} out of range", element.id())))?;
            (el.locator.clone(), el.on_click.clone())
        };
        state.clicks.push(locator);
        for effect in effects {
            match effect {
                Effect::Navigate(url) => {
                    let active = state.active_window;
                    state.window_urls[active] = url;
                }
                Effect::OpenWindow(url) => state.window_urls.push(url),
                Effect::Reveal(key) => {
                    state.revealed.insert(key);
                }
            }
        }
        Ok(())
    }

    async fn read_text(&self, element: &ElementRef) -> Result<String> {
        self.with_element(element, |el| el.text.clone())
    }

    async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()> {
        let locator = self.with_element(element, |el| el.locator.clone())?;
        self.state.lock().keys_sent.push((locator, text.to_string()));
        Ok(())
    }

    async fn is_displayed(&self, element: &ElementRef) -> Result<bool> {
        self.with_element(element, |el| el.displayed)
    }

    async fn is_enabled(&self, element: &ElementRef) -> Result<bool> {
        self.with_element(element, |el| el.enabled)
    }

    async fn execute_script(&self, script: &str) -> Result<serde_json::Value> {
        let mut state = self.state.lock();
        state.scripts.push(script.to_string());
        if script.contains("document.readyState") {
            state.ready_polls_seen += 1;
            let ready = state.ready_polls_seen > state.ready_after_polls;
            return Ok(serde_json::Value::String(
                if ready { "complete" } else { "loading" }.to_string(),
            ));
        }
        Ok(serde_json::Value::Null)
    }

    async fn current_url(&self) -> Result<String> {
        let state = self.state.lock();
        Ok(state.window_urls[state.active_window].clone())
    }

    async fn window_handles(&self) -> Result<Vec<WindowRef>> {
        let state = self.state.lock();
        Ok((0..state.window_urls.len()).map(|i| i.to_string()).collect())
    }

    async fn switch_window(&self, window: &WindowRef) -> Result<()> {
        let mut state = self.state.lock();
        let idx: usize = window
            .parse()
            .map_err(|_| Error::Driver(format!("unknown window ref {window:?}")))?;
        if idx >= state.window_urls.len() {
            return Err(Error::Driver(format!("window ref {window:?} out of range")));
        }
        state.active_window = idx;
        Ok(())
    }

    async fn screenshot_png(&self) -> Result<Vec<u8>> {
        let state = self.state.lock();
        if state.fail_screenshots {
            return Err(Error::Driver("screenshot unavailable".to_string()));
        }
        // Minimal PNG signature; enough for a write-once artifact.
        Ok(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
    }

    async fn close(&self) -> Result<()> {
        self.state.lock().close_calls += 1;
        Ok(())
    }
}

/// Builder for scripted sessions.
#[derive(Debug, Default)]
pub struct MockSessionBuilder {
    window_urls: Vec<String>,
    elements: Vec<MockElement>,
    ready_after_polls: u32,
    fail_screenshots: bool,
}

impl MockSessionBuilder {
    /// Adds a window with a starting URL. The first added window is active.
    #[must_use]
    pub fn window(mut self, url: &str) -> Self {
        self.window_urls.push(url.to_string());
        self
    }

    #[must_use]
    pub fn element(mut self, element: MockElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Document reports readyState "loading" for the first `polls` probes.
    #[must_use]
    pub fn ready_after_polls(mut self, polls: u32) -> Self {
        self.ready_after_polls = polls;
        self
    }

    /// Every screenshot attempt fails at the driver.
    #[must_use]
    pub fn failing_screenshots(mut self) -> Self {
        self.fail_screenshots = true;
        self
    }

    pub fn build(self) -> MockSession {
        let mut window_urls = self.window_urls;
        if window_urls.is_empty() {
            window_urls.push("about:blank".to_string());
        }
        MockSession {
            state: Mutex::new(State {
                window_urls,
                elements: self.elements,
                ready_after_polls: self.ready_after_polls,
                fail_screenshots: self.fail_screenshots,
                ..State::default()
            }),
        }
    }
}
