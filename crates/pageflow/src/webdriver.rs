// WebDriver session - fantoccini-backed Session implementation
//
// Talks to a chromedriver/geckodriver endpoint over the WebDriver protocol.
// Resolved elements live in a guid registry so the rest of the layer only
// ever sees opaque refs; the registry is dropped on navigation, matching the
// re-resolve-every-action discipline of the page objects.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator as WdLocator};
use parking_lot::Mutex;
use serde_json::json;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::locator::{Locator, Strategy};
use crate::session::{ElementRef, Session, WindowRef};

/// Browser selected for the remote session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chrome,
    Firefox,
}

impl BrowserKind {
    /// Conventional local endpoint for this browser's driver.
    pub const fn default_webdriver_url(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "http://localhost:9515",
            BrowserKind::Firefox => "http://localhost:4444",
        }
    }

    const fn browser_name(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "chrome" | "chromium" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            other => Err(Error::Driver(format!(
                "unsupported browser {other:?}, use chrome or firefox"
            ))),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.browser_name())
    }
}

/// Connection settings for a WebDriver-backed session.
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    pub browser: BrowserKind,
    pub webdriver_url: Option<String>,
    pub headless: bool,
    pub window_size: Option<(u32, u32)>,
}

impl WebDriverConfig {
    pub fn new(browser: BrowserKind) -> Self {
        Self {
            browser,
            webdriver_url: None,
            headless: true,
            window_size: Some((1920, 1080)),
        }
    }

    #[must_use]
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.webdriver_url = Some(url.to_string());
        self
    }

    #[must_use]
    pub fn headed(mut self) -> Self {
        self.headless = false;
        self
    }

    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some((width, height));
        self
    }

    fn capabilities(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut caps = serde_json::Map::new();
        caps.insert(
            "browserName".to_string(),
            json!(self.browser.browser_name()),
        );
        match self.browser {
            BrowserKind::Chrome => {
                let mut args = vec![
                    "--no-sandbox".to_string(),
                    "--disable-blink-features=AutomationControlled".to_string(),
                ];
                if self.headless {
                    args.push("--headless=new".to_string());
                    args.push("--disable-gpu".to_string());
                    args.push("--disable-dev-shm-usage".to_string());
                }
                if let Some((w, h)) = self.window_size {
                    args.push(format!("--window-size={w},{h}"));
                }
                caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
            }
            BrowserKind::Firefox => {
                let mut args = Vec::new();
                if self.headless {
                    args.push("-headless".to_string());
                }
                if let Some((w, h)) = self.window_size {
                    args.push(format!("--width={w}"));
                    args.push(format!("--height={h}"));
                }
                caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
            }
        }
        caps
    }
}

#[derive(Default)]
struct ElementRegistry {
    next_id: u64,
    by_ref: HashMap<String, Element>,
}

impl ElementRegistry {
    fn insert(&mut self, element: Element) -> ElementRef {
        let id = format!("el-{}", self.next_id);
        self.next_id += 1;
        self.by_ref.insert(id.clone(), element);
        ElementRef::new(id)
    }

    fn get(&self, element: &ElementRef) -> Option<Element> {
        self.by_ref.get(element.id()).cloned()
    }

    fn clear(&mut self) {
        self.by_ref.clear();
    }
}

/// [`Session`] over a live WebDriver endpoint.
pub struct WebDriverSession {
    client: Client,
    elements: Mutex<ElementRegistry>,
}

impl WebDriverSession {
    /// Connects to the configured WebDriver endpoint and starts a session.
    pub async fn connect(cfg: &WebDriverConfig) -> Result<Self> {
        let url = cfg
            .webdriver_url
            .clone()
            .unwrap_or_else(|| cfg.browser.default_webdriver_url().to_string());
        info!(%url, browser = %cfg.browser, headless = cfg.headless, "connecting to WebDriver");
        let client = ClientBuilder::rustls()
            .capabilities(cfg.capabilities())
            .connect(&url)
            .await
            .map_err(|err| {
                Error::Driver(format!("failed to connect to WebDriver at {url}: {err}"))
            })?;
        Ok(Self {
            client,
            elements: Mutex::new(ElementRegistry::default()),
        })
    }

    fn element(&self, element: &ElementRef) -> Result<Element> {
        self.elements
            .lock()
            .get(element)
            .ok_or_else(|| Error::Driver(format!("unknown element ref {:?}", element.id())))
    }
}

fn cmd_err(err: fantoccini::error::CmdError) -> Error {
    Error::Driver(err.to_string())
}

#[async_trait]
impl Session for WebDriverSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        // Old refs cannot survive a navigation.
        self.elements.lock().clear();
        debug!(url, "navigate");
        self.client.goto(url).await.map_err(cmd_err)
    }

    async fn resolve(&self, locator: &Locator) -> Result<Vec<ElementRef>> {
        let found = match locator.strategy() {
            Strategy::Id => {
                self.client
                    .find_all(WdLocator::Id(locator.selector()))
                    .await
            }
            Strategy::Css => {
                self.client
                    .find_all(WdLocator::Css(locator.selector()))
                    .await
            }
            Strategy::XPath => {
                self.client
                    .find_all(WdLocator::XPath(locator.selector()))
                    .await
            }
            Strategy::Class => {
                let css = format!(".{}", locator.selector());
                self.client.find_all(WdLocator::Css(&css)).await
            }
        }
        .map_err(cmd_err)?;
        let mut registry = self.elements.lock();
        Ok(found
            .into_iter()
            .map(|element| registry.insert(element))
            .collect())
    }

    async fn click(&self, element: &ElementRef) -> Result<()> {
        self.element(element)?.click().await.map_err(cmd_err)
    }

    async fn read_text(&self, element: &ElementRef) -> Result<String> {
        self.element(element)?.text().await.map_err(cmd_err)
    }

    async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()> {
        self.element(element)?.send_keys(text).await.map_err(cmd_err)
    }

    async fn is_displayed(&self, element: &ElementRef) -> Result<bool> {
        self.element(element)?.is_displayed().await.map_err(cmd_err)
    }

    async fn is_enabled(&self, element: &ElementRef) -> Result<bool> {
        // The disabled attribute is the observable side of enabledness over
        // the wire.
        let disabled = self
            .element(element)?
            .attr("disabled")
            .await
            .map_err(cmd_err)?;
        Ok(disabled.is_none())
    }

    async fn execute_script(&self, script: &str) -> Result<serde_json::Value> {
        self.client
            .execute(script, Vec::new())
            .await
            .map_err(cmd_err)
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.client.current_url().await.map_err(cmd_err)?.to_string())
    }

    async fn window_handles(&self) -> Result<Vec<WindowRef>> {
        let windows = self.client.windows().await.map_err(cmd_err)?;
        Ok((0..windows.len()).map(|i| i.to_string()).collect())
    }

    async fn switch_window(&self, window: &WindowRef) -> Result<()> {
        let idx: usize = window
            .parse()
            .map_err(|_| Error::Driver(format!("unknown window ref {window:?}")))?;
        let windows = self.client.windows().await.map_err(cmd_err)?;
        let target = windows
            .into_iter()
            .nth(idx)
            .ok_or_else(|| Error::Driver(format!("window ref {window:?} out of range")))?;
        // Fresh window, fresh document; resolved refs do not carry over.
        self.elements.lock().clear();
        self.client.switch_to_window(target).await.map_err(cmd_err)
    }

    async fn screenshot_png(&self) -> Result<Vec<u8>> {
        self.client.screenshot().await.map_err(cmd_err)
    }

    async fn close(&self) -> Result<()> {
        self.client.clone().close().await.map_err(cmd_err)
    }
}
