// Session - the remote driver boundary
//
// Everything the page-object layer needs from a browser driver, expressed as
// one async trait. Elements and windows are addressed by opaque refs handed
// out by the session, never by driver-native handles, so implementations can
// keep their own registry (the WebDriver backend does) and tests can script
// a page model without a browser.

use async_trait::async_trait;

use crate::error::Result;
use crate::locator::Locator;

/// Opaque reference to a resolved element.
///
/// Valid until the next navigation; page objects re-resolve their locators
/// on every action instead of holding one of these across steps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(String);

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Opaque reference to a browser window or tab, in handle order.
pub type WindowRef = String;

/// Remote session boundary.
///
/// One session drives one linear sequence of page-object actions; the
/// session is exclusively owned by the enclosing scenario and closed
/// unconditionally when the scenario ends (see [`crate::scenario`]).
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigates the active window to `url`.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Resolves all elements currently matching `locator`, in document order.
    async fn resolve(&self, locator: &Locator) -> Result<Vec<ElementRef>>;

    /// Clicks a resolved element.
    async fn click(&self, element: &ElementRef) -> Result<()>;

    /// Reads the rendered text of a resolved element.
    async fn read_text(&self, element: &ElementRef) -> Result<String>;

    /// Types text into a resolved element.
    async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()>;

    /// Whether the element is rendered visible.
    async fn is_displayed(&self, element: &ElementRef) -> Result<bool>;

    /// Whether the element accepts interaction.
    async fn is_enabled(&self, element: &ElementRef) -> Result<bool>;

    /// Executes a script in the page and returns its JSON result.
    async fn execute_script(&self, script: &str) -> Result<serde_json::Value>;

    /// URL of the active window.
    async fn current_url(&self) -> Result<String>;

    /// All window refs, oldest first; the most recently opened is last.
    async fn window_handles(&self) -> Result<Vec<WindowRef>>;

    /// Makes `window` the active window for subsequent calls.
    async fn switch_window(&self, window: &WindowRef) -> Result<()>;

    /// PNG snapshot of the active window's rendered state.
    async fn screenshot_png(&self) -> Result<Vec<u8>>;

    /// Releases the remote session. Idempotence is not required; callers go
    /// through [`crate::scenario::run_scenario`], which closes exactly once.
    async fn close(&self) -> Result<()>;
}
