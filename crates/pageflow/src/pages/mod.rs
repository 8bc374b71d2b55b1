// Page objects - one per logical page/state
//
// Each page object composes the locator registry and the wait primitive into
// named actions and queries. Pages share a PageContext holding the session
// handle (shared, scenario-owned), the explicit wait configuration, and the
// artifact store; they carry no other state and never retain element refs
// across actions.

mod application;
mod careers;
mod home;

pub use application::ApplicationRedirectPage;
pub use careers::{CareersPage, JobHandle};
pub use home::HomePage;

use std::sync::Arc;
use std::time::Duration;

use crate::diagnostics::ArtifactStore;
use crate::error::Result;
use crate::locator::Locator;
use crate::session::Session;
use crate::wait::{self, WaitCondition, WaitConfig};

/// Shared plumbing behind every page object.
#[derive(Clone)]
pub struct PageContext {
    session: Arc<dyn Session>,
    wait: WaitConfig,
    artifacts: ArtifactStore,
}

impl PageContext {
    pub fn new(session: Arc<dyn Session>, wait: WaitConfig, artifacts: ArtifactStore) -> Self {
        Self {
            session,
            wait,
            artifacts,
        }
    }

    pub fn session(&self) -> &dyn Session {
        self.session.as_ref()
    }

    pub fn wait(&self) -> WaitConfig {
        self.wait
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Waits for `locator` to become clickable, then clicks it. On failure,
    /// captures a diagnostic tagged `context` and re-signals unchanged.
    pub(crate) async fn click(&self, locator: &Locator, context: &str) -> Result<()> {
        let result = self.try_click(locator).await;
        self.artifacts
            .capture_on_failure(self.session(), context, result)
            .await
    }

    async fn try_click(&self, locator: &Locator) -> Result<()> {
        let element =
            wait::await_condition(self.session(), locator, WaitCondition::Clickable, self.wait)
                .await?;
        self.session.click(&element).await
    }

    /// Whether `locator` becomes visible within `timeout`. A timeout maps to
    /// `Ok(false)`; driver errors still propagate.
    pub(crate) async fn visible_within(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<bool> {
        let cfg = self.wait.with_timeout(timeout);
        match wait::await_condition(self.session(), locator, WaitCondition::Visible, cfg).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_timeout() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Waits for the document to report readyState `complete`, capturing a
    /// diagnostic on timeout.
    pub(crate) async fn await_document_ready(&self, context: &str) -> Result<()> {
        let result = wait::await_document_ready(self.session(), self.wait).await;
        self.artifacts
            .capture_on_failure(self.session(), context, result)
            .await
    }
}
