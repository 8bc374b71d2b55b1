// External application redirect - hand-off to the application tracking system

use std::sync::Arc;

use url::Url;

use crate::diagnostics::ArtifactStore;
use crate::error::{AssertionFailure, Error, Result};
use crate::pages::PageContext;
use crate::session::Session;
use crate::wait::WaitConfig;

/// Domain fragment the application-tracking redirect is expected to land on.
pub const DEFAULT_REDIRECT_FRAGMENT: &str = "lever";

/// Page object for the third-party application page a role redirects to.
///
/// Models verifying the hand-off only; the external system itself stays
/// unmodeled.
pub struct ApplicationRedirectPage {
    ctx: PageContext,
    expected_fragment: String,
}

impl ApplicationRedirectPage {
    pub fn new(session: Arc<dyn Session>, wait: WaitConfig, artifacts: ArtifactStore) -> Self {
        Self {
            ctx: PageContext::new(session, wait, artifacts),
            expected_fragment: DEFAULT_REDIRECT_FRAGMENT.to_string(),
        }
    }

    /// Overrides the expected domain fragment.
    #[must_use]
    pub fn with_expected_fragment(mut self, fragment: &str) -> Self {
        self.expected_fragment = fragment.to_string();
        self
    }

    /// Succeeds only if the current URL contains the expected third-party
    /// domain fragment (case-insensitive).
    pub async fn is_on_expected_redirect_domain(&self) -> Result<bool> {
        let raw = self.ctx.session().current_url().await?;
        let parsed = Url::parse(&raw)
            .map_err(|err| Error::Driver(format!("driver returned invalid url {raw:?}: {err}")))?;
        if parsed
            .as_str()
            .to_lowercase()
            .contains(&self.expected_fragment.to_lowercase())
        {
            return Ok(true);
        }
        self.ctx
            .artifacts()
            .capture(self.ctx.session(), "redirect_domain_mismatch")
            .await;
        Err(AssertionFailure::UnexpectedDomain {
            actual_url: raw,
            expected_fragment: self.expected_fragment.clone(),
        }
        .into())
    }
}
