// Home page - entry point of the careers flow

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::diagnostics::ArtifactStore;
use crate::error::{AssertionFailure, Result};
use crate::locator::Locator;
use crate::pages::PageContext;
use crate::session::Session;
use crate::wait::{self, WaitCondition, WaitConfig};

/// Page object for the site's home page.
pub struct HomePage {
    ctx: PageContext,
}

impl HomePage {
    pub const URL: &'static str = "https://useinsider.com/";

    const LOGO: Locator = Locator::css("a.navbar-brand");
    const NAVIGATION: Locator = Locator::css("nav#navigation");
    const COMPANY_MENU: Locator = Locator::xpath("//a[contains(text(),'Company')]");
    const CAREERS_LINK: Locator = Locator::xpath("//a[text()='Careers']");
    const ACCEPT_COOKIES: Locator = Locator::id("wt-cli-accept-all-btn");

    /// Cap on how long the optional cookie overlay is waited for.
    const COOKIE_OVERLAY_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(session: Arc<dyn Session>, wait: WaitConfig, artifacts: ArtifactStore) -> Self {
        Self {
            ctx: PageContext::new(session, wait, artifacts),
        }
    }

    /// Navigates to the home page, waits for document completion, and
    /// dismisses the cookie-consent overlay if one shows up.
    pub async fn load(&self) -> Result<()> {
        self.ctx.session().navigate(Self::URL).await?;
        self.ctx.await_document_ready("home_page_load").await?;
        self.dismiss_cookie_consent_if_present().await;
        Ok(())
    }

    /// Accepts the cookie-consent overlay when present.
    ///
    /// Absence of the overlay is expected, not exceptional; this is the one
    /// place a failure is intentionally swallowed.
    async fn dismiss_cookie_consent_if_present(&self) {
        let cfg = self
            .ctx
            .wait()
            .with_timeout(self.ctx.wait().timeout.min(Self::COOKIE_OVERLAY_TIMEOUT));
        match wait::await_condition(
            self.ctx.session(),
            &Self::ACCEPT_COOKIES,
            WaitCondition::Clickable,
            cfg,
        )
        .await
        {
            Ok(element) => {
                if let Err(err) = self.ctx.session().click(&element).await {
                    debug!(%err, "cookie consent overlay found but could not be dismissed");
                }
            }
            Err(err) if err.is_timeout() => debug!("no cookie consent overlay"),
            Err(err) => debug!(%err, "cookie consent probe failed"),
        }
    }

    /// Succeeds only if both the logo and the navigation banner are visible
    /// within the configured timeout.
    pub async fn is_loaded(&self) -> Result<bool> {
        let timeout = self.ctx.wait().timeout;
        let logo = self.ctx.visible_within(&Self::LOGO, timeout).await?;
        let navigation = self.ctx.visible_within(&Self::NAVIGATION, timeout).await?;
        if logo && navigation {
            return Ok(true);
        }
        let detail = match (logo, navigation) {
            (false, false) => "logo and navigation banner not visible",
            (false, true) => "logo not visible",
            (true, false) => "navigation banner not visible",
            (true, true) => unreachable!(),
        };
        self.ctx
            .artifacts()
            .capture(self.ctx.session(), "home_page_load_failed")
            .await;
        Err(AssertionFailure::PageNotLoaded {
            page: "home",
            detail: detail.to_string(),
        }
        .into())
    }

    /// Opens the Company menu and follows the Careers link.
    pub async fn navigate_to_careers(&self) -> Result<()> {
        self.ctx
            .click(&Self::COMPANY_MENU, "navigate_to_careers_failed")
            .await?;
        self.ctx
            .click(&Self::CAREERS_LINK, "navigate_to_careers_failed")
            .await?;
        self.ctx.await_document_ready("navigate_to_careers_failed").await
    }
}
