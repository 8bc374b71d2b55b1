// Wait/retry primitive - condition-based polling against the remote document
//
// The sole mechanism by which this layer tolerates client-rendered page
// updates (filter application, AJAX-loaded lists, new-tab redirects). There
// are no fixed sleeps anywhere: every wait is tied to the state transition
// actually being awaited.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::session::{ElementRef, Session};

/// Default wait window for element conditions.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default polling interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Predicate over a located element's state, polled until true or timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitCondition {
    /// At least one element matches the locator.
    Present,
    /// A matching element is rendered visible.
    Visible,
    /// A matching element is visible and enabled.
    Clickable,
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WaitCondition::Present => "present",
            WaitCondition::Visible => "visible",
            WaitCondition::Clickable => "clickable",
        })
    }
}

/// Explicit wait configuration, passed to each page object at construction.
///
/// There is deliberately no process-wide default-timeout state; whoever
/// builds the page objects decides how patient they are.
#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Polls the document until `condition` holds for an element matching
/// `locator`, or the timeout elapses, whichever comes first.
///
/// Returns the first matching element once the condition holds; on timeout
/// fails with [`Error::Timeout`] and never returns a partial handle. The
/// condition is always probed at least once, so a zero timeout still
/// observes the current state.
pub async fn await_condition(
    session: &dyn Session,
    locator: &Locator,
    condition: WaitCondition,
    cfg: WaitConfig,
) -> Result<ElementRef> {
    let started = Instant::now();
    loop {
        if let Some(element) = probe(session, locator, condition).await? {
            return Ok(element);
        }
        if started.elapsed() >= cfg.timeout {
            return Err(Error::Timeout {
                locator: locator.clone(),
                condition,
                elapsed: started.elapsed(),
            });
        }
        trace!(%locator, %condition, "condition not met yet, polling");
        tokio::time::sleep(cfg.poll_interval).await;
    }
}

/// Polls until at least `count` elements match `locator`.
///
/// Condition-based replacement for "sleep after the filter click": waits for
/// the list repopulation itself rather than an assumed render delay.
pub async fn await_count_at_least(
    session: &dyn Session,
    locator: &Locator,
    count: usize,
    cfg: WaitConfig,
) -> Result<Vec<ElementRef>> {
    let started = Instant::now();
    loop {
        let elements = session.resolve(locator).await?;
        if elements.len() >= count {
            return Ok(elements);
        }
        if started.elapsed() >= cfg.timeout {
            return Err(Error::Timeout {
                locator: locator.clone(),
                condition: WaitCondition::Present,
                elapsed: started.elapsed(),
            });
        }
        tokio::time::sleep(cfg.poll_interval).await;
    }
}

/// Polls `document.readyState` until the document reports `complete`.
pub async fn await_document_ready(session: &dyn Session, cfg: WaitConfig) -> Result<()> {
    let started = Instant::now();
    loop {
        let state = session
            .execute_script("return document.readyState")
            .await?;
        if state.as_str() == Some("complete") {
            return Ok(());
        }
        if started.elapsed() >= cfg.timeout {
            let url = session.current_url().await.unwrap_or_default();
            return Err(Error::NavigationTimeout {
                url,
                elapsed: started.elapsed(),
            });
        }
        tokio::time::sleep(cfg.poll_interval).await;
    }
}

async fn probe(
    session: &dyn Session,
    locator: &Locator,
    condition: WaitCondition,
) -> Result<Option<ElementRef>> {
    let elements = session.resolve(locator).await?;
    let Some(first) = elements.into_iter().next() else {
        return Ok(None);
    };
    let holds = match condition {
        WaitCondition::Present => true,
        WaitCondition::Visible => session.is_displayed(&first).await?,
        WaitCondition::Clickable => {
            session.is_displayed(&first).await? && session.is_enabled(&first).await?
        }
    };
    Ok(holds.then_some(first))
}
