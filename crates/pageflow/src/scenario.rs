// Scenario lifecycle - session release on all paths
//
// One remote session drives one linear sequence of page-object actions. The
// session is closed unconditionally when the steps finish, pass or fail;
// this release-on-all-paths discipline is the one correctness property the
// layer must preserve.

use std::future::Future;
use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::session::Session;

/// Runs a scenario's steps, then closes the session exactly once.
///
/// The step outcome wins: a failing step is returned as-is even when the
/// close also fails (the close error is logged). A close failure after a
/// green run is surfaced, since it means the remote session leaked.
pub async fn run_scenario<T, F, Fut>(session: Arc<dyn Session>, steps: F) -> Result<T>
where
    F: FnOnce(Arc<dyn Session>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let outcome = steps(Arc::clone(&session)).await;
    let closed = session.close().await;
    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(step_err), Ok(())) => Err(step_err),
        (Err(step_err), Err(close_err)) => {
            warn!(%close_err, "session close failed after scenario failure");
            Err(step_err)
        }
    }
}
