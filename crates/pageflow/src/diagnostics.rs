// Diagnostic capture - failure-time screenshots
//
// On any action failure a timestamped artifact is written before the failure
// is re-signaled. Capture itself never fails outward: a capture problem is
// logged and swallowed so it cannot mask the failure being diagnosed.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use crate::error::Result;
use crate::session::Session;

/// Default artifact directory, relative to the working directory.
pub const DEFAULT_ARTIFACT_DIR: &str = "screenshots";

/// Write-once store for visual diagnostics.
///
/// Filenames follow `{context}_{YYYYMMDD_HHMMSS}.png`; artifacts are never
/// read back by this layer.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACT_DIR)
    }
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Captures a screenshot of the current remote-rendered state.
    ///
    /// Best-effort by contract: returns the artifact path on success and
    /// `None` on any failure (screenshot, directory creation, write), after
    /// logging a warning. Never propagates an error.
    pub async fn capture(&self, session: &dyn Session, context: &str) -> Option<PathBuf> {
        match self.try_capture(session, context).await {
            Ok(path) => {
                info!(context, path = %path.display(), "diagnostic captured");
                Some(path)
            }
            Err(err) => {
                warn!(context, %err, "diagnostic capture failed");
                None
            }
        }
    }

    /// Captures on failure, then re-signals the original failure unchanged.
    pub async fn capture_on_failure<T>(
        &self,
        session: &dyn Session,
        context: &str,
        result: Result<T>,
    ) -> Result<T> {
        if result.is_err() {
            self.capture(session, context).await;
        }
        result
    }

    async fn try_capture(&self, session: &dyn Session, context: &str) -> Result<PathBuf> {
        let png = session.screenshot_png().await?;
        std::fs::create_dir_all(&self.dir)?;
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self.dir.join(format!("{context}_{stamp}.png"));
        std::fs::write(&path, png)?;
        Ok(path)
    }
}
