//! pageflow: page-object automation layer for browser UI test scenarios
//!
//! A thin, explicit layer between test scenarios and a remote WebDriver
//! session:
//!
//! - [`locator`]: immutable (strategy, selector) pairs, declared per page,
//!   plus validated runtime construction for dropdown options.
//! - [`wait`]: the condition-polling primitive ([`wait::await_condition`])
//!   that absorbs client-rendered page updates; the only waiting mechanism
//!   in the layer, with no fixed sleeps.
//! - [`pages`]: page objects for the careers flow (home, careers listing,
//!   external application redirect), each owning its locators and an
//!   explicit [`wait::WaitConfig`].
//! - [`diagnostics`]: best-effort failure screenshots that never mask the
//!   failure being diagnosed.
//! - [`scenario`]: runs a sequence of page-object steps and releases the
//!   session on every path.
//! - [`session`]: the driver boundary as a trait; [`webdriver`] implements
//!   it over fantoccini, [`mock`] scripts it in memory for tests.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pageflow::{
//!     ArtifactStore, BrowserKind, CareersPage, HomePage, WaitConfig,
//!     WebDriverConfig, WebDriverSession, run_scenario,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let session = Arc::new(
//!         WebDriverSession::connect(&WebDriverConfig::new(BrowserKind::Chrome)).await?,
//!     );
//!     let wait = WaitConfig::default();
//!     let artifacts = ArtifactStore::default();
//!
//!     run_scenario(session, |session| async move {
//!         let home = HomePage::new(Arc::clone(&session), wait, artifacts.clone());
//!         home.load().await?;
//!         home.is_loaded().await?;
//!
//!         let careers = CareersPage::new(session, wait, artifacts.clone());
//!         careers.load_qa_careers().await?;
//!         careers.click_see_all_qa_jobs().await?;
//!         careers.filter_by_location("Istanbul, Turkey").await?;
//!         careers.filter_by_department("Quality Assurance").await?;
//!         careers
//!             .verify_all_jobs_match_criteria("Quality Assurance", "Istanbul, Turkey")
//!             .await
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```

pub mod diagnostics;
pub mod error;
pub mod locator;
pub mod mock;
pub mod pages;
pub mod scenario;
pub mod session;
pub mod wait;

#[cfg(feature = "webdriver")]
pub mod webdriver;

pub use diagnostics::{ArtifactStore, DEFAULT_ARTIFACT_DIR};
pub use error::{AssertionFailure, Error, Result};
pub use locator::{Locator, Strategy};
pub use pages::{ApplicationRedirectPage, CareersPage, HomePage, JobHandle, PageContext};
pub use scenario::run_scenario;
pub use session::{ElementRef, Session, WindowRef};
pub use wait::{WaitCondition, WaitConfig, await_condition, await_count_at_least};

#[cfg(feature = "webdriver")]
pub use webdriver::{BrowserKind, WebDriverConfig, WebDriverSession};
