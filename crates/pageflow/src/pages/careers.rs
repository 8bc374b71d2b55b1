// Careers listing page - Landing, Jobs-Visible, Filtered, Role-Selected
//
// Every transition is gated by a condition wait on the state actually being
// entered (job items present, option clickable, window opened); there are no
// render-delay sleeps.

use std::sync::Arc;

use tracing::{debug, info};

use crate::diagnostics::ArtifactStore;
use crate::error::{AssertionFailure, Error, Result};
use crate::locator::Locator;
use crate::pages::PageContext;
use crate::session::Session;
use crate::wait::{self, WaitCondition, WaitConfig};

/// Read-only reference to one listed job, by position in the list.
///
/// Deliberately carries no element ref: job elements are re-resolved on
/// every action so a filter-triggered re-render cannot leave a stale handle
/// behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobHandle {
    index: usize,
}

impl JobHandle {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Page object for the QA careers listing.
pub struct CareersPage {
    ctx: PageContext,
}

impl CareersPage {
    pub const QA_CAREERS_URL: &'static str = "https://useinsider.com/careers/quality-assurance/";

    const SEE_ALL_QA_JOBS: Locator = Locator::xpath("//*[contains(text(),'See all QA jobs')]");
    const FILTER_BY_LOCATION: Locator = Locator::id("filter-by-location");
    const FILTER_BY_DEPARTMENT: Locator = Locator::id("filter-by-department");
    const JOB_ITEM: Locator = Locator::class("position-list-item");
    const POSITION_TITLES: Locator = Locator::css(".position-list-item .position-title");
    const POSITION_DEPARTMENTS: Locator = Locator::css(".position-list-item .position-department");
    const POSITION_LOCATIONS: Locator = Locator::css(".position-list-item .position-location");
    const VIEW_ROLE_LINKS: Locator = Locator::css(".position-list-item a");

    const LOCATION_OPTION: &'static str =
        "//select[@id='filter-by-location']/option[contains(text(), '{}')]";
    const DEPARTMENT_OPTION: &'static str =
        "//select[@id='filter-by-department']/option[contains(text(), '{}')]";

    pub fn new(session: Arc<dyn Session>, wait: WaitConfig, artifacts: ArtifactStore) -> Self {
        Self {
            ctx: PageContext::new(session, wait, artifacts),
        }
    }

    /// Direct navigation to the QA careers landing page.
    pub async fn load_qa_careers(&self) -> Result<()> {
        self.ctx.session().navigate(Self::QA_CAREERS_URL).await?;
        self.ctx.await_document_ready("load_qa_careers_failed").await
    }

    /// Landing -> Jobs-Visible: clicks the jobs trigger and waits for the
    /// job list to show up.
    pub async fn click_see_all_qa_jobs(&self) -> Result<()> {
        self.ctx
            .click(&Self::SEE_ALL_QA_JOBS, "click_see_all_qa_jobs_failed")
            .await?;
        let result = wait::await_condition(
            self.ctx.session(),
            &Self::JOB_ITEM,
            WaitCondition::Present,
            self.ctx.wait(),
        )
        .await
        .map(drop);
        self.ctx
            .artifacts()
            .capture_on_failure(self.ctx.session(), "click_see_all_qa_jobs_failed", result)
            .await
    }

    /// Filters the job list by location display text.
    pub async fn filter_by_location(&self, location: &str) -> Result<()> {
        self.apply_filter(
            &Self::FILTER_BY_LOCATION,
            Self::LOCATION_OPTION,
            location,
            "filter_by_location_failed",
        )
        .await
    }

    /// Filters the job list by department display text.
    pub async fn filter_by_department(&self, department: &str) -> Result<()> {
        self.apply_filter(
            &Self::FILTER_BY_DEPARTMENT,
            Self::DEPARTMENT_OPTION,
            department,
            "filter_by_department_failed",
        )
        .await
    }

    /// Opens a filter dropdown, selects the option whose visible text
    /// contains `value` (case- and substring-sensitive), then waits for the
    /// job list to repopulate.
    async fn apply_filter(
        &self,
        dropdown: &Locator,
        option_template: &'static str,
        value: &str,
        context: &str,
    ) -> Result<()> {
        let result = self.try_apply_filter(dropdown, option_template, value).await;
        self.ctx
            .artifacts()
            .capture_on_failure(self.ctx.session(), context, result)
            .await
    }

    async fn try_apply_filter(
        &self,
        dropdown: &Locator,
        option_template: &'static str,
        value: &str,
    ) -> Result<()> {
        let option = Locator::xpath_option(option_template, value)?;
        let session = self.ctx.session();
        let opened =
            wait::await_condition(session, dropdown, WaitCondition::Clickable, self.ctx.wait())
                .await?;
        session.click(&opened).await?;
        let choice =
            wait::await_condition(session, &option, WaitCondition::Clickable, self.ctx.wait())
                .await?;
        session.click(&choice).await?;
        // The filtered list loads asynchronously; wait for it rather than
        // for an assumed render delay.
        wait::await_count_at_least(session, &Self::JOB_ITEM, 1, self.ctx.wait()).await?;
        debug!(value, "filter applied");
        Ok(())
    }

    /// Snapshot of the current job list.
    ///
    /// Waits once for at least one job item or timeout, then returns however
    /// many are there; an empty list is a valid result, never an error.
    /// Idempotent and side-effect-free.
    pub async fn get_job_list(&self) -> Result<Vec<JobHandle>> {
        let elements = match wait::await_count_at_least(
            self.ctx.session(),
            &Self::JOB_ITEM,
            1,
            self.ctx.wait(),
        )
        .await
        {
            Ok(elements) => elements,
            Err(err) if err.is_timeout() => Vec::new(),
            Err(err) => return Err(err),
        };
        Ok((0..elements.len()).map(|index| JobHandle { index }).collect())
    }

    /// Asserts every listed job matches the active filters.
    ///
    /// Position and department texts must contain `department`; location
    /// text must contain `location`. The first mismatch fails with an
    /// indexed diagnostic; an empty job list is itself a failure.
    pub async fn verify_all_jobs_match_criteria(
        &self,
        department: &str,
        location: &str,
    ) -> Result<()> {
        let jobs = self.get_job_list().await?;
        if jobs.is_empty() {
            self.ctx
                .artifacts()
                .capture(self.ctx.session(), "no_jobs_found")
                .await;
            return Err(Error::EmptyCollection { what: "job list" });
        }
        info!(count = jobs.len(), "verifying listed jobs against filters");

        let titles = self.column_texts(&Self::POSITION_TITLES).await?;
        let departments = self.column_texts(&Self::POSITION_DEPARTMENTS).await?;
        let locations = self.column_texts(&Self::POSITION_LOCATIONS).await?;

        for job in &jobs {
            let checks: [(&'static str, &[String], &str); 3] = [
                ("position", &titles, department),
                ("department", &departments, department),
                ("location", &locations, location),
            ];
            for (field, texts, expected) in checks {
                let actual = texts.get(job.index()).cloned().unwrap_or_default();
                if !actual.contains(expected) {
                    self.ctx
                        .artifacts()
                        .capture(
                            self.ctx.session(),
                            &format!("job_mismatch_{}", job.index()),
                        )
                        .await;
                    return Err(AssertionFailure::JobFieldMismatch {
                        job_index: job.index(),
                        field,
                        actual,
                        expected: expected.to_string(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Filtered -> Role-Selected: opens the first job's role page, which the
    /// site serves in a new tab, and follows the session there.
    pub async fn click_view_role_for_first_job(&self) -> Result<()> {
        let result = self.try_click_view_role().await;
        self.ctx
            .artifacts()
            .capture_on_failure(self.ctx.session(), "click_view_role_failed", result)
            .await
    }

    async fn try_click_view_role(&self) -> Result<()> {
        let jobs = self.get_job_list().await?;
        if jobs.is_empty() {
            return Err(Error::EmptyCollection { what: "job list" });
        }
        let session = self.ctx.session();
        session
            .execute_script(&format!(
                "document.querySelectorAll('{}')[0].scrollIntoView({{block: 'center'}});",
                Self::VIEW_ROLE_LINKS.selector()
            ))
            .await?;
        let link = wait::await_condition(
            session,
            &Self::VIEW_ROLE_LINKS,
            WaitCondition::Clickable,
            self.ctx.wait(),
        )
        .await?;
        session.click(&link).await?;
        // The role page opens in a new tab; the freshest handle is last.
        let handles = session.window_handles().await?;
        match handles.last() {
            Some(newest) => session.switch_window(newest).await,
            None => Err(Error::Driver("no windows after view-role click".to_string())),
        }
    }

    async fn column_texts(&self, locator: &Locator) -> Result<Vec<String>> {
        let session = self.ctx.session();
        let elements = session.resolve(locator).await?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in &elements {
            texts.push(session.read_text(element).await?);
        }
        Ok(texts)
    }
}
