// Integration tests for the careers flow page objects
//
// The whole flow runs against a scripted mock session: home page with cookie
// overlay, careers landing with a jobs trigger, filter dropdowns revealing a
// job list, and a view-role link opening the application-tracking page in a
// new tab.

use std::sync::Arc;
use std::time::Duration;

use pageflow::mock::{Effect, MockElement, MockSession};
use pageflow::{
    ApplicationRedirectPage, ArtifactStore, AssertionFailure, CareersPage, Error, HomePage,
    Locator, Session, WaitConfig, run_scenario,
};

const CAREERS_URL: &str = "https://useinsider.com/careers/quality-assurance/";
const LEVER_URL: &str = "https://jobs.lever.co/useinsider/qa-engineer";
const LOCATION_OPTION_XPATH: &str =
    "//select[@id='filter-by-location']/option[contains(text(), '{}')]";
const DEPARTMENT_OPTION_XPATH: &str =
    "//select[@id='filter-by-department']/option[contains(text(), '{}')]";

fn fast_wait() -> WaitConfig {
    WaitConfig::new()
        .with_timeout(Duration::from_millis(300))
        .with_poll_interval(Duration::from_millis(10))
}

fn cookie_locator() -> Locator {
    Locator::id("wt-cli-accept-all-btn")
}

/// Scripted replica of the careers flow. The second job's location is a
/// parameter so mismatch scenarios can be staged.
fn scripted_site(with_cookie_overlay: bool, second_job_location: &str) -> MockSession {
    let mut builder = MockSession::builder().window("about:blank");
    if with_cookie_overlay {
        builder = builder.element(MockElement::new(cookie_locator()).text("Accept All"));
    }
    builder = builder
        // Home page chrome
        .element(MockElement::new(Locator::css("a.navbar-brand")).text("Insider"))
        .element(MockElement::new(Locator::css("nav#navigation")))
        .element(MockElement::new(Locator::xpath("//a[contains(text(),'Company')]")).text("Company"))
        .element(
            MockElement::new(Locator::xpath("//a[text()='Careers']"))
                .text("Careers")
                .on_click(Effect::Navigate(CAREERS_URL.to_string())),
        )
        // Careers landing: the trigger reveals everything below
        .element(
            MockElement::new(Locator::xpath("//*[contains(text(),'See all QA jobs')]"))
                .text("See all QA jobs")
                .on_click(Effect::Reveal("jobs".to_string())),
        )
        .element(MockElement::new(Locator::id("filter-by-location")).revealed_by("jobs"))
        .element(
            MockElement::new(
                Locator::xpath_option(LOCATION_OPTION_XPATH, "Istanbul, Turkey").unwrap(),
            )
            .text("Istanbul, Turkey")
            .revealed_by("jobs"),
        )
        .element(MockElement::new(Locator::id("filter-by-department")).revealed_by("jobs"))
        .element(
            MockElement::new(
                Locator::xpath_option(DEPARTMENT_OPTION_XPATH, "Quality Assurance").unwrap(),
            )
            .text("Quality Assurance")
            .revealed_by("jobs"),
        );

    let jobs = [
        (
            "Senior Quality Assurance Engineer",
            "Quality Assurance",
            "Istanbul, Turkey",
        ),
        (
            "Quality Assurance Specialist",
            "Quality Assurance",
            second_job_location,
        ),
    ];
    for (index, (title, department, location)) in jobs.iter().enumerate() {
        builder = builder
            .element(MockElement::new(Locator::class("position-list-item")).revealed_by("jobs"))
            .element(
                MockElement::new(Locator::css(".position-list-item .position-title"))
                    .text(title)
                    .revealed_by("jobs"),
            )
            .element(
                MockElement::new(Locator::css(".position-list-item .position-department"))
                    .text(department)
                    .revealed_by("jobs"),
            )
            .element(
                MockElement::new(Locator::css(".position-list-item .position-location"))
                    .text(location)
                    .revealed_by("jobs"),
            );
        let mut link = MockElement::new(Locator::css(".position-list-item a"))
            .text("View Role")
            .revealed_by("jobs");
        if index == 0 {
            link = link.on_click(Effect::OpenWindow(LEVER_URL.to_string()));
        }
        builder = builder.element(link);
    }
    builder.build()
}

// ============================================================================
// The literal end-to-end scenario
// ============================================================================

#[tokio::test]
async fn full_careers_flow_passes_and_lands_on_lever() {
    let mock = Arc::new(scripted_site(true, "Istanbul, Turkey"));
    let session: Arc<dyn Session> = mock.clone();
    let dir = tempfile::tempdir().expect("tempdir");
    let artifacts = ArtifactStore::new(dir.path().join("shots"));
    let wait = fast_wait();

    let jobs_found = run_scenario(session, |session| {
        let artifacts = artifacts.clone();
        async move {
            let home = HomePage::new(Arc::clone(&session), wait, artifacts.clone());
            home.load().await?;
            home.is_loaded().await?;

            let careers = CareersPage::new(Arc::clone(&session), wait, artifacts.clone());
            careers.load_qa_careers().await?;
            careers.click_see_all_qa_jobs().await?;
            careers.filter_by_location("Istanbul, Turkey").await?;
            careers.filter_by_department("Quality Assurance").await?;

            let jobs = careers.get_job_list().await?;
            careers
                .verify_all_jobs_match_criteria("Quality Assurance", "Istanbul, Turkey")
                .await?;
            careers.click_view_role_for_first_job().await?;

            let application = ApplicationRedirectPage::new(session, wait, artifacts);
            application.is_on_expected_redirect_domain().await?;
            Ok(jobs.len())
        }
    })
    .await
    .expect("scenario should pass");

    assert_eq!(jobs_found, 2);
    assert_eq!(mock.close_calls(), 1, "session released exactly once");
    assert_eq!(mock.active_window(), 1, "followed the role tab");
    assert!(
        mock.clicks().contains(&cookie_locator()),
        "cookie overlay was dismissed"
    );
    // A green run leaves no diagnostics behind.
    assert!(!dir.path().join("shots").exists());
}

#[tokio::test]
async fn cookie_overlay_absence_is_not_an_error() {
    let mock = Arc::new(scripted_site(false, "Istanbul, Turkey"));
    let home = HomePage::new(
        mock.clone() as Arc<dyn Session>,
        fast_wait(),
        ArtifactStore::new(tempfile::tempdir().unwrap().path()),
    );

    home.load().await.expect("load succeeds without the overlay");
    assert!(home.is_loaded().await.expect("home page is loaded"));
    assert!(mock.clicks().is_empty());
}

// ============================================================================
// Failure paths
// ============================================================================

#[tokio::test]
async fn is_loaded_fails_with_diagnostic_when_logo_missing() {
    let mock = Arc::new(
        MockSession::builder()
            .window("https://useinsider.com/")
            .element(MockElement::new(Locator::css("nav#navigation")))
            .build(),
    );
    let dir = tempfile::tempdir().expect("tempdir");
    let shots = dir.path().join("shots");
    let wait = WaitConfig::new()
        .with_timeout(Duration::from_millis(40))
        .with_poll_interval(Duration::from_millis(10));
    let home = HomePage::new(mock as Arc<dyn Session>, wait, ArtifactStore::new(&shots));

    let err = home.is_loaded().await.expect_err("logo is missing");
    assert!(matches!(
        err,
        Error::Assertion(AssertionFailure::PageNotLoaded { page: "home", .. })
    ));

    let artifact = std::fs::read_dir(&shots)
        .expect("artifact dir exists")
        .next()
        .expect("one artifact written")
        .unwrap();
    assert!(
        artifact
            .file_name()
            .to_string_lossy()
            .starts_with("home_page_load_failed_")
    );
}

#[tokio::test]
async fn verify_reports_first_mismatching_job_and_field() {
    let mock = Arc::new(scripted_site(true, "Ankara, Turkey"));
    let session: Arc<dyn Session> = mock.clone();
    let dir = tempfile::tempdir().expect("tempdir");
    let shots = dir.path().join("shots");
    let wait = fast_wait();
    let careers = CareersPage::new(Arc::clone(&session), wait, ArtifactStore::new(&shots));

    careers.load_qa_careers().await.unwrap();
    careers.click_see_all_qa_jobs().await.unwrap();
    let err = careers
        .verify_all_jobs_match_criteria("Quality Assurance", "Istanbul, Turkey")
        .await
        .expect_err("second job is in the wrong location");

    match err {
        Error::Assertion(AssertionFailure::JobFieldMismatch {
            job_index,
            field,
            actual,
            expected,
        }) => {
            assert_eq!(job_index, 1);
            assert_eq!(field, "location");
            assert_eq!(actual, "Ankara, Turkey");
            assert_eq!(expected, "Istanbul, Turkey");
        }
        other => panic!("expected JobFieldMismatch, got {other:?}"),
    }

    let names: Vec<String> = std::fs::read_dir(&shots)
        .expect("artifact dir exists")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(
        names.iter().any(|name| name.starts_with("job_mismatch_1_")),
        "diagnostic tagged with the job index, got {names:?}"
    );
}

#[tokio::test]
async fn verify_fails_on_empty_job_list() {
    // Jobs never revealed: the trigger was not clicked.
    let mock = Arc::new(scripted_site(true, "Istanbul, Turkey"));
    let wait = WaitConfig::new()
        .with_timeout(Duration::from_millis(40))
        .with_poll_interval(Duration::from_millis(10));
    let careers = CareersPage::new(
        mock as Arc<dyn Session>,
        wait,
        ArtifactStore::new(tempfile::tempdir().unwrap().path().join("shots")),
    );

    let err = careers
        .verify_all_jobs_match_criteria("Quality Assurance", "Istanbul, Turkey")
        .await
        .expect_err("no jobs listed");
    assert!(matches!(err, Error::EmptyCollection { what: "job list" }));
}

#[tokio::test]
async fn wrong_redirect_domain_is_an_inspectable_assertion() {
    let mock = Arc::new(
        MockSession::builder()
            .window("https://useinsider.com/careers/open-positions/")
            .build(),
    );
    let dir = tempfile::tempdir().expect("tempdir");
    let application = ApplicationRedirectPage::new(
        mock as Arc<dyn Session>,
        fast_wait(),
        ArtifactStore::new(dir.path().join("shots")),
    );

    let err = application
        .is_on_expected_redirect_domain()
        .await
        .expect_err("not on the tracking domain");
    match err {
        Error::Assertion(AssertionFailure::UnexpectedDomain {
            actual_url,
            expected_fragment,
        }) => {
            assert!(actual_url.contains("useinsider.com"));
            assert_eq!(expected_fragment, "lever");
        }
        other => panic!("expected UnexpectedDomain, got {other:?}"),
    }
}

// ============================================================================
// Query semantics and lifecycle
// ============================================================================

#[tokio::test]
async fn get_job_list_is_idempotent_and_side_effect_free() {
    let mock = Arc::new(scripted_site(true, "Istanbul, Turkey"));
    let session: Arc<dyn Session> = mock.clone();
    let careers = CareersPage::new(
        Arc::clone(&session),
        fast_wait(),
        ArtifactStore::new(tempfile::tempdir().unwrap().path()),
    );

    careers.load_qa_careers().await.unwrap();
    careers.click_see_all_qa_jobs().await.unwrap();
    let clicks_before = mock.clicks().len();

    let first = careers.get_job_list().await.unwrap();
    let second = careers.get_job_list().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(mock.clicks().len(), clicks_before, "queries never click");
}

#[tokio::test]
async fn get_job_list_returns_empty_instead_of_failing() {
    let mock = Arc::new(MockSession::builder().build());
    let wait = WaitConfig::new()
        .with_timeout(Duration::from_millis(30))
        .with_poll_interval(Duration::from_millis(10));
    let careers = CareersPage::new(
        mock as Arc<dyn Session>,
        wait,
        ArtifactStore::new(tempfile::tempdir().unwrap().path()),
    );

    let jobs = careers.get_job_list().await.expect("empty list is not an error");
    assert!(jobs.is_empty());
}

#[tokio::test]
async fn session_is_released_once_even_when_a_step_fails() {
    let mock = Arc::new(scripted_site(true, "Istanbul, Turkey"));
    let session: Arc<dyn Session> = mock.clone();
    let wait = fast_wait();
    let dir = tempfile::tempdir().expect("tempdir");
    let artifacts = ArtifactStore::new(dir.path().join("shots"));

    let err = run_scenario(session, |session| {
        let artifacts = artifacts.clone();
        async move {
            let home = HomePage::new(Arc::clone(&session), wait, artifacts.clone());
            home.load().await?;
            // Forced failure mid-scenario.
            Err::<(), Error>(Error::EmptyCollection { what: "job list" })
        }
    })
    .await
    .expect_err("forced failure propagates");

    assert!(matches!(err, Error::EmptyCollection { what: "job list" }));
    assert_eq!(mock.close_calls(), 1, "session still released exactly once");
}

#[tokio::test]
async fn navigate_to_careers_clicks_menu_then_link() {
    let mock = Arc::new(scripted_site(false, "Istanbul, Turkey"));
    let session: Arc<dyn Session> = mock.clone();
    let home = HomePage::new(
        Arc::clone(&session),
        fast_wait(),
        ArtifactStore::new(tempfile::tempdir().unwrap().path()),
    );

    home.load().await.unwrap();
    home.navigate_to_careers().await.unwrap();

    let clicks = mock.clicks();
    assert_eq!(
        clicks,
        vec![
            Locator::xpath("//a[contains(text(),'Company')]"),
            Locator::xpath("//a[text()='Careers']"),
        ]
    );
    assert_eq!(session.current_url().await.unwrap(), CAREERS_URL);
}
