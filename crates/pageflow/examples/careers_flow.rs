// Careers flow demo - end-to-end scenario against a live WebDriver
//
// Requires a running chromedriver (port 9515) or geckodriver (port 4444):
//   cargo run --example careers_flow -- --browser chrome

use std::sync::Arc;

use clap::Parser;
use pageflow::{
    ApplicationRedirectPage, ArtifactStore, BrowserKind, CareersPage, HomePage, Session,
    WaitConfig, WebDriverConfig, WebDriverSession, run_scenario,
};

#[derive(Parser)]
#[command(about = "End-to-end careers flow against a live WebDriver endpoint")]
struct Args {
    /// Browser to drive: chrome or firefox
    #[arg(long, default_value = "chrome")]
    browser: BrowserKind,

    /// WebDriver endpoint; defaults to the browser's conventional port
    #[arg(long)]
    webdriver_url: Option<String>,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,

    /// Location filter applied to the job list
    #[arg(long, default_value = "Istanbul, Turkey")]
    location: String,

    /// Department filter applied to the job list
    #[arg(long, default_value = "Quality Assurance")]
    department: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut cfg = WebDriverConfig::new(args.browser);
    if let Some(url) = &args.webdriver_url {
        cfg = cfg.with_webdriver_url(url);
    }
    if args.headed {
        cfg = cfg.headed();
    }

    let session: Arc<dyn Session> = Arc::new(WebDriverSession::connect(&cfg).await?);
    let wait = WaitConfig::default();
    let artifacts = ArtifactStore::default();

    let location = args.location.clone();
    let department = args.department.clone();
    run_scenario(session, |session| async move {
        let home = HomePage::new(Arc::clone(&session), wait, artifacts.clone());
        home.load().await?;
        home.is_loaded().await?;
        println!("home page loaded");

        let careers = CareersPage::new(Arc::clone(&session), wait, artifacts.clone());
        careers.load_qa_careers().await?;
        careers.click_see_all_qa_jobs().await?;
        careers.filter_by_location(&location).await?;
        careers.filter_by_department(&department).await?;

        let jobs = careers.get_job_list().await?;
        println!("found {} jobs", jobs.len());
        careers
            .verify_all_jobs_match_criteria(&department, &location)
            .await?;
        println!("all jobs match the filter criteria");

        careers.click_view_role_for_first_job().await?;
        let application = ApplicationRedirectPage::new(session, wait, artifacts.clone());
        application.is_on_expected_redirect_domain().await?;
        println!("landed on the application tracking domain");
        Ok(())
    })
    .await?;

    Ok(())
}
