// Integration tests for diagnostic capture
//
// Capture is best-effort by contract: whatever goes wrong while producing
// the artifact, the originating failure stays the one surfaced.

use pageflow::mock::MockSession;
use pageflow::{ArtifactStore, Error, Locator};

#[tokio::test]
async fn capture_writes_timestamped_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::new(dir.path().join("shots"));
    let session = MockSession::builder().build();

    let path = store
        .capture(&session, "filter_by_location_failed")
        .await
        .expect("capture should succeed");

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("filter_by_location_failed_"));
    assert!(name.ends_with(".png"));
    let bytes = std::fs::read(&path).expect("artifact should exist");
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn capture_swallows_unwritable_directory() {
    // A path under a regular file cannot be created.
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let store = ArtifactStore::new(blocker.join("nested"));
    let session = MockSession::builder().build();

    assert!(store.capture(&session, "doomed").await.is_none());
}

#[tokio::test]
async fn capture_swallows_screenshot_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::new(dir.path());
    let session = MockSession::builder().failing_screenshots().build();

    assert!(store.capture(&session, "no_pixels").await.is_none());
}

#[tokio::test]
async fn capture_on_failure_preserves_the_original_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::new(dir.path().join("unreachable").join("deep"));
    // Both the capture target and the screenshot will fail; the caller must
    // still see the EmptyCollection error, untouched.
    let session = MockSession::builder().failing_screenshots().build();

    let failing: pageflow::Result<()> = Err(Error::EmptyCollection { what: "job list" });
    let err = store
        .capture_on_failure(&session, "verify_failed", failing)
        .await
        .expect_err("error must propagate");
    assert!(matches!(err, Error::EmptyCollection { what: "job list" }));
}

#[tokio::test]
async fn capture_on_failure_skips_artifacts_on_success() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::new(dir.path().join("shots"));
    let session = MockSession::builder().build();

    let ok: pageflow::Result<Vec<Locator>> = Ok(Vec::new());
    store
        .capture_on_failure(&session, "all_good", ok)
        .await
        .expect("success passes through");
    assert!(!dir.path().join("shots").exists());
}
