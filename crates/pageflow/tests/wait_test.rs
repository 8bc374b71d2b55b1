// Integration tests for the condition-wait primitive
//
// All against the scripted mock session: a handle is returned iff the
// condition becomes true strictly before the timeout; otherwise a Timeout
// failure carrying the locator and condition, never a partial handle.

use std::sync::Arc;
use std::time::Duration;

use pageflow::mock::{MockElement, MockSession};
use pageflow::wait::{self, WaitCondition, WaitConfig};
use pageflow::{Error, Locator};

fn fast_wait() -> WaitConfig {
    WaitConfig::new()
        .with_timeout(Duration::from_millis(300))
        .with_poll_interval(Duration::from_millis(10))
}

// ============================================================================
// Present / Visible / Clickable
// ============================================================================

#[tokio::test]
async fn returns_handle_once_element_appears() {
    let session = MockSession::builder()
        .element(MockElement::new(Locator::css(".late")).appears_after_polls(3))
        .build();

    let element = wait::await_condition(
        &session,
        &Locator::css(".late"),
        WaitCondition::Present,
        fast_wait(),
    )
    .await
    .expect("element should appear within the window");
    assert!(!element.id().is_empty());
    assert!(session.resolve_count(&Locator::css(".late")) >= 4);
}

#[tokio::test]
async fn times_out_when_condition_never_holds() {
    let session = MockSession::builder().build();
    let cfg = WaitConfig::new()
        .with_timeout(Duration::from_millis(50))
        .with_poll_interval(Duration::from_millis(10));

    let err = wait::await_condition(
        &session,
        &Locator::id("missing"),
        WaitCondition::Present,
        cfg,
    )
    .await
    .expect_err("absent element must time out");

    match err {
        Error::Timeout {
            locator,
            condition,
            elapsed,
        } => {
            assert_eq!(locator, Locator::id("missing"));
            assert_eq!(condition, WaitCondition::Present);
            assert!(elapsed >= Duration::from_millis(50));
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn visible_rejects_hidden_elements() {
    let session = MockSession::builder()
        .element(MockElement::new(Locator::css(".ghost")).hidden())
        .build();
    let cfg = WaitConfig::new()
        .with_timeout(Duration::from_millis(50))
        .with_poll_interval(Duration::from_millis(10));

    // Present holds, visible does not.
    wait::await_condition(&session, &Locator::css(".ghost"), WaitCondition::Present, cfg)
        .await
        .expect("hidden element is still present");
    let err =
        wait::await_condition(&session, &Locator::css(".ghost"), WaitCondition::Visible, cfg)
            .await
            .expect_err("hidden element must not satisfy visible");
    assert!(err.is_timeout());
}

#[tokio::test]
async fn clickable_rejects_disabled_elements() {
    let session = MockSession::builder()
        .element(MockElement::new(Locator::id("submit")).disabled())
        .build();
    let cfg = WaitConfig::new()
        .with_timeout(Duration::from_millis(50))
        .with_poll_interval(Duration::from_millis(10));

    let err = wait::await_condition(
        &session,
        &Locator::id("submit"),
        WaitCondition::Clickable,
        cfg,
    )
    .await
    .expect_err("disabled element must not satisfy clickable");
    assert!(err.is_timeout());
}

#[tokio::test]
async fn zero_timeout_still_probes_once() {
    let session = MockSession::builder()
        .element(MockElement::new(Locator::css(".ready")))
        .build();
    let cfg = WaitConfig::new().with_timeout(Duration::ZERO);

    wait::await_condition(&session, &Locator::css(".ready"), WaitCondition::Visible, cfg)
        .await
        .expect("already-satisfied condition should be observed");
}

// ============================================================================
// Count and document-ready waits
// ============================================================================

#[tokio::test]
async fn count_wait_returns_all_matches() {
    let builder = MockSession::builder();
    let session = (0..3)
        .fold(builder, |b, i| {
            b.element(
                MockElement::new(Locator::class("position-list-item"))
                    .text(&format!("job {i}"))
                    .appears_after_polls(2),
            )
        })
        .build();

    let elements = wait::await_count_at_least(
        &session,
        &Locator::class("position-list-item"),
        1,
        fast_wait(),
    )
    .await
    .expect("job items should appear");
    assert_eq!(elements.len(), 3);
}

#[tokio::test]
async fn count_wait_times_out_with_present_condition() {
    let session = MockSession::builder().build();
    let cfg = WaitConfig::new()
        .with_timeout(Duration::from_millis(40))
        .with_poll_interval(Duration::from_millis(10));

    let err = wait::await_count_at_least(&session, &Locator::css(".item"), 1, cfg)
        .await
        .expect_err("no items should time out");
    assert!(matches!(
        err,
        Error::Timeout {
            condition: WaitCondition::Present,
            ..
        }
    ));
}

#[tokio::test]
async fn document_ready_polls_until_complete() {
    let session = MockSession::builder().ready_after_polls(2).build();
    wait::await_document_ready(&session, fast_wait())
        .await
        .expect("document should become ready");
    // Three readyState probes: two loading, one complete.
    let ready_probes = session
        .scripts()
        .iter()
        .filter(|s| s.contains("document.readyState"))
        .count();
    assert_eq!(ready_probes, 3);
}

#[tokio::test]
async fn document_ready_times_out_as_navigation_timeout() {
    let session = Arc::new(MockSession::builder().ready_after_polls(u32::MAX).build());
    let cfg = WaitConfig::new()
        .with_timeout(Duration::from_millis(40))
        .with_poll_interval(Duration::from_millis(10));

    let err = wait::await_document_ready(session.as_ref(), cfg)
        .await
        .expect_err("never-ready document must time out");
    assert!(matches!(err, Error::NavigationTimeout { .. }));
}
