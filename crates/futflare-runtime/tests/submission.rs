use std::sync::Arc;

use chrono::Utc;
use futflare_engine::CapsuleDraft;
use futflare_runtime::{
    SUBMISSION_FALLBACK_MESSAGE, SUBMISSION_SUCCESS_MESSAGE, SubmissionController, SubmitOutcome,
};
use futflare_testing::{MockApi, Navigation, Notification, RecordingNavigator, RecordingNotifier};
use futflare_types::ContentItem;

struct Harness {
    api: Arc<MockApi>,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
    controller: SubmissionController,
}

fn harness() -> Harness {
    let api = Arc::new(MockApi::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let controller = SubmissionController::new(api.clone(), notifier.clone(), navigator.clone());
    Harness {
        api,
        notifier,
        navigator,
        controller,
    }
}

fn ready_draft() -> CapsuleDraft {
    let mut draft = CapsuleDraft::new(Utc::now());
    draft.set_title("T");
    draft.set_description("D");
    draft.push_item(ContentItem::message("hello")).unwrap();
    draft
}

#[tokio::test]
async fn test_submit_posts_once_and_resets_the_draft() {
    let h = harness();
    let mut draft = ready_draft();
    let expected = draft.to_payload().unwrap();

    let outcome = h.controller.submit(&mut draft).await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Created(ref c) if c.title == "T"));
    assert_eq!(h.api.created(), vec![expected]);
    assert!(draft.title().is_empty());
    assert!(draft.description().is_empty());
    assert!(draft.items().is_empty());
    assert_eq!(
        h.notifier.notifications(),
        vec![Notification::Success(SUBMISSION_SUCCESS_MESSAGE.to_string())]
    );
    assert_eq!(h.navigator.navigations(), vec![Navigation::Listing]);
}

#[tokio::test]
async fn test_failed_submit_keeps_the_draft_and_shows_server_message() {
    let h = harness();
    h.api.push_create_failure(422, Some("Scheduled date is invalid"));
    let mut draft = ready_draft();
    draft.participants_mut().add("friend@example.com");
    let before = draft.clone();

    let err = h.controller.submit(&mut draft).await.unwrap_err();

    assert_eq!(err.message, "Scheduled date is invalid");
    assert_eq!(draft, before);
    assert_eq!(h.notifier.errors(), vec!["Scheduled date is invalid".to_string()]);
    assert!(h.navigator.navigations().is_empty());
    assert!(!h.controller.is_in_flight());
}

#[tokio::test]
async fn test_failed_submit_without_message_uses_fallback() {
    let h = harness();
    h.api.push_create_failure(500, None);
    let mut draft = ready_draft();

    let err = h.controller.submit(&mut draft).await.unwrap_err();

    assert_eq!(err.message, SUBMISSION_FALLBACK_MESSAGE);
    assert_eq!(h.notifier.errors(), vec![SUBMISSION_FALLBACK_MESSAGE.to_string()]);
}

#[tokio::test]
async fn test_incomplete_draft_is_never_sent() {
    let h = harness();
    let mut draft = CapsuleDraft::new(Utc::now());
    draft.set_title("T");

    let outcome = h.controller.submit(&mut draft).await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::NotSubmittable(vec!["description", "content"])
    );
    assert!(h.api.calls().is_empty());
    assert!(h.notifier.notifications().is_empty());
}

#[tokio::test]
async fn test_duplicate_submit_while_in_flight_is_ignored() {
    let h = harness();
    let gate = h.api.hold();
    let mut first = ready_draft();
    let mut second = ready_draft();

    let (a, b, ()) = tokio::join!(
        h.controller.submit(&mut first),
        h.controller.submit(&mut second),
        async {
            tokio::task::yield_now().await;
            gate.notify_one();
        }
    );

    assert!(matches!(a.unwrap(), SubmitOutcome::Created(_)));
    assert_eq!(b.unwrap(), SubmitOutcome::AlreadyInFlight);
    assert_eq!(h.api.created().len(), 1);
    assert_eq!(second.title(), "T");
    assert!(!h.controller.is_in_flight());
}

#[tokio::test]
async fn test_controller_accepts_a_new_submit_after_completion() {
    let h = harness();
    let mut draft = ready_draft();
    h.controller.submit(&mut draft).await.unwrap();

    let mut again = ready_draft();
    let outcome = h.controller.submit(&mut again).await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Created(_)));
    assert_eq!(h.api.created().len(), 2);
}
