use std::sync::Arc;

use futflare_runtime::{Error, Futflare, SubmitOutcome};
use futflare_testing::{
    MockApi, MockStore, Navigation, RecordingNavigator, RecordingNotifier, fixtures,
};
use futflare_types::ContentKind;

struct Harness {
    api: Arc<MockApi>,
    store: Arc<MockStore>,
    navigator: Arc<RecordingNavigator>,
    client: Futflare,
}

fn harness() -> Harness {
    let api = Arc::new(MockApi::new());
    let store = Arc::new(MockStore::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let client = Futflare::builder()
        .api(api.clone())
        .store(store.clone())
        .notifier(Arc::new(RecordingNotifier::new()))
        .navigator(navigator.clone())
        .build()
        .unwrap();
    Harness {
        api,
        store,
        navigator,
        client,
    }
}

#[tokio::test]
async fn test_compose_upload_and_submit() {
    let h = harness();
    let mut composer = h.client.composer();
    composer.draft_mut().set_title("Graduation");
    composer.draft_mut().set_description("Open in five years");
    assert!(composer.add_participant("friend@example.com"));

    composer.content_mut().select_kind(ContentKind::Image);
    composer
        .content_mut()
        .select_file(fixtures::image_file("gown.png"))
        .unwrap();
    composer.commit().await.unwrap();

    let outcome = composer.submit(&h.client.submission()).await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Created(_)));
    let created = h.api.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].participant_emails, vec!["friend@example.com"]);
    assert_eq!(
        created[0].content_items[0].url(),
        Some("https://cdn.test/image/gown.png")
    );
    assert_eq!(h.store.puts().len(), 1);
    assert!(composer.draft().title().is_empty());
    assert!(composer.content().media(ContentKind::Image).unwrap().file.is_none());
    assert_eq!(h.navigator.navigations(), vec![Navigation::Listing]);
}

#[tokio::test]
async fn test_submission_controller_is_shared() {
    let h = harness();
    assert!(Arc::ptr_eq(&h.client.submission(), &h.client.submission()));
}

#[tokio::test]
async fn test_capsule_fetch_failure_routes_to_error_view() {
    let h = harness();
    h.api.push_get_failure(404);

    let err = h.client.capsule("missing").await.unwrap_err();

    assert_eq!(Error::from(err).exit_code(), 3);
    assert_eq!(h.navigator.navigations().len(), 1);
}

#[tokio::test]
async fn test_capsule_fetch_returns_locked_capsule() {
    let h = harness();
    h.api.push_capsule(fixtures::locked_capsule("c-1", "Sealed"));

    let capsule = h.client.capsule("c-1").await.unwrap();

    assert!(capsule.is_locked());
    assert!(capsule.content_items().is_empty());
    assert!(h.navigator.navigations().is_empty());
}

#[test]
fn test_builds_http_backend_from_config() {
    let mut config = futflare_runtime::Config::default();
    config.server.url = "not a url".to_string();

    let err = Futflare::from_config(&config).err().unwrap();
    assert!(matches!(err, Error::Config(_)));

    config.server.url = "https://capsules.example.com/base".to_string();
    assert!(Futflare::from_config(&config).is_ok());
}
