use std::sync::Arc;

use futflare_engine::{MAX_CONTENT_ITEMS, ValidationError};
use futflare_runtime::{CommitOutcome, Composer, Error, UploadError, UploadGateway};
use futflare_testing::{ApiCall, MockApi, MockStore, RecordingNotifier, fixtures};
use futflare_types::{ContentItem, ContentKind};

struct Harness {
    api: Arc<MockApi>,
    store: Arc<MockStore>,
    notifier: Arc<RecordingNotifier>,
    composer: Composer,
}

fn harness() -> Harness {
    let api = Arc::new(MockApi::new());
    let store = Arc::new(MockStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let gateway = UploadGateway::new(api.clone(), store.clone());
    let composer = Composer::new(gateway, notifier.clone());
    Harness {
        api,
        store,
        notifier,
        composer,
    }
}

#[tokio::test]
async fn test_video_commit_requests_one_ticket_then_one_put() {
    let mut h = harness();
    let content = h.composer.content_mut();
    content.select_kind(ContentKind::Video);
    content.select_file(fixtures::video_file("trip.mp4")).unwrap();
    content.set_caption("Summer").unwrap();

    let outcome = h.composer.commit().await.unwrap();

    let presigns = h.api.presign_requests();
    assert_eq!(presigns.len(), 1);
    assert_eq!(presigns[0].content_type, ContentKind::Video);
    assert_eq!(presigns[0].file_name, "trip.mp4");

    let puts = h.store.puts();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].url, "https://storage.test/upload/trip.mp4?sig=abc");
    assert_eq!(puts[0].content_type, "video/mp4");
    assert_eq!(puts[0].len, 8);

    let expected = ContentItem::Video {
        url: "https://cdn.test/video/trip.mp4".to_string(),
        caption: "Summer".to_string(),
    };
    assert_eq!(outcome, CommitOutcome::Appended(expected.clone()));
    assert_eq!(h.composer.draft().items(), &[expected]);

    let scratch = h.composer.content().media(ContentKind::Video).unwrap();
    assert!(scratch.file.is_none());
    assert!(scratch.caption.is_empty());
    assert!(!h.composer.content().is_uploading());
}

#[tokio::test]
async fn test_rejected_put_appends_nothing_and_keeps_file() {
    let mut h = harness();
    h.store.push_status(403);
    let content = h.composer.content_mut();
    content.select_kind(ContentKind::Video);
    content.select_file(fixtures::video_file("trip.mp4")).unwrap();
    content.set_caption("Summer").unwrap();

    let err = h.composer.commit().await.unwrap_err();

    assert!(matches!(err, Error::Upload(UploadError::Rejected(403))));
    assert!(h.composer.draft().items().is_empty());
    assert_eq!(h.api.presign_requests().len(), 1);
    assert_eq!(h.store.puts().len(), 1);

    let scratch = h.composer.content().media(ContentKind::Video).unwrap();
    assert_eq!(scratch.file, Some(fixtures::video_file("trip.mp4")));
    assert_eq!(scratch.caption, "Summer");
    assert!(!h.composer.content().is_uploading());

    let errors = h.notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Upload failed"));
}

#[tokio::test]
async fn test_retry_after_failure_uses_a_fresh_ticket() {
    let mut h = harness();
    h.store.push_status(500);
    let content = h.composer.content_mut();
    content.select_kind(ContentKind::Image);
    content.select_file(fixtures::image_file("cat.png")).unwrap();
    content.set_alt_text("a cat").unwrap();

    assert!(h.composer.commit().await.is_err());
    let outcome = h.composer.commit().await.unwrap();

    assert_eq!(h.api.presign_requests().len(), 2);
    assert_eq!(h.store.puts().len(), 2);
    assert_eq!(
        outcome,
        CommitOutcome::Appended(ContentItem::Image {
            url: "https://cdn.test/image/cat.png".to_string(),
            caption: String::new(),
            alt_text: "a cat".to_string(),
        })
    );
}

#[tokio::test]
async fn test_ticket_failure_skips_storage() {
    let mut h = harness();
    h.api.push_ticket_failure(401);
    let content = h.composer.content_mut();
    content.select_kind(ContentKind::Image);
    content.select_file(fixtures::image_file("cat.png")).unwrap();

    let err = h.composer.commit().await.unwrap_err();

    assert!(matches!(err, Error::Upload(UploadError::Ticket(_))));
    assert!(h.store.puts().is_empty());
    assert!(h.composer.draft().items().is_empty());
}

#[tokio::test]
async fn test_message_commit_makes_no_network_calls() {
    let mut h = harness();
    h.composer.content_mut().set_message_text("hello");

    let outcome = h.composer.commit().await.unwrap();

    assert_eq!(outcome, CommitOutcome::Appended(ContentItem::message("hello")));
    assert!(h.api.calls().is_empty());
    assert!(h.store.puts().is_empty());
    assert_eq!(h.composer.content().message_text(), "");
}

#[tokio::test]
async fn test_validation_errors_never_reach_the_network() {
    let mut h = harness();

    let err = h.composer.commit().await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::EmptyMessage)));

    h.composer.content_mut().select_kind(ContentKind::Image);
    let err = h.composer.commit().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::NoFileSelected(ContentKind::Image))
    ));

    assert!(h.api.calls().is_empty());
    assert!(h.store.puts().is_empty());
}

#[tokio::test]
async fn test_items_append_in_commit_order_up_to_the_cap() {
    let mut h = harness();

    for i in 0..MAX_CONTENT_ITEMS {
        if i % 2 == 0 {
            h.composer.content_mut().select_kind(ContentKind::Message);
            h.composer.content_mut().set_message_text(format!("note {i}"));
        } else {
            h.composer.content_mut().select_kind(ContentKind::Image);
            h.composer
                .content_mut()
                .select_file(fixtures::image_file(&format!("img-{i}.png")))
                .unwrap();
        }
        h.composer.commit().await.unwrap();
    }

    let kinds: Vec<_> = h.composer.draft().items().iter().map(|i| i.kind()).collect();
    assert_eq!(kinds.len(), MAX_CONTENT_ITEMS);
    assert_eq!(kinds[0], ContentKind::Message);
    assert_eq!(kinds[1], ContentKind::Image);

    h.composer.content_mut().select_kind(ContentKind::Message);
    h.composer.content_mut().set_message_text("one too many");
    let err = h.composer.commit().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::ContentLimit(MAX_CONTENT_ITEMS))
    ));
    assert_eq!(h.composer.draft().items().len(), MAX_CONTENT_ITEMS);

    let presigned: Vec<_> = h
        .api
        .calls()
        .into_iter()
        .filter(|c| matches!(c, ApiCall::Presign(_)))
        .collect();
    assert_eq!(presigned.len(), MAX_CONTENT_ITEMS / 2);
}

#[tokio::test]
async fn test_cancelled_upload_releases_the_composer() {
    let mut h = harness();
    let _gate = h.api.hold();
    let content = h.composer.content_mut();
    content.select_kind(ContentKind::Image);
    content.select_file(fixtures::image_file("cat.png")).unwrap();

    let timed_out =
        tokio::time::timeout(std::time::Duration::from_millis(50), h.composer.commit()).await;
    assert!(timed_out.is_err());
    assert!(!h.composer.content().is_uploading());
    assert!(h.store.puts().is_empty());
    assert!(h.composer.draft().items().is_empty());

    let scratch = h.composer.content().media(ContentKind::Image).unwrap();
    assert_eq!(scratch.file.as_ref().map(|f| f.name.as_str()), Some("cat.png"));

    let content = h.composer.content_mut();
    content.select_kind(ContentKind::Message);
    content.set_message_text("hello");
    let outcome = h.composer.commit().await.unwrap();
    assert_eq!(outcome, CommitOutcome::Appended(ContentItem::message("hello")));
}
