//! Sample data for tests.

use chrono::{DateTime, TimeZone, Utc};
use futflare_types::{Capsule, CapsulePage, ContentItem, MediaFile, NewCapsule};

/// Fixed instant used as "created at" in fixtures.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

/// An opened capsule with a single message.
pub fn sample_capsule(id: &str, title: &str) -> Capsule {
    Capsule {
        id: id.to_string(),
        creator: "owner@example.com".to_string(),
        title: title.to_string(),
        description: format!("{title} description"),
        is_opened: true,
        created_at: epoch(),
        scheduled_open_date: epoch(),
        participant_emails: vec![],
        content_items: Some(vec![ContentItem::message("hello")]),
    }
}

/// A capsule still sealed until 2030, with no content visible.
pub fn locked_capsule(id: &str, title: &str) -> Capsule {
    Capsule {
        is_opened: false,
        scheduled_open_date: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        content_items: None,
        ..sample_capsule(id, title)
    }
}

/// A page holding one capsule per title.
pub fn sample_page(titles: &[&str], total_count: u64, total_pages: u32) -> CapsulePage {
    CapsulePage {
        data: titles
            .iter()
            .enumerate()
            .map(|(i, title)| sample_capsule(&format!("capsule-{i}"), title))
            .collect(),
        total_count,
        total_pages,
    }
}

/// The record a server would return for `payload`.
pub fn created_from(id: &str, payload: &NewCapsule) -> Capsule {
    Capsule {
        id: id.to_string(),
        creator: "owner@example.com".to_string(),
        title: payload.title.clone(),
        description: payload.description.clone(),
        is_opened: false,
        created_at: epoch(),
        scheduled_open_date: payload.scheduled_open_date,
        participant_emails: payload.participant_emails.clone(),
        content_items: Some(payload.content_items.clone()),
    }
}

pub fn image_file(name: &str) -> MediaFile {
    MediaFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

pub fn video_file(name: &str) -> MediaFile {
    MediaFile::new(name, "video/mp4", vec![0, 0, 0, 0x18, b'f', b't', b'y', b'p'])
}
