use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::ContentItem;

/// Server-owned capsule record. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub creator: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_opened: bool,
    pub created_at: DateTime<Utc>,
    pub scheduled_open_date: DateTime<Utc>,
    // Older servers spelled this `participants_email`.
    #[serde(default, alias = "participants_email")]
    pub participant_emails: Vec<String>,
    /// Only present once the capsule has been opened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_items: Option<Vec<ContentItem>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapsuleStatus {
    Locked,
    Opened,
}

impl fmt::Display for CapsuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapsuleStatus::Locked => write!(f, "Locked"),
            CapsuleStatus::Opened => write!(f, "Opened"),
        }
    }
}

impl Capsule {
    pub fn status(&self) -> CapsuleStatus {
        if self.is_opened {
            CapsuleStatus::Opened
        } else {
            CapsuleStatus::Locked
        }
    }

    pub fn is_locked(&self) -> bool {
        !self.is_opened
    }

    /// Remaining time until the scheduled open date, or `None` when the
    /// capsule is already open or the date has passed (the server opens
    /// capsules on its own schedule).
    pub fn time_until_open(&self, now: DateTime<Utc>) -> Option<Duration> {
        if self.is_opened || self.scheduled_open_date <= now {
            return None;
        }
        Some(self.scheduled_open_date - now)
    }

    pub fn content_items(&self) -> &[ContentItem] {
        self.content_items.as_deref().unwrap_or_default()
    }
}

/// Body of `POST /api/capsule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCapsule {
    pub title: String,
    pub description: String,
    pub scheduled_open_date: DateTime<Utc>,
    pub participant_emails: Vec<String>,
    pub content_items: Vec<ContentItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_json(field: &str) -> String {
        format!(
            r#"{{
                "_id": "66f0c0ffee",
                "creator": "auth0-123",
                "title": "Graduation",
                "description": "Open in five years",
                "is_opened": false,
                "created_at": "2026-01-01T00:00:00Z",
                "scheduled_open_date": "2031-06-01T12:00:00Z",
                "{field}": ["a@example.com"]
            }}"#
        )
    }

    #[test]
    fn test_reads_current_participant_field() {
        let capsule: Capsule = serde_json::from_str(&sample_json("participant_emails")).unwrap();
        assert_eq!(capsule.participant_emails, vec!["a@example.com"]);
        assert_eq!(capsule.id, "66f0c0ffee");
        assert!(capsule.content_items.is_none());
    }

    #[test]
    fn test_reads_legacy_participant_field() {
        let capsule: Capsule = serde_json::from_str(&sample_json("participants_email")).unwrap();
        assert_eq!(capsule.participant_emails, vec!["a@example.com"]);
    }

    #[test]
    fn test_status_and_time_until_open() {
        let capsule: Capsule = serde_json::from_str(&sample_json("participant_emails")).unwrap();
        assert_eq!(capsule.status(), CapsuleStatus::Locked);

        let now = Utc.with_ymd_and_hms(2031, 6, 1, 11, 0, 0).unwrap();
        assert_eq!(capsule.time_until_open(now), Some(Duration::hours(1)));

        let later = Utc.with_ymd_and_hms(2031, 6, 2, 0, 0, 0).unwrap();
        assert_eq!(capsule.time_until_open(later), None);
    }

    #[test]
    fn test_opened_capsule_exposes_content() {
        let mut capsule: Capsule =
            serde_json::from_str(&sample_json("participant_emails")).unwrap();
        assert!(capsule.content_items().is_empty());

        capsule.is_opened = true;
        capsule.content_items = Some(vec![ContentItem::message("hi")]);
        assert_eq!(capsule.status(), CapsuleStatus::Opened);
        assert_eq!(capsule.content_items().len(), 1);
    }
}
