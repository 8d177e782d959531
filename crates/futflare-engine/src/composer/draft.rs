use chrono::{DateTime, Utc};
use futflare_types::{ContentItem, NewCapsule};

use super::participants::ParticipantList;
use crate::ValidationError;

pub const MAX_CONTENT_ITEMS: usize = 10;

/// The in-progress capsule under composition.
///
/// Content items are appended in commit order and can only be removed, never
/// edited or reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct CapsuleDraft {
    title: String,
    description: String,
    scheduled_open_date: DateTime<Utc>,
    participants: ParticipantList,
    items: Vec<ContentItem>,
}

impl CapsuleDraft {
    /// Empty draft whose open date defaults to `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            scheduled_open_date: now,
            participants: ParticipantList::new(),
            items: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn scheduled_open_date(&self) -> DateTime<Utc> {
        self.scheduled_open_date
    }

    /// Set the open date. Any day before today (per `now`) is refused; a
    /// time earlier today is still accepted.
    pub fn set_scheduled_open_date(
        &mut self,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if date.date_naive() < now.date_naive() {
            return Err(ValidationError::OpenDateInPast(date.date_naive()));
        }
        self.scheduled_open_date = date;
        Ok(())
    }

    pub fn participants(&self) -> &ParticipantList {
        &self.participants
    }

    pub fn participants_mut(&mut self) -> &mut ParticipantList {
        &mut self.participants
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn push_item(&mut self, item: ContentItem) -> Result<(), ValidationError> {
        if self.items.len() >= MAX_CONTENT_ITEMS {
            return Err(ValidationError::ContentLimit(MAX_CONTENT_ITEMS));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Option<ContentItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.items.is_empty() {
            missing.push("content");
        }
        missing
    }

    /// Title, description and at least one content item. Participants are
    /// optional.
    pub fn is_submittable(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Body for the create call.
    pub fn to_payload(&self) -> Result<NewCapsule, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::IncompleteDraft(missing));
        }
        Ok(NewCapsule {
            title: self.title.clone(),
            description: self.description.clone(),
            scheduled_open_date: self.scheduled_open_date,
            participant_emails: self.participants.as_slice().to_vec(),
            content_items: self.items.clone(),
        })
    }

    /// Back to the empty initial state.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = CapsuleDraft::new(now);
    }
}
