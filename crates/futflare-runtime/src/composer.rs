use std::sync::Arc;

use chrono::Utc;
use futflare_engine::{CapsuleDraft, CommitStep, ContentDraftBuilder, ValidationError};
use futflare_types::ContentItem;

use crate::error::{Result, SubmissionError};
use crate::ports::Notifier;
use crate::submission::{SubmissionController, SubmitOutcome};
use crate::upload::UploadGateway;

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Appended(ContentItem),
    /// An upload is still running; the call was dropped.
    Ignored,
}

/// Holds the content builder while an upload runs. Unless the upload
/// completes, dropping it releases the uploading flag.
struct Uploading<'a> {
    content: &'a mut ContentDraftBuilder,
    completed: bool,
}

impl<'a> Uploading<'a> {
    fn new(content: &'a mut ContentDraftBuilder) -> Self {
        Self {
            content,
            completed: false,
        }
    }

    fn complete(mut self, final_url: String) -> Option<ContentItem> {
        self.completed = true;
        self.content.complete_upload(final_url)
    }
}

impl Drop for Uploading<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.content.abort_upload();
        }
    }
}

/// One composer session: the draft, the content tabs, and the uploads that
/// connect them.
pub struct Composer {
    draft: CapsuleDraft,
    content: ContentDraftBuilder,
    gateway: UploadGateway,
    notifier: Arc<dyn Notifier>,
}

impl Composer {
    pub fn new(gateway: UploadGateway, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            draft: CapsuleDraft::new(Utc::now()),
            content: ContentDraftBuilder::new(),
            gateway,
            notifier,
        }
    }

    pub fn draft(&self) -> &CapsuleDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut CapsuleDraft {
        &mut self.draft
    }

    pub fn content(&self) -> &ContentDraftBuilder {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut ContentDraftBuilder {
        &mut self.content
    }

    /// Set the open date, refusing days before today.
    pub fn set_scheduled_open_date(
        &mut self,
        date: chrono::DateTime<Utc>,
    ) -> std::result::Result<(), ValidationError> {
        self.draft.set_scheduled_open_date(date, Utc::now())
    }

    pub fn add_participant(&mut self, email: &str) -> bool {
        self.draft.participants_mut().add(email)
    }

    /// Build an item from the active tab and append it to the draft.
    ///
    /// Media tabs upload first. A failed upload is reported through the
    /// notifier and leaves the tab's file, caption and alt text in place.
    /// Dropping the future mid-upload clears the uploading flag the same way.
    pub async fn commit(&mut self) -> Result<CommitOutcome> {
        let step = match self.content.begin_commit(self.draft.items().len()) {
            Ok(step) => step,
            Err(ValidationError::UploadInProgress) => return Ok(CommitOutcome::Ignored),
            Err(err) => return Err(err.into()),
        };

        let item = match step {
            CommitStep::Ready(item) => item,
            CommitStep::Upload(job) => {
                let guard = Uploading::new(&mut self.content);
                match self.gateway.upload(&job.file, job.kind).await {
                    Ok(final_url) => guard
                        .complete(final_url)
                        .ok_or(ValidationError::NoFileSelected(job.kind))?,
                    Err(err) => {
                        drop(guard);
                        tracing::warn!(error = %err, file = %job.file.name, "upload failed");
                        self.notifier.error(&format!("Upload failed: {}", err));
                        return Err(err.into());
                    }
                }
            }
        };

        self.draft.push_item(item.clone())?;
        Ok(CommitOutcome::Appended(item))
    }

    /// Submit through `controller`. On success the whole session is cleared.
    pub async fn submit(
        &mut self,
        controller: &SubmissionController,
    ) -> std::result::Result<SubmitOutcome, SubmissionError> {
        let outcome = controller.submit(&mut self.draft).await?;
        if matches!(outcome, SubmitOutcome::Created(_)) {
            self.content.reset();
        }
        Ok(outcome)
    }

    /// Discard everything, as when leaving the composer.
    pub fn reset(&mut self) {
        self.draft.reset(Utc::now());
        self.content.reset();
    }
}
