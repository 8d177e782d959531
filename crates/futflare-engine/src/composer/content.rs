use futflare_types::{ContentItem, ContentKind, MediaFile};

use super::draft::MAX_CONTENT_ITEMS;
use crate::ValidationError;

/// Scratch fields for one media tab. `alt_text` is only read for images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaScratch {
    pub file: Option<MediaFile>,
    pub caption: String,
    pub alt_text: String,
}

impl MediaScratch {
    fn clear(&mut self) {
        *self = MediaScratch::default();
    }
}

/// Upload the runtime must perform before the item can be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub kind: ContentKind,
    pub file: MediaFile,
}

/// Outcome of starting a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitStep {
    /// No I/O needed, append the item now.
    Ready(ContentItem),
    /// Upload `job.file`, then call [`ContentDraftBuilder::complete_upload`]
    /// or [`ContentDraftBuilder::abort_upload`].
    Upload(UploadJob),
}

/// Builds one [`ContentItem`] from whichever kind tab is active.
///
/// Commits of media kinds are two-phase: [`begin_commit`](Self::begin_commit)
/// raises the uploading flag and hands out an [`UploadJob`]; until that job
/// is completed or aborted every further commit is refused with
/// [`ValidationError::UploadInProgress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDraftBuilder {
    active: ContentKind,
    message: String,
    image: MediaScratch,
    video: MediaScratch,
    uploading: Option<ContentKind>,
}

impl Default for ContentDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentDraftBuilder {
    pub fn new() -> Self {
        Self {
            active: ContentKind::Message,
            message: String::new(),
            image: MediaScratch::default(),
            video: MediaScratch::default(),
            uploading: None,
        }
    }

    pub fn active_kind(&self) -> ContentKind {
        self.active
    }

    /// Switch tabs. Scratch fields of every tab are kept.
    pub fn select_kind(&mut self, kind: ContentKind) {
        self.active = kind;
    }

    pub fn message_text(&self) -> &str {
        &self.message
    }

    pub fn set_message_text(&mut self, text: impl Into<String>) {
        self.message = text.into();
    }

    pub fn media(&self, kind: ContentKind) -> Option<&MediaScratch> {
        match kind {
            ContentKind::Message => None,
            ContentKind::Image => Some(&self.image),
            ContentKind::Video => Some(&self.video),
        }
    }

    fn active_media_mut(&mut self) -> Result<&mut MediaScratch, ValidationError> {
        match self.active {
            ContentKind::Message => Err(ValidationError::NotMediaKind(ContentKind::Message)),
            ContentKind::Image => Ok(&mut self.image),
            ContentKind::Video => Ok(&mut self.video),
        }
    }

    pub fn select_file(&mut self, file: MediaFile) -> Result<(), ValidationError> {
        self.active_media_mut()?.file = Some(file);
        Ok(())
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) -> Result<(), ValidationError> {
        self.active_media_mut()?.caption = caption.into();
        Ok(())
    }

    pub fn set_alt_text(&mut self, alt_text: impl Into<String>) -> Result<(), ValidationError> {
        if self.active != ContentKind::Image {
            return Err(ValidationError::NotMediaKind(self.active));
        }
        self.image.alt_text = alt_text.into();
        Ok(())
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.is_some()
    }

    /// Whether a commit would be accepted with `item_count` items already in
    /// the draft.
    pub fn check(&self, item_count: usize) -> Result<(), ValidationError> {
        if self.uploading.is_some() {
            return Err(ValidationError::UploadInProgress);
        }
        if item_count >= MAX_CONTENT_ITEMS {
            return Err(ValidationError::ContentLimit(MAX_CONTENT_ITEMS));
        }
        match self.active {
            ContentKind::Message if self.message.trim().is_empty() => {
                Err(ValidationError::EmptyMessage)
            }
            ContentKind::Message => Ok(()),
            kind => match self.media(kind).and_then(|m| m.file.as_ref()) {
                Some(_) => Ok(()),
                None => Err(ValidationError::NoFileSelected(kind)),
            },
        }
    }

    pub fn can_commit(&self, item_count: usize) -> bool {
        self.check(item_count).is_ok()
    }

    /// Start committing the active tab.
    ///
    /// Messages are built immediately and their text cleared. Media tabs
    /// raise the uploading flag and return the file to upload; scratch
    /// fields stay untouched until the upload resolves.
    pub fn begin_commit(&mut self, item_count: usize) -> Result<CommitStep, ValidationError> {
        self.check(item_count)?;

        match self.active {
            ContentKind::Message => {
                let text = std::mem::take(&mut self.message);
                Ok(CommitStep::Ready(ContentItem::Message { text }))
            }
            kind => {
                let file = self
                    .media(kind)
                    .and_then(|m| m.file.clone())
                    .ok_or(ValidationError::NoFileSelected(kind))?;
                self.uploading = Some(kind);
                Ok(CommitStep::Upload(UploadJob { kind, file }))
            }
        }
    }

    /// Finish a pending upload with its resolved address. Builds the item,
    /// clears that tab's scratch fields and drops the uploading flag.
    /// Returns `None` when no upload was pending.
    pub fn complete_upload(&mut self, final_url: impl Into<String>) -> Option<ContentItem> {
        let kind = self.uploading.take()?;
        let url = final_url.into();
        let item = match kind {
            ContentKind::Image => {
                let scratch = std::mem::take(&mut self.image);
                ContentItem::Image {
                    url,
                    caption: scratch.caption,
                    alt_text: scratch.alt_text,
                }
            }
            ContentKind::Video => {
                let scratch = std::mem::take(&mut self.video);
                ContentItem::Video {
                    url,
                    caption: scratch.caption,
                }
            }
            ContentKind::Message => return None,
        };
        Some(item)
    }

    /// Drop the uploading flag after a failed upload. Scratch fields are kept
    /// so the user can retry.
    pub fn abort_upload(&mut self) {
        self.uploading = None;
    }

    pub fn reset(&mut self) {
        self.message.clear();
        self.image.clear();
        self.video.clear();
        self.uploading = None;
        self.active = ContentKind::Message;
    }
}
