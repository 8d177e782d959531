//! Capsule composer: the draft aggregate and the builders that feed it.

pub mod content;
pub mod draft;
pub mod participants;

pub use content::{CommitStep, ContentDraftBuilder, UploadJob};
pub use draft::{CapsuleDraft, MAX_CONTENT_ITEMS};
pub use participants::{MAX_PARTICIPANTS, ParticipantList};
