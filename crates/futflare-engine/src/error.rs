use thiserror::Error;

/// Local validation failures. These block an action in the composer and are
/// never sent to the server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email address is blank")]
    BlankEmail,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("participant list is full ({0} max)")]
    ParticipantLimit(usize),

    #[error("participant already invited: {0}")]
    DuplicateParticipant(String),

    #[error("message text is empty")]
    EmptyMessage,

    #[error("no file selected for {0}")]
    NoFileSelected(futflare_types::ContentKind),

    #[error("{0} content does not support this field")]
    NotMediaKind(futflare_types::ContentKind),

    #[error("capsule already holds {0} content items")]
    ContentLimit(usize),

    #[error("an upload is already in progress")]
    UploadInProgress,

    #[error("open date {0} is before today")]
    OpenDateInPast(chrono::NaiveDate),

    #[error("capsule is missing: {}", .0.join(", "))]
    IncompleteDraft(Vec<&'static str>),
}
