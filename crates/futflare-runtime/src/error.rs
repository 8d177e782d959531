use futflare_engine::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure talking to the capsule API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with status {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Message supplied by the server, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// A media upload attempt failed. The draft is untouched and the attempt can
/// be retried by committing again.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("could not obtain an upload ticket: {0}")]
    Ticket(#[source] ApiError),

    #[error("storage rejected the upload with status {0}")]
    Rejected(u16),

    #[error("transfer to storage failed: {0}")]
    Transfer(String),
}

pub const SUBMISSION_FALLBACK_MESSAGE: &str = "Failed to create capsule";

/// The create call failed. `message` is what the user is shown.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct SubmissionError {
    pub message: String,
    #[source]
    pub source: ApiError,
}

impl From<ApiError> for SubmissionError {
    fn from(source: ApiError) -> Self {
        let message = source
            .server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(SUBMISSION_FALLBACK_MESSAGE)
            .to_string();
        Self { message, source }
    }
}

/// Listing or single-capsule fetch failed; not recoverable in place.
#[derive(Error, Debug)]
#[error("failed to load capsules: {0}")]
pub struct FetchError(#[from] pub ApiError);

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) | Error::Config(_) => 2,
            Error::Fetch(FetchError(ApiError::Status { status: 404, .. })) => 3,
            Error::Upload(_) | Error::Submission(_) | Error::Fetch(_) | Error::Io(_) => 1,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_error_prefers_server_message() {
        let err = SubmissionError::from(ApiError::Status {
            status: 400,
            message: Some("Title is required".to_string()),
        });
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn test_submission_error_falls_back() {
        let err = SubmissionError::from(ApiError::Status {
            status: 500,
            message: None,
        });
        assert_eq!(err.message, SUBMISSION_FALLBACK_MESSAGE);

        let err = SubmissionError::from(ApiError::Status {
            status: 500,
            message: Some("  ".to_string()),
        });
        assert_eq!(err.message, SUBMISSION_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_status_display() {
        let err = ApiError::Status {
            status: 404,
            message: Some("Capsule not found".to_string()),
        };
        assert_eq!(err.to_string(), "server responded with status 404: Capsule not found");
        let fetch = Error::from(FetchError(err));
        assert_eq!(fetch.exit_code(), 3);
    }
}
