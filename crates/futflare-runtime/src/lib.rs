//! I/O side of futflare: the authenticated HTTP transport, media uploads,
//! submission and the capsule listing, plus config and logging.

pub mod api;
pub mod auth;
pub mod client;
pub mod composer;
pub mod config;
pub mod error;
pub mod http;
pub mod listing;
pub mod logging;
pub mod media;
pub mod ports;
pub mod submission;
pub mod upload;

pub use api::{CapsuleApi, ObjectStore};
pub use auth::{CredentialProvider, EnvToken, StaticToken, with_auth};
pub use client::{Futflare, FutflareBuilder};
pub use composer::{CommitOutcome, Composer};
pub use config::{Config, resolve_config_path};
pub use error::{
    ApiError, Error, FetchError, Result, SUBMISSION_FALLBACK_MESSAGE, SubmissionError,
    UploadError,
};
pub use http::HttpTransport;
pub use listing::{FetchResult, Listing, PendingFetch};
pub use logging::init_tracing;
pub use media::{content_type_for, load_media_file};
pub use ports::{LogNotifier, Navigator, NoopNavigator, Notifier};
pub use submission::{SUBMISSION_SUCCESS_MESSAGE, SubmissionController, SubmitOutcome};
pub use upload::UploadGateway;
