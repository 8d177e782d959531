//! Core data types shared by every futflare crate.
//!
//! These mirror the wire shapes of the capsule API: the tagged
//! [`ContentItem`] union, the [`Capsule`] read model, upload tickets and the
//! `{ message, data }` envelope every endpoint answers with.

pub mod api;
pub mod capsule;
pub mod content;
pub mod email;
pub mod query;
pub mod upload;

pub use api::{ApiMessage, ApiResponse, CapsulePage};
pub use capsule::{Capsule, CapsuleStatus, NewCapsule};
pub use content::{ContentItem, ContentKind, ParseContentKindError};
pub use email::is_valid_email;
pub use query::{PageLimit, ParseQueryValueError, SortBy};
pub use upload::{MediaFile, PresignRequest, UploadTicket};
