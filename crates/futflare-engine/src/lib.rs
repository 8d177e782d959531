// Engine module - composer and listing state machines
// Everything here is synchronous and side-effect free; the runtime crate
// performs the uploads and fetches these types plan for.

pub mod composer;
mod error;
pub mod listing;

pub use composer::{
    CapsuleDraft, CommitStep, ContentDraftBuilder, MAX_CONTENT_ITEMS, MAX_PARTICIPANTS,
    ParticipantList, UploadJob,
};
pub use error::ValidationError;
pub use listing::{
    Debouncer, FetchTicket, ListPhase, ListPresentation, ListView, MemoryLocation, PageSlot,
    Pagination, QueryLocation, QueryState, QuerySync, Resolution, SEARCH_QUIET_PERIOD,
    page_window, settle,
};
