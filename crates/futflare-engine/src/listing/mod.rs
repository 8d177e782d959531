//! Capsule listing: query state, address synchronisation, debounced search
//! and the fetch/presentation state machine.

pub mod debounce;
pub mod location;
pub mod pagination;
pub mod query;
pub mod view;

pub use debounce::{Debouncer, SEARCH_QUIET_PERIOD, settle};
pub use location::{MemoryLocation, QueryLocation, QuerySync};
pub use pagination::{PageSlot, Pagination, page_window};
pub use query::QueryState;
pub use view::{FetchTicket, ListPhase, ListPresentation, ListView, Resolution};
