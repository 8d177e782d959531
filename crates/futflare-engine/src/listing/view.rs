use futflare_types::{Capsule, CapsulePage};

use super::pagination::Pagination;
use super::query::QueryState;

/// Handle for one issued fetch. Results are accepted only while the ticket
/// is still the latest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    key: QueryState,
}

impl FetchTicket {
    pub fn key(&self) -> &QueryState {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListPhase {
    Idle,
    Loading,
    Ready(CapsulePage),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// A newer key was requested after this ticket; result dropped.
    Stale,
}

/// What the list shows for the current phase.
#[derive(Debug, Clone, PartialEq)]
pub enum ListPresentation<'a> {
    Loading,
    Empty,
    Populated {
        items: &'a [Capsule],
        total_count: u64,
        pagination: Pagination,
    },
    Error(&'a str),
}

/// Fetch/presentation state machine for the capsule list.
///
/// Every new fetch key moves to `Loading` and bumps the generation; a result
/// only lands if its ticket carries the latest generation.
#[derive(Debug, Clone)]
pub struct ListView {
    key: Option<QueryState>,
    generation: u64,
    phase: ListPhase,
    total_pages: Option<u32>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            key: None,
            generation: 0,
            phase: ListPhase::Idle,
            total_pages: None,
        }
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn key(&self) -> Option<&QueryState> {
        self.key.as_ref()
    }

    /// Register interest in `key`. Returns a ticket when a fetch must be
    /// issued, `None` when `key` is already current.
    pub fn request(&mut self, key: &QueryState) -> Option<FetchTicket> {
        if self.key.as_ref() == Some(key) {
            return None;
        }
        Some(self.issue(key.clone()))
    }

    /// Issue a fetch for the current key even if nothing changed.
    pub fn reload(&mut self) -> Option<FetchTicket> {
        let key = self.key.clone()?;
        Some(self.issue(key))
    }

    fn issue(&mut self, key: QueryState) -> FetchTicket {
        self.generation += 1;
        self.key = Some(key.clone());
        self.phase = ListPhase::Loading;
        FetchTicket {
            generation: self.generation,
            key,
        }
    }

    pub fn resolve(&mut self, ticket: &FetchTicket, result: Result<CapsulePage, String>) -> Resolution {
        if ticket.generation != self.generation {
            return Resolution::Stale;
        }
        self.phase = match result {
            Ok(page) => {
                self.total_pages = Some(page.total_pages);
                ListPhase::Ready(page)
            }
            Err(message) => ListPhase::Failed(message),
        };
        Resolution::Applied
    }

    pub fn presentation(&self) -> ListPresentation<'_> {
        match &self.phase {
            ListPhase::Idle | ListPhase::Loading => ListPresentation::Loading,
            ListPhase::Failed(message) => ListPresentation::Error(message),
            ListPhase::Ready(page) if page.is_empty() => ListPresentation::Empty,
            ListPhase::Ready(page) => ListPresentation::Populated {
                items: &page.data,
                total_count: page.total_count,
                pagination: Pagination::new(
                    self.key.as_ref().map(|k| k.page).unwrap_or(1),
                    page.total_pages,
                ),
            },
        }
    }

    /// What the list shows while the query is `current`. A result that
    /// belongs to any other key is hidden behind `Loading`.
    pub fn presentation_for(&self, current: &QueryState) -> ListPresentation<'_> {
        if self.key.as_ref() != Some(current) {
            return ListPresentation::Loading;
        }
        self.presentation()
    }

    /// Page count reported by the most recent successful fetch. Survives
    /// later requests so paging controls stay usable while loading.
    pub fn known_total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Pagination of the last successful page, if any.
    pub fn pagination(&self) -> Option<Pagination> {
        match self.presentation() {
            ListPresentation::Populated { pagination, .. } => Some(pagination),
            _ => None,
        }
    }
}
