use std::sync::Arc;
use std::time::Instant;

use futflare_engine::{
    Debouncer, FetchTicket, ListPresentation, ListView, Pagination, QueryLocation, QueryState,
    QuerySync, Resolution, SEARCH_QUIET_PERIOD,
};
use futflare_types::{CapsulePage, PageLimit, SortBy};

use crate::api::CapsuleApi;
use crate::error::{ApiError, FetchError};
use crate::ports::Navigator;

/// A fetch that has been issued against a key but not yet awaited.
///
/// Holding the ticket separately from the listing lets the caller keep
/// mutating the query while the request is outstanding.
pub struct PendingFetch {
    ticket: FetchTicket,
    api: Arc<dyn CapsuleApi>,
}

impl PendingFetch {
    pub fn ticket(&self) -> &FetchTicket {
        &self.ticket
    }

    pub async fn run(self) -> FetchResult {
        tracing::debug!(generation = self.ticket.generation(), query = %self.ticket.key().to_query_string(), "fetching capsules");
        let result = self.api.list_capsules(self.ticket.key()).await;
        FetchResult {
            ticket: self.ticket,
            result,
        }
    }
}

pub struct FetchResult {
    pub ticket: FetchTicket,
    pub result: Result<CapsulePage, ApiError>,
}

/// The capsule list: query state kept in sync with a location, a debounced
/// search box, and the fetch state machine.
pub struct Listing<L: QueryLocation> {
    sync: QuerySync<L>,
    search: Debouncer,
    view: ListView,
    api: Arc<dyn CapsuleApi>,
    navigator: Arc<dyn Navigator>,
}

impl<L: QueryLocation> Listing<L> {
    pub fn new(location: L, api: Arc<dyn CapsuleApi>, navigator: Arc<dyn Navigator>) -> Self {
        let sync = QuerySync::new(location);
        let search = Debouncer::with_value(SEARCH_QUIET_PERIOD, sync.state().search.clone());
        Self {
            sync,
            search,
            view: ListView::new(),
            api,
            navigator,
        }
    }

    pub fn query(&self) -> &QueryState {
        self.sync.state()
    }

    pub fn location(&self) -> &L {
        self.sync.location()
    }

    /// Direct access for external navigation; follow with
    /// [`reload_location`](Self::reload_location).
    pub fn location_mut(&mut self) -> &mut L {
        self.sync.location_mut()
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// What the list shows for the current query. Until a result for the
    /// current key lands this is `Loading`, even if an older page is held.
    pub fn presentation(&self) -> ListPresentation<'_> {
        self.view.presentation_for(self.sync.state())
    }

    /// What the search box shows right now.
    pub fn search_text(&self) -> &str {
        self.search.raw()
    }

    /// Record a keystroke. The query is not touched until the input settles.
    pub fn type_search(&mut self, raw: impl Into<String>, at: Instant) {
        self.search.input(raw, at);
    }

    /// Propagate the search value if it has settled by `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(settled) => self.sync.set_search(settled),
            None => false,
        }
    }

    /// Sleep until the pending search input settles, then propagate it.
    pub async fn settle_search(&mut self) -> bool {
        let Some(deadline) = self.search.deadline() else {
            return false;
        };
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        self.tick(tokio::time::Instant::now().into_std())
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) -> bool {
        self.sync.set_sort_by(sort_by)
    }

    pub fn set_limit(&mut self, limit: PageLimit) -> bool {
        self.sync.set_limit(limit)
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        self.sync.set_page(page)
    }

    /// Position of the current query within the last known page count.
    fn pagination(&self) -> Option<Pagination> {
        let total_pages = self.view.known_total_pages()?;
        Some(Pagination::new(self.sync.state().page, total_pages))
    }

    /// Step back one page. No-op on the first page or before any page loaded.
    pub fn previous_page(&mut self) -> bool {
        match self.pagination().and_then(|p| p.previous()) {
            Some(page) => self.sync.set_page(page),
            None => false,
        }
    }

    /// Step forward one page. No-op on the last page or before any page loaded.
    pub fn next_page(&mut self) -> bool {
        match self.pagination().and_then(|p| p.next()) {
            Some(page) => self.sync.set_page(page),
            None => false,
        }
    }

    /// Re-read the query from the location, as after back/forward navigation.
    pub fn reload_location(&mut self) -> bool {
        let changed = self.sync.reload();
        if changed {
            self.search.reset(self.sync.state().search.clone());
        }
        changed
    }

    /// Issue a fetch if the current key has not been requested yet.
    pub fn start_fetch(&mut self) -> Option<PendingFetch> {
        let ticket = self.view.request(self.sync.state())?;
        Some(self.pending(ticket))
    }

    /// Issue a fetch for the current key unconditionally.
    pub fn restart_fetch(&mut self) -> Option<PendingFetch> {
        let ticket = match self.view.reload() {
            Some(ticket) => ticket,
            None => self.view.request(self.sync.state())?,
        };
        Some(self.pending(ticket))
    }

    fn pending(&self, ticket: FetchTicket) -> PendingFetch {
        PendingFetch {
            ticket,
            api: Arc::clone(&self.api),
        }
    }

    /// Land a fetch result.
    ///
    /// Results for superseded keys are dropped. A failure for the current key
    /// moves the view to its error state and asks the navigator for the error
    /// view.
    pub fn finish(&mut self, fetched: FetchResult) -> Result<Resolution, FetchError> {
        let FetchResult { ticket, result } = fetched;
        match result {
            Ok(page) => {
                let resolution = self.view.resolve(&ticket, Ok(page));
                if resolution == Resolution::Stale {
                    tracing::warn!(generation = ticket.generation(), "discarding stale capsule page");
                }
                Ok(resolution)
            }
            Err(err) => {
                let err = FetchError(err);
                let message = err.to_string();
                match self.view.resolve(&ticket, Err(message.clone())) {
                    Resolution::Stale => {
                        tracing::warn!(generation = ticket.generation(), error = %err, "discarding stale fetch failure");
                        Ok(Resolution::Stale)
                    }
                    Resolution::Applied => {
                        tracing::error!(error = %err, "capsule listing failed");
                        self.navigator.open_error(&message);
                        Err(err)
                    }
                }
            }
        }
    }

    /// Fetch the current key if needed and land the result.
    pub async fn refresh(&mut self) -> Result<Resolution, FetchError> {
        match self.start_fetch() {
            Some(pending) => {
                let fetched = pending.run().await;
                self.finish(fetched)
            }
            None => Ok(Resolution::Applied),
        }
    }
}
