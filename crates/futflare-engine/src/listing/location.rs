use super::query::QueryState;

/// The shareable address the listing mirrors its state into.
///
/// Writes always replace the current entry; the listing never pushes history.
pub trait QueryLocation {
    /// Current query string, without the leading `?`.
    fn query(&self) -> String;

    fn replace_query(&mut self, query: &str);
}

/// In-memory address with a history stack.
///
/// `push` models external navigation (bookmarks, links); `back` models the
/// browser back button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    entries: Vec<String>,
    replacements: usize,
}

impl MemoryLocation {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let query = query.strip_prefix('?').map(str::to_string).unwrap_or(query);
        Self {
            entries: vec![query],
            replacements: 0,
        }
    }

    pub fn push(&mut self, query: impl Into<String>) {
        self.entries.push(query.into());
    }

    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl QueryLocation for MemoryLocation {
    fn query(&self) -> String {
        self.entries.last().cloned().unwrap_or_default()
    }

    fn replace_query(&mut self, query: &str) {
        match self.entries.last_mut() {
            Some(current) => *current = query.to_string(),
            None => self.entries.push(query.to_string()),
        }
        self.replacements += 1;
    }
}

/// Keeps a [`QueryState`] and a [`QueryLocation`] in step.
///
/// Every state change goes through [`update`](Self::update), the single
/// place that writes to the location.
#[derive(Debug)]
pub struct QuerySync<L: QueryLocation> {
    location: L,
    state: QueryState,
}

impl<L: QueryLocation> QuerySync<L> {
    /// Initialise from whatever the location currently holds.
    pub fn new(location: L) -> Self {
        let state = QueryState::from_query_string(&location.query());
        Self { location, state }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    /// Apply `change`, then write the serialized state back if it differs
    /// from what the location shows. Returns whether the state changed.
    pub fn update(&mut self, change: impl FnOnce(&mut QueryState)) -> bool {
        let before = self.state.clone();
        change(&mut self.state);

        let query = self.state.to_query_string();
        if query != self.location.query() {
            self.location.replace_query(&query);
        }
        self.state != before
    }

    /// Re-read after the location changed underneath us (back/forward).
    pub fn reload(&mut self) -> bool {
        let state = QueryState::from_query_string(&self.location.query());
        let changed = state != self.state;
        self.state = state;
        changed
    }

    pub fn set_sort_by(&mut self, sort_by: futflare_types::SortBy) -> bool {
        self.update(|q| q.set_sort_by(sort_by))
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        self.update(|q| q.set_page(page))
    }

    pub fn set_limit(&mut self, limit: futflare_types::PageLimit) -> bool {
        self.update(|q| q.set_limit(limit))
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        self.update(|q| q.set_search(search))
    }

    pub fn into_location(self) -> L {
        self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futflare_types::{PageLimit, SortBy};

    #[test]
    fn test_initialises_from_location() {
        let sync = QuerySync::new(MemoryLocation::new("?sortBy=oldest&page=3"));
        assert_eq!(sync.state().sort_by, SortBy::Oldest);
        assert_eq!(sync.state().page, 3);
    }

    #[test]
    fn test_updates_replace_instead_of_push() {
        let mut sync = QuerySync::new(MemoryLocation::new(""));
        sync.set_page(2);
        sync.set_sort_by(SortBy::Oldest);
        sync.set_limit(PageLimit::Ten);

        assert_eq!(sync.location().history_len(), 1);
        assert_eq!(sync.location().query(), "sortBy=oldest&limit=10");
    }

    #[test]
    fn test_returning_to_defaults_cleans_the_address() {
        let mut sync = QuerySync::new(MemoryLocation::new("page=4"));
        sync.set_page(1);
        assert_eq!(sync.location().query(), "");
    }

    #[test]
    fn test_no_write_when_nothing_changes() {
        let mut sync = QuerySync::new(MemoryLocation::new("page=2"));
        assert!(!sync.set_page(2));
        assert_eq!(sync.location().replacements(), 0);
    }

    #[test]
    fn test_non_canonical_address_is_normalised_on_first_update() {
        let mut sync = QuerySync::new(MemoryLocation::new("page=2&utm=x"));
        sync.set_page(2);
        assert_eq!(sync.location().query(), "page=2");
    }

    #[test]
    fn test_reload_after_back_navigation() {
        let mut location = MemoryLocation::new("");
        location.push("search=cats&page=2");
        let mut sync = QuerySync::new(location);
        assert_eq!(sync.state().search, "cats");

        sync.location_mut().back();
        assert!(sync.reload());
        assert!(sync.state().is_default());
    }
}
