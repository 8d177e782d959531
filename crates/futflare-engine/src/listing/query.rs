use futflare_types::{PageLimit, SortBy};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const PARAM_SORT_BY: &str = "sortBy";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_SEARCH: &str = "search";

/// Listing query tuple. Also the fetch key: two equal states always describe
/// the same page of results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub sort_by: SortBy,
    pub page: u32,
    pub limit: PageLimit,
    pub search: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            sort_by: SortBy::default(),
            page: 1,
            limit: PageLimit::default(),
            search: String::new(),
        }
    }
}

impl QueryState {
    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }

    /// Pages are 1-based; 0 is clamped to 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// A new page size invalidates the current page number.
    pub fn set_limit(&mut self, limit: PageLimit) {
        self.limit = limit;
        self.page = 1;
    }

    /// A new search term starts over at page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn is_default(&self) -> bool {
        *self == QueryState::default()
    }

    /// Address parameters for every field that differs from its default, in
    /// a fixed order.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let defaults = QueryState::default();
        let mut params = Vec::new();
        if self.sort_by != defaults.sort_by {
            params.push((PARAM_SORT_BY, self.sort_by.to_string()));
        }
        if self.page != defaults.page {
            params.push((PARAM_PAGE, self.page.to_string()));
        }
        if self.limit != defaults.limit {
            params.push((PARAM_LIMIT, self.limit.to_string()));
        }
        if self.search != defaults.search {
            params.push((PARAM_SEARCH, self.search.clone()));
        }
        params
    }

    /// Read state from address parameters. Missing or unparseable values
    /// fall back to their defaults; unknown keys are ignored.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = QueryState::default();
        for (key, value) in params {
            let value = value.as_ref();
            match key.as_ref() {
                PARAM_SORT_BY => state.sort_by = value.parse().unwrap_or_default(),
                PARAM_PAGE => state.page = value.parse::<u32>().unwrap_or(1).max(1),
                PARAM_LIMIT => state.limit = value.parse().unwrap_or_default(),
                PARAM_SEARCH => state.search = value.to_string(),
                _ => {}
            }
        }
        state
    }

    /// Encoded query string without a leading `?`; empty for the default
    /// state.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_params())
            .finish()
    }

    /// Parse a query string, with or without a leading `?`.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        QueryState::from_params(form_urlencoded::parse(query.as_bytes()))
    }
}
