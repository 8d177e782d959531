use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Latest,
    Oldest,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Latest => "latest",
            SortBy::Oldest => "oldest",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseQueryValueError {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for ParseQueryValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value '{}' for {}", self.value, self.field)
    }
}

impl std::error::Error for ParseQueryValueError {}

impl FromStr for SortBy {
    type Err = ParseQueryValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(SortBy::Latest),
            "oldest" => Ok(SortBy::Oldest),
            other => Err(ParseQueryValueError {
                field: "sortBy",
                value: other.to_string(),
            }),
        }
    }
}

/// Page size. Only 5, 10 and 20 are offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageLimit {
    #[default]
    Five,
    Ten,
    Twenty,
}

impl PageLimit {
    pub const ALL: [PageLimit; 3] = [PageLimit::Five, PageLimit::Ten, PageLimit::Twenty];

    pub fn get(&self) -> u32 {
        match self {
            PageLimit::Five => 5,
            PageLimit::Ten => 10,
            PageLimit::Twenty => 20,
        }
    }
}

impl From<PageLimit> for u32 {
    fn from(limit: PageLimit) -> Self {
        limit.get()
    }
}

impl TryFrom<u32> for PageLimit {
    type Error = ParseQueryValueError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(PageLimit::Five),
            10 => Ok(PageLimit::Ten),
            20 => Ok(PageLimit::Twenty),
            other => Err(ParseQueryValueError {
                field: "limit",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for PageLimit {
    type Err = ParseQueryValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s.parse().map_err(|_| ParseQueryValueError {
            field: "limit",
            value: s.to_string(),
        })?;
        PageLimit::try_from(value)
    }
}

impl fmt::Display for PageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
