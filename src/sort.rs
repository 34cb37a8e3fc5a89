use std::fmt;

use serde::{Deserialize, Serialize};

/// Result ordering understood by the search page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Relevance,
    UploadDate,
    Views,
    Rating,
}

/// (mode, name, `sp` token). Tokens are stored decoded; URL building encodes them.
const SORT_OPTIONS: &[(SortBy, &str, &str)] = &[
    (SortBy::Relevance, "relevance", "EgIQAQ=="),
    (SortBy::UploadDate, "upload_date", "CAISAhAB"),
    (SortBy::Views, "views", "CAMSAhAB"),
    (SortBy::Rating, "rating", "CAESAhAB"),
];

impl SortBy {
    pub fn from_name(name: &str) -> Option<SortBy> {
        SORT_OPTIONS
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(mode, _, _)| *mode)
    }

    /// Like `from_name`, but anything unrecognized becomes `Relevance`.
    pub fn from_name_lossy(name: &str) -> SortBy {
        SortBy::from_name(name).unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    pub fn token(self) -> &'static str {
        self.entry().2
    }

    pub fn all() -> impl Iterator<Item = SortBy> {
        SORT_OPTIONS.iter().map(|(mode, _, _)| *mode)
    }

    fn entry(self) -> &'static (SortBy, &'static str, &'static str) {
        // Every variant has exactly one row.
        SORT_OPTIONS
            .iter()
            .find(|(mode, _, _)| *mode == self)
            .unwrap_or(&SORT_OPTIONS[0])
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-session search options. Treat as immutable once a search starts;
/// `Searcher` takes its own copy so in-flight searches never observe a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfig {
    sort_by: SortBy,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort_by(sort_by: SortBy) -> Self {
        SearchConfig { sort_by }
    }

    pub fn is_valid_sort_option(name: &str) -> bool {
        SortBy::from_name(name).is_some()
    }

    /// Set the sort mode by name. Unknown names fall back to `relevance`.
    pub fn set_sort_by(&mut self, name: &str) {
        self.sort_by = SortBy::from_name_lossy(name);
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn sort_parameter(&self) -> &'static str {
        self.sort_by.token()
    }
}
