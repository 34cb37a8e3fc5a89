//! Keyword search over a video site's results page.
//!
//! The page embeds its results as a JSON literal assigned to a global
//! (`ytInitialData`) inside an inline `<script>`. A search fetches the page,
//! finds that assignment, slices out the balanced object and maps the result
//! entries to [`VideoRecord`]s.

pub mod error;
pub mod parser;
pub mod searcher;
pub mod settings;
pub mod sort;

pub use error::{Result, SearchError};
pub use parser::path::{ResultsPath, Step};
pub use parser::provider::DataProvider;
pub use parser::video::{EntryShape, VideoRecord};
pub use searcher::{Fetch, HttpFetcher, Searcher};
pub use settings::Settings;
pub use sort::{SearchConfig, SortBy};
