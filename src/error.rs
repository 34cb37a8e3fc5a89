/// Errors produced by a search, one variant per pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("HTTP error fetching results page: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    #[error("no `{0}` assignment found in page scripts")]
    DataNotFound(String),
    #[error("unbalanced JSON object: input ended at depth {depth} after {consumed} bytes")]
    UnbalancedInput { depth: usize, consumed: usize },
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("schema drift in `{root}`: {detail}")]
    SchemaDrift { root: String, detail: String },
}

impl SearchError {
    /// Name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            SearchError::Config(_) => "config",
            SearchError::Network(_) => "fetch",
            SearchError::MalformedDocument(_) => "scripts",
            SearchError::DataNotFound(_) => "locate",
            SearchError::UnbalancedInput { .. } => "slice",
            SearchError::Parse(_) | SearchError::SchemaDrift { .. } => "provider",
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
