use reqwest::Url;
use tracing::{info, warn};

use crate::error::{Result, SearchError};
use crate::parser::locate::Locator;
use crate::parser::provider::DataProvider;
use crate::parser::video::VideoRecord;
use crate::parser::extract_videos;
use crate::settings::{Settings, DEFAULT_BASE_URL, DEFAULT_VARIABLE};
use crate::sort::{SearchConfig, SortBy};

/// Transport for the results page: one blocking GET, full body returned.
pub trait Fetch {
    fn fetch(&self, url: &Url) -> Result<String>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, url: &Url) -> Result<String> {
        (**self).fetch(url)
    }
}

/// Plain `reqwest` blocking client. No timeout or retries at this layer;
/// callers wanting bounded latency should pass a configured client.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        HttpFetcher { client }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<String> {
        let body = self
            .client
            .get(url.clone())
            .send()?
            .error_for_status()?
            .text()?;
        Ok(body)
    }
}

/// Keyword search against the results page.
///
/// The sort mode is fixed at construction; build another `Searcher` to change
/// it. Calls share no mutable state, so one `Searcher` can serve many threads
/// when its fetcher can.
#[derive(Debug, Clone)]
pub struct Searcher<F = HttpFetcher> {
    base_url: String,
    config: SearchConfig,
    locator: Locator,
    provider: DataProvider,
    fetcher: F,
}

impl Searcher<HttpFetcher> {
    pub fn new() -> Result<Self> {
        Self::with_fetcher(HttpFetcher::new())
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::with_fetcher(HttpFetcher::new())?
            .with_sort_by(settings.sort())
            .with_base_url(&settings.base_url)
            .with_variable(&settings.variable)
    }
}

impl<F: Fetch> Searcher<F> {
    pub fn with_fetcher(fetcher: F) -> Result<Self> {
        Ok(Searcher {
            base_url: DEFAULT_BASE_URL.to_string(),
            config: SearchConfig::new(),
            locator: locator_for(DEFAULT_VARIABLE)?,
            provider: DataProvider::youtube(DEFAULT_VARIABLE),
            fetcher,
        })
    }

    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.config = SearchConfig::with_sort_by(sort_by);
        self
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Look for a different global variable; the results layout is unchanged.
    pub fn with_variable(mut self, variable: &str) -> Result<Self> {
        self.locator = locator_for(variable)?;
        self.provider = DataProvider::youtube(variable);
        Ok(self)
    }

    pub fn with_provider(mut self, provider: DataProvider) -> Result<Self> {
        self.locator = locator_for(provider.root_key())?;
        self.provider = provider;
        Ok(self)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// `<base>?search_query=<keyword>&sp=<sort token>`, both form-encoded.
    pub fn search_url(&self, keyword: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.base_url,
            &[("search_query", keyword), ("sp", self.config.sort_parameter())],
        )
        .map_err(|e| SearchError::Config(format!("bad base url '{}': {}", self.base_url, e)))
    }

    /// Fetch the results page once and return up to `max_results` videos.
    /// Any stage failure is returned as-is.
    pub fn search(&self, keyword: &str, max_results: usize) -> Result<Vec<VideoRecord>> {
        let url = self.search_url(keyword)?;
        info!("Searching '{}' (sort: {}): {}", keyword, self.config.sort_by(), url);

        let result = self
            .fetcher
            .fetch(&url)
            .and_then(|html| extract_videos(&html, &self.locator, &self.provider, max_results));

        match &result {
            Ok(records) => info!("'{}': {} videos", keyword, records.len()),
            Err(e) => warn!("'{}' failed at {}: {}", keyword, e.stage(), e),
        }
        result
    }
}

fn locator_for(variable: &str) -> Result<Locator> {
    Locator::for_variable(variable)
        .map_err(|e| SearchError::Config(format!("bad variable name '{}': {}", variable, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoFetch;

    impl Fetch for NoFetch {
        fn fetch(&self, _url: &Url) -> Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn url_carries_keyword_and_sort_token() {
        let s = Searcher::with_fetcher(NoFetch).unwrap().with_sort_by(SortBy::UploadDate);
        let url = s.search_url("rust lang & co").unwrap();
        assert_eq!(url.host_str(), Some("www.youtube.com"));
        assert_eq!(url.path(), "/results");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("search_query".to_string(), "rust lang & co".to_string()),
                ("sp".to_string(), "CAISAhAB".to_string()),
            ]
        );
    }

    /// The getter hands out the decoded token (`EgIQAQ==`); only the built URL
    /// carries the wire form `EgIQAQ%3D%3D`.
    #[test]
    fn relevance_token_is_percent_encoded() {
        let s = Searcher::with_fetcher(NoFetch).unwrap();
        assert_eq!(s.config().sort_parameter(), "EgIQAQ==");
        let url = s.search_url("cats").unwrap();
        assert_eq!(url.query(), Some("search_query=cats&sp=EgIQAQ%3D%3D"));
    }

    #[test]
    fn bad_base_url() {
        let s = Searcher::with_fetcher(NoFetch).unwrap().with_base_url("not a url");
        assert!(matches!(s.search_url("x"), Err(SearchError::Config(_))));
    }

    #[test]
    fn empty_page_is_data_not_found() {
        let s = Searcher::with_fetcher(NoFetch).unwrap();
        let err = s.search("anything", 5).unwrap_err();
        assert!(matches!(err, SearchError::DataNotFound(_)));
    }
}
