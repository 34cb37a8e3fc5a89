use std::collections::HashMap;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use tracing::warn;

use crate::sort::SortBy;

pub const ENV_PREFIX: &str = "YTSEARCH";
pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com/results";
pub const DEFAULT_VARIABLE: &str = "ytInitialData";
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Defaults overlaid with `YTSEARCH_*` environment variables.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub sort_by: String,
    pub max_results: usize,
    pub variable: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(Environment::with_prefix(ENV_PREFIX))
    }

    /// Same as `load`, reading variables from `vars` instead of the process.
    pub fn load_from(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::build(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn build(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("sort_by", SortBy::Relevance.name())?
            .set_default("max_results", DEFAULT_MAX_RESULTS as u64)?
            .set_default("variable", DEFAULT_VARIABLE)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Configured sort mode; unknown names fall back to relevance.
    pub fn sort(&self) -> SortBy {
        SortBy::from_name(&self.sort_by).unwrap_or_else(|| {
            warn!("Unknown sort '{}', using relevance", self.sort_by);
            SortBy::Relevance
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            sort_by: SortBy::Relevance.name().to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            variable: DEFAULT_VARIABLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_without_env() {
        let s = Settings::load_from(HashMap::new()).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.sort(), SortBy::Relevance);
    }

    #[test]
    fn env_overrides() {
        let s = Settings::load_from(vars(&[
            ("YTSEARCH_SORT_BY", "views"),
            ("YTSEARCH_MAX_RESULTS", "5"),
            ("YTSEARCH_BASE_URL", "http://localhost:8080/results"),
        ]))
        .unwrap();
        assert_eq!(s.sort(), SortBy::Views);
        assert_eq!(s.max_results, 5);
        assert_eq!(s.base_url, "http://localhost:8080/results");
        assert_eq!(s.variable, DEFAULT_VARIABLE);
    }

    #[test]
    fn unknown_sort_falls_back() {
        let s = Settings::load_from(vars(&[("YTSEARCH_SORT_BY", "newest")])).unwrap();
        assert_eq!(s.sort(), SortBy::Relevance);
    }

    #[test]
    fn other_prefixes_ignored() {
        let s = Settings::load_from(vars(&[("OTHER_SORT_BY", "views")])).unwrap();
        assert_eq!(s.sort(), SortBy::Relevance);
    }
}
