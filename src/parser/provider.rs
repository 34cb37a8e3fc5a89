use serde_json::Value;
use tracing::debug;

use super::path::ResultsPath;
use super::video::{EntryShape, VideoRecord};
use crate::error::{Result, SearchError};

/// Turns the sliced JSON blob into video records.
#[derive(Debug, Clone)]
pub struct DataProvider {
    root_key: String,
    path: ResultsPath,
    shape: EntryShape,
}

impl DataProvider {
    pub fn new(root_key: &str, path: ResultsPath, shape: EntryShape) -> Self {
        DataProvider {
            root_key: root_key.to_string(),
            path,
            shape,
        }
    }

    pub fn youtube(root_key: &str) -> Self {
        DataProvider::new(root_key, ResultsPath::youtube_search(), EntryShape::youtube_video())
    }

    pub fn root_key(&self) -> &str {
        &self.root_key
    }

    /// Parse `json_text`, walk the results path and map up to `max_results`
    /// entries. Non-video entries are skipped; fewer results than asked for is
    /// not an error.
    pub fn extract(&self, json_text: &str, max_results: usize) -> Result<Vec<VideoRecord>> {
        let root: Value = serde_json::from_str(json_text)?;

        let entries = self.path.resolve(&root).map_err(|miss| SearchError::SchemaDrift {
            root: self.root_key.clone(),
            detail: miss.to_string(),
        })?;

        let mut skipped = 0usize;
        let records: Vec<VideoRecord> = entries
            .into_iter()
            .filter_map(|entry| {
                let record = self.shape.to_record(entry);
                if record.is_none() {
                    skipped += 1;
                }
                record
            })
            .take(max_results)
            .collect();

        debug!(
            "{}: {} records ({} non-video entries skipped)",
            self.root_key,
            records.len(),
            skipped
        );
        Ok(records)
    }
}

impl Default for DataProvider {
    fn default() -> Self {
        DataProvider::youtube("ytInitialData")
    }
}
