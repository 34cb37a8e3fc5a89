pub mod locate;
pub mod path;
pub mod provider;
pub mod scripts;
pub mod slice;
pub mod video;

use tracing::debug;

use crate::error::{Result, SearchError};
use locate::Locator;
use provider::DataProvider;
use video::VideoRecord;

/// Four-stage pipeline: html → scripts → located assignment → balanced slice → records.
pub fn extract_videos(
    html: &str,
    locator: &Locator,
    provider: &DataProvider,
    max_results: usize,
) -> Result<Vec<VideoRecord>> {
    let scripts = scripts::extract_scripts(html)?;
    debug!("{} inline scripts in {} bytes of html", scripts.len(), html.len());

    let tail = locator
        .locate(&scripts)
        .ok_or_else(|| SearchError::DataNotFound(locator.variable().to_string()))?;

    let json = slice::slice_object(tail)?;
    debug!("{} = {} bytes of JSON", locator.variable(), json.len());

    provider.extract(json, max_results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use path::ResultsPath;
    use video::EntryShape;

    const PAGE: &str = r#"<html><head><script>var cfg = {"x":1};</script></head>
<body><script nonce="n">var ytInitialData = {"a":[{"id":"v1"},{"id":"v2"}]};</script></body></html>"#;

    fn run(html: &str, max: usize) -> Result<Vec<VideoRecord>> {
        let locator = Locator::for_variable("ytInitialData").unwrap();
        let provider = DataProvider::new("ytInitialData", ResultsPath::parse("a").unwrap(), EntryShape::flat("id"));
        extract_videos(html, &locator, &provider, max)
    }

    #[test]
    fn extracts_in_order() {
        let records = run(PAGE, 10).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v2"]);
    }

    #[test]
    fn no_scripts_is_data_not_found() {
        let err = run("<html><body>nothing</body></html>", 5).unwrap_err();
        assert!(matches!(err, SearchError::DataNotFound(ref v) if v == "ytInitialData"));
    }

    #[test]
    fn truncated_blob_is_unbalanced() {
        let html = r#"<script>ytInitialData = {"a":[{"id":"v1"}]</script>"#;
        let err = run(html, 5).unwrap_err();
        assert!(matches!(err, SearchError::UnbalancedInput { .. }));
    }

    #[test]
    fn stray_unclosed_script_after_data() {
        let html = r#"<script>ytInitialData = {"a":[{"id":"v1"}]};</script><script>var late = 1;"#;
        let records = run(html, 5).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "v1");
    }

    #[test]
    fn unclosed_script_is_malformed() {
        let err = run(r#"<script>ytInitialData = {"a":[]};"#, 5).unwrap_err();
        assert!(matches!(err, SearchError::MalformedDocument(_)));
    }
}
