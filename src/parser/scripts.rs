use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::error::{Result, SearchError};

static OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<script\b[^>]*>").unwrap());
static CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</script\s*>").unwrap());

/// Inline script bodies in document order, tags excluded.
///
/// A page with no scripts yields an empty list. Scanning stops at an opening
/// tag that is never closed; the bodies before it are kept. Only when that
/// unclosed tag is the first script is the page a `MalformedDocument`.
pub fn extract_scripts(html: &str) -> Result<Vec<&str>> {
    let mut scripts = Vec::new();
    let mut pos = 0;

    while let Some(open) = OPEN_RE.find_at(html, pos) {
        let body_start = open.end();
        let Some(close) = CLOSE_RE.find_at(html, body_start) else {
            if scripts.is_empty() {
                return Err(SearchError::MalformedDocument(format!(
                    "<script> opened at byte {} is never closed",
                    open.start()
                )));
            }
            warn!(
                "Unclosed <script> at byte {}, keeping {} earlier scripts",
                open.start(),
                scripts.len()
            );
            break;
        };
        scripts.push(&html[body_start..close.start()]);
        pos = close.end();
    }

    Ok(scripts)
}
