use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// One search result. Everything except `id` is best-effort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub channel_name: Option<String>,
    pub channel_id: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub view_count: Option<u64>,
    pub url: String,
}

/// How a result entry is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryShape {
    /// Key wrapping the video fields, e.g. `videoRenderer`. Entries without
    /// it are other content and get skipped. `None` reads the entry itself.
    pub renderer: Option<String>,
    pub id_key: String,
}

impl EntryShape {
    pub fn youtube_video() -> Self {
        EntryShape {
            renderer: Some("videoRenderer".to_string()),
            id_key: "videoId".to_string(),
        }
    }

    /// Entries are plain objects carrying the id under `id_key`.
    pub fn flat(id_key: &str) -> Self {
        EntryShape {
            renderer: None,
            id_key: id_key.to_string(),
        }
    }

    /// Map one entry, or `None` when it isn't a video.
    pub fn to_record(&self, entry: &Value) -> Option<VideoRecord> {
        let video = match &self.renderer {
            Some(key) => entry.get(key)?,
            None => entry,
        };
        let id = video.get(&self.id_key)?.as_str()?.trim();
        if id.is_empty() {
            return None;
        }

        let owner_run = video
            .get("ownerText")
            .and_then(|o| o.get("runs"))
            .and_then(|r| r.get(0));

        Some(VideoRecord {
            id: id.to_string(),
            title: video.get("title").and_then(text_of).unwrap_or_default(),
            channel_name: video.get("ownerText").and_then(text_of),
            channel_id: owner_run
                .and_then(|r| r.pointer("/navigationEndpoint/browseEndpoint/browseId"))
                .and_then(Value::as_str)
                .map(str::to_string),
            thumbnail: video
                .pointer("/thumbnail/thumbnails")
                .and_then(Value::as_array)
                .and_then(|t| t.last())
                .and_then(|t| t.get("url"))
                .and_then(Value::as_str)
                .map(str::to_string),
            duration: video.get("lengthText").and_then(text_of),
            view_count: video
                .get("viewCountText")
                .and_then(text_of)
                .and_then(|t| parse_count(&t)),
            url: format!("{}{}", WATCH_URL, id),
        })
    }
}

impl Default for EntryShape {
    fn default() -> Self {
        EntryShape::youtube_video()
    }
}

/// Display text from a plain string, `{"simpleText": ..}` or `{"runs": [..]}`.
pub fn text_of(node: &Value) -> Option<String> {
    let text = match node {
        Value::String(s) => s.clone(),
        Value::Object(o) => {
            if let Some(s) = o.get("simpleText").and_then(Value::as_str) {
                s.to_string()
            } else {
                o.get("runs")?
                    .as_array()?
                    .iter()
                    .filter_map(|r| r.get("text").and_then(Value::as_str))
                    .join("")
            }
        }
        _ => return None,
    };
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Digits of a view-count label: "1,234,567 views" -> 1234567.
fn parse_count(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
