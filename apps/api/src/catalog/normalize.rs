//! Maps raw, shape-specific entries onto [`NormalizedEntry`].
//!
//! Field aliases, each resolved independently:
//! - name:    `title`, then `name`
//! - link:    `link`, then `url`
//! - creator: `creator`, then `source`, else empty
//! - topic:   `topic`, else empty
//! - info:    `By {creator}` when a creator exists, then `info`, then [`FALLBACK_INFO`]
//!
//! Only non-empty strings count as present. No validation happens here;
//! an entry with no usable fields still normalizes.

use serde_json::Value;

use crate::catalog::models::NormalizedEntry;
use crate::catalog::video_id::extract_video_id;

pub const FALLBACK_INFO: &str = "YouTube Tutorial";

pub fn normalize_entry(raw: &Value) -> NormalizedEntry {
    let name = first_text(raw, &["title", "name"]);
    let link = first_text(raw, &["link", "url"]);
    let creator = first_text(raw, &["creator", "source"]);
    let topic = first_text(raw, &["topic"]).unwrap_or_default();

    let info = match &creator {
        Some(creator) => format!("By {creator}"),
        None => first_text(raw, &["info"]).unwrap_or_else(|| FALLBACK_INFO.to_string()),
    };
    let video_id = extract_video_id(link.as_deref());

    NormalizedEntry {
        name,
        link,
        creator: creator.unwrap_or_default(),
        topic,
        video_id,
        info,
    }
}

fn first_text(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| raw.get(key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
