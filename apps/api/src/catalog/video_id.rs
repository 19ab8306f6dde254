//! YouTube video id extraction.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches watch URLs (`?v=` / `&v=`), `youtu.be` short links, `/embed/`,
/// `/v/`, `/e/` paths and multi-segment paths such as `/user/name/<id>`.
/// The id is the first 11-character run that follows.
static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("video id pattern is valid")
});

/// Returns the video id embedded in `link`, or `None` when the link is absent
/// or not a recognised YouTube URL.
pub fn extract_video_id(link: Option<&str>) -> Option<String> {
    let link = link?;
    VIDEO_ID_RE
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
