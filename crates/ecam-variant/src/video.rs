use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Recognizes watch (`watch?v=`), short (`youtu.be/`), embed (`embed/`),
/// legacy `v/` and `/u/x/` shapes. Capture 7 is the candidate id.
static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*((youtu.be/)|(v/)|(/u/\w/)|(embed/)|(watch\?))\??v?=?([^#&?]*).*")
        .expect("valid regex")
});

const VIDEO_ID_LEN: usize = 11;

/// An 11-character YouTube video id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/hqdefault.jpg", self.0)
    }

    #[must_use]
    pub fn embed_url(&self) -> String {
        format!(
            "https://www.youtube.com/embed/{}?autoplay=0&mute=0&controls=1&rel=0&modestbranding=1",
            self.0
        )
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the video id from a YouTube URL.
///
/// Best effort: any 11-character capture is accepted without checking it
/// against YouTube's alphabet. Returns `None` for absent input or URLs that
/// don't match a known shape.
#[must_use]
pub fn resolve_video_id(url: &str) -> Option<VideoId> {
    if url.is_empty() {
        return None;
    }
    let captures = VIDEO_URL_RE.captures(url)?;
    let candidate = captures.get(7)?.as_str();
    (candidate.chars().count() == VIDEO_ID_LEN).then(|| VideoId(candidate.to_owned()))
}
