use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
/// One caption track advertised by a video's watch page.
///
/// Tracks are produced by the scraper and handed to the fetcher exactly once;
/// they carry no identity beyond these two fields.
///
/// # Examples
///
/// ```rust
/// use captions_extractor::media::CaptionTrack;
///
/// let track = CaptionTrack::new("https://www.youtube.com/api/timedtext?v=abc&lang=en", "en");
/// assert_eq!(track.language_code, "en");
/// ```
pub struct CaptionTrack {
    // Url serving the timed-text document
    pub source_url: String,
    // Language code, e.g. "en", "pt-BR"
    pub language_code: String,
}

impl CaptionTrack {
    pub fn new(source_url: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            language_code: language_code.into(),
        }
    }

    /// Exact, case-sensitive language match.
    pub fn matches_language(&self, language: &str) -> bool {
        self.language_code == language
    }
}

impl fmt::Display for CaptionTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.language_code, self.source_url)
    }
}
