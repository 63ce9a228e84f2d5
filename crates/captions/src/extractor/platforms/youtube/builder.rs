use async_trait::async_trait;
use tracing::debug;

use crate::{
    extractor::{
        error::CaptionError,
        platform_extractor::{CaptionTrackLister, PlatformClient},
        platforms::youtube::models::PlayerResponse,
    },
    media::CaptionTrack,
};

pub const DEFAULT_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Text markers delimiting the player response embedded in the watch page.
///
/// The platform has no anonymous caption listing API, so the track list is cut
/// out of an inline `<script>` assignment. When the page layout drifts, these
/// two strings are the only thing that needs to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerMarkers {
    pub prefix: String,
    pub terminator: String,
}

impl PlayerMarkers {
    pub const DEFAULT_PREFIX: &str = "ytInitialPlayerResponse = ";
    pub const DEFAULT_TERMINATOR: &str = ";</script>";

    pub fn new(prefix: impl Into<String>, terminator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            terminator: terminator.into(),
        }
    }
}

impl Default for PlayerMarkers {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX, Self::DEFAULT_TERMINATOR)
    }
}

/// Cuts the player response out of `html` and returns its caption tracks in
/// page order.
pub fn extract_caption_tracks(
    html: &str,
    markers: &PlayerMarkers,
) -> Result<Vec<CaptionTrack>, CaptionError> {
    let (_, rest) =
        html.split_once(markers.prefix.as_str())
            .ok_or_else(|| CaptionError::MarkerNotFound {
                marker: markers.prefix.clone(),
            })?;

    let (json_str, _) = rest.split_once(markers.terminator.as_str()).ok_or_else(|| {
        CaptionError::TerminatorNotFound {
            marker: markers.terminator.clone(),
        }
    })?;

    let response: PlayerResponse = serde_json::from_str(json_str)?;
    Ok(response.into_tracks())
}

pub struct WatchPageScraper {
    client: PlatformClient,
    watch_url: String,
    markers: PlayerMarkers,
}

impl WatchPageScraper {
    pub fn new(client: PlatformClient) -> Self {
        Self {
            client,
            watch_url: DEFAULT_WATCH_URL.to_string(),
            markers: PlayerMarkers::default(),
        }
    }

    /// Overrides the watch page prefix; the video id is appended verbatim.
    pub fn with_watch_url(mut self, watch_url: impl Into<String>) -> Self {
        self.watch_url = watch_url.into();
        self
    }

    pub fn with_markers(mut self, markers: PlayerMarkers) -> Self {
        self.markers = markers;
        self
    }

    pub fn page_url(&self, video_id: &str) -> String {
        format!("{}{}", self.watch_url, video_id)
    }

    async fn fetch_page_content(&self, video_id: &str) -> Result<String, CaptionError> {
        let url = self.page_url(video_id);
        debug!(%url, "Fetching watch page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(CaptionError::PageFetch)?;

        response.text().await.map_err(CaptionError::PageFetch)
    }
}

#[async_trait]
impl CaptionTrackLister for WatchPageScraper {
    async fn list_caption_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, CaptionError> {
        let body = self.fetch_page_content(video_id).await?;
        let tracks = extract_caption_tracks(&body, &self.markers)?;
        debug!(video_id, count = tracks.len(), "Found caption tracks");
        Ok(tracks)
    }
}
