use serde::Deserialize;

use crate::media::{CaptionTrack, PlaylistMember};

/// The slice of `ytInitialPlayerResponse` that describes caption tracks.
#[derive(Debug, Deserialize)]
pub struct PlayerResponse {
    #[serde(default)]
    pub captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
pub struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    pub renderer: TracklistRenderer,
}

#[derive(Debug, Deserialize)]
pub struct TracklistRenderer {
    #[serde(rename = "captionTracks", default)]
    pub caption_tracks: Vec<RawCaptionTrack>,
}

#[derive(Debug, Deserialize)]
pub struct RawCaptionTrack {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(rename = "languageCode")]
    pub language_code: String,
}

impl PlayerResponse {
    /// Flattens the nested renderer into tracks, preserving page order.
    pub fn into_tracks(self) -> Vec<CaptionTrack> {
        self.captions
            .map(|captions| {
                captions
                    .renderer
                    .caption_tracks
                    .into_iter()
                    .map(|track| CaptionTrack::new(track.base_url, track.language_code))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Response of the Data API `playlistItems.list` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemsResponse {
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub position: u32,
    pub resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub video_id: Option<String>,
}

impl PlaylistItem {
    /// Items without a video id (deleted or private entries) yield `None`.
    pub fn into_member(self) -> Option<PlaylistMember> {
        let snippet = self.snippet;
        let video_id = snippet.resource_id.video_id.filter(|id| !id.is_empty())?;
        Some(PlaylistMember::new(video_id, snippet.position, snippet.title))
    }
}
