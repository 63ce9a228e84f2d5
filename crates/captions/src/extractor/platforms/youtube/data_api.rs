use async_trait::async_trait;
use tracing::debug;

use crate::{
    extractor::{
        error::CaptionError, platform_extractor::PlatformClient,
        platforms::youtube::models::PlaylistItemsResponse,
    },
    media::PlaylistPage,
    playlist::PlaylistSource,
};

pub const DEFAULT_PLAYLIST_ITEMS_URL: &str =
    "https://www.googleapis.com/youtube/v3/playlistItems";

/// `playlistItems.list` client for the YouTube Data API v3.
///
/// The API requires a key issued out of band. Without one every page request
/// fails with [`CaptionError::MissingCredentials`], which only affects the
/// playlist being listed.
pub struct YouTubeDataApi {
    client: PlatformClient,
    endpoint: String,
    api_key: Option<String>,
}

impl YouTubeDataApi {
    /// Largest page the API hands out.
    pub const MAX_PAGE_SIZE: u32 = 50;

    pub fn new(client: PlatformClient, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: DEFAULT_PLAYLIST_ITEMS_URL.to_string(),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl PlaylistSource for YouTubeDataApi {
    async fn list_page(
        &self,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Result<PlaylistPage, CaptionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CaptionError::MissingCredentials)?;

        let page_size = Self::MAX_PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", page_size.as_str()),
        ];
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            query.push(("pageToken", cursor));
        }
        query.push(("key", api_key));

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await
            .map_err(CaptionError::ListingRequest)?;

        let status = response.status();
        if !status.is_success() {
            // The API explains quota and key problems in the body.
            let body = response.text().await.unwrap_or_default();
            return Err(CaptionError::ListingStatus {
                status: status.as_u16(),
                body,
            });
        }

        let data = response
            .json::<PlaylistItemsResponse>()
            .await
            .map_err(CaptionError::ListingRequest)?;

        let total = data.items.len();
        let members: Vec<_> = data
            .items
            .into_iter()
            .filter_map(|item| item.into_member())
            .collect();
        if members.len() != total {
            debug!(
                playlist_id,
                skipped = total - members.len(),
                "Skipping playlist items without a video id"
            );
        }

        Ok(PlaylistPage::new(members, data.next_page_token))
    }
}
