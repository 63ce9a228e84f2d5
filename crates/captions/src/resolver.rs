use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::extractor::{CaptionError, CaptionTrackLister};
use crate::fetcher::CaptionDownloader;

/// Turns a video id into a caption file: list the tracks, pick the requested
/// language, download it.
#[derive(Clone)]
pub struct VideoResolver {
    lister: Arc<dyn CaptionTrackLister>,
    downloader: Arc<dyn CaptionDownloader>,
}

impl VideoResolver {
    pub fn new(lister: Arc<dyn CaptionTrackLister>, downloader: Arc<dyn CaptionDownloader>) -> Self {
        Self { lister, downloader }
    }

    /// Downloads the first track whose language code equals `language`
    /// exactly. There is no fallback language.
    pub async fn resolve(
        &self,
        video_id: &str,
        destination: &Path,
        language: &str,
    ) -> Result<u64, CaptionError> {
        let tracks = self.lister.list_caption_tracks(video_id).await?;

        let track = tracks
            .iter()
            .find(|track| track.matches_language(language))
            .ok_or_else(|| {
                debug!(
                    video_id,
                    available = ?tracks.iter().map(|t| t.language_code.as_str()).collect::<Vec<_>>(),
                    "Requested language missing"
                );
                CaptionError::LanguageNotAvailable(language.to_string())
            })?;

        self.downloader.download(track, destination).await
    }
}
