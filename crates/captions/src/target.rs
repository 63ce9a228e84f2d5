//! Classification of user supplied references into download targets.

use std::fmt;
use std::path::{Path, PathBuf};

use tokio_util::task::TaskTracker;
use tracing::{error, info};
use url::{ParseError, Url};

use crate::context::DownloadContext;
use crate::extractor::CaptionError;
use crate::playlist::PlaylistEnumerator;

/// What a single command-line reference points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadTarget {
    SingleVideo(String),
    Playlist(String),
}

impl DownloadTarget {
    /// Classifies `reference` without touching the network.
    ///
    /// - URL with a `list` parameter: playlist (wins over `v`)
    /// - URL with a `v` parameter: single video
    /// - scheme-less links (`youtube.com/watch?v=...`) are read as https URLs
    /// - a plain token without `/` or `?`: bare video id
    /// - URL with neither parameter: error
    ///
    /// Ids end up in file names, so ids that could leave the output folder
    /// are rejected.
    pub fn from_reference(reference: &str) -> Result<Self, CaptionError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(CaptionError::InvalidReference("empty reference".to_string()));
        }

        let url = match Url::parse(reference) {
            Ok(url) => url,
            Err(ParseError::RelativeUrlWithoutBase) if reference.contains(['/', '?']) => {
                Url::parse(&format!("https://{}", reference.trim_start_matches('/')))
                    .map_err(|e| {
                        CaptionError::InvalidReference(format!(
                            "invalid YouTube URL: {reference} ({e})"
                        ))
                    })?
            }
            Err(_) => return Ok(Self::SingleVideo(checked_id(reference)?.to_string())),
        };

        let query_value = |key: &str| {
            url.query_pairs()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.into_owned())
                .filter(|value| !value.is_empty())
        };

        if let Some(playlist_id) = query_value("list") {
            checked_id(&playlist_id)?;
            return Ok(Self::Playlist(playlist_id));
        }

        if let Some(video_id) = query_value("v") {
            checked_id(&video_id)?;
            return Ok(Self::SingleVideo(video_id));
        }

        Err(CaptionError::InvalidReference(format!(
            "invalid YouTube URL: {reference}"
        )))
    }

    /// File path for a video, folder path for a playlist.
    pub fn destination_path(&self, root: &Path) -> PathBuf {
        match self {
            Self::SingleVideo(video_id) => root.join(format!("captions_{video_id}.xml")),
            Self::Playlist(playlist_id) => root.join(format!("playlist_{playlist_id}")),
        }
    }

    /// Runs this target to completion or, for playlists, schedules its pages
    /// on `tracker`. Failures are logged, never returned.
    pub async fn download(
        &self,
        ctx: &DownloadContext,
        destination: PathBuf,
        language: &str,
        tracker: &TaskTracker,
    ) {
        match self {
            Self::SingleVideo(video_id) => {
                if ctx.should_skip(&destination).await {
                    info!(path = %destination.display(), "Caption file already exists");
                    return;
                }

                info!(video_id = %video_id, "Downloading captions");
                match ctx.resolver.resolve(video_id, &destination, language).await {
                    Ok(bytes) => info!(path = %destination.display(), bytes, "Caption downloaded"),
                    Err(e) => error!(
                        video_id = %video_id,
                        error = %e,
                        "Unable to download captions"
                    ),
                }
            }
            Self::Playlist(playlist_id) => {
                if let Err(source) = tokio::fs::create_dir_all(&destination).await {
                    let e = CaptionError::CreateDir {
                        path: destination,
                        source,
                    };
                    error!(playlist_id = %playlist_id, error = %e, "Unable to create playlist folder");
                    return;
                }

                info!(playlist_id = %playlist_id, "Listing playlist");
                PlaylistEnumerator::new(ctx.clone(), playlist_id.as_str(), destination, language)
                    .start(tracker);
            }
        }
    }
}

fn checked_id(id: &str) -> Result<&str, CaptionError> {
    if id.contains(['/', '\\']) || id.contains("..") {
        return Err(CaptionError::InvalidReference(format!(
            "id `{id}` is not a valid file name"
        )));
    }
    Ok(id)
}

impl fmt::Display for DownloadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleVideo(id) => write!(f, "video {id}"),
            Self::Playlist(id) => write!(f, "playlist {id}"),
        }
    }
}
