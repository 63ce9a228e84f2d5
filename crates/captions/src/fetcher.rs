//! Streams caption documents to disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::extractor::{CaptionError, PlatformClient};
use crate::media::CaptionTrack;

/// Writes one caption track to a destination path.
///
/// Implementations are unconditional: whatever lives at `destination` gets
/// replaced. Skip-if-exists is the caller's business.
#[async_trait]
pub trait CaptionDownloader: Send + Sync {
    /// Returns the number of bytes written.
    async fn download(&self, track: &CaptionTrack, destination: &Path)
    -> Result<u64, CaptionError>;
}

/// Sibling path the body is streamed into before being moved into place.
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

pub struct CaptionFetcher {
    client: PlatformClient,
}

impl CaptionFetcher {
    pub fn new(client: PlatformClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CaptionDownloader for CaptionFetcher {
    async fn download(
        &self,
        track: &CaptionTrack,
        destination: &Path,
    ) -> Result<u64, CaptionError> {
        let response = self
            .client
            .get(&track.source_url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(CaptionError::CaptionRequest)?;

        let partial = partial_path(destination);
        let mut file = tokio::fs::File::create(&partial)
            .await
            .map_err(|source| CaptionError::FileCreate {
                path: partial.clone(),
                source,
            })?;

        let copy_error = |source: std::io::Error| CaptionError::StreamCopy {
            path: partial.clone(),
            source,
        };

        // A failure below leaves the `.part` file behind, never a truncated
        // file at `destination`.
        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| copy_error(std::io::Error::other(e)))?;
            file.write_all(&chunk).await.map_err(copy_error)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(copy_error)?;
        drop(file);

        tokio::fs::rename(&partial, destination)
            .await
            .map_err(|source| CaptionError::StreamCopy {
                path: destination.to_path_buf(),
                source,
            })?;

        debug!(path = %destination.display(), bytes = written, "Caption saved");
        Ok(written)
    }
}
