use std::path::Path;
use std::sync::Arc;

use crate::jitter::Jitter;
use crate::playlist::PlaylistSource;
use crate::resolver::VideoResolver;

/// Collaborators shared by every download task of a run.
///
/// Cloned into each spawned task; all members are reference counted or
/// `Copy`, and nothing in here is mutated once the run starts.
#[derive(Clone)]
pub struct DownloadContext {
    pub resolver: VideoResolver,
    pub playlists: Arc<dyn PlaylistSource>,
    pub jitter: Jitter,
    /// Re-download captions even when the destination file already exists.
    pub overwrite: bool,
}

impl DownloadContext {
    pub fn new(resolver: VideoResolver, playlists: Arc<dyn PlaylistSource>) -> Self {
        Self {
            resolver,
            playlists,
            jitter: Jitter::default(),
            overwrite: false,
        }
    }

    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Existence check used to skip finished work. Not atomic with the
    /// download that may follow it.
    pub async fn should_skip(&self, destination: &Path) -> bool {
        !self.overwrite && tokio::fs::try_exists(destination).await.unwrap_or(false)
    }
}
