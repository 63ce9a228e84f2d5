//! Playlist enumeration and per-member fan-out.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info};

use crate::context::DownloadContext;
use crate::extractor::CaptionError;
use crate::media::{PlaylistMember, PlaylistPage};

/// Paginated membership listing for a playlist.
///
/// `cursor` is `None` for the first page; afterwards it is whatever the
/// previous page returned as `next_cursor`.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn list_page(
        &self,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Result<PlaylistPage, CaptionError>;
}

/// Walks a playlist page by page and spawns one download task per member.
///
/// Every page and every member runs as its own task on the run's
/// [`TaskTracker`]. A page registers the member tasks and the next page task
/// before it finishes, so waiting on the tracker covers the whole playlist.
pub struct PlaylistEnumerator {
    ctx: DownloadContext,
    playlist_id: String,
    directory: PathBuf,
    language: String,
}

impl PlaylistEnumerator {
    pub fn new(
        ctx: DownloadContext,
        playlist_id: impl Into<String>,
        directory: impl Into<PathBuf>,
        language: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            ctx,
            playlist_id: playlist_id.into(),
            directory: directory.into(),
            language: language.into(),
        })
    }

    pub fn member_path(&self, member: &PlaylistMember) -> PathBuf {
        self.directory.join(member.file_name())
    }

    /// Schedules the first page. Returns immediately; progress is observed
    /// through `tracker`.
    pub fn start(self: Arc<Self>, tracker: &TaskTracker) {
        Self::spawn_page(self, tracker, None);
    }

    fn spawn_page(this: Arc<Self>, tracker: &TaskTracker, cursor: Option<String>) {
        let child_tracker = tracker.clone();
        tracker.spawn(async move { this.fetch_page(child_tracker, cursor).await });
    }

    async fn fetch_page(self: Arc<Self>, tracker: TaskTracker, cursor: Option<String>) {
        debug!(playlist_id = %self.playlist_id, cursor = ?cursor, "Listing playlist page");

        let page = match self
            .ctx
            .playlists
            .list_page(&self.playlist_id, cursor.as_deref())
            .await
        {
            Ok(page) => page,
            Err(e) => {
                error!(
                    playlist_id = %self.playlist_id,
                    cursor = ?cursor,
                    error = %e,
                    "Unable to list playlist items"
                );
                return;
            }
        };

        debug!(
            playlist_id = %self.playlist_id,
            members = page.members.len(),
            last = page.is_last(),
            "Received playlist page"
        );

        for member in page.members {
            let this = Arc::clone(&self);
            tracker.spawn(async move { this.download_member(member).await });
        }

        if let Some(next_cursor) = page.next_cursor {
            Self::spawn_page(self, &tracker, Some(next_cursor));
        }
    }

    async fn download_member(&self, member: PlaylistMember) {
        let path = self.member_path(&member);

        if self.ctx.should_skip(&path).await {
            info!(path = %path.display(), "Caption file already exists");
            return;
        }

        self.ctx.jitter.wait().await;

        info!(
            video_id = %member.video_id,
            position = member.position,
            "Downloading captions"
        );

        match self
            .ctx
            .resolver
            .resolve(&member.video_id, &path, &self.language)
            .await
        {
            Ok(bytes) => debug!(path = %path.display(), bytes, "Caption downloaded"),
            Err(e) => error!(
                video_id = %member.video_id,
                position = member.position,
                title = %member.title,
                error = %e,
                "Unable to download captions"
            ),
        }
    }
}
