//! Run-level fan-out over every reference given on the command line.

use std::path::PathBuf;

use tokio_util::task::TaskTracker;
use tracing::{info, warn};

use crate::context::DownloadContext;
use crate::extractor::CaptionError;
use crate::target::DownloadTarget;

/// Downloads captions for a batch of references into one output folder.
pub struct Orchestrator {
    ctx: DownloadContext,
    output_dir: PathBuf,
    language: String,
}

impl Orchestrator {
    pub fn new(
        ctx: DownloadContext,
        output_dir: impl Into<PathBuf>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            ctx,
            output_dir: output_dir.into(),
            language: language.into(),
        }
    }

    /// Runs every reference concurrently and returns once all of them,
    /// including every playlist page and member, have finished.
    ///
    /// Only failing to create the output folder is fatal. Per-reference
    /// failures are logged and the returned count is the number of
    /// references that were classified and started.
    pub async fn run(&self, references: &[String]) -> Result<usize, CaptionError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| CaptionError::CreateDir {
                path: self.output_dir.clone(),
                source,
            })?;

        let tracker = TaskTracker::new();
        let mut started = 0;

        for reference in references {
            let target = match DownloadTarget::from_reference(reference) {
                Ok(target) => target,
                Err(e) => {
                    warn!(reference = %reference, error = %e, "Skipping reference");
                    continue;
                }
            };

            let destination = target.destination_path(&self.output_dir);
            let ctx = self.ctx.clone();
            let language = self.language.clone();
            let child_tracker = tracker.clone();

            info!(%target, "Queued");
            tracker.spawn(async move {
                target
                    .download(&ctx, destination, &language, &child_tracker)
                    .await;
            });
            started += 1;
        }

        tracker.close();
        tracker.wait().await;

        info!(started, output_dir = %self.output_dir.display(), "All downloads finished");
        Ok(started)
    }
}
