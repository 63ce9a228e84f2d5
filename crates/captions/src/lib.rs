//! # Captions extractor
//!
//! Downloads YouTube caption tracks for single videos and whole playlists.
//!
//! ## Features
//!
//! - Reference classification (bare id, watch URL, playlist URL)
//! - Caption track discovery from the watch page player response
//! - Paginated playlist listing through the YouTube Data API
//! - Concurrent per-video and per-member downloads with a run-wide barrier
//! - Skip-if-exists for repeated runs

pub mod context;
pub mod extractor;
pub mod fetcher;
pub mod jitter;
pub mod media;
pub mod orchestrator;
pub mod playlist;
pub mod resolver;
pub mod target;

#[cfg(test)]
mod test_utils;

pub use context::DownloadContext;
pub use extractor::{CaptionError, ErrorKind};
pub use fetcher::{CaptionDownloader, CaptionFetcher};
pub use jitter::Jitter;
pub use orchestrator::Orchestrator;
pub use playlist::{PlaylistEnumerator, PlaylistSource};
pub use resolver::VideoResolver;
pub use target::DownloadTarget;
