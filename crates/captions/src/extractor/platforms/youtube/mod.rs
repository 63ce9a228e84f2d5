mod builder;
mod data_api;
pub mod models;

pub use builder::{DEFAULT_WATCH_URL, PlayerMarkers, WatchPageScraper, extract_caption_tracks};
pub use data_api::{DEFAULT_PLAYLIST_ITEMS_URL, YouTubeDataApi};
