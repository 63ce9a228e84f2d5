pub mod caption_track;
pub mod playlist;

pub use caption_track::CaptionTrack;
pub use playlist::{PlaylistMember, PlaylistPage};
