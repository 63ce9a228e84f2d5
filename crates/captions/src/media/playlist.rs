use serde::{Deserialize, Serialize};

/// A single playlist entry. Consumed as soon as its page arrives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlaylistMember {
    pub video_id: String,
    pub position: u32,
    pub title: String,
}

impl PlaylistMember {
    pub fn new(video_id: impl Into<String>, position: u32, title: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            position,
            title: title.into(),
        }
    }

    /// File name used for this member inside its playlist folder.
    pub fn file_name(&self) -> String {
        format!("captions_{}_{}.xml", self.video_id, self.position)
    }
}

/// One page of a playlist listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistPage {
    pub members: Vec<PlaylistMember>,
    // Opaque cursor for the following page, `None` on the last page
    pub next_cursor: Option<String>,
}

impl PlaylistPage {
    pub fn new(members: Vec<PlaylistMember>, next_cursor: Option<String>) -> Self {
        // The listing service reports "no more pages" with an empty token too.
        let next_cursor = next_cursor.filter(|cursor| !cursor.is_empty());
        Self {
            members,
            next_cursor,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}
