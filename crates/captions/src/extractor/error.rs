use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("invalid reference: {0}")]
    InvalidReference(String),
    #[error("unable to download video page: {0}")]
    PageFetch(#[source] reqwest::Error),
    #[error("unable to find `{marker}` in video page")]
    MarkerNotFound { marker: String },
    #[error("unable to find the end of the player response (`{marker}`)")]
    TerminatorNotFound { marker: String },
    #[error("unable to parse player response: {0}")]
    PlayerResponse(#[from] serde_json::Error),
    #[error("no caption track for language `{0}`")]
    LanguageNotAvailable(String),
    #[error("unable to download caption: {0}")]
    CaptionRequest(#[source] reqwest::Error),
    #[error("unable to list playlist items: {0}")]
    ListingRequest(#[source] reqwest::Error),
    #[error("playlist listing service returned {status}: {body}")]
    ListingStatus { status: u16, body: String },
    #[error("no API key configured for the playlist listing service")]
    MissingCredentials,
    #[error("unable to build http client: {0}")]
    Client(String),
    #[error("unable to create folder {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to create file {}: {source}", path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to write file {}: {source}", path.display())]
    StreamCopy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification used when deciding how far an error propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed reference strings.
    Input,
    /// Network or HTTP failures, including listing service setup.
    Transport,
    /// The watch page no longer matches the expected layout.
    Format,
    /// The requested language is missing from the track list.
    NotFound,
    /// Folder or file creation/write failures.
    LocalIo,
}

impl CaptionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidReference(_) => ErrorKind::Input,
            Self::PageFetch(_)
            | Self::CaptionRequest(_)
            | Self::ListingRequest(_)
            | Self::ListingStatus { .. }
            | Self::MissingCredentials
            | Self::Client(_) => ErrorKind::Transport,
            Self::MarkerNotFound { .. }
            | Self::TerminatorNotFound { .. }
            | Self::PlayerResponse(_) => ErrorKind::Format,
            Self::LanguageNotAvailable(_) => ErrorKind::NotFound,
            Self::CreateDir { .. } | Self::FileCreate { .. } | Self::StreamCopy { .. } => {
                ErrorKind::LocalIo
            }
        }
    }
}
