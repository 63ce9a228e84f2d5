use captions_extractor::CaptionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Download error: {0}")]
    Caption(#[from] CaptionError),

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
