mod default;
pub mod error;
pub mod platform_extractor;
pub mod platforms;

pub use default::{ClientOptions, ProxyConfig, create_client};
pub use error::{CaptionError, ErrorKind};
pub use platform_extractor::{CaptionTrackLister, PlatformClient};
