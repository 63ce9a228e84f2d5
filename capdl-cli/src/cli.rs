use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "capdl",
    about = "capdl - download YouTube captions for videos and playlists",
    version,
    author
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Proxy URL (supports http, https, socks5)
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    /// Proxy username (if proxy requires authentication)
    #[arg(long, global = true)]
    pub proxy_username: Option<String>,

    /// Proxy password (if proxy requires authentication)
    #[arg(long, global = true)]
    pub proxy_password: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download captions for videos and playlists
    Download {
        /// Video ids, watch URLs or playlist URLs
        #[arg(value_name = "VIDEO_URL_OR_ID", required = true)]
        references: Vec<String>,

        /// Caption language code, matched exactly (e.g. "en", "pt-BR")
        #[arg(short, long)]
        lang: Option<String>,

        /// Root folder for caption files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// YouTube Data API key used to list playlists
        #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// The cookies to use for the requests
        #[arg(long)]
        cookies: Option<String>,

        /// Download again even if the caption file already exists
        #[arg(short, long)]
        force: bool,

        /// Do not pause between playlist member downloads
        #[arg(long)]
        no_jitter: bool,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Show configuration information
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}
