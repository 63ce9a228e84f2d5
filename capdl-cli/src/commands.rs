use crate::{config::AppConfig, error::Result};
use captions_extractor::{
    CaptionFetcher, DownloadContext, Jitter, Orchestrator, VideoResolver,
    extractor::{
        ClientOptions, PlatformClient, ProxyConfig, create_client,
        platforms::youtube::{WatchPageScraper, YouTubeDataApi},
    },
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::{info, warn};

/// Per-invocation options of the `download` subcommand.
#[derive(Debug, Default)]
pub struct DownloadOptions {
    pub lang: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub api_key: Option<String>,
    pub cookies: Option<String>,
    pub force: bool,
    pub no_jitter: bool,
}

pub struct CommandExecutor {
    config: AppConfig,
    client_options: ClientOptions,
}

impl CommandExecutor {
    pub fn new(config: AppConfig) -> Self {
        let proxy = config.default_proxy.as_ref().map(|proxy_url| ProxyConfig {
            url: proxy_url.clone(),
            username: config.default_proxy_username.clone(),
            password: config.default_proxy_password.clone(),
        });

        let client_options = ClientOptions {
            user_agent: config.user_agent.clone(),
            proxy,
            timeout: config.request_timeout.map(Duration::from_secs),
        };

        Self {
            config,
            client_options,
        }
    }

    pub fn with_proxy(
        mut self,
        proxy_url: String,
        proxy_username: Option<String>,
        proxy_password: Option<String>,
    ) -> Self {
        self.client_options.proxy = Some(ProxyConfig {
            url: proxy_url,
            username: proxy_username,
            password: proxy_password,
        });
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client_options.timeout = Some(timeout);
        self
    }

    /// Language to download, falling back to the configured default.
    pub fn language(&self, requested: Option<String>) -> String {
        requested.unwrap_or_else(|| {
            info!(
                language = %self.config.default_language,
                "No language given, using the default"
            );
            self.config.default_language.clone()
        })
    }

    fn jitter(&self, disabled: bool) -> Jitter {
        if disabled {
            Jitter::disabled()
        } else {
            Jitter::new(Duration::from_millis(self.config.jitter_unit_ms))
        }
    }

    pub async fn download(&self, references: &[String], options: DownloadOptions) -> Result<()> {
        let mut client = PlatformClient::new(create_client(&self.client_options)?);
        if let Some(cookies) = options
            .cookies
            .as_deref()
            .or(self.config.default_cookies.as_deref())
        {
            client.set_cookies_from_string(cookies);
        }

        let api_key = options.api_key.or_else(|| self.config.api_key.clone());
        if api_key.is_none() {
            warn!("No YouTube Data API key configured, playlists cannot be listed");
        }

        let scraper = WatchPageScraper::new(client.clone())
            .with_watch_url(self.config.watch_url.as_str())
            .with_markers(self.config.player_markers());
        let playlists = YouTubeDataApi::new(client.clone(), api_key)
            .with_endpoint(self.config.playlist_items_url.as_str());
        let resolver = VideoResolver::new(Arc::new(scraper), Arc::new(CaptionFetcher::new(client)));

        let ctx = DownloadContext::new(resolver, Arc::new(playlists))
            .with_jitter(self.jitter(options.no_jitter))
            .with_overwrite(options.force || self.config.overwrite_existing);

        let output_dir = options
            .output_dir
            .unwrap_or_else(|| self.config.output_dir.clone());
        let language = self.language(options.lang);

        info!(
            references = references.len(),
            output_dir = %output_dir.display(),
            language = %language,
            "Starting downloads"
        );

        Orchestrator::new(ctx, output_dir, language)
            .run(references)
            .await?;

        Ok(())
    }
}
