//! In-process fakes shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::extractor::{CaptionError, CaptionTrackLister};
use crate::fetcher::CaptionDownloader;
use crate::media::{CaptionTrack, PlaylistMember, PlaylistPage};
use crate::playlist::PlaylistSource;

/// Installs a test writer subscriber so task logs show up in failing tests.
///
/// - `init_test_tracing!()` logs at DEBUG
/// - `init_test_tracing!(INFO)` logs at the given level
#[macro_export]
macro_rules! init_test_tracing {
    () => {
        $crate::init_test_tracing!(DEBUG);
    };
    ($level:ident) => {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::$level)
            .with_test_writer()
            .try_init();
    };
}

type Route = (&'static str, u16, String);

struct Reply {
    path: &'static str,
    status: u16,
    body: String,
    // Advertised Content-Length when it differs from the body
    declared_len: Option<usize>,
}

/// Minimal HTTP/1.1 server answering canned bodies by request path.
///
/// Unknown paths get a 404. Every request target (path and query) is recorded.
pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let replies = routes
            .into_iter()
            .map(|(path, status, body)| Reply {
                path,
                status,
                body,
                declared_len: None,
            })
            .collect();
        Self::serve_replies(replies).await
    }

    /// Answers `path` with `body` but advertises `declared_len` bytes, so the
    /// client sees the connection close mid-body.
    pub async fn start_truncated(path: &'static str, body: &str, declared_len: usize) -> Self {
        Self::serve_replies(vec![Reply {
            path,
            status: 200,
            body: body.to_string(),
            declared_len: Some(declared_len),
        }])
        .await
    }

    async fn serve_replies(routes: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let recorded = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = routes.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, &routes, &recorded).await;
                });
            }
        });

        Self { base_url, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: &[Reply],
    recorded: &Mutex<Vec<String>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf);
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    recorded.lock().unwrap().push(target.clone());

    let path = target.split('?').next().unwrap_or_default();
    let (status, body, declared_len) = routes
        .iter()
        .find(|reply| reply.path == path)
        .map(|reply| {
            let declared_len = reply.declared_len.unwrap_or(reply.body.len());
            (reply.status, reply.body.as_str(), declared_len)
        })
        .unwrap_or((404, "not found", 9));

    let response = format!(
        "HTTP/1.1 {status} Test\r\nContent-Type: text/plain\r\nContent-Length: {declared_len}\r\nConnection: close\r\n\r\n{body}"
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// Watch page html embedding a player response with the given
/// `(url, language)` tracks.
pub fn watch_page(tracks: &[(&str, &str)]) -> String {
    let caption_tracks: Vec<_> = tracks
        .iter()
        .map(|(url, lang)| {
            serde_json::json!({
                "baseUrl": url,
                "name": {"simpleText": lang},
                "languageCode": lang,
            })
        })
        .collect();
    let player_response = serde_json::json!({
        "videoDetails": {"videoId": "abc123"},
        "captions": {
            "playerCaptionsTracklistRenderer": {"captionTracks": caption_tracks}
        }
    });

    format!(
        "<html><head></head><body><script nonce=\"x\">var ytInitialPlayerResponse = {player_response};</script><div id=\"player\"></div></body></html>"
    )
}

/// Sequential members `{prefix}{position}` starting at `start`.
pub fn members(prefix: &str, start: u32, count: u32) -> Vec<PlaylistMember> {
    (start..start + count)
        .map(|position| {
            PlaylistMember::new(
                format!("{prefix}{position}"),
                position,
                format!("Video {position}"),
            )
        })
        .collect()
}

/// Track lister answering from memory. Unknown videos get a single track in
/// the default language.
pub struct FakeLister {
    tracks: HashMap<String, Vec<CaptionTrack>>,
    missing_marker: HashSet<String>,
    default_language: String,
    calls: AtomicUsize,
}

impl FakeLister {
    pub fn new() -> Self {
        Self {
            tracks: HashMap::new(),
            missing_marker: HashSet::new(),
            default_language: "en".to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_tracks(mut self, video_id: &str, tracks: Vec<CaptionTrack>) -> Self {
        self.tracks.insert(video_id.to_string(), tracks);
        self
    }

    pub fn with_missing_marker(mut self, video_id: &str) -> Self {
        self.missing_marker.insert(video_id.to_string());
        self
    }

    pub fn with_default_language(mut self, language: &str) -> Self {
        self.default_language = language.to_string();
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptionTrackLister for FakeLister {
    async fn list_caption_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, CaptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.missing_marker.contains(video_id) {
            return Err(CaptionError::MarkerNotFound {
                marker: "ytInitialPlayerResponse = ".to_string(),
            });
        }

        Ok(self.tracks.get(video_id).cloned().unwrap_or_else(|| {
            vec![CaptionTrack::new(
                format!(
                    "https://example.com/api/timedtext?v={video_id}&lang={}",
                    self.default_language
                ),
                self.default_language.clone(),
            )]
        }))
    }
}

/// Downloader writing the track url into the destination file.
pub struct FakeDownloader {
    delay: Option<Duration>,
    downloaded: Mutex<Vec<(String, PathBuf)>>,
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl FakeDownloader {
    pub fn new() -> Self {
        Self {
            delay: None,
            downloaded: Mutex::new(Vec::new()),
            started: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn downloaded(&self) -> Vec<(String, PathBuf)> {
        self.downloaded.lock().unwrap().clone()
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptionDownloader for FakeDownloader {
    async fn download(&self, track: &CaptionTrack, destination: &Path) -> Result<u64, CaptionError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        tokio::fs::write(destination, track.source_url.as_bytes())
            .await
            .map_err(|source| CaptionError::FileCreate {
                path: destination.to_path_buf(),
                source,
            })?;

        self.downloaded
            .lock()
            .unwrap()
            .push((track.source_url.clone(), destination.to_path_buf()));
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(track.source_url.len() as u64)
    }
}

/// Playlist listing over fixed pages. Cursors are `page-1`, `page-2`, ...
pub struct FakePlaylistSource {
    pages: Vec<Vec<PlaylistMember>>,
    failing_at: Option<usize>,
    delay: Option<Duration>,
    requested: Mutex<Vec<Option<String>>>,
}

impl FakePlaylistSource {
    pub fn new(pages: Vec<Vec<PlaylistMember>>) -> Self {
        Self {
            pages,
            failing_at: None,
            delay: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Fails the request for the page at `index`.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.failing_at = Some(index);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requested_cursors(&self) -> Vec<Option<String>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaylistSource for FakePlaylistSource {
    async fn list_page(
        &self,
        _playlist_id: &str,
        cursor: Option<&str>,
    ) -> Result<PlaylistPage, CaptionError> {
        self.requested
            .lock()
            .unwrap()
            .push(cursor.map(str::to_string));

        let index = cursor
            .and_then(|c| c.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_at == Some(index) {
            return Err(CaptionError::ListingStatus {
                status: 500,
                body: "backend error".to_string(),
            });
        }

        let members = self.pages.get(index).cloned().unwrap_or_default();
        let next_cursor = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));
        Ok(PlaylistPage::new(members, next_cursor))
    }
}
