use crate::media::CaptionTrack;

use super::error::CaptionError;
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use rustc_hash::FxHashMap;
use tracing::debug;

/// HTTP session shared by everything that talks to the platform.
///
/// Wraps a [`Client`] with browser-like default headers and an optional cookie
/// store. Cloning is cheap: the underlying client is reference counted, so a
/// single session can be handed to every concurrent task.
///
/// ```rust,ignore
/// let mut session = PlatformClient::new(create_client(&ClientOptions::default())?);
/// session.set_cookies_from_string("CONSENT=YES+cb; PREF=hl=en");
/// let page = session.get("https://www.youtube.com/watch?v=dQw4w9WgXcQ").send().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PlatformClient {
    client: Client,
    headers: HeaderMap,
    cookies: FxHashMap<String, String>,
}

impl PlatformClient {
    pub fn new(client: Client) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );

        Self {
            client,
            headers,
            cookies: FxHashMap::default(),
        }
    }

    /// Set cookies from a cookie string (format: "name1=value1; name2=value2").
    pub fn set_cookies_from_string(&mut self, cookie_string: &str) {
        for cookie in cookie_string.split(';') {
            let cookie = cookie.trim();
            if let Some((name, value)) = cookie.split_once('=') {
                self.cookies
                    .insert(name.trim().to_string(), value.trim().to_string());
            }
        }
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    fn build_cookie_header(&self) -> Option<HeaderValue> {
        if self.cookies.is_empty() {
            return None;
        }

        let cookie_string = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");

        HeaderValue::from_str(&cookie_string)
            .inspect_err(|e| debug!("Dropping malformed cookie header: {e}"))
            .ok()
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .headers(self.headers.clone());

        match self.build_cookie_header() {
            Some(cookies) => builder.header(header::COOKIE, cookies),
            None => builder,
        }
    }
}

/// Anything able to enumerate the caption tracks a video offers.
#[async_trait]
pub trait CaptionTrackLister: Send + Sync {
    async fn list_caption_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, CaptionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_string_is_split_into_pairs() {
        let mut session = PlatformClient::new(Client::new());
        session.set_cookies_from_string("CONSENT=YES+cb; PREF = hl=en ;broken");

        assert!(session.has_cookie("CONSENT"));
        assert!(session.has_cookie("PREF"));
        assert!(!session.has_cookie("broken"));
        assert_eq!(session.cookies.get("PREF").map(String::as_str), Some("hl=en"));
    }

    #[test]
    fn requests_carry_default_headers_and_cookies() {
        let mut session = PlatformClient::new(Client::new());
        session.set_cookies_from_string("CONSENT=YES+cb");

        let request = session.get("https://example.com/watch").build().unwrap();
        assert_eq!(
            request.headers().get(header::ACCEPT_LANGUAGE).unwrap(),
            "en-US,en;q=0.9"
        );
        assert_eq!(request.headers().get(header::COOKIE).unwrap(), "CONSENT=YES+cb");
    }

    #[test]
    fn no_cookie_header_without_cookies() {
        let session = PlatformClient::new(Client::new());
        let request = session.get("https://example.com/").build().unwrap();
        assert!(request.headers().get(header::COOKIE).is_none());
    }
}
