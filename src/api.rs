//! Launch catalog sources.
//!
//! The list component never talks HTTP directly: it asks a [`LaunchSource`]
//! for either one offset/limit window or the whole collection. The
//! production implementation is [`HttpLaunchSource`]; [`MemorySource`] serves
//! a fixed collection and is what the tests drive the list with.
//!
//! ```rust,no_run
//! use launch_browser::api::{HttpLaunchSource, LaunchSource};
//!
//! # async fn demo() -> launch_browser::error::Result<()> {
//! let source = HttpLaunchSource::new("https://api.spacexdata.com/v3")?;
//! let first_page = source.fetch_page(10, 0).await?;
//! println!("{} launches", first_page.len());
//! # Ok(())
//! # }
//! ```

use crate::config::Settings;
use crate::error::{FetchError, Result};
use crate::launch::Launch;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use url::Url;

/// Remote collection of launches addressed by offset and limit.
#[async_trait]
pub trait LaunchSource: Send + Sync {
    /// Fetches at most `limit` launches starting at `offset`.
    async fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<Launch>>;

    /// Fetches the entire collection in one request.
    async fn fetch_all(&self) -> Result<Vec<Launch>>;
}

/// [`LaunchSource`] backed by the `/launches` endpoint of a REST API.
#[derive(Debug, Clone)]
pub struct HttpLaunchSource {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpLaunchSource {
    /// Creates a source for `{base}/launches` using a default client.
    pub fn new(base: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base)
    }

    /// Creates a source that sends requests through `http`.
    pub fn with_client(http: reqwest::Client, base: &str) -> Result<Self> {
        let mut root = base.trim_end_matches('/').to_string();
        root.push('/');
        let endpoint = Url::parse(&root)?.join("launches")?;
        Ok(Self { http, endpoint })
    }

    /// Builds the client from runtime settings (request timeout included).
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|source| FetchError::Transport {
            url: settings.api_url.clone(),
            source,
        })?;
        Self::with_client(http, &settings.api_url)
    }

    /// Absolute URL of the list endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn get(&self, window: Option<[(&str, usize); 2]>) -> Result<Vec<Launch>> {
        let url = self.endpoint.to_string();
        debug!(%url, ?window, "requesting launches");

        let mut request = self.http.get(self.endpoint.clone());
        if let Some(window) = window {
            request = request.query(&window);
        }

        let response = request.send().await.map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

#[async_trait]
impl LaunchSource for HttpLaunchSource {
    async fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<Launch>> {
        self.get(Some([("limit", limit), ("offset", offset)])).await
    }

    async fn fetch_all(&self) -> Result<Vec<Launch>> {
        self.get(None).await
    }
}

/// A request observed by [`MemorySource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCall {
    Page { limit: usize, offset: usize },
    All,
}

/// In-memory [`LaunchSource`] serving a fixed collection.
///
/// Every request is recorded, and the source can be switched to fail so
/// callers can exercise their error paths.
#[derive(Debug, Default)]
pub struct MemorySource {
    launches: Vec<Launch>,
    failing: AtomicBool,
    calls: Mutex<Vec<SourceCall>>,
}

impl MemorySource {
    pub fn new(launches: Vec<Launch>) -> Self {
        Self {
            launches,
            ..Self::default()
        }
    }

    /// Makes every subsequent request fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Requests served so far, oldest first.
    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: SourceCall) -> Result<()> {
        self.calls.lock().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::Unavailable("memory source set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl LaunchSource for MemorySource {
    async fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<Launch>> {
        self.record(SourceCall::Page { limit, offset })?;
        Ok(self
            .launches
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn fetch_all(&self) -> Result<Vec<Launch>> {
        self.record(SourceCall::All)?;
        Ok(self.launches.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::fixtures::numbered;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn list_launches(
        Query(params): Query<HashMap<String, usize>>,
    ) -> Json<Vec<Launch>> {
        let all = numbered(1, 25);
        match (params.get("limit"), params.get("offset")) {
            (Some(&limit), Some(&offset)) => {
                Json(all.into_iter().skip(offset).take(limit).collect())
            }
            _ => Json(all),
        }
    }

    async fn spawn_catalog(app: Router) -> String {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/v3")
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let source = HttpLaunchSource::new("https://api.spacexdata.com/v3").unwrap();
        assert_eq!(
            source.endpoint().as_str(),
            "https://api.spacexdata.com/v3/launches"
        );
        let source = HttpLaunchSource::new("https://api.spacexdata.com/v3/").unwrap();
        assert_eq!(
            source.endpoint().as_str(),
            "https://api.spacexdata.com/v3/launches"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpLaunchSource::new("not a url"),
            Err(FetchError::Url(_))
        ));
    }

    #[tokio::test]
    async fn test_http_page_sends_limit_and_offset() {
        let base = spawn_catalog(Router::new().route("/v3/launches", get(list_launches))).await;
        let source = HttpLaunchSource::new(&base).unwrap();

        let page = source.fetch_page(10, 20).await.expect("page");
        let ids: Vec<_> = page.iter().map(Launch::id).collect();
        assert_eq!(ids, vec![21, 22, 23, 24, 25]);
    }

    #[tokio::test]
    async fn test_http_fetch_all_has_no_window() {
        let base = spawn_catalog(Router::new().route("/v3/launches", get(list_launches))).await;
        let source = HttpLaunchSource::new(&base).unwrap();

        let all = source.fetch_all().await.expect("all");
        assert_eq!(all.len(), 25);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let app = Router::new().route(
            "/v3/launches",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let base = spawn_catalog(app).await;
        let source = HttpLaunchSource::new(&base).unwrap();

        match source.fetch_all().await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 503),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_decode_error() {
        let app = Router::new().route("/v3/launches", get(|| async { "{\"not\": \"a list\"}" }));
        let base = spawn_catalog(app).await;
        let source = HttpLaunchSource::new(&base).unwrap();

        assert!(matches!(
            source.fetch_page(10, 0).await,
            Err(FetchError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_memory_source_windows_and_records() {
        let source = MemorySource::new(numbered(1, 13));
        assert_eq!(source.fetch_page(10, 0).await.unwrap().len(), 10);
        assert_eq!(source.fetch_page(10, 10).await.unwrap().len(), 3);
        assert_eq!(source.fetch_all().await.unwrap().len(), 13);
        assert_eq!(
            source.calls(),
            vec![
                SourceCall::Page { limit: 10, offset: 0 },
                SourceCall::Page { limit: 10, offset: 10 },
                SourceCall::All,
            ]
        );

        source.set_failing(true);
        assert!(source.fetch_all().await.is_err());
    }
}
