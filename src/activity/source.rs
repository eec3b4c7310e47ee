use crate::cache::Cache;
use crate::error::{ActivityError, Result};
use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Anything that can hand back the raw commit-activity JSON for a repository slug.
pub trait ActivitySource {
    fn fetch(&mut self, key: &str) -> Result<String>;

    /// Name under which a response for `key` is cached.
    fn cache_key(&self, key: &str) -> String {
        key.to_string()
    }
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

pub struct GitHubSource {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubSource {
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gh-activity/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_client(client, api_url, token))
    }

    pub fn with_client(client: Client, api_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn endpoint(&self, key: &str) -> String {
        format!("{}/repos/{}/stats/commit_activity", self.api_url, key)
    }
}

impl ActivitySource for GitHubSource {
    fn fetch(&mut self, key: &str) -> Result<String> {
        let url = self.endpoint(key);
        debug!(%url, "requesting commit activity");

        let mut request = self.client.get(&url).header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        debug!(status = status.as_u16(), "commit activity response");

        if status == StatusCode::ACCEPTED {
            return Err(ActivityError::StatsPending(key.to_string()));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok("[]".to_string());
        }

        let body = response.text()?;
        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(ActivityError::Http { status: status.as_u16(), message });
        }
        Ok(body)
    }

    fn cache_key(&self, key: &str) -> String {
        format!("{}/{}", self.api_url, key)
    }
}

/// Reads a previously saved API response from disk. The key is ignored.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ActivitySource for FileSource {
    fn fetch(&mut self, _key: &str) -> Result<String> {
        debug!(path = %self.path.display(), "reading commit activity from file");
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// Serves fresh cache entries directly and falls back to stale ones when the
/// wrapped source fails.
pub struct CachedSource<S> {
    inner: S,
    cache: Cache,
    max_age: Duration,
}

impl<S: ActivitySource> CachedSource<S> {
    pub fn new(inner: S, cache: Cache, max_age: Duration) -> Self {
        Self { inner, cache, max_age }
    }

    pub fn into_inner(self) -> (S, Cache) {
        (self.inner, self.cache)
    }
}

impl<S: ActivitySource> ActivitySource for CachedSource<S> {
    fn fetch(&mut self, key: &str) -> Result<String> {
        let cache_key = self.inner.cache_key(key);
        let cached = self.cache.get(&cache_key)?;
        let now = Utc::now();

        if let Some(entry) = &cached {
            let age = (now - entry.fetched_at).to_std().unwrap_or_default();
            if age <= self.max_age {
                info!(key = %cache_key, age = %humantime::format_duration(age), "using cached commit activity");
                return Ok(entry.body.clone());
            }
        }

        match self.inner.fetch(key) {
            Ok(body) => {
                if let Err(err) = self.cache.put(&cache_key, &body, now) {
                    warn!(key = %cache_key, error = %err, "failed to cache commit activity");
                }
                Ok(body)
            }
            Err(err) => match cached {
                Some(entry) => {
                    warn!(key = %cache_key, error = %err, fetched_at = %entry.fetched_at, "fetch failed, reusing stale commit activity");
                    Ok(entry.body)
                }
                None => Err(err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use tempfile::tempdir;

    struct StubSource {
        calls: usize,
        reply: Option<String>,
    }

    impl ActivitySource for StubSource {
        fn fetch(&mut self, key: &str) -> Result<String> {
            self.calls += 1;
            self.reply
                .clone()
                .ok_or_else(|| ActivityError::Http { status: 503, message: format!("{key} unavailable") })
        }
    }

    fn stub(reply: Option<&str>) -> StubSource {
        StubSource { calls: 0, reply: reply.map(str::to_string) }
    }

    #[test]
    fn fresh_entry_skips_inner_source() {
        let mut cache = Cache::in_memory().unwrap();
        cache.put("mdn/content", "[\"cached\"]", Utc::now()).unwrap();

        let mut source = CachedSource::new(stub(Some("[\"live\"]")), cache, Duration::from_secs(3600));
        assert_eq!(source.fetch("mdn/content").unwrap(), "[\"cached\"]");
        let (inner, _) = source.into_inner();
        assert_eq!(inner.calls, 0);
    }

    #[test]
    fn stale_entry_is_refreshed() {
        let mut cache = Cache::in_memory().unwrap();
        cache
            .put("mdn/content", "[\"old\"]", Utc::now() - chrono::Duration::hours(2))
            .unwrap();

        let mut source = CachedSource::new(stub(Some("[\"new\"]")), cache, Duration::from_secs(3600));
        assert_eq!(source.fetch("mdn/content").unwrap(), "[\"new\"]");
        let (inner, cache) = source.into_inner();
        assert_eq!(inner.calls, 1);
        assert_eq!(cache.get("mdn/content").unwrap().unwrap().body, "[\"new\"]");
    }

    #[test]
    fn stale_entry_is_reused_when_inner_fails() {
        let mut cache = Cache::in_memory().unwrap();
        cache
            .put("mdn/content", "[\"old\"]", Utc::now() - chrono::Duration::hours(2))
            .unwrap();

        let mut source = CachedSource::new(stub(None), cache, Duration::from_secs(3600));
        assert_eq!(source.fetch("mdn/content").unwrap(), "[\"old\"]");
    }

    #[test]
    fn missing_entry_propagates_inner_error() {
        let cache = Cache::in_memory().unwrap();
        let mut source = CachedSource::new(stub(None), cache, Duration::from_secs(3600));
        assert!(matches!(
            source.fetch("mdn/content"),
            Err(ActivityError::Http { status: 503, .. })
        ));
    }

    #[test]
    fn file_source_reads_body() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("activity.json");
        std::fs::write(&path, "[]").unwrap();
        assert_eq!(FileSource::new(&path).fetch("ignored/key").unwrap(), "[]");
    }

    #[test]
    fn github_endpoint_trims_trailing_slash() {
        let source = GitHubSource::new("https://api.example.test/", None).unwrap();
        assert_eq!(
            source.endpoint("mdn/content"),
            "https://api.example.test/repos/mdn/content/stats/commit_activity"
        );
    }

    #[test]
    fn read_only_cache_still_returns_fetched_body() {
        let cache = Cache::in_memory().unwrap();
        cache.set_read_only().unwrap();

        let mut source = CachedSource::new(stub(Some("[\"live\"]")), cache, Duration::from_secs(3600));
        assert_eq!(source.fetch("mdn/content").unwrap(), "[\"live\"]");
    }

    struct HostStub {
        host: &'static str,
        reply: &'static str,
    }

    impl ActivitySource for HostStub {
        fn fetch(&mut self, _key: &str) -> Result<String> {
            Ok(self.reply.to_string())
        }

        fn cache_key(&self, key: &str) -> String {
            format!("{}/{}", self.host, key)
        }
    }

    #[test]
    fn entries_from_different_hosts_do_not_collide() {
        let mut cache = Cache::in_memory().unwrap();
        cache.put("https://api.github.com/a/b", "[\"public\"]", Utc::now()).unwrap();

        let enterprise = HostStub { host: "https://ghe.example/api/v3", reply: "[\"enterprise\"]" };
        let mut source = CachedSource::new(enterprise, cache, Duration::from_secs(3600));
        assert_eq!(source.fetch("a/b").unwrap(), "[\"enterprise\"]");

        let (_, cache) = source.into_inner();
        assert_eq!(cache.get("https://ghe.example/api/v3/a/b").unwrap().unwrap().body, "[\"enterprise\"]");
        assert_eq!(cache.get("https://api.github.com/a/b").unwrap().unwrap().body, "[\"public\"]");
    }

    #[test]
    fn github_cache_key_includes_api_url() {
        let source = GitHubSource::new("https://ghe.example/api/v3/", None).unwrap();
        assert_eq!(source.cache_key("a/b"), "https://ghe.example/api/v3/a/b");
    }

    /// Accepts one connection, answers with `response`, and hands back the raw request.
    fn serve_once(response: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    fn local_source(url: &str, token: Option<&str>) -> GitHubSource {
        let client = Client::builder().no_proxy().build().unwrap();
        GitHubSource::with_client(client, url, token.map(str::to_string))
    }

    #[test]
    fn ok_response_returns_body_and_sends_token() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n[]",
        );
        let body = local_source(&url, Some("secret-token")).fetch("mdn/content").unwrap();
        assert_eq!(body, "[]");

        let request = server.join().unwrap().to_lowercase();
        assert!(request.starts_with("get /repos/mdn/content/stats/commit_activity "));
        assert!(request.contains("authorization: bearer secret-token"));
        assert!(request.contains("accept: application/vnd.github+json"));
    }

    #[test]
    fn no_token_sends_no_authorization() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\n[]",
        );
        local_source(&url, None).fetch("mdn/content").unwrap();
        assert!(!server.join().unwrap().to_lowercase().contains("authorization:"));
    }

    #[test]
    fn accepted_means_stats_pending() {
        let (url, server) = serve_once(
            "HTTP/1.1 202 Accepted\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}",
        );
        let result = local_source(&url, None).fetch("mdn/content");
        server.join().unwrap();
        assert!(matches!(result, Err(ActivityError::StatsPending(repo)) if repo == "mdn/content"));
    }

    #[test]
    fn no_content_is_an_empty_list() {
        let (url, server) = serve_once("HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n");
        let body = local_source(&url, None).fetch("mdn/content").unwrap();
        server.join().unwrap();
        assert_eq!(body, "[]");
    }

    #[test]
    fn error_status_carries_api_message() {
        let (url, server) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nContent-Length: 23\r\nConnection: close\r\n\r\n{\"message\":\"Not Found\"}",
        );
        let result = local_source(&url, None).fetch("nope/missing");
        server.join().unwrap();
        match result {
            Err(ActivityError::Http { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[test]
    fn error_status_without_json_keeps_raw_body() {
        let (url, server) = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\nboom",
        );
        let result = local_source(&url, None).fetch("mdn/content");
        server.join().unwrap();
        assert!(matches!(result, Err(ActivityError::Http { status: 500, message }) if message == "boom"));
    }
}
