use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// How often the order list is refreshed while someone is logged in.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Where the backend lives and how often to poll it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ClientConfig {
    /// Resolve the base URL from a build-time value and a `?api=` query value.
    ///
    /// The query wins. It may be a full URL or just a port, in which case the
    /// backend is assumed on localhost (`?api=8081`).
    pub fn resolve(compile_time: Option<&str>, query: Option<&str>) -> Self {
        let from_query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| {
                if q.chars().all(|c| c.is_ascii_digit()) {
                    format!("http://localhost:{q}/api")
                } else {
                    q.to_string()
                }
            });
        let api_base = from_query
            .or_else(|| {
                compile_time
                    .filter(|url| !url.is_empty())
                    .map(String::from)
            })
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Absolute URL for an API path such as `/produtos`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}
