//! football-data.org API access
//!
//! Requests go either through the same-origin proxy of a hosted deployment or
//! straight to the football-data API with an auth token. [`Deployment`] makes
//! that choice and builds the requests; [`Fetch`] performs them.

use futures::future::BoxFuture;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

/// Base URL for the football-data teams API
pub const FOOTBALL_API_URL: &str = "https://api.football-data.org/v2/teams";

/// Host suffix identifying the hosted deployment that serves the proxy
pub const PROXY_HOST_MARKER: &str = "vercel.app";

/// Errors that can occur when fetching team data
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP error! status: {status} - {detail}")]
    Status { status: u16, detail: String },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error body returned by the proxy on failure
#[derive(Debug, Deserialize)]
struct ProxyErrorBody {
    error: String,
    #[serde(default)]
    message: Option<String>,
}

impl FetchError {
    /// Builds a status error, folding the response body in for diagnostics
    ///
    /// A proxy error envelope is reduced to `error: message`; any other body is
    /// kept verbatim.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = match serde_json::from_str::<ProxyErrorBody>(body) {
            Ok(ProxyErrorBody {
                error,
                message: Some(message),
            }) => format!("{}: {}", error, message),
            Ok(ProxyErrorBody { error, message: None }) => error,
            Err(_) => body.to_string(),
        };
        FetchError::Status { status, detail }
    }
}

/// A GET request to issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP GET requests
pub trait Fetch {
    fn fetch<'a>(&'a self, request: &'a ApiRequest) -> BoxFuture<'a, Result<ApiResponse, FetchError>>;
}

/// Where team data is fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    /// Same-origin proxy of the hosted deployment (`<origin>/api/...`)
    Proxy { origin: String },
    /// football-data API called directly
    Direct { api_url: String, token: Option<String> },
}

impl Deployment {
    /// Picks the proxy when `origin` is a hosted deployment, otherwise the
    /// direct API at `api_url`
    pub fn detect(origin: Option<&str>, api_url: &str, token: Option<String>) -> Self {
        let hosted = origin
            .and_then(|o| Url::parse(o).ok())
            .and_then(|url| url.host_str().map(|h| h.contains(PROXY_HOST_MARKER)))
            .unwrap_or(false);

        match origin {
            Some(origin) if hosted => Deployment::Proxy {
                origin: origin.trim_end_matches('/').to_string(),
            },
            _ => Deployment::Direct {
                api_url: api_url.trim_end_matches('/').to_string(),
                token,
            },
        }
    }

    pub fn is_proxy(&self) -> bool {
        matches!(self, Deployment::Proxy { .. })
    }

    /// Request for the team list
    pub fn teams_request(&self) -> ApiRequest {
        match self {
            Deployment::Proxy { origin } => ApiRequest {
                url: format!("{}/api/teams", origin),
                headers: Vec::new(),
            },
            Deployment::Direct { api_url, token } => ApiRequest {
                url: format!("{}/", api_url),
                headers: direct_headers(token.as_deref()),
            },
        }
    }

    /// Request for a single team's detail
    pub fn team_request(&self, id: i64) -> ApiRequest {
        match self {
            Deployment::Proxy { origin } => ApiRequest {
                url: format!("{}/api/team/{}", origin, id),
                headers: Vec::new(),
            },
            Deployment::Direct { api_url, token } => ApiRequest {
                url: format!("{}/{}", api_url, id),
                headers: direct_headers(token.as_deref()),
            },
        }
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Deployment::Direct {
            api_url: FOOTBALL_API_URL.to_string(),
            token: None,
        }
    }
}

fn direct_headers(token: Option<&str>) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(2);
    if let Some(token) = token {
        headers.push(("X-Auth-Token".to_string(), token.to_string()));
    }
    headers.push(("X-Requested-With".to_string(), "XMLHttpRequest".to_string()));
    headers
}

/// [`Fetch`] over a reqwest client
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new HttpFetcher with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    fn fetch<'a>(&'a self, request: &'a ApiRequest) -> BoxFuture<'a, Result<ApiResponse, FetchError>> {
        Box::pin(async move {
            let mut builder = self.client.get(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;

            Ok(ApiResponse { status, body })
        })
    }
}
