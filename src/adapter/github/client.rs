//! GitHub REST Client
//!
//! リポジトリ単位のHTTPクライアント。ステータスコードの検査と
//! レスポンスの解釈まで行い、結果を `TrackerError` に分類する。

use anyhow::{Context, Result};
use log::debug;
use reqwest::header::{HeaderMap, ACCEPT, LINK};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::repositories::tracker_repository::{TrackerError, TrackerResult};

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// Response whose status already matched the expected one
#[derive(Debug)]
pub struct ApiResponse {
    headers: HeaderMap,
    body: String,
}

impl ApiResponse {
    /// Deserialize the body
    pub fn json<T: DeserializeOwned>(&self) -> TrackerResult<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| TrackerError::MalformedResponse(format!("{}: {}", e, self.body)))
    }

    /// Whether the `Link` header advertises a next page
    pub fn has_next_page(&self) -> bool {
        self.headers
            .get_all(LINK)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(has_next_link)
    }
}

/// `<https://...&page=2>; rel="next", <https://...&page=5>; rel="last"`
pub fn has_next_link(link: &str) -> bool {
    link.split(',')
        .any(|part| part.split(';').skip(1).any(|param| param.trim() == "rel=\"next\""))
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                value.to_str().unwrap_or("<non-ascii>").to_string(),
            )
        })
        .collect()
}

/// GitHub client bound to one repository
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    repo_url: String,
    token: String,
}

impl GitHubClient {
    /// `repo_url` is the repository resource, e.g. `https://api.github.com/repos/joe/hello-world`
    pub fn new(repo_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            repo_url: repo_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.repo_url, path.trim_start_matches('/'));
        debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(API_VERSION_HEADER, API_VERSION)
    }

    /// GET with query parameters
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
        expected: StatusCode,
    ) -> TrackerResult<ApiResponse> {
        self.execute(self.request(Method::GET, path).query(query), expected)
            .await
    }

    /// POST/PATCH with a JSON body
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        expected: StatusCode,
    ) -> TrackerResult<ApiResponse> {
        self.execute(self.request(method, path).json(body), expected)
            .await
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> TrackerResult<ApiResponse> {
        let response = request
            .send()
            .await
            .map_err(|e| TrackerError::Transport(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| TrackerError::Transport(e.to_string()))?;

        if status != expected {
            return Err(TrackerError::UnexpectedStatus {
                expected: expected.as_u16(),
                status: status.as_u16(),
                headers: header_pairs(&headers),
                body,
            });
        }

        Ok(ApiResponse { headers, body })
    }
}
