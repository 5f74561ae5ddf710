//! GitHub Contents API
//!
//! `ContentApi` over `{api_base}/repos/{owner}/{repo}/contents/{path}`.
//! Every request carries the bearer token from `RepoConfig`.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use super::traits::{ContentApi, PutResult, RemoteFile};
use crate::config::RepoConfig;
use crate::error::{MenuError, MenuResult};

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const ACCEPT: &str = "application/vnd.github+json";

#[derive(Deserialize)]
struct ContentResponse {
    path: Option<String>,
    sha: String,
    #[serde(default)]
    content: String,
    download_url: Option<String>,
}

#[derive(Deserialize)]
struct PutResponse {
    content: PutContent,
}

#[derive(Deserialize)]
struct PutContent {
    sha: String,
    download_url: Option<String>,
}

#[derive(Serialize)]
struct PutBody<'a> {
    message: &'a str,
    content: &'a str,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Serialize)]
struct DeleteBody<'a> {
    message: &'a str,
    sha: &'a str,
    branch: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// GitHub-backed contents API
pub struct GitHubContentApi {
    client: reqwest::Client,
    config: RepoConfig,
}

impl GitHubContentApi {
    pub fn new(config: RepoConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// Contents URL for a repository path
    pub fn contents_url(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .trim_matches('/')
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect();
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.owner,
            self.config.repo,
            encoded.join("/")
        )
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .bearer_auth(&self.config.token)
            .header(reqwest::header::ACCEPT, ACCEPT);
        // Browsers set their own User-Agent; the API requires one natively.
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.header(reqwest::header::USER_AGENT, "dahar-menu-admin");
        builder
    }

    async fn fail(response: reqwest::Response, path: &str) -> MenuError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        classify_status(status, &body, path)
    }
}

/// Map a non-success status to the error taxonomy
pub fn classify_status(status: u16, body: &str, path: &str) -> MenuError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| format!("HTTP {}", status));
    let detail = format!("{}: {}", path, detail);
    match status {
        404 => MenuError::NotFound(detail),
        401 | 403 => MenuError::AuthFailure(detail),
        409 => MenuError::Conflict(detail),
        _ => MenuError::Transport(detail),
    }
}

#[async_trait(?Send)]
impl ContentApi for GitHubContentApi {
    async fn get_content(&self, path: &str) -> MenuResult<RemoteFile> {
        let url = format!(
            "{}?ref={}",
            self.contents_url(path),
            utf8_percent_encode(&self.config.branch, PATH_SEGMENT)
        );
        log::debug!("GET {}", url);
        let response = self.request(reqwest::Method::GET, &url).send().await?;
        if !response.status().is_success() {
            return Err(Self::fail(response, path).await);
        }
        let body: ContentResponse = response.json().await?;
        Ok(RemoteFile {
            path: body.path.unwrap_or_else(|| path.to_string()),
            sha: body.sha,
            content_base64: body.content,
            download_url: body.download_url,
        })
    }

    async fn put_content(
        &self,
        path: &str,
        content_base64: &str,
        message: &str,
        sha: Option<&str>,
        branch: &str,
    ) -> MenuResult<PutResult> {
        let url = self.contents_url(path);
        log::debug!("PUT {} (sha: {:?})", url, sha);
        let body = PutBody { message, content: content_base64, branch, sha };
        let response = self.request(reqwest::Method::PUT, &url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(Self::fail(response, path).await);
        }
        let body: PutResponse = response.json().await?;
        Ok(PutResult {
            sha: body.content.sha,
            download_url: body.content.download_url,
        })
    }

    async fn delete_content(&self, path: &str, sha: &str, message: &str, branch: &str) -> MenuResult<()> {
        let url = self.contents_url(path);
        log::debug!("DELETE {} (sha: {})", url, sha);
        let body = DeleteBody { message, sha, branch };
        let response = self.request(reqwest::Method::DELETE, &url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(Self::fail(response, path).await);
        }
        Ok(())
    }
}
