use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::codec::{decode_history, encode_history, unwrap_content, wrap_content};
use super::{HistoryBackend, HistorySnapshot, StoreError, WriteReceipt};
use crate::assessments::{Domain, ScoredRecord};
use crate::config::{ConfigError, RepositorySlug, StoreConfig};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const CLIENT_AGENT: &str = concat!("energyscan/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ContentsFile {
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    size: u64,
    sha: String,
}

impl ContentsFile {
    /// Inline base64 text. Files above the host's inline limit come back with
    /// `encoding: "none"` and no content; treating that as empty would drop the history.
    fn inline_text(&self) -> Result<String, StoreError> {
        match self.encoding.as_deref() {
            Some("base64") | None => {}
            Some(other) => {
                return Err(StoreError::MalformedHistory(format!(
                    "history file is served as '{other}' ({} bytes), not inline base64",
                    self.size
                )))
            }
        }
        if self.size > 0 && self.content.trim().is_empty() {
            return Err(StoreError::MalformedHistory(format!(
                "history file has {} bytes but no inline content",
                self.size
            )));
        }
        unwrap_content(&self.content)
    }
}

#[derive(Debug, Serialize)]
struct ContentsUpdate<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ContentsUpdateResponse {
    content: ContentsCommitted,
}

#[derive(Debug, Deserialize)]
struct ContentsCommitted {
    sha: String,
}

/// History backend speaking the GitHub repository contents API.
pub struct GitHubContentsBackend {
    http: reqwest::Client,
    api_url: String,
    repository: RepositorySlug,
    data_dir: String,
    branch: Option<String>,
    token: Option<SecretString>,
}

impl std::fmt::Debug for GitHubContentsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubContentsBackend")
            .field("api_url", &self.api_url)
            .field("repository", &self.repository.to_string())
            .field("data_dir", &self.data_dir)
            .field("branch", &self.branch)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl GitHubContentsBackend {
    pub fn new(
        api_url: impl Into<String>,
        repository: RepositorySlug,
        data_dir: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            repository,
            data_dir: data_dir.into().trim_matches('/').to_string(),
            branch: None,
            token: None,
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, ConfigError> {
        let repository = config.require_repository()?.clone();
        let mut backend =
            Self::new(config.api_url.as_str(), repository, config.data_dir.as_str());
        backend.branch = config.branch.clone();
        backend.token = config.token.clone();
        Ok(backend)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Repository and data directory, e.g. `github://owner/repo/data`.
    pub fn describe_root(&self) -> String {
        format!("github://{}/{}", self.repository, self.data_dir)
    }

    fn file_path(&self, domain: Domain) -> String {
        if self.data_dir.is_empty() {
            domain.history_file().to_string()
        } else {
            format!("{}/{}", self.data_dir, domain.history_file())
        }
    }

    pub fn contents_url(&self, domain: Domain) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url,
            self.repository.owner,
            self.repository.name,
            self.file_path(domain)
        )
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, StoreError> {
        let token = self.token.as_ref().ok_or(StoreError::MissingCredential)?;
        Ok(request
            .header(AUTHORIZATION, format!("token {}", token.expose_secret()))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, CLIENT_AGENT))
    }
}

async fn error_body(response: Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|err| format!("<unreadable body: {err}>"))
}

fn is_sha_rejection(status: StatusCode, body: &str) -> bool {
    status == StatusCode::CONFLICT
        || (status == StatusCode::UNPROCESSABLE_ENTITY
            && body.to_ascii_lowercase().contains("sha"))
}

#[async_trait]
impl HistoryBackend for GitHubContentsBackend {
    async fn fetch(&self, domain: Domain) -> Result<HistorySnapshot, StoreError> {
        let mut request = self.http.get(self.contents_url(domain));
        if let Some(branch) = &self.branch {
            request = request.query(&[("ref", branch.as_str())]);
        }

        let response = self
            .authorized(request)?
            .send()
            .await
            .map_err(|err| StoreError::Transport(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                path: self.file_path(domain),
            });
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized {
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        let file: ContentsFile = response
            .json()
            .await
            .map_err(|err| StoreError::MalformedHistory(err.to_string()))?;
        let text = file.inline_text()?;

        Ok(HistorySnapshot {
            records: decode_history(&text)?,
            version: Some(file.sha),
        })
    }

    async fn put(
        &self,
        domain: Domain,
        records: &[ScoredRecord],
        expected_version: Option<&str>,
        message: &str,
    ) -> Result<WriteReceipt, StoreError> {
        let update = ContentsUpdate {
            message,
            content: wrap_content(&encode_history(records)?),
            sha: expected_version,
            branch: self.branch.as_deref(),
        };

        let response = self
            .authorized(self.http.put(self.contents_url(domain)))?
            .json(&update)
            .send()
            .await
            .map_err(|err| StoreError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let committed: ContentsUpdateResponse = response
                .json()
                .await
                .map_err(|err| StoreError::Status {
                    status: status.as_u16(),
                    body: format!("unexpected update response: {err}"),
                })?;
            return Ok(WriteReceipt {
                version: committed.content.sha,
            });
        }

        let body = error_body(response).await;
        Err(match status {
            _ if is_sha_rejection(status, &body) => StoreError::VersionConflict { message: body },
            StatusCode::NOT_FOUND => StoreError::NotFound {
                path: self.file_path(domain),
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized {
                status: status.as_u16(),
                body,
            },
            _ => StoreError::Status {
                status: status.as_u16(),
                body,
            },
        })
    }

    fn describe(&self, domain: Domain) -> String {
        format!("github://{}/{}", self.repository, self.file_path(domain))
    }
}
