//! GitHub compare API source
//!
//! Lists commits with `GET /repos/{owner}/{repo}/compare/{base}...{head}`.
//! The response is already ordered oldest first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use herald_core::error::SourceError;

use crate::repository::Result;
use crate::source::CommitSource;
use crate::types::CommitInfo;

const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("herald/", env!("CARGO_PKG_VERSION"));

/// Commit source backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubSource {
    api_url: String,
    token: Option<String>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    #[serde(default)]
    commits: Vec<CompareCommit>,
}

#[derive(Debug, Deserialize)]
struct CompareCommit {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
    author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    name: Option<String>,
    date: Option<DateTime<Utc>>,
}

impl GitHubSource {
    /// Create a source talking to the public GitHub API
    pub fn new(token: Option<String>) -> Self {
        Self::with_api_url(DEFAULT_API_URL, token)
    }

    /// Create a source talking to a custom API base (GitHub Enterprise, tests)
    pub fn with_api_url(api_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        }
    }
}

impl From<CompareCommit> for CommitInfo {
    fn from(c: CompareCommit) -> Self {
        let (name, date) = match c.commit.author {
            Some(author) => (author.name, author.date),
            None => (None, None),
        };

        CommitInfo::new(
            c.sha,
            c.commit.message,
            name.unwrap_or_else(|| "Unknown".to_string()),
            date.unwrap_or_else(Utc::now),
        )
    }
}

#[async_trait]
impl CommitSource for GitHubSource {
    fn name(&self) -> &'static str {
        "github"
    }

    #[instrument(skip(self))]
    async fn compare(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Vec<CommitInfo>> {
        let url = format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.api_url, owner, repo, base, head
        );
        info!(%url, "fetching comparison");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!(base, head, "comparison refs not found");
            return Err(SourceError::NotFound {
                base: base.to_string(),
                head: head.to_string(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CompareResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Request(format!("invalid compare response: {}", e)))?;

        debug!(count = body.commits.len(), "comparison fetched");
        Ok(body.commits.into_iter().map(CommitInfo::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_compare_maps_commits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/app/compare/release/1...release/2"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "commits": [
                    {
                        "sha": "abc1234def5678",
                        "commit": {
                            "message": "Fix login (#42)\n\nABC-100 fixes login",
                            "author": { "name": "Ada", "date": "2024-01-15T10:00:00Z" }
                        }
                    },
                    {
                        "sha": "0011223344",
                        "commit": { "message": "Bump deps", "author": null }
                    }
                ]
            })))
            .mount(&server)
            .await;

        let source = GitHubSource::with_api_url(server.uri(), Some("secret".to_string()));
        let commits = source
            .compare("acme", "app", "release/1", "release/2")
            .await
            .unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].short_id, "abc1234");
        assert_eq!(commits[0].title, "Fix login (#42)");
        assert_eq!(commits[0].author_name, "Ada");
        assert_eq!(commits[1].author_name, "Unknown");
    }

    #[tokio::test]
    async fn test_compare_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = GitHubSource::with_api_url(server.uri(), None);
        let err = source
            .compare("acme", "app", "release/1", "release/2")
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::NotFound { ref base, .. } if base == "release/1"));
    }

    #[tokio::test]
    async fn test_compare_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let source = GitHubSource::with_api_url(server.uri(), None);
        let err = source
            .compare("acme", "app", "release/1", "release/2")
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::Api { status: 500, .. }));
    }
}
