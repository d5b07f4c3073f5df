use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::rate_limiter::RateLimiter;
use crate::models::{Contributor, GitHubUser, Repository, SearchTotal};

const API_BASE_URL: &str = "https://api.github.com";

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("langrank/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: API_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        self.rate_limiter.check()?;

        let response = self.client.get(url).query(query).send().await?;
        self.rate_limiter.update_from_headers(response.headers());

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch {}: {} - {}",
                url, status, body
            )));
        }

        Ok(response.json().await?)
    }

    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        self.rate_limiter.check()?;
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter.update_from_headers(response.headers());

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch user {}: {} - {}",
                username, status, body
            )));
        }

        Ok(response.json().await?)
    }

    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/users/{}/repos?type=owner&sort=updated", self.base_url, username);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching repositories for: {}", username);
        paginator.fetch_all(&url, 100).await
    }

    pub async fn get_org_repos(&self, org: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/orgs/{}/repos?type=all", self.base_url, org);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching repositories for organization: {}", org);
        paginator.fetch_all(&url, 100).await
    }

    pub async fn get_repo_contributors(&self, owner: &str, repo: &str) -> Result<Vec<Contributor>> {
        let url = format!("{}/repos/{}/{}/contributors", self.base_url, owner, repo);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::debug!("Fetching contributors for: {}/{}", owner, repo);
        paginator.fetch_all(&url, 100).await
    }

    pub async fn get_repo_languages(&self, owner: &str, repo: &str) -> Result<BTreeMap<String, u64>> {
        let url = format!("{}/repos/{}/{}/languages", self.base_url, owner, repo);
        tracing::debug!("Fetching languages for: {}/{}", owner, repo);
        self.get_json(&url, &[]).await
    }

    pub async fn search_total(&self, kind: &str, query: &str) -> Result<u64> {
        let url = format!("{}/search/{}", self.base_url, kind);
        tracing::debug!("Searching {}: {}", kind, query);
        let total: SearchTotal = self.get_json(&url, &[("q", query), ("per_page", "1")]).await?;
        Ok(total.total_count)
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;

    fn client_for(server: &MockServer) -> GitHubClient {
        GitHubClient::new(None, Duration::from_secs(5))
            .unwrap()
            .with_base_url(server.base_url())
    }

    #[test]
    fn test_client_builds_without_token() {
        let client = GitHubClient::new(None, Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, API_BASE_URL);
    }

    #[test]
    fn test_rejects_token_with_newline() {
        let result = GitHubClient::new(Some("abc\ndef"), Duration::from_secs(5));
        assert!(matches!(result, Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let client = GitHubClient::new(Some("token"), Duration::from_secs(5))
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_empty_repository_has_no_contributors() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/acme/empty-repo/contributors");
                then.status(204);
            })
            .await;

        let contributors = client_for(&server)
            .get_repo_contributors("acme", "empty-repo")
            .await
            .unwrap();

        assert!(contributors.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_user_is_user_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/ghost");
                then.status(404).json_body(serde_json::json!({"message": "Not Found"}));
            })
            .await;

        let err = client_for(&server).get_user("ghost").await.unwrap_err();
        assert!(matches!(err, Error::UserNotFound(ref name) if name == "ghost"));
    }

    #[tokio::test]
    async fn test_rate_limit_headers_are_tracked() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octo/app/languages");
                then.status(200)
                    .header("x-ratelimit-remaining", "41")
                    .header("x-ratelimit-reset", "4102444800")
                    .json_body(serde_json::json!({"Rust": 1200, "Shell": 30}));
            })
            .await;

        let client = client_for(&server);
        let languages = client.get_repo_languages("octo", "app").await.unwrap();

        assert_eq!(languages.get("Rust"), Some(&1200));
        assert_eq!(client.rate_limiter().remaining(), Some(41));
    }
}
