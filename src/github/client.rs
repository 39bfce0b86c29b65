use crate::config::GitHubConfig;
use crate::github::{
    models::{LanguageBytes, RepoSummary, UserProfile},
    rate_limit::{RateLimitStatus, RateLimitTracker},
};
use crate::utils::validation::validate_api_url;
use crate::{Error, Result};
use reqwest::{header, Client, StatusCode};
use tracing::{debug, error};

/// GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
    rate_limit: RateLimitTracker,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| Error::Internal(format!("Invalid user agent: {e}")))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        // Add authentication if a token is configured
        if let Some(token) = &config.token {
            let auth_value = format!("token {token}");
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&auth_value)
                    .map_err(|e| Error::Internal(format!("Invalid GitHub token: {e}")))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            rate_limit: RateLimitTracker::new(),
        })
    }

    /// Make a GET request against an absolute URL
    async fn get<T>(&self, url: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!("GitHub API request: GET {}", url);

        let response = self.client.get(url).send().await?;

        // Update quota tracking from response headers
        self.rate_limit
            .update_from_headers(response.headers())
            .await;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            error!("GitHub API error: {} - {}", status, error_body);

            return Err(match status {
                StatusCode::NOT_FOUND => Error::UserNotFound,
                StatusCode::FORBIDDEN => Error::RateLimited,
                _ => Error::Api(status.as_u16()),
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetch the public profile for a username
    pub async fn get_user(&self, username: &str) -> Result<UserProfile> {
        let url = format!(
            "{}/users/{}",
            self.config.api_base_url,
            urlencoding::encode(username)
        );
        self.get(&url).await
    }

    /// Fetch one page of the user's repositories, most recently updated first
    pub async fn get_user_repos(&self, username: &str, per_page: usize) -> Result<Vec<RepoSummary>> {
        let url = format!(
            "{}/users/{}/repos?sort=updated&per_page={}",
            self.config.api_base_url,
            urlencoding::encode(username),
            per_page
        );
        self.get(&url).await
    }

    /// Fetch a repository's language byte breakdown from its `languages_url`
    pub async fn get_languages(&self, languages_url: &str) -> Result<LanguageBytes> {
        validate_api_url(languages_url)?;
        self.get(languages_url).await
    }

    /// Get the current rate limit snapshot
    pub async fn rate_limit_status(&self) -> RateLimitStatus {
        self.rate_limit.status().await
    }
}
