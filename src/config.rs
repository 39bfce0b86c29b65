use crate::error::{Error, Result};
use std::env;

/// Runtime settings, loaded from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub github: GitHubConfig,
    pub search: SearchConfig,
}

/// GitHub API access configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Optional personal access token for increased rate limits
    pub token: Option<String>,

    /// Base URL of the REST API
    pub api_base_url: String,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

/// Aggregation pipeline configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Repositories fetched per search, one page sorted by last update
    pub repo_page_size: usize,

    /// How many of those repositories get a language-breakdown fetch
    pub language_repo_cap: usize,

    /// Concurrent language-breakdown requests
    pub language_concurrency: usize,

    /// Languages shown in the distribution chart
    pub top_languages: usize,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        let api_base_url =
            env::var("GITHUB_API_URL").unwrap_or_else(|_| "https://api.github.com".to_string());

        let timeout_seconds = env::var("GITHUB_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid GITHUB_TIMEOUT value".to_string()))?;

        let repo_page_size = env::var("REPO_PAGE_SIZE")
            .unwrap_or_else(|_| "6".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid REPO_PAGE_SIZE value".to_string()))?;

        let language_repo_cap = env::var("LANGUAGE_REPO_CAP")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid LANGUAGE_REPO_CAP value".to_string()))?;

        let language_concurrency = env::var("LANGUAGE_CONCURRENCY")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid LANGUAGE_CONCURRENCY value".to_string()))?;

        let top_languages = env::var("TOP_LANGUAGES")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid TOP_LANGUAGES value".to_string()))?;

        Ok(Settings {
            github: GitHubConfig {
                token,
                api_base_url,
                user_agent: format!("devlens/{}", env!("CARGO_PKG_VERSION")),
                timeout_seconds,
            },
            search: SearchConfig {
                repo_page_size,
                language_repo_cap,
                language_concurrency,
                top_languages,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.search.repo_page_size == 0 || self.search.repo_page_size > 100 {
            return Err(Error::Config(
                "Repository page size must be between 1 and 100".to_string(),
            ));
        }

        if self.search.language_concurrency == 0 {
            return Err(Error::Config(
                "Language fetch concurrency must be non-zero".to_string(),
            ));
        }

        if self.search.top_languages == 0 {
            return Err(Error::Config(
                "Language display limit must be non-zero".to_string(),
            ));
        }

        if self.github.timeout_seconds == 0 {
            return Err(Error::Config("Request timeout must be non-zero".to_string()));
        }

        Ok(())
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: "https://api.github.com".to_string(),
            user_agent: format!("devlens/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: 30,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            repo_page_size: 6,
            language_repo_cap: 10,
            language_concurrency: 10,
            top_languages: 8,
        }
    }
}
