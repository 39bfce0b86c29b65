use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("User not found. Please check the username and try again.")]
    UserNotFound,

    #[error("API rate limit exceeded. Please try again later or add a GitHub token.")]
    RateLimited,

    #[error("GitHub API error: {0}")]
    Api(u16),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging.
    /// Filters out potentially sensitive information.
    pub fn log_safe(&self) -> String {
        match self {
            // HTTP errors might contain request URLs or authentication info
            Error::Http(_) => "External HTTP request failed".to_string(),

            Error::Internal(msg) => {
                if msg.to_lowercase().contains("token") || msg.to_lowercase().contains("secret") {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            // The remaining variants carry user-facing text
            other => other.to_string(),
        }
    }
}
