// Validation utilities
use crate::error::{Error, Result};
use url::Url;

/// Longest username the platform issues
const MAX_USERNAME_LEN: usize = 39;

/// Validate a username before any network call.
///
/// Accepts the platform's account-name syntax: ASCII alphanumerics and
/// single interior hyphens, at most 39 characters. Returns the trimmed
/// username on success.
pub fn validate_username(username: &str) -> Result<&str> {
    let username = username.trim();

    if username.is_empty() {
        return Err(Error::Validation("Username must not be empty".to_string()));
    }

    if username.len() > MAX_USERNAME_LEN {
        return Err(Error::Validation(format!(
            "Username too long (max {MAX_USERNAME_LEN} characters): {username}"
        )));
    }

    let valid_chars = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-');

    if !valid_chars
        || username.starts_with('-')
        || username.ends_with('-')
        || username.contains("--")
    {
        return Err(Error::Validation(format!("Invalid username: {username}")));
    }

    Ok(username)
}

/// Validate a URL taken from an API payload before fetching it.
/// Must parse, use an http(s) scheme, and name a host.
pub fn validate_api_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => {}
        _ => {
            return Err(Error::Validation(format!(
                "URL must use http or https scheme: {url_str}"
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(Error::Validation("URL must have a valid host".to_string()));
    }

    Ok(url)
}
