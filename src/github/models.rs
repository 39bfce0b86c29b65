use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language name to byte count, one map per repository
pub type LanguageBytes = BTreeMap<String, u64>;

/// Aggregate language name to byte count across analyzed repositories
pub type LanguageStats = BTreeMap<String, u64>;

/// Public profile of the queried account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: DateTime<Utc>,
}

/// One repository's public metadata plus a pointer to its
/// language-breakdown resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub private: bool,
    pub fork: bool,
    pub updated_at: DateTime<Utc>,
    pub languages_url: String,
}
