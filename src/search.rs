use crate::config::SearchConfig;
use crate::github::{
    models::{LanguageBytes, LanguageStats, RepoSummary, UserProfile},
    GitHubClient,
};
use crate::utils::validation::validate_username;
use crate::Result;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::warn;

/// Everything one search produces: the profile snapshot, the fetched
/// repository page, and the merged language statistics.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub profile: UserProfile,
    pub repos: Vec<RepoSummary>,
    pub language_stats: LanguageStats,
}

/// Profile aggregation pipeline.
///
/// One search fetches the profile and a repository page concurrently, then
/// the language breakdown of each listed repository, and merges the
/// per-repository maps into one aggregate.
#[derive(Clone)]
pub struct ProfileSearch {
    client: GitHubClient,
    config: SearchConfig,
}

impl ProfileSearch {
    pub fn new(client: GitHubClient, config: SearchConfig) -> Self {
        Self { client, config }
    }

    /// Run one search for a username.
    ///
    /// Only the profile fetch can fail the search. A failed repository-list
    /// fetch degrades to an empty list, and a failed language fetch degrades
    /// to an empty map for that repository alone.
    pub async fn run(&self, username: &str) -> Result<SearchResult> {
        let username = validate_username(username)?;

        let (profile, repos) = tokio::join!(
            self.client.get_user(username),
            self.client
                .get_user_repos(username, self.config.repo_page_size),
        );

        let profile = profile?;

        let repos = repos.unwrap_or_else(|e| {
            warn!(
                "Could not fetch repositories for {}: {}",
                username,
                e.log_safe()
            );
            Vec::new()
        });

        let language_stats = self.fetch_language_stats(&repos).await;

        Ok(SearchResult {
            profile,
            repos,
            language_stats,
        })
    }

    /// Fetch language breakdowns for the analyzed prefix of the repository
    /// list. Each fetch absorbs its own failure, so one bad repository never
    /// cancels its siblings.
    async fn fetch_language_stats(&self, repos: &[RepoSummary]) -> LanguageStats {
        let analyzed = repos.iter().take(self.config.language_repo_cap);

        let per_repo: Vec<LanguageBytes> = stream::iter(analyzed)
            .map(|repo| {
                let client = self.client.clone();
                async move {
                    match client.get_languages(&repo.languages_url).await {
                        Ok(languages) => languages,
                        Err(e) => {
                            warn!(
                                "Could not fetch languages for {}: {}",
                                repo.name,
                                e.log_safe()
                            );
                            LanguageBytes::new()
                        }
                    }
                }
            })
            .buffer_unordered(self.config.language_concurrency.max(1))
            .collect()
            .await;

        merge_language_stats(per_repo)
    }
}

/// Merge per-repository language maps by summing byte counts per language.
/// The merge is commutative and associative, so input order is irrelevant.
pub fn merge_language_stats<I>(per_repo: I) -> LanguageStats
where
    I: IntoIterator<Item = LanguageBytes>,
{
    let mut merged = LanguageStats::new();

    for languages in per_repo {
        for (language, bytes) in languages {
            *merged.entry(language).or_insert(0) += bytes;
        }
    }

    merged
}
