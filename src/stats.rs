use crate::github::models::{LanguageStats, RepoSummary};
use serde::Serialize;

/// Sum of stars over the fetched repository page
pub fn total_stars(repos: &[RepoSummary]) -> u64 {
    repos.iter().map(|r| r.stargazers_count).sum()
}

/// Three-bar repository composition of the fetched page.
///
/// `total_public` counts non-private repositories and `forked` counts fork
/// repositories whether private or not, so `total_public` is not defined as
/// `original + forked`. `original` is the signed difference and can go below
/// zero when the page contains a private fork; the numbers are reported as
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepoBreakdown {
    pub original: i64,
    pub forked: u64,
    pub total_public: u64,
}

pub fn repo_breakdown(repos: &[RepoSummary]) -> RepoBreakdown {
    let total_public = repos.iter().filter(|r| !r.private).count() as u64;
    let forked = repos.iter().filter(|r| r.fork).count() as u64;

    RepoBreakdown {
        original: total_public as i64 - forked as i64,
        forked,
        total_public,
    }
}

/// One displayed slice of the language distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageSlice {
    pub name: String,
    pub bytes: u64,
    /// Share of the displayed subset, in percent rounded to one decimal
    pub percent: f64,
}

/// Rank languages by byte count descending and keep the top `limit`.
///
/// Percentages are computed over the displayed subset, so the slices always
/// total 100.0 even when the aggregate holds more languages than `limit`.
/// Ties break by name so the ranking is deterministic.
pub fn top_languages(language_stats: &LanguageStats, limit: usize) -> Vec<LanguageSlice> {
    let mut ranked: Vec<(&String, &u64)> = language_stats.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(limit);

    let displayed_total: u64 = ranked.iter().map(|(_, bytes)| **bytes).sum();
    if displayed_total == 0 {
        return Vec::new();
    }

    ranked
        .into_iter()
        .map(|(name, bytes)| LanguageSlice {
            name: name.clone(),
            bytes: *bytes,
            percent: (*bytes as f64 / displayed_total as f64 * 1000.0).round() / 10.0,
        })
        .collect()
}
