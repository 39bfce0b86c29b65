use crate::config::Settings;
use crate::github::models::{LanguageStats, RepoSummary, UserProfile};
use crate::github::GitHubClient;
use crate::search::{ProfileSearch, SearchResult};
use crate::stats;
use crate::{Error, Result};

/// Character cells in a full chart bar
const BAR_WIDTH: usize = 30;

/// Look up a user and render the full profile view
pub async fn lookup(settings: &Settings, username: &str, json: bool) -> Result<()> {
    let client = GitHubClient::new(settings.github.clone())?;
    let search = ProfileSearch::new(client.clone(), settings.search.clone());

    let result = search.run(username).await?;

    if json {
        let body = serde_json::to_string_pretty(&result)
            .map_err(|e| Error::Internal(format!("Failed to serialize result: {e}")))?;
        println!("{body}");
        return Ok(());
    }

    print_profile(&result.profile);
    print_stat_row(&result);
    print_language_chart(&result.language_stats, settings.search.top_languages);
    print_repo_chart(&result.repos);
    print_repo_list(&result.repos);

    let quota = client.rate_limit_status().await;
    println!("\nAPI quota remaining: {}/{}", quota.remaining, quota.limit);

    Ok(())
}

/// Render only the language distribution
pub async fn languages(settings: &Settings, username: &str, limit: Option<usize>) -> Result<()> {
    let client = GitHubClient::new(settings.github.clone())?;
    let search = ProfileSearch::new(client, settings.search.clone());

    let result = search.run(username).await?;
    let limit = limit.unwrap_or(settings.search.top_languages);

    print_language_chart(&result.language_stats, limit);
    Ok(())
}

/// Render only the repository list
pub async fn repos(settings: &Settings, username: &str) -> Result<()> {
    let client = GitHubClient::new(settings.github.clone())?;
    let search = ProfileSearch::new(client, settings.search.clone());

    let result = search.run(username).await?;

    print_repo_list(&result.repos);
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    let display_name = profile.name.as_deref().unwrap_or(&profile.login);

    println!("\n{} (@{})", display_name, profile.login);
    println!("{}", profile.bio.as_deref().unwrap_or("No bio available"));
    println!();
    println!(
        "  Location: {}",
        profile.location.as_deref().unwrap_or("Not specified")
    );
    println!(
        "  Company:  {}",
        profile.company.as_deref().unwrap_or("Not specified")
    );

    // The API reports a missing blog as an empty string rather than null
    let blog = profile
        .blog
        .as_deref()
        .filter(|b| !b.is_empty())
        .unwrap_or("Not specified");
    println!("  Blog:     {blog}");

    println!("  Joined:   {}", profile.created_at.format("%B %-d, %Y"));
    println!("  Profile:  {}", profile.html_url);
}

fn print_stat_row(result: &SearchResult) {
    let profile = &result.profile;
    println!();
    println!(
        "  Repos: {}   Followers: {}   Following: {}   Total stars: {}",
        format_count(profile.public_repos as u64),
        format_count(profile.followers as u64),
        format_count(profile.following as u64),
        format_count(stats::total_stars(&result.repos)),
    );
}

fn print_language_chart(language_stats: &LanguageStats, limit: usize) {
    println!("\nLanguages");

    let slices = stats::top_languages(language_stats, limit);
    if slices.is_empty() {
        println!("  No language data available");
        return;
    }

    let name_width = slices.iter().map(|s| s.name.len()).max().unwrap_or(0);

    for slice in &slices {
        println!(
            "  {name:<name_width$}  {bar:<bar_width$}  {percent:>5.1}%  {size}",
            name = slice.name,
            name_width = name_width,
            bar = bar(slice.percent, 100.0),
            bar_width = BAR_WIDTH,
            percent = slice.percent,
            size = format_bytes(slice.bytes),
        );
    }
}

fn print_repo_chart(repos: &[RepoSummary]) {
    let breakdown = stats::repo_breakdown(repos);

    println!("\nRepository composition (fetched page)");

    // Negative counts keep their sign in the label; the bar just bottoms
    // out at zero cells.
    let rows = [
        ("Original", breakdown.original.max(0) as u64, breakdown.original.to_string()),
        ("Forked", breakdown.forked, breakdown.forked.to_string()),
        ("Total Public", breakdown.total_public, breakdown.total_public.to_string()),
    ];

    let max = rows.iter().map(|(_, v, _)| *v).max().unwrap_or(0).max(1) as f64;

    for (label, value, shown) in &rows {
        println!(
            "  {label:<12}  {bar:<bar_width$}  {shown}",
            label = label,
            bar = bar(*value as f64, max),
            bar_width = BAR_WIDTH,
            shown = shown,
        );
    }
}

fn print_repo_list(repos: &[RepoSummary]) {
    println!("\nRecently updated repositories");

    if repos.is_empty() {
        println!("  No public repositories found.");
        return;
    }

    for repo in repos {
        let visibility = if repo.private { "Private" } else { "Public" };

        println!("\n  {} [{}]", repo.name, visibility);
        println!(
            "    {}",
            repo.description.as_deref().unwrap_or("No description available")
        );
        println!(
            "    {}  ★ {}  ⑂ {}  updated {}",
            repo.language.as_deref().unwrap_or("-"),
            format_count(repo.stargazers_count),
            format_count(repo.forks_count),
            repo.updated_at.format("%Y-%m-%d"),
        );
        println!("    {}", repo.html_url);
    }
}

/// Bar of filled cells proportional to `value / max`
fn bar(value: f64, max: f64) -> String {
    let filled = if max <= 0.0 {
        0
    } else {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    };
    "█".repeat(filled.min(BAR_WIDTH))
}

/// Format a count with thousands separators, e.g. 12345 -> "12,345"
fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Human-readable byte count for chart labels
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "kB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
