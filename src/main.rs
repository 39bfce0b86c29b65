use clap::Parser;
use devlens::{
    cli::{commands, Cli, Commands},
    config::Settings,
    Result,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging on stderr, keeping stdout for rendered output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,devlens=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Search failed: {}", e.log_safe());
        eprintln!("\x1b[31m\u{2717}\x1b[0m {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    match cli.command {
        Commands::Lookup { username, json } => commands::lookup(&settings, &username, json).await,
        Commands::Languages { username, limit } => {
            commands::languages(&settings, &username, limit).await
        }
        Commands::Repos { username } => commands::repos(&settings, &username).await,
    }
}
