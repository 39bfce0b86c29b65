// Command-line interface
pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "devlens")]
#[command(about = "DevLens - GitHub profile inspector", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a user: profile, statistics, language and repository charts
    Lookup {
        /// GitHub username
        username: String,

        /// Print the raw search result as JSON instead of rendering it
        #[arg(long)]
        json: bool,
    },

    /// Show only the language distribution for a user
    Languages {
        /// GitHub username
        username: String,

        /// How many languages to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show only the recently updated repositories for a user
    Repos {
        /// GitHub username
        username: String,
    },
}
