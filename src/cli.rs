use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "typeahead")]
#[command(about = "typeahead - In-memory autocomplete with typo tolerance.")]
#[command(version = env!("VERSION"))]
pub struct Cli {
    /// Path to one or more config files (merged in order).
    #[arg(long, action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    /// CSV file(s) of `word,frequency` to load, in addition to `app.data` from the config.
    #[arg(long, action = clap::ArgAction::Append)]
    pub data: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },

    /// Load the datasets, print index stats and exit.
    Check,

    /// Load the datasets, run a single search and print the result.
    Query {
        /// Query prefix.
        q: String,

        /// Maximum number of suggestions.
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Include typo corrections.
        #[arg(long)]
        typo: bool,
    },
}
