use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments for cityvote-cli
#[derive(Debug, Parser)]
#[command(
    name = "cityvote",
    version,
    about = "CLI for the tournament city-voting flow: validate a token, search cities, submit a vote"
)]
pub struct CliArgs {
    /// Base URL or local directory holding cities.json, admin1.json, admin2.json
    /// (default: DATA_BASE_URL env var, then ./data)
    #[arg(short = 'd', long = "data", global = true)]
    pub data: Option<String>,

    /// Path of the credentials file persisting the voting token and short id
    #[arg(short = 's', long = "store", global = true, default_value = "cityvote-session.json")]
    pub store: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a voting token and persist the resulting identity
    Validate {
        /// One-time token from the voting link (falls back to the stored one)
        #[arg(long)]
        token: Option<String>,
    },

    /// Show statistics for a dataset
    Stats,

    /// Search cities matching a query
    Suggest {
        /// Free-text query (case- and diacritic-insensitive)
        query: String,

        /// Maximum number of suggestions
        #[arg(long, default_value_t = cityvote_core::MAX_SUGGESTIONS)]
        limit: usize,
    },

    /// Submit a vote for the top city matching a query
    Vote {
        /// Free-text query; the first suggestion is submitted
        query: String,

        /// Token to validate first, when no identity is stored yet
        #[arg(long)]
        token: Option<String>,
    },
}
