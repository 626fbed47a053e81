//! cityvote-cli — Command-line surface for cityvote-core
//!
//! This binary drives the whole voting flow from a terminal: it validates
//! a one-time voting token, loads and enriches the city dataset (from a
//! local directory or an HTTP base URL), ranks suggestions for a query,
//! and submits the final city choice.
//!
//! Usage examples
//! --------------
//!
//! - Validate a token from a voting link
//!   $ cityvote-cli validate --token abc123
//!
//! - Show dataset statistics
//!   $ cityvote-cli --data ./data stats
//!
//! - Search cities
//!   $ cityvote-cli --data ./data suggest "sao pa"
//!
//! - Submit a vote for the best match
//!   $ cityvote-cli --data https://example.com/data vote lima
//!
//! The voting backend host comes from the API_BASE_URL environment
//! variable; credentials persist in a small JSON file (see --store).

mod args;

use crate::args::{CliArgs, Commands};
use anyhow::bail;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use cityvote_core::{
    load, render, resolve_session, AppState, Config, DataSource, Event, FileTokenStore,
    HttpVotingApi, IsoCountryNames, SessionState, Snapshot, SubmissionKind, SuggestionRow,
    API_BASE_URL_VAR,
};

fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = CliArgs::parse();
    let config = Config::global();

    let data = args.data.clone().unwrap_or_else(|| config.data_base.clone());
    let source = DataSource::from_arg(&data);

    match args.command {
        Commands::Validate { token } => {
            let mut store = FileTokenStore::open(&args.store);
            let api = backend_api(config)?;
            match resolve_session(&mut store, &api, token.as_deref()) {
                SessionState::Valid { uid } => println!("Token valid. Voter short id: {uid}"),
                SessionState::Invalid { message } => bail!(message),
                SessionState::Validating => unreachable!("resolve_session is terminal"),
            }
        }

        Commands::Stats => {
            let payloads = source.fetch()?;
            let stats = payloads.stats();
            println!("Dataset statistics:");
            println!("  Cities: {}", stats.cities);
            println!("  Admin1 regions: {}", stats.admin1);
            println!("  Admin2 regions: {}", stats.admin2);
        }

        Commands::Suggest { query, limit } => {
            let records = load_with_progress(&source)?;
            let matches = cityvote_core::suggest(&query, &records, limit);
            if matches.is_empty() {
                println!("No matches for \"{query}\". Try another spelling.");
            } else {
                for city in matches {
                    println!("{} — {}", city.display_name(), city.location_label());
                }
            }
        }

        Commands::Vote { query, token } => {
            let mut store = FileTokenStore::open(&args.store);
            let api = backend_api(config)?;
            let mut state = AppState::new();

            let session = resolve_session(&mut store, &api, token.as_deref());
            state.apply(Event::SessionResolved(session));

            match load_with_progress(&source) {
                Ok(records) => state.apply(Event::DatasetLoaded(records)),
                Err(err) => state.apply(Event::LoadFailed(err.to_string())),
            }

            state.apply(Event::QueryChanged(query.clone()));
            let row = first_suggestion(&render(&state), &query)?;
            println!("Voting for {} ({})", row.label, row.meta);
            state.apply(Event::CitySelected(row.id));

            state.submit(&api);
            let snapshot = render(&state);
            match snapshot.submission {
                Some(status) if status.kind == SubmissionKind::Success => {
                    println!("{}", status.message)
                }
                Some(status) => bail!(status.message),
                None => bail!("Nothing was submitted."),
            }
        }
    }

    Ok(())
}

/// Build the backend client, refusing to run without a configured host.
fn backend_api(config: &Config) -> anyhow::Result<HttpVotingApi> {
    if config.api_base_url.trim().is_empty() {
        bail!("No voting backend configured. Set {API_BASE_URL_VAR} to the backend base URL.");
    }
    Ok(HttpVotingApi::new(config.api_base_url.clone()))
}

/// Pick the top suggestion, or explain why there is none. A session or
/// load error takes precedence over the "no matches" hint.
fn first_suggestion(snapshot: &Snapshot, query: &str) -> anyhow::Result<SuggestionRow> {
    if let Some(row) = snapshot.suggestions.first() {
        return Ok(row.clone());
    }
    if let Some(error) = &snapshot.error {
        bail!(error.clone());
    }
    bail!("No matches for \"{query}\". Try another spelling.");
}

/// Load the dataset, echoing batch progress to stderr.
fn load_with_progress(source: &DataSource) -> cityvote_core::Result<Vec<cityvote_core::CityRecord>> {
    use std::io::Write;

    eprintln!("Fetching city data...");
    let records = load(source, &IsoCountryNames, |percent| {
        eprint!("\rProcessing cities... {percent}%");
        let _ = std::io::stderr().flush();
    })?;
    eprintln!();
    Ok(records)
}
