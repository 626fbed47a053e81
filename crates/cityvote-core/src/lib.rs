// crates/cityvote-core/src/lib.rs

//! # cityvote-core
//!
//! Engine behind the tournament city-voting page: city dataset loading and
//! enrichment, diacritic-insensitive suggestion ranking, the one-time
//! token gate and vote submission against the voting backend, plus a
//! headless controller state that any view layer can project.

pub mod api;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod names;
pub mod search;
pub mod session;
pub mod state;
pub mod text;
pub mod vote;

// Re-exports
pub use crate::api::{HttpVotingApi, ValidateResponse, VotingApi};
pub use crate::config::{Config, API_BASE_URL_VAR, DATA_BASE_URL_VAR};
pub use crate::error::{Result, VoteError};
pub use crate::loader::{build_records, load, DataSource, BATCH_SIZE};
pub use crate::model::{AdminEntryRaw, CityRaw, CityRecord, DatasetStats, RawPayloads};
pub use crate::names::{CountryNames, IsoCountryNames};
pub use crate::search::{suggest, MAX_SUGGESTIONS};
pub use crate::session::{
    resolve_session, FileTokenStore, MemoryTokenStore, SessionState, TokenStore,
};
pub use crate::state::{render, AppState, Event, Snapshot, SuggestionRow};
pub use crate::text::{normalize, strip_diacritics};
pub use crate::vote::{submit_vote, SubmissionKind, SubmissionStatus};
