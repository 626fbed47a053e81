//! cityvote-rs — workspace meta-crate.
//!
//! Re-exports `cityvote-core` and hosts the runnable demos (see
//! `demos/basic_usage.rs`). Depend on `cityvote-core` directly in
//! applications.

pub use cityvote_core::*;

/// Convenience imports for the demos.
pub mod prelude {
    pub use cityvote_core::{
        build_records, load, render, resolve_session, suggest, AppState, CityRaw, CityRecord, Config,
        DataSource, Event, FileTokenStore, HttpVotingApi, IsoCountryNames, MemoryTokenStore,
        RawPayloads, Result, SessionState, Snapshot, SubmissionStatus, TokenStore, VoteError,
        VotingApi, MAX_SUGGESTIONS,
    };
}
