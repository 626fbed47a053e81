// crates/cityvote-core/src/vote.rs

//! Vote submission.
//!
//! Preconditions are checked in a fixed order, each short-circuiting with
//! user-facing status text and no network call: selection first, then
//! identity, then a non-empty trimmed city name.

use tracing::{debug, warn};

use crate::api::VotingApi;
use crate::model::CityRecord;

pub const SELECT_CITY_MESSAGE: &str =
    "Please select a city from the suggestions above before submitting.";
pub const INVALID_USER_MESSAGE: &str = "Invalid user. Please come through the Game";
pub const EMPTY_CITY_MESSAGE: &str = "Please pick a city first.";
pub const SUBMIT_FAILED_MESSAGE: &str = "Unable to submit your vote. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Success,
    Error,
}

/// Outcome of one submission attempt. Ephemeral: the next attempt
/// overwrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionStatus {
    pub kind: SubmissionKind,
    pub message: String,
}

impl SubmissionStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: SubmissionKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: SubmissionKind::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == SubmissionKind::Success
    }
}

/// Submit `selected` for `uid`. Precondition failures return immediately
/// without touching the network.
pub fn submit_vote(
    api: &dyn VotingApi,
    uid: Option<&str>,
    selected: Option<&CityRecord>,
) -> SubmissionStatus {
    let Some(city) = selected else {
        return SubmissionStatus::error(SELECT_CITY_MESSAGE);
    };
    let Some(uid) = uid else {
        return SubmissionStatus::error(INVALID_USER_MESSAGE);
    };
    let city_name = city.display_name.trim();
    if city_name.is_empty() {
        return SubmissionStatus::error(EMPTY_CITY_MESSAGE);
    }

    debug!(%uid, city = %city_name, "submitting vote");
    match api.submit_vote(uid, city_name) {
        Ok(Some(message)) => SubmissionStatus::success(message),
        Ok(None) => SubmissionStatus::success(format!("Vote received for \"{city_name}\"!")),
        Err(err) => {
            warn!("vote submission failed: {err}");
            let message = err.to_string();
            SubmissionStatus::error(if message.is_empty() {
                SUBMIT_FAILED_MESSAGE.to_string()
            } else {
                message
            })
        }
    }
}
