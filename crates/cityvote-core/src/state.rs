// crates/cityvote-core/src/state.rs

//! Controller state and render projection.
//!
//! All mutable state of the voting widget lives in one [`AppState`] owned
//! by the controller; events go through [`AppState::apply`] and the view
//! layer re-reads a fresh [`Snapshot`] after every mutation. No ambient
//! globals.

use crate::api::VotingApi;
use crate::model::CityRecord;
use crate::search::{suggest, MAX_SUGGESTIONS};
use crate::session::SessionState;
use crate::text::normalize;
use crate::vote::{self, SubmissionStatus};

/// The whole widget state. Dataset loading and typing deliberately keep
/// working with an invalid session; identity is re-checked at submit time.
#[derive(Debug, Clone)]
pub struct AppState {
    pub session: SessionState,
    pub cities: Vec<CityRecord>,
    pub loading: bool,
    pub load_progress: u8,
    pub load_error: Option<String>,
    pub query: String,
    pub selected_id: Option<String>,
    pub submission: Option<SubmissionStatus>,
    pub submitting: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: SessionState::Validating,
            cities: Vec::new(),
            loading: true,
            load_progress: 0,
            load_error: None,
            query: String::new(),
            selected_id: None,
            submission: None,
            submitting: false,
        }
    }
}

/// State transitions. One event in, one mutation out.
#[derive(Debug, Clone)]
pub enum Event {
    SessionResolved(SessionState),
    LoadProgress(u8),
    DatasetLoaded(Vec<CityRecord>),
    LoadFailed(String),
    QueryChanged(String),
    /// Selection by record id; ids from a stale suggestion list that no
    /// longer exist are ignored.
    CitySelected(String),
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: Event) {
        match event {
            Event::SessionResolved(session) => self.session = session,
            Event::LoadProgress(p) => self.load_progress = p.min(100),
            Event::DatasetLoaded(cities) => {
                self.cities = cities;
                self.loading = false;
                self.load_progress = 100;
                self.load_error = None;
            }
            Event::LoadFailed(message) => {
                self.cities.clear();
                self.loading = false;
                self.load_error = Some(message);
            }
            Event::QueryChanged(query) => {
                // Any edit forces re-selection.
                self.query = query;
                self.selected_id = None;
                self.submission = None;
            }
            Event::CitySelected(id) => {
                if self.cities.iter().any(|c| c.id == id) {
                    self.selected_id = Some(id);
                    self.submission = None;
                }
            }
        }
    }

    pub fn selected_city(&self) -> Option<&CityRecord> {
        let id = self.selected_id.as_deref()?;
        self.cities.iter().find(|c| c.id == id)
    }

    pub fn suggestions(&self) -> Vec<&CityRecord> {
        suggest(&self.query, &self.cities, MAX_SUGGESTIONS)
    }

    /// Run a submission attempt. The busy flag is held for the duration of
    /// the request; an attempt while busy is dropped locally (the control
    /// surface is disabled in that state anyway).
    pub fn submit(&mut self, api: &dyn VotingApi) {
        if self.submitting {
            return;
        }
        self.submission = None;
        self.submitting = true;
        let status = vote::submit_vote(api, self.session.uid(), self.selected_city());
        self.submitting = false;
        self.submission = Some(status);
    }
}

/// One suggestion row as the view shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRow {
    pub id: String,
    pub label: String,
    pub meta: String,
    pub active: bool,
}

/// Pure projection of [`AppState`] onto the user-facing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub input_enabled: bool,
    pub submit_enabled: bool,
    pub validating: bool,
    pub loading: bool,
    pub load_progress: u8,
    /// Session or load error text, shown once neither gate is pending.
    pub error: Option<String>,
    pub suggestions: Vec<SuggestionRow>,
    pub no_matches: bool,
    pub prompt_selection: bool,
    pub submission: Option<SubmissionStatus>,
}

/// Project `state` to a [`Snapshot`]. Pure: no mutation, deterministic.
pub fn render(state: &AppState) -> Snapshot {
    let validating = matches!(state.session, SessionState::Validating);
    let dataset_pending = state.loading && state.cities.is_empty();
    let has_query = !normalize(&state.query).is_empty();

    let error = state.load_error.clone().or_else(|| match &state.session {
        SessionState::Invalid { message } => Some(message.clone()),
        _ => None,
    });

    let suggestions: Vec<SuggestionRow> = if has_query {
        state
            .suggestions()
            .into_iter()
            .map(|c| SuggestionRow {
                id: c.id.clone(),
                label: c.display_name.clone(),
                meta: c.location_label.clone(),
                active: state.selected_id.as_deref() == Some(c.id.as_str()),
            })
            .collect()
    } else {
        Vec::new()
    };

    let no_matches = suggestions.is_empty() && has_query && !state.loading && error.is_none();
    let prompt_selection = !suggestions.is_empty() && state.selected_id.is_none();

    Snapshot {
        input_enabled: !validating && !dataset_pending,
        submit_enabled: !state.submitting
            && state.selected_id.is_some()
            && !validating
            && !dataset_pending,
        validating,
        loading: state.loading,
        load_progress: state.load_progress,
        error,
        suggestions,
        no_matches,
        prompt_selection,
        submission: state.submission.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ValidateResponse;
    use crate::error::Result;
    use crate::loader::build_records;
    use crate::model::{CityRaw, RawPayloads};
    use crate::names::IsoCountryNames;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingApi {
        submits: Cell<usize>,
    }

    impl VotingApi for CountingApi {
        fn validate_token(&self, _token: &str) -> Result<ValidateResponse> {
            panic!("validate_token not expected here");
        }

        fn submit_vote(&self, _uid: &str, _city: &str) -> Result<Option<String>> {
            self.submits.set(self.submits.get() + 1);
            Ok(None)
        }
    }

    fn dataset() -> Vec<CityRecord> {
        let payloads = RawPayloads {
            cities: vec![
                CityRaw {
                    name: "Springfield".into(),
                    country: "US".into(),
                    admin1: None,
                    admin2: None,
                    lat: 39.8,
                    lng: -89.6,
                },
                CityRaw {
                    name: "West Springfield".into(),
                    country: "US".into(),
                    admin1: None,
                    admin2: None,
                    lat: 42.1,
                    lng: -72.6,
                },
            ],
            admin1: vec![],
            admin2: vec![],
        };
        build_records(payloads, &IsoCountryNames, |_| {})
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new();
        state.apply(Event::SessionResolved(SessionState::Valid {
            uid: "u1".into(),
        }));
        state.apply(Event::DatasetLoaded(dataset()));
        state
    }

    #[test]
    fn query_edit_clears_selection_and_status() {
        let mut state = loaded_state();
        state.apply(Event::QueryChanged("spring".into()));
        let id = state.suggestions()[0].id.clone();
        state.apply(Event::CitySelected(id.clone()));
        assert_eq!(state.selected_id.as_deref(), Some(id.as_str()));

        state.apply(Event::QueryChanged("springf".into()));
        assert!(state.selected_id.is_none());
        assert!(state.submission.is_none());
    }

    #[test]
    fn stale_selection_ids_are_ignored() {
        let mut state = loaded_state();
        state.apply(Event::CitySelected("no-such-id".into()));
        assert!(state.selected_id.is_none());
    }

    #[test]
    fn controls_disabled_while_validating_or_loading() {
        let state = AppState::new();
        let snap = render(&state);
        assert!(!snap.input_enabled);
        assert!(!snap.submit_enabled);
        assert!(snap.validating);

        let snap = render(&loaded_state());
        assert!(snap.input_enabled);
        // Enabled input but nothing selected yet.
        assert!(!snap.submit_enabled);
    }

    #[test]
    fn typing_works_with_invalid_session() {
        // Degraded usability: the identity check is deferred to submit.
        let mut state = AppState::new();
        state.apply(Event::SessionResolved(SessionState::Invalid {
            message: "Invalid voting token. Please use a valid voting link.".into(),
        }));
        state.apply(Event::DatasetLoaded(dataset()));
        state.apply(Event::QueryChanged("spring".into()));

        let snap = render(&state);
        assert!(snap.input_enabled);
        assert_eq!(snap.suggestions.len(), 2);
        assert!(snap.error.is_some());
    }

    #[test]
    fn failed_load_keeps_interface_alive_with_empty_suggestions() {
        let mut state = AppState::new();
        state.apply(Event::SessionResolved(SessionState::Valid {
            uid: "u1".into(),
        }));
        state.apply(Event::LoadFailed("Unable to fetch cities (500)".into()));
        state.apply(Event::QueryChanged("spring".into()));

        let snap = render(&state);
        assert!(snap.input_enabled);
        assert!(snap.suggestions.is_empty());
        assert_eq!(snap.error.as_deref(), Some("Unable to fetch cities (500)"));
        // Error is shown instead of the "no matches" hint.
        assert!(!snap.no_matches);
    }

    #[test]
    fn submit_while_busy_is_dropped_without_network() {
        let mut state = loaded_state();
        state.apply(Event::QueryChanged("spring".into()));
        let id = state.suggestions()[0].id.clone();
        state.apply(Event::CitySelected(id));

        let api = CountingApi::default();
        state.submitting = true;
        state.submit(&api);
        assert_eq!(api.submits.get(), 0);
        assert!(state.submission.is_none());
        assert!(!render(&state).submit_enabled);

        // Once the in-flight attempt clears, the same submit goes through.
        state.submitting = false;
        state.submit(&api);
        assert_eq!(api.submits.get(), 1);
        assert!(state.submission.as_ref().is_some_and(|s| s.is_success()));
    }

    #[test]
    fn no_matches_and_prompt_selection_flags() {
        let mut state = loaded_state();
        state.apply(Event::QueryChanged("zzzz".into()));
        assert!(render(&state).no_matches);

        state.apply(Event::QueryChanged("spring".into()));
        let snap = render(&state);
        assert!(!snap.no_matches);
        assert!(snap.prompt_selection);

        let id = state.suggestions()[0].id.clone();
        state.apply(Event::CitySelected(id));
        let snap = render(&state);
        assert!(!snap.prompt_selection);
        assert!(snap.submit_enabled);
        assert!(snap.suggestions.iter().any(|row| row.active));
    }
}
