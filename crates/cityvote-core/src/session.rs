// crates/cityvote-core/src/session.rs

//! Session/Token gate.
//!
//! Resolves the voter's identity exactly once per run: a persisted
//! (token, uid) pair is trusted without re-validation, otherwise the token
//! from the landing link (or storage) is validated against the backend and
//! the resulting identity persisted. Invalid or failed validation clears
//! whatever was stored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::api::VotingApi;

/// Storage key for the opaque voting token.
pub const TOKEN_KEY: &str = "votingToken";
/// Storage key for the validated short identity.
pub const UID_KEY: &str = "votingUserShortId";

pub const NO_TOKEN_MESSAGE: &str =
    "No voting token found. Please use a valid voting link with a token parameter.";
pub const EXPIRED_TOKEN_MESSAGE: &str =
    "Your voting token has expired. Please use a fresh voting link.";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid voting token. Please use a valid voting link.";
pub const TOKEN_FALLBACK_MESSAGE: &str =
    "Invalid or expired token. Please use a valid voting link.";
pub const VERIFY_FAILED_MESSAGE: &str = "Unable to verify token. Please try again.";

/// Where the (token, uid) pair lives between page loads.
///
/// Writes are best-effort: persistence failure must never break the voting
/// flow, so `save`/`clear` log instead of erroring.
pub trait TokenStore {
    fn token(&self) -> Option<String>;
    fn uid(&self) -> Option<String>;
    fn save(&mut self, token: &str, uid: &str);
    /// Drops both keys. They are only ever cleared together.
    fn clear(&mut self);
}

/// In-memory store, used by tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
    uid: Option<String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(token: &str, uid: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            uid: Some(uid.to_string()),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn uid(&self) -> Option<String> {
        self.uid.clone()
    }

    fn save(&mut self, token: &str, uid: &str) {
        self.token = Some(token.to_string());
        self.uid = Some(uid.to_string());
    }

    fn clear(&mut self) {
        self.token = None;
        self.uid = None;
    }
}

/// File-backed store: a small JSON object keyed by [`TOKEN_KEY`] and
/// [`UID_KEY`]. A missing or corrupt file is just an empty store.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    token: Option<String>,
    uid: Option<String>,
}

impl FileTokenStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut store = Self {
            path,
            token: None,
            uid: None,
        };
        if let Ok(raw) = fs::read_to_string(&store.path) {
            match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(map) => {
                    store.token = map.get(TOKEN_KEY).cloned();
                    store.uid = map.get(UID_KEY).cloned();
                }
                Err(err) => {
                    warn!(path = %store.path.display(), "ignoring corrupt credential file: {err}")
                }
            }
        }
        store
    }

    fn persist(&self) {
        let mut map = BTreeMap::new();
        if let (Some(token), Some(uid)) = (&self.token, &self.uid) {
            map.insert(TOKEN_KEY.to_string(), token.clone());
            map.insert(UID_KEY.to_string(), uid.clone());
        }
        // Best-effort, like the rest of the store: a failed write only
        // costs a re-validation on the next run.
        if let Ok(payload) = serde_json::to_string_pretty(&map) {
            if let Err(err) = fs::write(&self.path, payload) {
                warn!(path = %self.path.display(), "could not persist credentials: {err}");
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn uid(&self) -> Option<String> {
        self.uid.clone()
    }

    fn save(&mut self, token: &str, uid: &str) {
        self.token = Some(token.to_string());
        self.uid = Some(uid.to_string());
        self.persist();
    }

    fn clear(&mut self) {
        self.token = None;
        self.uid = None;
        self.persist();
    }
}

/// Identity state of the current page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Validation has not finished yet.
    Validating,
    Valid { uid: String },
    Invalid { message: String },
}

impl SessionState {
    pub fn uid(&self) -> Option<&str> {
        match self {
            SessionState::Valid { uid } => Some(uid),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, SessionState::Valid { .. })
    }
}

/// Run the token gate. At most one network call, no retry.
///
/// `url_token` is the `?token=` query parameter of the landing link, when
/// present.
pub fn resolve_session(
    store: &mut dyn TokenStore,
    api: &dyn VotingApi,
    url_token: Option<&str>,
) -> SessionState {
    // Already validated on a previous visit: trust the pair as-is. The
    // accepted risk is that expiry is not re-checked until submission.
    if let (Some(_token), Some(uid)) = (store.token(), store.uid()) {
        debug!(%uid, "using pre-validated voting credentials");
        return SessionState::Valid { uid };
    }

    let token = match url_token.map(str::to_string).or_else(|| store.token()) {
        Some(t) => t,
        None => {
            debug!("no voting token in link or storage");
            return SessionState::Invalid {
                message: NO_TOKEN_MESSAGE.to_string(),
            };
        }
    };

    match api.validate_token(&token) {
        Ok(resp) => {
            if resp.valid {
                if let Some(uid) = resp.user_short_id {
                    store.save(&token, &uid);
                    debug!(%uid, "token validated");
                    return SessionState::Valid { uid };
                }
            }
            store.clear();
            SessionState::Invalid {
                message: invalid_message(resp.message.as_deref()),
            }
        }
        Err(err) => {
            store.clear();
            warn!("token validation failed: {err}");
            let message = err.to_string();
            SessionState::Invalid {
                message: if message.is_empty() {
                    VERIFY_FAILED_MESSAGE.to_string()
                } else {
                    message
                },
            }
        }
    }
}

/// Pick the user-facing text for a rejected token: tailored strings for
/// the known "expired"/"invalid" backend wordings, the backend message
/// verbatim otherwise, a generic fallback when there is none.
fn invalid_message(backend: Option<&str>) -> String {
    let backend = backend.unwrap_or("").trim();
    let folded = backend.to_lowercase();
    if folded.contains("expired") {
        EXPIRED_TOKEN_MESSAGE.to_string()
    } else if folded.contains("invalid") {
        INVALID_TOKEN_MESSAGE.to_string()
    } else if !backend.is_empty() {
        backend.to_string()
    } else {
        TOKEN_FALLBACK_MESSAGE.to_string()
    }
}
