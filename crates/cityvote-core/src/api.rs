// crates/cityvote-core/src/api.rs

//! Wire types and client for the remote voting backend.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{Result, VoteError};

/// Body of `POST /validateUserToken`.
///
/// Two shapes are meaningful: `{valid: true, user_short_id}` and anything
/// else. Unknown fields are ignored, missing ones default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidateResponse {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub user_short_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// The two calls the voting flow makes. Kept as a trait so the gate and
/// submitter can be driven by an in-memory fake in tests.
pub trait VotingApi {
    fn validate_token(&self, token: &str) -> Result<ValidateResponse>;

    /// Posts the city choice for `uid`. `Ok` carries the backend's
    /// confirmation message when it sent one.
    fn submit_vote(&self, uid: &str, city: &str) -> Result<Option<String>>;
}

/// Blocking HTTP client against `{base_url}`.
#[derive(Debug)]
pub struct HttpVotingApi {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpVotingApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl VotingApi for HttpVotingApi {
    fn validate_token(&self, token: &str) -> Result<ValidateResponse> {
        let url = format!("{}/validateUserToken", self.base_url);
        let resp = self.client.post(&url).query(&[("token", token)]).send()?;
        debug!(status = %resp.status(), "validateUserToken answered");
        // The backend signals failure in the body (`valid: false`), not in
        // the status line, so the body is parsed regardless of status.
        Ok(resp.json()?)
    }

    fn submit_vote(&self, uid: &str, city: &str) -> Result<Option<String>> {
        let url = format!("{}/submitVote/{uid}", self.base_url);
        let resp = self.client.post(&url).json(&json!({ "city": city })).send()?;
        let status = resp.status();
        debug!(%status, "submitVote answered");

        if !status.is_success() {
            let reason = resp
                .json::<SubmitResponse>()
                .ok()
                .and_then(|body| body.error.or(body.message))
                .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));
            return Err(VoteError::Api(reason));
        }

        let body: SubmitResponse = resp.json()?;
        Ok(body.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_response_accepts_both_backend_shapes() {
        let ok: ValidateResponse =
            serde_json::from_str(r#"{"valid":true,"user_short_id":"u1"}"#).unwrap();
        assert!(ok.valid);
        assert_eq!(ok.user_short_id.as_deref(), Some("u1"));

        let bad: ValidateResponse =
            serde_json::from_str(r#"{"valid":false,"message":"Invalid or expired token"}"#)
                .unwrap();
        assert!(!bad.valid);
        assert_eq!(bad.message.as_deref(), Some("Invalid or expired token"));
    }

    #[test]
    fn validate_response_tolerates_missing_fields() {
        let empty: ValidateResponse = serde_json::from_str("{}").unwrap();
        assert!(!empty.valid);
        assert!(empty.user_short_id.is_none());
    }
}
