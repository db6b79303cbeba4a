//! Error kinds surfaced by the session and role-resolution layers.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use thiserror::Error;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const FETCH_RETRY_MESSAGE: &str =
    "Could not load this resource request. Check your connection and try again.";

/// Field name -> messages, exactly as the backend reported them.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Login or registration was rejected. Shown inline; never fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{}", render_fields(.fields))]
    Rejected { fields: FieldErrors },

    #[error("{message}")]
    Failed { message: String },
}

impl AuthError {
    pub fn failed(message: impl Into<String>) -> Self {
        AuthError::Failed {
            message: message.into(),
        }
    }

    /// Maps a rejection body to field errors, or to `fallback` when the body has no usable
    /// structure (empty, not JSON, not an object, or an object with no string/list values).
    pub fn from_payload(body: &str, fallback: &str) -> Self {
        match field_errors_from_body(body) {
            Some(fields) => AuthError::Rejected { fields },
            None => AuthError::failed(fallback),
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AuthError::Rejected { fields } => Some(fields),
            AuthError::Failed { .. } => None,
        }
    }
}

fn render_fields(fields: &FieldErrors) -> String {
    fields
        .iter()
        .map(|(field, msgs)| format!("{}: {}", field, msgs.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}

pub(crate) fn field_errors_from_body(body: &str) -> Option<FieldErrors> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let obj = value.as_object()?;

    let mut out = FieldErrors::new();
    for (field, v) in obj {
        let msgs: Vec<String> = match v {
            serde_json::Value::String(s) => vec![s.clone()],
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|x| match x {
                    serde_json::Value::String(s) => Some(s.clone()),
                    serde_json::Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect(),
            _ => continue,
        };
        if !msgs.is_empty() {
            out.insert(field.clone(), msgs);
        }
    }

    if out.is_empty() { None } else { Some(out) }
}

/// Outcome of an API call that did not produce a usable response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The access token was rejected and the one permitted replay was also rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The refresh token is missing or was rejected. The session has been cleared and a login
    /// navigation issued.
    #[error("session expired ({reason}); log in again")]
    SessionInvalid { status: StatusCode, reason: String },

    #[error("{label}: server returned {status}")]
    Status {
        label: String,
        status: StatusCode,
        body: String,
    },

    #[error("{label}: request failed")]
    Transport {
        label: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{label}: malformed response")]
    Decode {
        label: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("session storage")]
    Storage(#[source] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::SessionInvalid { status, .. } | ApiError::Status { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_session_invalid(&self) -> bool {
        matches!(self, ApiError::SessionInvalid { .. })
    }
}

/// Why a resource request could not be classified.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{}", FETCH_RETRY_MESSAGE)]
    Fetch(#[source] ApiError),

    #[error("session expired; log in again")]
    SessionInvalid(#[source] ApiError),
}

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
