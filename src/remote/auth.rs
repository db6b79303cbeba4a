//! Authentication endpoints. Login, registration and refresh are sent without the interceptor:
//! a 401 from them means bad credentials, not an expired access token.

use crate::errors::{LOGIN_FAILED, REGISTRATION_FAILED};

use super::*;

impl ApiClient {
    pub fn login(&self, credentials: &Credentials) -> Result<TokenPair, AuthError> {
        let resp = self
            .client
            .post(self.url("/api/auth/login/"))
            .json(credentials)
            .send()
            .map_err(|err| {
                warn!(error = %err, "login request failed");
                AuthError::failed(LOGIN_FAILED)
            })?;
        reject_unless_success(resp, LOGIN_FAILED)?
            .json::<TokenPair>()
            .map_err(|err| {
                warn!(error = %err, "malformed login response");
                AuthError::failed(LOGIN_FAILED)
            })
    }

    /// Creates an account; the returned value is the backend's opaque account record.
    pub fn register(&self, data: &RegistrationData) -> Result<serde_json::Value, AuthError> {
        let resp = self
            .client
            .post(self.url("/api/auth/register/"))
            .json(data)
            .send()
            .map_err(|err| {
                warn!(error = %err, "register request failed");
                AuthError::failed(REGISTRATION_FAILED)
            })?;
        let resp = reject_unless_success(resp, REGISTRATION_FAILED)?;
        // Some backends answer 201 with an empty body.
        let text = resp.text().unwrap_or_default();
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }

    pub fn refresh_access(&self, refresh: &str) -> Result<RefreshedAccess, ApiError> {
        let label = "refresh token";
        let resp = self
            .client
            .post(self.url("/api/auth/token/refresh/"))
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .map_err(|source| ApiError::Transport {
                label: label.to_string(),
                source,
            })?;
        let resp = self.ensure_ok(resp, label)?;
        self.decode(resp, label)
    }

    pub fn me(&self) -> Result<User, ApiError> {
        let label = "current user";
        let resp = self.send_authorized(label, |c| c.get(self.url("/api/auth/users/me/")))?;
        let resp = self.ensure_ok(resp, label)?;
        self.decode(resp, label)
    }
}

fn reject_unless_success(
    resp: reqwest::blocking::Response,
    fallback: &str,
) -> Result<reqwest::blocking::Response, AuthError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().unwrap_or_default();
    debug!(%status, "auth request rejected");
    Err(AuthError::from_payload(&body, fallback))
}
