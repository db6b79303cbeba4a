use std::sync::PoisonError;

use reqwest::blocking::{Client, RequestBuilder, Response};

use super::*;

impl ApiClient {
    /// Sends a request built by `build`, attaching the current bearer token.
    ///
    /// A 401 triggers one refresh and one replay; the replay's response is returned whatever its
    /// status. When no refresh is possible the session is torn down, a hard navigation to the
    /// login route is issued, and [`ApiError::SessionInvalid`] is returned. Other statuses and
    /// transport failures are handed back untouched.
    pub fn send_authorized(
        &self,
        label: &str,
        build: impl Fn(&Client) -> RequestBuilder,
    ) -> Result<Response, ApiError> {
        let sent_with = self.session.access_token();
        let resp = self.dispatch(label, &build, sent_with.as_deref())?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return Ok(resp);
        }

        debug!(label, "access token rejected; refreshing");
        let access = match self.refresh_after_rejection(sent_with.as_deref()) {
            Ok(access) => access,
            Err(reason) => {
                warn!(label, %reason, "token refresh failed; ending session");
                if let Err(err) = self.session.teardown() {
                    debug!(label, error = %err, "tokens stay on disk after forced logout");
                }
                self.navigator.navigate(Route::Login, NavMode::Hard);
                return Err(ApiError::SessionInvalid {
                    status: resp.status(),
                    reason,
                });
            }
        };

        self.dispatch(label, &build, Some(&access))
    }

    fn dispatch(
        &self,
        label: &str,
        build: &impl Fn(&Client) -> RequestBuilder,
        access: Option<&str>,
    ) -> Result<Response, ApiError> {
        let mut req = build(&self.client);
        if let Some(access) = access {
            req = req.header(reqwest::header::AUTHORIZATION, bearer(access));
        }
        req.send().map_err(|source| ApiError::Transport {
            label: label.to_string(),
            source,
        })
    }

    /// Returns an access token to replay with, refreshing only if nobody else already replaced
    /// the token that was rejected.
    fn refresh_after_rejection(&self, rejected: Option<&str>) -> Result<String, String> {
        let _guard = self
            .refresh_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(current) = self.session.access_token()
            && rejected != Some(current.as_str())
        {
            debug!("access token already refreshed by a concurrent request");
            return Ok(current);
        }

        let Some(refresh) = self.session.refresh_token() else {
            return Err("no refresh token".to_string());
        };
        let refreshed = self.refresh_access(&refresh).map_err(|e| e.to_string())?;
        self.session
            .store_access(&refreshed.access, refreshed.refresh.as_deref())
            .map_err(|e| format!("{:#}", anyhow::Error::new(e)))?;
        info!(rotated = refreshed.refresh.is_some(), "access token refreshed");
        Ok(refreshed.access)
    }

    pub(super) fn ensure_ok(&self, resp: Response, label: &str) -> Result<Response, ApiError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ApiError::Status {
                label: label.to_string(),
                status,
                body,
            });
        }
        Ok(resp)
    }

    pub(super) fn decode<T: serde::de::DeserializeOwned>(
        &self,
        resp: Response,
        label: &str,
    ) -> Result<T, ApiError> {
        resp.json().map_err(|source| ApiError::Decode {
            label: label.to_string(),
            source,
        })
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
