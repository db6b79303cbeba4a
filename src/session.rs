//! Session state and the operations that move it between signed-out and signed-in.
//!
//! [`Session`] is the context-scoped holder of the token pair and the cached user. It is created
//! empty, hydrated from a [`TokenStore`] by [`Session::init`], and emptied by
//! [`Session::teardown`]. The network-facing operations live on [`SessionManager`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::errors::ApiError;
use crate::model::{TokenPair, User};
use crate::store::TokenStore;

mod manager;

pub use self::manager::{Registration, SessionManager};

#[derive(Clone, Debug, Default)]
struct SessionState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    current_user: Option<User>,
}

pub struct Session {
    state: Mutex<SessionState>,
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
            store,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // State is replaced wholesale under the lock, so a poisoned guard still holds a
        // consistent value.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads persisted tokens into memory. Returns whether an access token was found.
    pub fn init(&self) -> Result<bool, ApiError> {
        let persisted = self.store.load().map_err(ApiError::Storage)?;
        let mut st = self.lock();
        st.access_token = persisted.access_token;
        st.refresh_token = persisted.refresh_token;
        st.current_user = None;
        debug!(
            has_access = st.access_token.is_some(),
            has_refresh = st.refresh_token.is_some(),
            "session hydrated"
        );
        Ok(st.access_token.is_some())
    }

    /// Clears tokens and user from memory and storage in one step.
    ///
    /// Memory is cleared even when the durable clear fails; the storage error is returned.
    pub fn teardown(&self) -> Result<(), ApiError> {
        let mut st = self.lock();
        *st = SessionState::default();
        let cleared = self.store.clear().map_err(ApiError::Storage);
        drop(st);
        if let Err(err) = &cleared {
            warn!(error = %err, "failed to clear persisted tokens");
        }
        cleared
    }

    pub fn access_token(&self) -> Option<String> {
        self.lock().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.lock().refresh_token.clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.lock().current_user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        let st = self.lock();
        st.access_token.is_some() && st.current_user.is_some()
    }

    /// Stores a freshly issued pair. The cached user is dropped until it is fetched with the new
    /// access token.
    pub(crate) fn store_tokens(&self, pair: &TokenPair) -> Result<(), ApiError> {
        let mut st = self.lock();
        self.store
            .save(&pair.access, &pair.refresh)
            .map_err(ApiError::Storage)?;
        st.access_token = Some(pair.access.clone());
        st.refresh_token = Some(pair.refresh.clone());
        st.current_user = None;
        Ok(())
    }

    /// Stores a refreshed access token, plus the refresh token when the backend rotated it.
    pub(crate) fn store_access(
        &self,
        access: &str,
        rotated_refresh: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut st = self.lock();
        match rotated_refresh {
            Some(refresh) => self.store.save(access, refresh),
            None => self.store.save_access(access),
        }
        .map_err(ApiError::Storage)?;
        st.access_token = Some(access.to_string());
        if let Some(refresh) = rotated_refresh {
            st.refresh_token = Some(refresh.to_string());
        }
        Ok(())
    }

    /// Caches `user` unless the session was torn down while it was being fetched.
    pub(crate) fn set_user(&self, user: User) -> bool {
        let mut st = self.lock();
        if st.access_token.is_none() {
            return false;
        }
        st.current_user = Some(user);
        true
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
