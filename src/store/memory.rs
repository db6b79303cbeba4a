use std::sync::Mutex;

use anyhow::{Result, anyhow};

use crate::model::TokenState;

use super::{TokenStore, now_rfc3339};

/// Process-lifetime token storage for embedders that persist nothing.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    state: Mutex<TokenState>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TokenState::empty()),
        }
    }

    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        Self {
            state: Mutex::new(TokenState {
                version: 1,
                access_token: Some(access.to_string()),
                refresh_token: Some(refresh.to_string()),
                saved_at: now_rfc3339(),
            }),
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut TokenState) -> T) -> Result<T> {
        let mut st = self
            .state
            .lock()
            .map_err(|_| anyhow!("token store lock poisoned"))?;
        Ok(f(&mut st))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<TokenState> {
        self.with_state(|st| st.clone())
    }

    fn save(&self, access: &str, refresh: &str) -> Result<()> {
        self.with_state(|st| {
            st.access_token = Some(access.to_string());
            st.refresh_token = Some(refresh.to_string());
            st.saved_at = now_rfc3339();
        })
    }

    fn save_access(&self, access: &str) -> Result<()> {
        self.with_state(|st| {
            st.access_token = Some(access.to_string());
            st.saved_at = now_rfc3339();
        })
    }

    fn clear(&self) -> Result<()> {
        self.with_state(|st| *st = TokenState::empty())
    }
}
