use anyhow::Result;

use crate::model::TokenState;

use super::{LocalStore, TokenStore, now_rfc3339};

impl TokenStore for LocalStore {
    fn load(&self) -> Result<TokenState> {
        self.read_state()
    }

    fn save(&self, access: &str, refresh: &str) -> Result<()> {
        self.write_state(&TokenState {
            version: 1,
            access_token: Some(access.to_string()),
            refresh_token: Some(refresh.to_string()),
            saved_at: now_rfc3339(),
        })
    }

    fn save_access(&self, access: &str) -> Result<()> {
        let mut st = self.read_state()?;
        st.access_token = Some(access.to_string());
        st.saved_at = now_rfc3339();
        self.write_state(&st)
    }

    fn clear(&self) -> Result<()> {
        self.write_state(&TokenState::empty())
    }
}
