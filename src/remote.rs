use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::errors::{ApiError, AuthError};
use crate::model::{ApiConfig, Credentials, RefreshedAccess, RegistrationData, TokenPair, User};
use crate::nav::{NavMode, Navigator, Route};
use crate::session::Session;

mod auth;
mod http_client;
mod resource_requests;

pub struct ApiClient {
    config: ApiConfig,
    client: reqwest::blocking::Client,
    session: Arc<Session>,
    navigator: Arc<dyn Navigator>,
    // Serializes refreshes so concurrent 401s share one refresh call.
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        session: Arc<Session>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("benchdesk/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ApiError::Transport {
                label: "build http client".to_string(),
                source,
            })?;
        Ok(Self {
            config,
            client,
            session,
            navigator,
            refresh_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }
}
