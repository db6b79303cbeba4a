use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::{ApiError, AuthError, LOGIN_FAILED};
use crate::model::{ApiConfig, Credentials, RegistrationData, User};
use crate::nav::{NavMode, Navigator, Route};
use crate::remote::ApiClient;
use crate::store::TokenStore;

use super::Session;

/// Outcome of a successful account creation.
#[derive(Debug, Serialize)]
pub struct Registration {
    /// The backend's account record, passed through as returned.
    pub account: serde_json::Value,
    pub user: Option<User>,
    /// The account exists but the automatic login did not go through; send the user to the
    /// manual login screen.
    pub auto_login_failed: bool,
    #[serde(skip)]
    pub login_error: Option<AuthError>,
}

pub struct SessionManager {
    session: Arc<Session>,
    client: Arc<ApiClient>,
    navigator: Arc<dyn Navigator>,
}

impl SessionManager {
    pub fn new(
        config: ApiConfig,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let session = Arc::new(Session::new(store));
        let client = Arc::new(ApiClient::new(config, session.clone(), navigator.clone())?);
        Ok(Self {
            session,
            client,
            navigator,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Hydrates persisted tokens and, when an access token exists, loads the current user.
    ///
    /// An invalid session has already been cleared by the time this returns `Ok(None)`.
    pub fn init(&self) -> Result<Option<User>, ApiError> {
        if !self.session.init()? {
            return Ok(None);
        }
        match self.refresh_user() {
            Ok(user) => Ok(Some(user)),
            Err(err) if err.is_session_invalid() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.sign_in(&Credentials {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        self.navigator.navigate(Route::Dashboard, NavMode::Push);
        Ok(user)
    }

    /// Exchanges credentials for tokens and caches the user; navigation is left to the caller.
    fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let pair = self.client.login(credentials)?;
        self.session.store_tokens(&pair).map_err(|err| {
            warn!(error = %err, "could not persist tokens");
            AuthError::failed(LOGIN_FAILED)
        })?;

        match self.client.me() {
            Ok(user) if self.session.set_user(user.clone()) => {
                info!(user = %user.display_name(), "logged in");
                Ok(user)
            }
            Ok(_) => Err(AuthError::failed(LOGIN_FAILED)),
            Err(err) => {
                warn!(error = %err, "login succeeded but current user could not be loaded");
                if let Err(err) = self.session.teardown() {
                    debug!(error = %err, "tokens stay on disk after failed login");
                }
                Err(AuthError::failed(LOGIN_FAILED))
            }
        }
    }

    pub fn register(&self, data: &RegistrationData) -> Result<Registration, AuthError> {
        let account = self.client.register(data)?;
        info!(email = %data.email, "account created");

        match self.sign_in(&data.credentials()) {
            Ok(user) => {
                self.navigator.navigate(Route::Dashboard, NavMode::Push);
                Ok(Registration {
                    account,
                    user: Some(user),
                    auto_login_failed: false,
                    login_error: None,
                })
            }
            Err(err) => {
                warn!(error = %err, "automatic login after registration failed");
                self.navigator.navigate(Route::Login, NavMode::Push);
                Ok(Registration {
                    account,
                    user: None,
                    auto_login_failed: true,
                    login_error: Some(err),
                })
            }
        }
    }

    /// Local only; the backend is not told.
    pub fn logout(&self) -> Result<(), ApiError> {
        let cleared = self.session.teardown();
        info!("logged out");
        self.navigator.navigate(Route::Landing, NavMode::Push);
        cleared
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn refresh_user(&self) -> Result<User, ApiError> {
        let user = self.client.me()?;
        if !self.session.set_user(user.clone()) {
            return Err(ApiError::SessionInvalid {
                status: reqwest::StatusCode::UNAUTHORIZED,
                reason: "session ended while loading the current user".to_string(),
            });
        }
        Ok(user)
    }
}
