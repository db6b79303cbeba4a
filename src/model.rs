mod auth;
mod config;
mod ids;
mod resource_request;
mod user;

pub use self::auth::{Credentials, RefreshedAccess, RegistrationData, TokenPair};
pub use self::config::{ApiConfig, ClientConfig, DEFAULT_TIMEOUT_SECS, TokenState};
pub use self::ids::{CompanyId, RequestId};
pub use self::resource_request::{Listing, ResourceRequest};
pub use self::user::{CompanyRef, User};
