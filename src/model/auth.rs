use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response of `POST /api/auth/login/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Response of `POST /api/auth/token/refresh/`. Backends that rotate refresh tokens also return a
/// new `refresh`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshedAccess {
    pub access: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration form. `email` and `password` double as the credentials for the automatic login;
/// anything else the backend wants goes into `fields`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RegistrationData {
    pub email: String,
    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl RegistrationData {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}
