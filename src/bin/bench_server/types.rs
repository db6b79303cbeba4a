use super::*;

#[derive(Clone, Debug)]
pub(super) struct Subject {
    pub(super) user_id: u64,
}

#[derive(Clone, Debug)]
pub(super) struct User {
    pub(super) id: u64,
    pub(super) email: String,
    pub(super) password_hash: String,
    pub(super) active: bool,
    pub(super) created_at: String,

    /// Everything else the profile endpoint reports (names, company membership fields, ...).
    pub(super) profile: serde_json::Map<String, serde_json::Value>,
}

impl User {
    pub(super) fn to_json(&self) -> serde_json::Value {
        let mut out = self.profile.clone();
        out.insert("id".to_string(), serde_json::json!(self.id));
        out.insert("email".to_string(), serde_json::json!(self.email));
        out.insert("is_active".to_string(), serde_json::json!(self.active));
        out.insert("date_joined".to_string(), serde_json::json!(self.created_at));
        serde_json::Value::Object(out)
    }
}

#[derive(Clone, Debug)]
pub(super) struct RefreshGrant {
    pub(super) user_id: u64,
    pub(super) revoked: bool,
}

#[derive(Default)]
pub(super) struct Db {
    pub(super) users: HashMap<u64, User>,
    pub(super) next_user_id: u64,

    // Keyed by token hash.
    pub(super) access_tokens: HashMap<String, u64>,
    pub(super) refresh_tokens: HashMap<String, RefreshGrant>,

    pub(super) requests: BTreeMap<u64, serde_json::Value>,
    pub(super) next_request_id: u64,

    /// When set, every access token is rejected (refresh still works).
    pub(super) reject_all_access: bool,

    /// Request count per path.
    pub(super) hits: BTreeMap<String, u64>,
}

impl Db {
    pub(super) fn user_by_email(&self, email: &str) -> Option<&User> {
        let email = email.trim().to_ascii_lowercase();
        self.users.values().find(|u| u.email == email)
    }

    pub(super) fn insert_user(
        &mut self,
        email: &str,
        password: &str,
        active: bool,
        profile: serde_json::Map<String, serde_json::Value>,
    ) -> User {
        self.next_user_id += 1;
        let user = User {
            id: self.next_user_id,
            email: email.trim().to_ascii_lowercase(),
            password_hash: hash_secret(password),
            active,
            created_at: now_ts(),
            profile,
        };
        self.users.insert(user.id, user.clone());
        user
    }
}

pub(super) struct AppState {
    pub(super) require_activation: bool,
    pub(super) db: RwLock<Db>,
}

impl AppState {
    pub(super) fn new(require_activation: bool) -> Self {
        Self {
            require_activation,
            db: RwLock::new(Db::default()),
        }
    }
}

pub(super) fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}
