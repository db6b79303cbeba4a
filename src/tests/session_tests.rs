use anyhow::anyhow;

use crate::model::TokenState;
use crate::store::MemoryTokenStore;

use super::*;

fn user() -> User {
    serde_json::from_value(serde_json::json!({"id": 1, "company_id": 3})).expect("parse user")
}

fn pair(access: &str, refresh: &str) -> TokenPair {
    TokenPair {
        access: access.to_string(),
        refresh: refresh.to_string(),
    }
}

#[test]
fn starts_empty_and_hydrates_from_storage() {
    let store = Arc::new(MemoryTokenStore::with_tokens("a", "r"));
    let session = Session::new(store);
    assert_eq!(session.access_token(), None);

    assert!(session.init().expect("init"));
    assert_eq!(session.access_token().as_deref(), Some("a"));
    assert_eq!(session.refresh_token().as_deref(), Some("r"));
    assert_eq!(session.current_user(), None);
    assert!(!session.is_authenticated());
}

#[test]
fn init_without_persisted_tokens_reports_nothing_to_load() {
    let session = Session::new(Arc::new(MemoryTokenStore::new()));
    assert!(!session.init().expect("init"));
}

#[test]
fn storing_a_new_pair_drops_the_cached_user() {
    let store = Arc::new(MemoryTokenStore::new());
    let session = Session::new(store.clone());
    session.store_tokens(&pair("a1", "r1")).expect("store");
    assert!(session.set_user(user()));
    assert!(session.is_authenticated());

    session.store_tokens(&pair("a2", "r2")).expect("store");
    assert_eq!(session.current_user(), None);
    assert_eq!(store.load().expect("load").access_token.as_deref(), Some("a2"));
}

#[test]
fn refreshed_access_keeps_user_and_optional_rotation() {
    let store = Arc::new(MemoryTokenStore::new());
    let session = Session::new(store.clone());
    session.store_tokens(&pair("a1", "r1")).expect("store");
    session.set_user(user());

    session.store_access("a2", None).expect("store access");
    assert_eq!(session.refresh_token().as_deref(), Some("r1"));
    assert!(session.current_user().is_some());

    session.store_access("a3", Some("r2")).expect("store access");
    let persisted = store.load().expect("load");
    assert_eq!(persisted.access_token.as_deref(), Some("a3"));
    assert_eq!(persisted.refresh_token.as_deref(), Some("r2"));
}

#[test]
fn teardown_clears_memory_and_storage() {
    let store = Arc::new(MemoryTokenStore::new());
    let session = Session::new(store.clone());
    session.store_tokens(&pair("a", "r")).expect("store");
    session.set_user(user());

    session.teardown().expect("teardown");
    assert_eq!(session.access_token(), None);
    assert_eq!(session.refresh_token(), None);
    assert_eq!(session.current_user(), None);
    assert!(store.load().expect("load").is_empty());

    // A user fetched before the teardown finished is not cached afterwards.
    assert!(!session.set_user(user()));
    assert_eq!(session.current_user(), None);
}

struct BrokenStore;

impl TokenStore for BrokenStore {
    fn load(&self) -> anyhow::Result<TokenState> {
        Ok(TokenState::empty())
    }
    fn save(&self, _: &str, _: &str) -> anyhow::Result<()> {
        Err(anyhow!("disk full"))
    }
    fn save_access(&self, _: &str) -> anyhow::Result<()> {
        Err(anyhow!("disk full"))
    }
    fn clear(&self) -> anyhow::Result<()> {
        Err(anyhow!("read-only"))
    }
}

#[test]
fn storage_failures_surface_without_half_updates() {
    let session = Session::new(Arc::new(BrokenStore));
    let err = session
        .store_tokens(&pair("a", "r"))
        .expect_err("save should fail");
    assert!(matches!(err, ApiError::Storage(_)));
    assert_eq!(session.access_token(), None);

    let err = session.teardown().expect_err("clear should fail");
    assert!(matches!(err, ApiError::Storage(_)));
    assert_eq!(session.current_user(), None);
}
