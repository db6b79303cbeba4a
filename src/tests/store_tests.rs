use tempfile::tempdir;

use super::*;

#[test]
fn open_or_init_creates_defaults() {
    let temp = tempdir().expect("create temp dir");
    let root = temp.path().join(STORE_DIR);

    let store = LocalStore::open_or_init(&root).expect("init store");
    assert!(root.join("config.json").exists());
    assert!(root.join("state.json").exists());

    let cfg = store.read_config().expect("read config");
    assert_eq!(cfg.base_url, None);
    assert_eq!(cfg.timeout_secs, crate::model::DEFAULT_TIMEOUT_SECS);
    assert!(store.read_state().expect("read state").is_empty());
}

#[test]
fn open_requires_existing_dir() {
    let temp = tempdir().expect("create temp dir");
    let err = LocalStore::open(&temp.path().join("missing")).expect_err("should fail");
    assert!(err.to_string().contains(STORE_DIR));
}

#[test]
fn tokens_are_saved_and_cleared_as_a_unit() {
    let temp = tempdir().expect("create temp dir");
    let store = LocalStore::open_or_init(&temp.path().join(STORE_DIR)).expect("init store");

    store.save("a1", "r1").expect("save");
    let st = store.load().expect("load");
    assert_eq!(st.access_token.as_deref(), Some("a1"));
    assert_eq!(st.refresh_token.as_deref(), Some("r1"));
    assert!(st.saved_at.is_some());

    store.save_access("a2").expect("save access");
    let st = store.load().expect("load");
    assert_eq!(st.access_token.as_deref(), Some("a2"));
    assert_eq!(st.refresh_token.as_deref(), Some("r1"));

    store.clear().expect("clear");
    let st = store.load().expect("load");
    assert!(st.is_empty());
    assert_eq!(st.saved_at, None);

    // A second handle on the same directory sees the cleared state.
    let reopened = LocalStore::open(store.root()).expect("reopen");
    assert!(reopened.load().expect("load").is_empty());
}

#[test]
fn unsupported_state_version_is_rejected() {
    let temp = tempdir().expect("create temp dir");
    let store = LocalStore::open_or_init(&temp.path().join(STORE_DIR)).expect("init store");
    std::fs::write(
        store.root().join("state.json"),
        r#"{"version": 2, "access_token": "x"}"#,
    )
    .expect("write state");
    let err = store.load().expect_err("should reject");
    assert!(err.to_string().contains("unsupported state version 2"));
}

#[test]
fn memory_store_behaves_like_the_file_store() {
    let store = MemoryTokenStore::with_tokens("a", "r");
    assert_eq!(store.load().expect("load").access_token.as_deref(), Some("a"));
    store.save_access("b").expect("save access");
    assert_eq!(store.load().expect("load").refresh_token.as_deref(), Some("r"));
    store.clear().expect("clear");
    assert!(store.load().expect("load").is_empty());
}
