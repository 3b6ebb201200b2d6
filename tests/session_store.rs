use chrono::{Duration, Utc};
use startwise::models::{ChatSession, Message};
use startwise::session::{FilesystemSessionStore, SessionStore};
use std::fs;
use tempfile::TempDir;

fn create_test_session(age_minutes: i64) -> ChatSession {
    let mut session = ChatSession::new("gemini-2.0-flash");
    session.push(Message::user("test", vec![]));
    let then = (Utc::now() - Duration::minutes(age_minutes)).timestamp_millis();
    session.created_at = then;
    session.updated_at = then;
    session
}

fn store() -> (TempDir, FilesystemSessionStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = FilesystemSessionStore::with_dir(temp_dir.path().join(".cache").join("startwise"));
    (temp_dir, store)
}

#[test]
fn test_save_and_find_recent_session() {
    let (_temp_dir, store) = store();
    let session = create_test_session(0);

    store.save_session(&session).unwrap();

    let found = store.find_recent_session().unwrap();
    assert_eq!(found, session);
    assert!(store
        .dir()
        .join(format!("session-{}.json", session.id))
        .exists());
}

#[test]
fn test_find_recent_session_expired() {
    let (_temp_dir, store) = store();
    let session = create_test_session(60);

    store.save_session(&session).unwrap();

    assert!(store.find_recent_session().is_none());
    assert_eq!(store.load_sessions().unwrap(), vec![session]);
}

#[test]
fn test_listing_keeps_expired_history() {
    let (_temp_dir, store) = store();
    let session = create_test_session(45);
    store.save_session(&session).unwrap();

    // same sequence as `startwise sessions`
    let listed = store.load_sessions().unwrap();
    let recent = store.find_recent_session();
    assert_eq!(listed.len(), 1);
    assert!(recent.is_none());

    let after = store.load_sessions().unwrap();
    assert_eq!(after, vec![session.clone()]);
    assert!(store
        .dir()
        .join(format!("session-{}.json", session.id))
        .exists());
}

#[test]
fn test_clear_all_sessions() {
    let (_temp_dir, store) = store();
    store.save_session(&create_test_session(0)).unwrap();
    store.save_session(&create_test_session(0)).unwrap();
    fs::write(store.dir().join("session-broken.json"), "not json").unwrap();
    fs::write(store.dir().join("ledger.json"), "[]").unwrap();

    store.clear_all_sessions().unwrap();

    assert!(store.find_recent_session().is_none());
    assert!(!store.dir().join("session-broken.json").exists());
    assert!(store.dir().join("ledger.json").exists());
}

#[test]
fn test_clear_without_directory() {
    let (_temp_dir, store) = store();
    store.clear_all_sessions().unwrap();
    assert!(store.load_sessions().unwrap().is_empty());
}

#[test]
fn test_find_most_recent_session() {
    let (_temp_dir, store) = store();
    let old_session = create_test_session(10);
    let new_session = create_test_session(1);

    store.save_session(&new_session).unwrap();
    store.save_session(&old_session).unwrap();

    let found = store.find_recent_session().unwrap();
    assert_eq!(found.id, new_session.id);
}

#[test]
fn test_load_sessions_oldest_first() {
    let (_temp_dir, store) = store();
    let first = create_test_session(20);
    let second = create_test_session(5);
    let mut renamed = create_test_session(10);
    renamed.name = "Calculus revision".to_string();

    for session in [&second, &renamed, &first] {
        store.save_session(session).unwrap();
    }

    let loaded = store.load_sessions().unwrap();
    let ids: Vec<&str> = loaded.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), renamed.id.as_str(), second.id.as_str()]);
    assert_eq!(loaded[1].name, "Calculus revision");
}

#[test]
fn test_session_file_uses_camel_case() {
    let (_temp_dir, store) = store();
    let session = create_test_session(0);
    store.save_session(&session).unwrap();

    let raw = fs::read_to_string(store.dir().join(format!("session-{}.json", session.id))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["selectedModel"], "gemini-2.0-flash");
    assert_eq!(value["messages"][0]["isUser"], true);
    assert!(value["messages"][0].get("attachments").is_none());
}
