mod common;

use chrono::Local;
use common::{Call, FakeApi, MemoryStore};
use fetchdogs::api::DogApi;
use fetchdogs::models::SessionRecord;
use fetchdogs::session::{AuthSession, FilesystemSessionStore, SessionStore, SESSION_FILE};
use std::fs;
use tempfile::TempDir;

fn record(cookie: Option<&str>) -> SessionRecord {
    SessionRecord {
        authenticated: true,
        cookie: cookie.map(|c| c.to_string()),
        last_updated: Local::now(),
    }
}

#[test]
fn test_save_and_load_session() {
    let temp_dir = TempDir::new().unwrap();
    let store = FilesystemSessionStore::with_dir(temp_dir.path().join("fetchdogs"));

    assert!(store.load().is_none());

    store.save(&record(Some("fetch-access-token=xyz"))).unwrap();
    assert!(store.dir().join(SESSION_FILE).exists());

    let loaded = store.load().unwrap();
    assert!(loaded.authenticated);
    assert_eq!(loaded.cookie.as_deref(), Some("fetch-access-token=xyz"));
}

#[test]
fn test_clear_session() {
    let temp_dir = TempDir::new().unwrap();
    let store = FilesystemSessionStore::with_dir(temp_dir.path());

    store.save(&record(None)).unwrap();
    store.clear().unwrap();
    assert!(store.load().is_none());

    // Clearing twice is fine
    store.clear().unwrap();
}

#[test]
fn test_corrupt_session_file_reads_as_none() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(SESSION_FILE), "{not json").unwrap();

    let store = FilesystemSessionStore::with_dir(temp_dir.path());
    assert!(store.load().is_none());
}

#[test]
fn test_open_restores_saved_cookie() {
    let api = FakeApi::new();
    let session = AuthSession::open(Box::new(MemoryStore::signed_in()), &api, false);

    assert!(session.is_authenticated());
    assert_eq!(api.cookie().as_deref(), Some("fetch-access-token=saved"));
}

#[test]
fn test_open_without_record_is_signed_out() {
    let api = FakeApi::new();
    let session = AuthSession::open(Box::new(MemoryStore::default()), &api, false);

    assert!(!session.is_authenticated());
    assert!(api.cookie().is_none());
}

#[tokio::test]
async fn test_check_session_success_persists_flag() {
    let api = FakeApi::new();
    let store = MemoryStore::default();
    let mut session = AuthSession::open(Box::new(store.clone()), &api, false);

    assert!(session.check_session(&api).await);
    assert!(session.is_authenticated());
    assert_eq!(api.count(|c| *c == Call::Breeds), 1);
    assert!(store.current().unwrap().authenticated);
}

#[tokio::test]
async fn test_check_session_failure_clears_flag() {
    let api = FakeApi::new().failing("breeds");
    let store = MemoryStore::signed_in();
    let mut session = AuthSession::open(Box::new(store.clone()), &api, false);
    assert!(session.is_authenticated());

    assert!(!session.check_session(&api).await);
    assert!(!session.is_authenticated());
    assert!(store.current().is_none());
}

#[tokio::test]
async fn test_logout_clears_even_when_request_fails() {
    let api = FakeApi::new().failing("logout");
    let store = MemoryStore::signed_in();
    let mut session = AuthSession::open(Box::new(store.clone()), &api, false);

    session.logout(&api).await;

    assert!(!session.is_authenticated());
    assert!(store.current().is_none());
    assert_eq!(api.count(|c| *c == Call::Logout), 1);
}

#[tokio::test]
async fn test_session_survives_restart_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let api = FakeApi::new();

    let mut session = AuthSession::open(
        Box::new(FilesystemSessionStore::with_dir(temp_dir.path())),
        &api,
        false,
    );
    api.restore_cookie("fetch-access-token=disk");
    session.login(&api);

    let fresh_api = FakeApi::new();
    let reopened = AuthSession::open(
        Box::new(FilesystemSessionStore::with_dir(temp_dir.path())),
        &fresh_api,
        false,
    );
    assert!(reopened.is_authenticated());
    assert_eq!(fresh_api.cookie().as_deref(), Some("fetch-access-token=disk"));
}

#[cfg(unix)]
#[test]
fn test_session_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let state_dir = temp_dir.path().join("state");
    let store = FilesystemSessionStore::with_dir(&state_dir);

    store.save(&record(Some("fetch-access-token=secret"))).unwrap();

    let file_mode = fs::metadata(state_dir.join(SESSION_FILE))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(file_mode & 0o077, 0, "session file mode {:o}", file_mode & 0o777);

    let dir_mode = fs::metadata(&state_dir).unwrap().permissions().mode();
    assert_eq!(dir_mode & 0o077, 0, "state dir mode {:o}", dir_mode & 0o777);
}

#[cfg(unix)]
#[test]
fn test_existing_session_file_is_tightened() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(SESSION_FILE);
    fs::write(&path, "{}").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let store = FilesystemSessionStore::with_dir(temp_dir.path());
    store.save(&record(Some("fetch-access-token=secret"))).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o077, 0);
    assert!(store.load().unwrap().cookie.is_some());
}
