//! File credential store persistence across store instances.

mod common;

use std::sync::Arc;

use common::{RecordingSpeech, StubCompletionClient};
use parley::auth::{CredentialStore, FileCredentialStore, API_KEY_NAME};
use parley::session::ChatSession;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const ENDPOINT: &str = "https://api.openai.com/v1";

#[tokio::test]
async fn key_submitted_in_one_run_is_offered_in_the_next() {
    let dir = TempDir::new().unwrap();

    {
        let store = Arc::new(FileCredentialStore::for_endpoint(dir.path().to_path_buf(), ENDPOINT).unwrap());
        let session = ChatSession::new(
            Arc::new(StubCompletionClient::new()),
            Arc::new(RecordingSpeech::new()),
            store,
        );
        session.submit("sk-first-run", "").await.unwrap();
    }

    let store = Arc::new(FileCredentialStore::for_endpoint(dir.path().to_path_buf(), ENDPOINT).unwrap());
    let session = ChatSession::new(
        Arc::new(StubCompletionClient::new()),
        Arc::new(RecordingSpeech::new()),
        store,
    );
    assert_eq!(session.stored_credential().unwrap(), "sk-first-run");
}

#[test]
fn endpoints_on_the_same_origin_share_credentials() {
    let dir = TempDir::new().unwrap();
    let v1 = FileCredentialStore::for_endpoint(dir.path().to_path_buf(), ENDPOINT).unwrap();
    let other_path =
        FileCredentialStore::for_endpoint(dir.path().to_path_buf(), "https://api.openai.com/beta/")
            .unwrap();
    let other_host =
        FileCredentialStore::for_endpoint(dir.path().to_path_buf(), "https://proxy.example.com/v1")
            .unwrap();

    v1.set(API_KEY_NAME, Some("sk-shared")).unwrap();

    assert_eq!(other_path.get(API_KEY_NAME).unwrap(), "sk-shared");
    assert_eq!(other_host.get(API_KEY_NAME).unwrap(), "");
}

#[test]
fn clearing_one_site_keeps_the_others() {
    let dir = TempDir::new().unwrap();
    let a = FileCredentialStore::for_endpoint(dir.path().to_path_buf(), ENDPOINT).unwrap();
    let b = FileCredentialStore::for_endpoint(dir.path().to_path_buf(), "http://localhost:8080/v1")
        .unwrap();

    a.set(API_KEY_NAME, Some("sk-a")).unwrap();
    b.set(API_KEY_NAME, Some("sk-b")).unwrap();
    a.clear(API_KEY_NAME).unwrap();

    assert_eq!(a.get(API_KEY_NAME).unwrap(), "");
    assert_eq!(b.get(API_KEY_NAME).unwrap(), "sk-b");
}
