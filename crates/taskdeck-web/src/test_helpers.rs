use std::sync::Arc;

use axum::Router;
use taskdeck_client::MemoryClient;
use taskdeck_store::MemoryStore;
use tokio::net::TcpListener;

use crate::pages::{build_router, AppState, InnerAppState};

/// Router state backed by the in-process client and store, both returned so
/// tests can seed records and inspect the operation logs.
pub fn test_state() -> (AppState, Arc<MemoryClient>, Arc<MemoryStore>) {
    let records = Arc::new(MemoryClient::new());
    let files = Arc::new(MemoryStore::new());
    let state = Arc::new(InnerAppState::new(records.clone(), files.clone()));
    (state, records, files)
}

pub fn test_router() -> (Router, Arc<MemoryClient>, Arc<MemoryStore>) {
    let (state, records, files) = test_state();
    (build_router(state), records, files)
}

/// A running test server with its backing doubles.
pub struct TestServer {
    pub base_url: String,
    pub records: Arc<MemoryClient>,
    pub files: Arc<MemoryStore>,
    _handle: tokio::task::JoinHandle<()>,
}

/// Spawn the app on 127.0.0.1:0 for driving the full multipart flows with a
/// real HTTP client.
pub async fn spawn_test_server() -> TestServer {
    let (app, records, files) = test_router();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base_url,
        records,
        files,
        _handle: handle,
    }
}
