use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::Router;
use geopick_core::{
    classify_geo, Coordinate, DirectoryClient, DirectoryError, HttpDirectoryClient, Quadrant,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

const USERS_BODY: &str = r#"[
  {
    "id": 1,
    "name": "Leanne Graham",
    "username": "Bret",
    "email": "Sincere@april.biz",
    "address": {
      "street": "Kulas Light",
      "city": "Gwenborough",
      "geo": { "lat": "-37.3159", "lng": "81.1496" }
    },
    "company": { "name": "Romaguera-Crona" }
  },
  {
    "id": 2,
    "name": "Ervin Howell",
    "address": { "geo": { "lat": -43.9509, "lng": -34.4618 } }
  }
]"#;

const USER_ONE_BODY: &str = r#"{
  "id": 1,
  "name": "Leanne Graham",
  "address": { "geo": { "lat": "-37.3159", "lng": "81.1496" } }
}"#;

#[derive(Clone, Copy)]
enum ServerMode {
    /// Serves the fixture listing and user 1; other ids are 404.
    Directory,
    /// Answers every route with a 200 and a body that is not a record.
    Malformed,
}

#[derive(Clone)]
struct ServerState {
    mode: ServerMode,
    paths: Arc<Mutex<Vec<String>>>,
}

impl ServerState {
    fn record(&self, uri: &Uri) {
        self.paths.lock().expect("paths lock").push(uri.path().to_string());
    }
}

async fn list_users(State(state): State<ServerState>, uri: Uri) -> (StatusCode, String) {
    state.record(&uri);
    match state.mode {
        ServerMode::Directory => (StatusCode::OK, USERS_BODY.to_string()),
        ServerMode::Malformed => (StatusCode::OK, r#"{"users": []}"#.to_string()),
    }
}

async fn get_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    uri: Uri,
) -> (StatusCode, String) {
    state.record(&uri);
    match (state.mode, id) {
        (ServerMode::Directory, 1) => (StatusCode::OK, USER_ONE_BODY.to_string()),
        (ServerMode::Directory, _) => (StatusCode::NOT_FOUND, "{}".to_string()),
        (ServerMode::Malformed, _) => (StatusCode::OK, r#"{"id": "one"}"#.to_string()),
    }
}

/// Axum directory running on its own runtime so the blocking client can be
/// driven from the test thread.
struct TestServer {
    base_url: String,
    paths: Arc<Mutex<Vec<String>>>,
    _runtime: tokio::runtime::Runtime,
}

impl TestServer {
    fn paths(&self) -> Vec<String> {
        self.paths.lock().expect("paths lock").clone()
    }
}

fn start_test_server(mode: ServerMode) -> TestServer {
    let paths = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .with_state(ServerState {
            mode,
            paths: Arc::clone(&paths),
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("build runtime");
    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .expect("bind listener");
    let addr: SocketAddr = listener.local_addr().expect("listener addr");

    runtime.spawn(async move {
        axum::serve(listener, app).await.expect("serve test server");
    });

    TestServer {
        base_url: format!("http://{addr}"),
        paths,
        _runtime: runtime,
    }
}

#[test]
fn list_all_decodes_records_and_keeps_opaque_fields() {
    let server = start_test_server(ServerMode::Directory);
    let client = HttpDirectoryClient::new(server.base_url.clone());

    let records = client.list_all().expect("listing should decode");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, 1);
    assert_eq!(records[0].name, "Leanne Graham");
    assert_eq!(records[0].extra["username"], "Bret");
    assert_eq!(records[0].address.extra["city"], "Gwenborough");
    assert_eq!(records[1].geo().lat, Coordinate::Number(-43.9509));
    assert_eq!(classify_geo(records[1].geo()), Some(Quadrant::SouthEast));

    assert_eq!(server.paths(), vec!["/users".to_string()]);
}

#[test]
fn fetch_one_requests_record_path() {
    let server = start_test_server(ServerMode::Directory);
    let client = HttpDirectoryClient::new(format!("{}/", server.base_url));

    let record = client.fetch_one(1).expect("record should decode");
    assert_eq!(record.display_label(), "Leanne Graham (id: 1)");
    assert_eq!(classify_geo(record.geo()), Some(Quadrant::SouthWest));

    assert_eq!(server.paths(), vec!["/users/1".to_string()]);
}

#[test]
fn non_success_status_is_reported_as_status_error() {
    let server = start_test_server(ServerMode::Directory);
    let client = HttpDirectoryClient::new(server.base_url.clone());

    let err = client.fetch_one(999).expect_err("404 should fail");
    match err {
        DirectoryError::Status { status, url } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/users/999"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_body_is_reported_as_decode_error() {
    let server = start_test_server(ServerMode::Malformed);
    let client = HttpDirectoryClient::new(server.base_url.clone());

    let err = client.fetch_one(1).expect_err("bad record should fail");
    assert_eq!(err.code(), "directory_decode");
    let err = client.list_all().expect_err("bad listing should fail");
    assert!(matches!(err, DirectoryError::Decode(_)));
}

#[test]
fn unreachable_directory_is_reported_as_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpDirectoryClient::new(format!("http://{addr}"));
    let err = client.list_all().expect_err("closed port should fail");
    assert!(matches!(err, DirectoryError::Transport(_)));
}
