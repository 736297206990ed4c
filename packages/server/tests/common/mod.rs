#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde_json::{Value, json};
use sha2::Sha256;
use tokio::net::TcpListener;

use server::clients::wiki::WikiBackend;
use server::config::{
    AppConfig, MediaConfig, ServerConfig, StoreConfig, WebhookConfig, WikiConfig,
};
use server::state::AppState;

pub const WEBHOOK_SECRET: &str = "test-webhook-secret";
pub const SERVICE_KEY: &str = "test-service-key";

/// One row in the in-memory face table.
pub struct StoredFace {
    pub id: i64,
    pub record: Value,
}

/// Shared state for the stub upstream server, standing in for the
/// media host, the encyclopedia, and the face table store at once.
pub struct UpstreamStub {
    pub faces: Mutex<Vec<StoredFace>>,
    next_id: AtomicI64,
    media_files: Value,
    search_results: Vec<String>,
    summaries: HashMap<String, String>,
}

#[derive(Default)]
pub struct HarnessOptions {
    pub media_files: Vec<Value>,
    pub sync_token: String,
    pub search_results: Vec<String>,
    pub summaries: Vec<(&'static str, &'static str)>,
}

/// A running app server wired to a stub upstream.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub stub: Arc<UpstreamStub>,
}

impl TestApp {
    pub async fn spawn(options: HarnessOptions) -> Self {
        let stub = Arc::new(UpstreamStub {
            faces: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            media_files: Value::Array(options.media_files),
            search_results: options.search_results,
            summaries: options
                .summaries
                .into_iter()
                .map(|(title, extract)| (title.to_string(), extract.to_string()))
                .collect(),
        });
        let stub_addr = spawn_stub(stub.clone()).await;

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            store: StoreConfig {
                url: format!("http://{stub_addr}"),
                service_role_key: SERVICE_KEY.into(),
            },
            media: MediaConfig {
                api_base: format!("http://{stub_addr}"),
                private_key: "test-private-key".into(),
                folder: String::new(),
                sync_limit: 100,
                sync_token: options.sync_token,
            },
            webhook: WebhookConfig {
                secret: WEBHOOK_SECRET.into(),
                verify_signature: true,
            },
            wiki: WikiConfig {
                backends: vec![WikiBackend {
                    search_api: format!("http://{stub_addr}/w/api.php"),
                    summary_base: format!("http://{stub_addr}/api/rest_v1/page/summary/"),
                }],
                ..WikiConfig::default()
            },
        };

        let app = server::build_router(AppState::new(config));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            stub,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Sends a correctly signed webhook delivery.
    pub async fn post_webhook(&self, body: &str) -> reqwest::Response {
        let timestamp = chrono::Utc::now().timestamp();
        self.post_webhook_raw(body, "msg_test", &timestamp.to_string(), None)
            .await
    }

    /// Sends a webhook delivery with explicit id/timestamp and an
    /// optional pre-built signature header.
    pub async fn post_webhook_raw(
        &self,
        body: &str,
        id: &str,
        timestamp: &str,
        signature: Option<&str>,
    ) -> reqwest::Response {
        let header = match signature {
            Some(sig) => sig.to_string(),
            None => sign_webhook(id, timestamp, body),
        };
        self.client
            .post(self.url("/api/v1/webhook"))
            .header("webhook-id", id)
            .header("webhook-timestamp", timestamp)
            .header("webhook-signature", header)
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap()
    }

    pub fn stored_faces(&self) -> Vec<Value> {
        self.stub
            .faces
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.record.clone())
            .collect()
    }
}

/// Computes the `v1,...` signature header for a delivery.
pub fn sign_webhook(id: &str, timestamp: &str, body: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(format!("{id}.{timestamp}.{body}").as_bytes());
    format!("v1,{}", BASE64.encode(mac.finalize().into_bytes()))
}

async fn spawn_stub(stub: Arc<UpstreamStub>) -> SocketAddr {
    let router = axum::Router::new()
        .route("/files", get(list_files))
        .route("/w/api.php", get(opensearch))
        .route("/api/rest_v1/page/summary/{title}", get(page_summary))
        .route(
            "/rest/v1/faces",
            get(lookup_faces).patch(update_face).post(insert_face),
        )
        .with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn list_files(State(stub): State<Arc<UpstreamStub>>) -> Json<Value> {
    Json(stub.media_files.clone())
}

async fn opensearch(
    State(stub): State<Arc<UpstreamStub>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let query = params.get("search").cloned().unwrap_or_default();
    Json(json!([query, stub.search_results, [], []]))
}

async fn page_summary(
    State(stub): State<Arc<UpstreamStub>>,
    Path(title): Path<String>,
) -> Response {
    match stub.summaries.get(&title) {
        Some(extract) => Json(json!({ "extract": extract })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn lookup_faces(
    State(stub): State<Arc<UpstreamStub>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let url = params
        .get("image_url")
        .and_then(|v| v.strip_prefix("eq."))
        .unwrap_or_default();
    let faces = stub.faces.lock().unwrap();
    let rows: Vec<Value> = faces
        .iter()
        .filter(|f| f.record["image_url"] == url)
        .take(1)
        .map(|f| json!({ "id": f.id }))
        .collect();
    Json(Value::Array(rows))
}

async fn update_face(
    State(stub): State<Arc<UpstreamStub>>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let id: i64 = params
        .get("id")
        .and_then(|v| v.strip_prefix("eq."))
        .and_then(|v| v.parse().ok())
        .unwrap();
    let mut faces = stub.faces.lock().unwrap();
    if let Some(face) = faces.iter_mut().find(|f| f.id == id) {
        face.record = body;
    }
    Json(json!([{ "id": id }]))
}

async fn insert_face(
    State(stub): State<Arc<UpstreamStub>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let id = stub.next_id.fetch_add(1, Ordering::Relaxed);
    stub.faces.lock().unwrap().push(StoredFace { id, record: body });
    Json(json!([{ "id": id }]))
}
