use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::VendorConfig;

#[derive(Clone)]
struct FakeVendorState {
    status: StatusCode,
    body: Arc<String>,
    queries: Arc<Mutex<Vec<String>>>,
}

pub(crate) struct FakeVendor {
    pub(crate) endpoint: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl FakeVendor {
    pub(crate) fn config(&self, api_key: &str) -> VendorConfig {
        VendorConfig::new(self.endpoint.clone(), api_key)
    }

    pub(crate) async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }
}

async fn serve_events(
    State(state): State<FakeVendorState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    state.queries.lock().await.push(query.unwrap_or_default());
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.as_ref().clone(),
    )
}

pub(crate) async fn spawn_fake_vendor(status: StatusCode, body: impl Into<String>) -> FakeVendor {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let queries = Arc::new(Mutex::new(Vec::new()));
    let state = FakeVendorState {
        status,
        body: Arc::new(body.into()),
        queries: queries.clone(),
    };
    let app = Router::new()
        .route("/events", get(serve_events))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    FakeVendor {
        endpoint: format!("http://{addr}/events"),
        queries,
    }
}

/// An endpoint nothing is listening on.
pub(crate) async fn closed_endpoint() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/events")
}
