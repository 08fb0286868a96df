use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use board::{mount, render_html};
use serde::Deserialize;
use shared::protocol::{QueryParams, SortKey};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

#[derive(Debug, Default, Deserialize)]
struct BoardQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    sort: Option<String>,
}

impl BoardQuery {
    fn sort_key(&self) -> SortKey {
        let Some(raw) = self.sort.as_deref() else {
            return SortKey::default();
        };
        raw.parse().unwrap_or_else(|err| {
            debug!(%err, "falling back to name sort");
            SortKey::default()
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    if !settings.ticketmaster().has_credential() {
        warn!("TICKETMASTER_API_KEY is not set; vendor A requests will be rejected");
    }
    if !settings.seatgeek().has_credential() {
        warn!("SEATGEEK_CLIENT_ID is not set; vendor B requests will be rejected");
    }

    let state = AppState::from_settings(reqwest::Client::new(), &settings);
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "event board listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(event_board))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Each page load mounts a fresh board and renders it once both feeds settle.
async fn event_board(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BoardQuery>,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    let sort_key = query.sort_key();
    let mut handle = mount(
        state.primary.clone(),
        state.secondary.clone(),
        QueryParams::new(),
    );
    handle.set_search_query(query.q).await;
    handle.set_sort_key(sort_key).await;
    handle.settled().await;

    let board = handle.snapshot().await;
    if let Some(error) = board.error() {
        warn!(%error, "event board failed to load");
    } else {
        debug!(
            events = board.events().len(),
            shown = board.view().len(),
            "event board rendered"
        );
    }
    render_html(&board).map(Html).map_err(|err| {
        error!(%err, "failed to render event board");
        (StatusCode::INTERNAL_SERVER_ERROR, "failed to render event board")
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
