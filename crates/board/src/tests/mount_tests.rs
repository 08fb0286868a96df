use super::*;
use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use shared::{domain::Event, error::NetworkError};
use tokio::time::sleep;

use crate::BoardPhase;

struct DelayedSource {
    name: &'static str,
    delay: Duration,
    outcome: Result<Vec<Event>, NetworkError>,
}

impl DelayedSource {
    fn ok(name: &'static str, delay_ms: u64, events: Vec<Event>) -> Arc<dyn EventSource> {
        Arc::new(Self {
            name,
            delay: Duration::from_millis(delay_ms),
            outcome: Ok(events),
        })
    }

    fn failing(name: &'static str, delay_ms: u64, err: NetworkError) -> Arc<dyn EventSource> {
        Arc::new(Self {
            name,
            delay: Duration::from_millis(delay_ms),
            outcome: Err(err),
        })
    }
}

#[async_trait]
impl EventSource for DelayedSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_events(&self, _params: &QueryParams) -> Result<Vec<Event>, NetworkError> {
        sleep(self.delay).await;
        self.outcome.clone()
    }
}

fn lakers() -> Event {
    Event::new("1", "Lakers vs Celtics").with_date("2024-05-01")
}

fn knicks() -> Event {
    Event::new("2", "Knicks vs Nets").with_date("2024-04-01")
}

#[tokio::test(start_paused = true)]
async fn mounted_board_loads_then_becomes_ready() {
    let mut handle = mount(
        DelayedSource::ok("a", 20, vec![lakers()]),
        DelayedSource::ok("b", 10, vec![knicks()]),
        QueryParams::new(),
    );
    assert!(handle.snapshot().await.loading());

    handle.settled().await;
    let board = handle.snapshot().await;
    assert_eq!(board.phase(), &BoardPhase::Ready);
    let ids: Vec<&str> = board.events().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"], "primary feed first regardless of timing");
}

#[tokio::test(start_paused = true)]
async fn primary_failure_hides_secondary_events() {
    let mut handle = mount(
        DelayedSource::failing("a", 10, NetworkError::Status),
        DelayedSource::ok("b", 5, vec![knicks()]),
        QueryParams::new(),
    );
    handle.settled().await;

    let board = handle.snapshot().await;
    assert!(!board.loading());
    assert!(!board.error().unwrap_or_default().is_empty());
    assert!(board.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn first_settled_failure_is_reported_when_both_fail() {
    let mut handle = mount(
        DelayedSource::failing("a", 50, NetworkError::Status),
        DelayedSource::failing("b", 5, NetworkError::transport("dns error")),
        QueryParams::new(),
    );
    handle.settled().await;

    let board = handle.snapshot().await;
    assert_eq!(board.error(), Some("Network request failed: dns error"));
}

#[tokio::test(start_paused = true)]
async fn input_changes_apply_while_loading_and_after() {
    let mut handle = mount(
        DelayedSource::ok("a", 10, vec![lakers()]),
        DelayedSource::ok("b", 10, vec![knicks()]),
        QueryParams::new(),
    );
    handle.set_sort_key(SortKey::Date).await;
    handle.settled().await;

    let board = handle.snapshot().await;
    let view = board.view();
    let ids: Vec<&str> = view.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);

    handle.set_search_query("LAKERS").await;
    let board = handle.snapshot().await;
    let view = board.view();
    let ids: Vec<&str> = view.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["1"]);
}

#[tokio::test(start_paused = true)]
async fn late_result_after_unmount_is_discarded() {
    let handle = mount(
        DelayedSource::ok("a", 100, vec![lakers()]),
        DelayedSource::ok("b", 100, vec![knicks()]),
        QueryParams::new(),
    );
    let shared = handle.shared();
    assert!(handle.is_mounted());
    handle.unmount();

    sleep(Duration::from_millis(500)).await;
    let board = shared.read().await;
    assert!(board.loading());
    assert!(board.events().is_empty());
}

struct RecordingSource {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl EventSource for RecordingSource {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn fetch_events(&self, params: &QueryParams) -> Result<Vec<Event>, NetworkError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(params.to_query_string());
        }
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn mount_params_reach_both_sources() {
    let primary = Arc::new(RecordingSource {
        seen: Mutex::new(Vec::new()),
    });
    let secondary = Arc::new(RecordingSource {
        seen: Mutex::new(Vec::new()),
    });
    let params = QueryParams::new().size(5).classification_name("NHL");

    let mut handle = mount(primary.clone(), secondary.clone(), params);
    handle.settled().await;

    assert_eq!(handle.snapshot().await.phase(), &BoardPhase::Ready);
    for source in [&primary, &secondary] {
        let seen = source.seen.lock().expect("lock").clone();
        assert_eq!(seen, vec!["size=5&classificationName=NHL".to_string()]);
    }
}
