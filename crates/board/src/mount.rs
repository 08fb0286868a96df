use std::sync::Arc;

use shared::protocol::{QueryParams, SortKey};
use tokio::{sync::RwLock, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use vendor_client::{fetch_both, EventSource};

use crate::EventBoard;

/// A mounted board: owns the in-flight fetch cycle for one page load.
///
/// Dropping the handle unmounts the board. The fetch keeps running, but its
/// result is discarded instead of being written to the board.
pub struct BoardHandle {
    board: Arc<RwLock<EventBoard>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

/// Creates a loading board and starts fetching both feeds. `params` is layered
/// over each adapter's defaults. Must be called within a tokio runtime.
pub fn mount(
    primary: Arc<dyn EventSource>,
    secondary: Arc<dyn EventSource>,
    params: QueryParams,
) -> BoardHandle {
    let board = Arc::new(RwLock::new(EventBoard::new()));
    let cancel = CancellationToken::new();
    let task = tokio::spawn(run_fetch_cycle(
        primary,
        secondary,
        params,
        board.clone(),
        cancel.clone(),
    ));

    BoardHandle {
        board,
        cancel,
        task: Some(task),
    }
}

async fn run_fetch_cycle(
    primary: Arc<dyn EventSource>,
    secondary: Arc<dyn EventSource>,
    params: QueryParams,
    board: Arc<RwLock<EventBoard>>,
    cancel: CancellationToken,
) {
    let outcome = fetch_both(primary.as_ref(), &params, secondary.as_ref(), &params).await;

    let mut guard = board.write().await;
    if cancel.is_cancelled() {
        debug!(
            primary = primary.name(),
            secondary = secondary.name(),
            "board unmounted before fetch settled; discarding result"
        );
        return;
    }
    guard.finish(outcome);
}

impl BoardHandle {
    /// Waits for the fetch cycle to finish.
    pub async fn settled(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(error) = task.await {
                warn!(%error, "board fetch task ended abnormally");
            }
        }
    }

    pub async fn snapshot(&self) -> EventBoard {
        self.board.read().await.clone()
    }

    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.board.write().await.set_search_query(query);
    }

    pub async fn set_sort_key(&self, sort_key: SortKey) {
        self.board.write().await.set_sort_key(sort_key);
    }

    pub fn shared(&self) -> Arc<RwLock<EventBoard>> {
        self.board.clone()
    }

    pub fn is_mounted(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for BoardHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
#[path = "tests/mount_tests.rs"]
mod tests;
