use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use shared::{domain::Event, error::NetworkError, protocol::QueryParams};
use tracing::{debug, warn};

pub mod config;
pub mod join;
pub mod seatgeek;
pub mod ticketmaster;

pub use config::VendorConfig;
pub use join::join_all_or_nothing;
pub use seatgeek::SeatGeekClient;
pub use ticketmaster::TicketmasterClient;

#[async_trait]
pub trait EventSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_events(&self, params: &QueryParams) -> Result<Vec<Event>, NetworkError>;
}

#[async_trait]
impl<T: EventSource + ?Sized> EventSource for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch_events(&self, params: &QueryParams) -> Result<Vec<Event>, NetworkError> {
        (**self).fetch_events(params).await
    }
}

/// Fetches both feeds concurrently and concatenates them, `primary` first.
///
/// Fails with whichever feed fails first; the other feed's result is dropped.
pub async fn fetch_both(
    primary: &dyn EventSource,
    primary_params: &QueryParams,
    secondary: &dyn EventSource,
    secondary_params: &QueryParams,
) -> Result<Vec<Event>, NetworkError> {
    let (mut events, secondary_events) = join_all_or_nothing(
        primary.fetch_events(primary_params),
        secondary.fetch_events(secondary_params),
    )
    .await?;
    events.extend(secondary_events);
    Ok(events)
}

async fn get_json<T: DeserializeOwned>(
    http: &Client,
    vendor: &'static str,
    url: &str,
) -> Result<T, NetworkError> {
    let response = http.get(url).send().await.map_err(NetworkError::transport)?;

    let status = response.status();
    if !status.is_success() {
        warn!(vendor, %status, "vendor responded with non-success status");
        return Err(NetworkError::Status);
    }

    let body = response.bytes().await.map_err(NetworkError::transport)?;
    debug!(vendor, bytes = body.len(), "vendor response received");
    serde_json::from_slice(&body).map_err(NetworkError::decode)
}

/// Vendor ids arrive as JSON strings from one feed and numbers from the other.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Text(text) => text,
            WireId::Number(number) => number.to_string(),
        }
    }
}

fn event_id(id: Option<WireId>) -> String {
    id.map(WireId::into_string).unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
