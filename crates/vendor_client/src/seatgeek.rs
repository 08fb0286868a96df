use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{
    domain::{Event, EventId},
    error::NetworkError,
    protocol::QueryParams,
};
use tracing::{error, info};

use crate::{config::VendorConfig, event_id, get_json, EventSource, WireId};

const VENDOR: &str = "seatgeek";

#[derive(Debug, Default, Deserialize)]
struct EventsPage {
    #[serde(default)]
    events: Option<Vec<SeatGeekEvent>>,
}

#[derive(Debug, Deserialize)]
struct SeatGeekEvent {
    #[serde(default)]
    id: Option<WireId>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    performers: Option<Vec<Performer>>,
    #[serde(default)]
    datetime_local: Option<String>,
    #[serde(default)]
    venue: Option<Venue>,
}

#[derive(Debug, Deserialize)]
struct Performer {
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Venue {
    #[serde(default)]
    name: Option<String>,
}

/// Events API feed (vendor B). Carries no prices or descriptions.
pub struct SeatGeekClient {
    http: Client,
    config: VendorConfig,
}

impl SeatGeekClient {
    pub fn new(config: VendorConfig) -> Self {
        Self::with_http(Client::new(), config)
    }

    pub fn with_http(http: Client, config: VendorConfig) -> Self {
        Self { http, config }
    }

    pub fn default_params(&self) -> QueryParams {
        QueryParams::new().client_id(self.config.api_key.clone())
    }

    pub fn request_url(&self, params: &QueryParams) -> String {
        let query = params.merged_over(&self.default_params()).to_query_string();
        format!("{}?{query}", self.config.endpoint)
    }

    async fn fetch(&self, params: &QueryParams) -> Result<Vec<Event>, NetworkError> {
        let url = self.request_url(params);
        let body: EventsPage = get_json(&self.http, VENDOR, &url).await?;
        Ok(body
            .events
            .unwrap_or_default()
            .into_iter()
            .map(map_event)
            .collect())
    }
}

#[async_trait]
impl EventSource for SeatGeekClient {
    fn name(&self) -> &'static str {
        VENDOR
    }

    async fn fetch_events(&self, params: &QueryParams) -> Result<Vec<Event>, NetworkError> {
        let events = self.fetch(params).await.inspect_err(|error| {
            error!(vendor = VENDOR, %error, "there was a problem with the fetch operation");
        })?;
        info!(vendor = VENDOR, count = events.len(), "fetched events");
        Ok(events)
    }
}

fn map_event(event: SeatGeekEvent) -> Event {
    Event {
        id: EventId(event_id(event.id)),
        name: event.title.unwrap_or_default(),
        image_url: event
            .performers
            .and_then(|performers| performers.into_iter().next())
            .and_then(|performer| performer.image),
        date: event.datetime_local,
        venue: event.venue.and_then(|venue| venue.name),
        description: None,
        price_ranges: None,
    }
}

#[cfg(test)]
#[path = "tests/seatgeek_tests.rs"]
mod tests;
