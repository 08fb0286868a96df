use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{
    domain::{Event, EventId, PriceRange},
    error::NetworkError,
    protocol::{encode_component, QueryParams},
};
use tracing::{error, info};

use crate::{config::VendorConfig, event_id, get_json, EventSource, WireId};

const VENDOR: &str = "ticketmaster";
const DEFAULT_PAGE_SIZE: u32 = 200;
const DEFAULT_SORT: &str = "date,asc";
const DEFAULT_CLASSIFICATION: &str = "NBA";
const IMAGE_RATIO: &str = "16_9";
const IMAGE_SIZE: &str = "retina";

#[derive(Debug, Default, Deserialize)]
struct DiscoveryResponse {
    #[serde(rename = "_embedded", default)]
    embedded: Option<DiscoveryEvents>,
}

#[derive(Debug, Default, Deserialize)]
struct DiscoveryEvents {
    #[serde(default)]
    events: Option<Vec<DiscoveryEvent>>,
}

#[derive(Debug, Deserialize)]
struct DiscoveryEvent {
    #[serde(default)]
    id: Option<WireId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    images: Option<Vec<DiscoveryImage>>,
    #[serde(default)]
    dates: Option<DiscoveryDates>,
    #[serde(rename = "_embedded", default)]
    embedded: Option<DiscoveryVenues>,
    #[serde(default)]
    info: Option<String>,
    #[serde(rename = "priceRanges", default)]
    price_ranges: Option<Vec<DiscoveryPriceRange>>,
}

#[derive(Debug, Deserialize)]
struct DiscoveryImage {
    #[serde(default)]
    ratio: Option<String>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiscoveryDates {
    #[serde(default)]
    start: Option<DiscoveryStart>,
}

#[derive(Debug, Deserialize)]
struct DiscoveryStart {
    #[serde(rename = "localDate", default)]
    local_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiscoveryVenues {
    #[serde(default)]
    venues: Option<Vec<DiscoveryVenue>>,
}

#[derive(Debug, Deserialize)]
struct DiscoveryVenue {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiscoveryPriceRange {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

/// Discovery API feed (vendor A).
pub struct TicketmasterClient {
    http: Client,
    config: VendorConfig,
}

impl TicketmasterClient {
    pub fn new(config: VendorConfig) -> Self {
        Self::with_http(Client::new(), config)
    }

    pub fn with_http(http: Client, config: VendorConfig) -> Self {
        Self { http, config }
    }

    pub fn default_params() -> QueryParams {
        QueryParams::new()
            .size(DEFAULT_PAGE_SIZE)
            .sort(DEFAULT_SORT)
            .classification_name(DEFAULT_CLASSIFICATION)
    }

    pub fn request_url(&self, params: &QueryParams) -> String {
        let query = params.merged_over(&Self::default_params()).to_query_string();
        format!(
            "{}?apikey={}&{query}",
            self.config.endpoint,
            encode_component(&self.config.api_key)
        )
    }

    async fn fetch(&self, params: &QueryParams) -> Result<Vec<Event>, NetworkError> {
        let url = self.request_url(params);
        let body: DiscoveryResponse = get_json(&self.http, VENDOR, &url).await?;
        let events = body
            .embedded
            .and_then(|embedded| embedded.events)
            .unwrap_or_default();
        Ok(events.into_iter().map(map_event).collect())
    }
}

#[async_trait]
impl EventSource for TicketmasterClient {
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

fn map_event(event: DiscoveryEvent) -> Event {
    let image_url = event
        .images
        .unwrap_or_default()
        .into_iter()
        .find(|image| {
            image.ratio.as_deref() == Some(IMAGE_RATIO) && image.size.as_deref() == Some(IMAGE_SIZE)
        })
        .and_then(|image| image.url);
    let venue = event
        .embedded
        .and_then(|embedded| embedded.venues)
        .and_then(|venues| venues.into_iter().next())
        .and_then(|venue| venue.name);

    Event {
        id: EventId(event_id(event.id)),
        name: event.name.unwrap_or_default(),
        image_url,
        date: event
            .dates
            .and_then(|dates| dates.start)
            .and_then(|start| start.local_date),
        venue,
        description: event.info,
        price_ranges: event
            .price_ranges
            .map(|ranges| ranges.into_iter().filter_map(map_price_range).collect()),
    }
}

fn map_price_range(range: DiscoveryPriceRange) -> Option<PriceRange> {
    Some(PriceRange {
        kind: range.kind.unwrap_or_default(),
        currency: range.currency.unwrap_or_default(),
        min: range.min?,
        max: range.max?,
    })
}

#[cfg(test)]
#[path = "tests/ticketmaster_tests.rs"]
mod tests;
