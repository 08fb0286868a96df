use std::sync::Arc;

use reqwest::Client;
use vendor_client::{EventSource, SeatGeekClient, TicketmasterClient};

use crate::config::Settings;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) primary: Arc<dyn EventSource>,
    pub(crate) secondary: Arc<dyn EventSource>,
}

impl AppState {
    pub(crate) fn from_settings(http: Client, settings: &Settings) -> Self {
        Self {
            primary: Arc::new(TicketmasterClient::with_http(
                http.clone(),
                settings.ticketmaster(),
            )),
            secondary: Arc::new(SeatGeekClient::with_http(http, settings.seatgeek())),
        }
    }
}
