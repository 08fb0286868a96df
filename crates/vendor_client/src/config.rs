pub const TICKETMASTER_ENDPOINT: &str = "https://app.ticketmaster.com/discovery/v2/events.json";
pub const SEATGEEK_ENDPOINT: &str = "https://api.seatgeek.com/2/events";

/// Where a vendor feed lives and the credential it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl VendorConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn ticketmaster(api_key: impl Into<String>) -> Self {
        Self::new(TICKETMASTER_ENDPOINT, api_key)
    }

    pub fn seatgeek(client_id: impl Into<String>) -> Self {
        Self::new(SEATGEEK_ENDPOINT, client_id)
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
