use std::{collections::HashMap, fs};

use vendor_client::{
    config::{SEATGEEK_ENDPOINT, TICKETMASTER_ENDPOINT},
    VendorConfig,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub ticketmaster_endpoint: String,
    pub ticketmaster_api_key: String,
    pub seatgeek_endpoint: String,
    pub seatgeek_client_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            ticketmaster_endpoint: TICKETMASTER_ENDPOINT.into(),
            ticketmaster_api_key: String::new(),
            seatgeek_endpoint: SEATGEEK_ENDPOINT.into(),
            seatgeek_client_id: String::new(),
        }
    }
}

impl Settings {
    pub fn ticketmaster(&self) -> VendorConfig {
        VendorConfig::new(&self.ticketmaster_endpoint, &self.ticketmaster_api_key)
    }

    pub fn seatgeek(&self) -> VendorConfig {
        VendorConfig::new(&self.seatgeek_endpoint, &self.seatgeek_client_id)
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        tracing::warn!("ignoring server.toml: expected a flat table of strings");
        return;
    };

    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("ticketmaster_endpoint") {
        settings.ticketmaster_endpoint = v.clone();
    }
    if let Some(v) = file_cfg.get("ticketmaster_api_key") {
        settings.ticketmaster_api_key = v.clone();
    }
    if let Some(v) = file_cfg.get("seatgeek_endpoint") {
        settings.seatgeek_endpoint = v.clone();
    }
    if let Some(v) = file_cfg.get("seatgeek_client_id") {
        settings.seatgeek_client_id = v.clone();
    }
}

/// Plain names are read first, then their `APP__` forms, so the prefixed
/// variable wins when both are set.
fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let targets: [(&str, &str, &mut String); 5] = [
        ("SERVER_BIND", "APP__BIND_ADDR", &mut settings.server_bind),
        (
            "TICKETMASTER_ENDPOINT",
            "APP__TICKETMASTER_ENDPOINT",
            &mut settings.ticketmaster_endpoint,
        ),
        (
            "TICKETMASTER_API_KEY",
            "APP__TICKETMASTER_API_KEY",
            &mut settings.ticketmaster_api_key,
        ),
        (
            "SEATGEEK_ENDPOINT",
            "APP__SEATGEEK_ENDPOINT",
            &mut settings.seatgeek_endpoint,
        ),
        (
            "SEATGEEK_CLIENT_ID",
            "APP__SEATGEEK_CLIENT_ID",
            &mut settings.seatgeek_client_id,
        ),
    ];

    for (plain, prefixed, slot) in targets {
        if let Some(v) = lookup(plain) {
            *slot = v;
        }
        if let Some(v) = lookup(prefixed) {
            *slot = v;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
