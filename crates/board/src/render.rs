use minijinja::Environment;
use serde::Serialize;
use shared::{
    domain::{Event, PriceRange},
    protocol::SortKey,
};
use thiserror::Error;

use crate::{BoardPhase, EventBoard};

const TITLE: &str = "Events Dashboard";

/// The `.html` suffix turns on minijinja's HTML auto-escaping.
const TEMPLATE_NAME: &str = "board.html";
const TEMPLATE_SOURCE: &str = include_str!("../templates/board.html");

#[derive(Debug, Error)]
#[error("Render error: {0}")]
pub struct RenderError(#[from] minijinja::Error);

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'static str,
    query: &'a str,
    sort_options: Vec<SortOption>,
    status: &'static str,
    error: Option<&'a str>,
    rows: Vec<EventRow<'a>>,
}

#[derive(Serialize)]
struct SortOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct EventRow<'a> {
    id: &'a str,
    name: &'a str,
    image_url: Option<&'a str>,
    date: &'a str,
    venue: &'a str,
    prices: Vec<String>,
}

impl<'a> EventRow<'a> {
    fn from_event(event: &'a Event) -> Self {
        Self {
            id: event.id.as_str(),
            name: &event.name,
            image_url: event.image_url.as_deref(),
            date: event.date.as_deref().unwrap_or_default(),
            venue: event.venue.as_deref().unwrap_or_default(),
            prices: event
                .price_ranges
                .iter()
                .flatten()
                .map(format_price_range)
                .collect(),
        }
    }
}

pub fn render_html(board: &EventBoard) -> Result<String, RenderError> {
    let (status, error, rows) = match board.phase() {
        BoardPhase::Loading => ("loading", None, Vec::new()),
        BoardPhase::Failed(message) => ("failed", Some(message.as_str()), Vec::new()),
        BoardPhase::Ready => (
            "ready",
            None,
            board.view().into_iter().map(EventRow::from_event).collect(),
        ),
    };

    let context = PageContext {
        title: TITLE,
        query: board.search_query(),
        sort_options: [(SortKey::Name, "Name"), (SortKey::Date, "Date")]
            .into_iter()
            .map(|(key, label)| SortOption {
                value: key.as_str(),
                label,
                selected: board.sort_key() == key,
            })
            .collect(),
        status,
        error,
        rows,
    };

    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE_SOURCE)?;
    let html = env.get_template(TEMPLATE_NAME)?.render(context)?;
    Ok(html)
}

pub fn format_price_range(range: &PriceRange) -> String {
    format!("${} - ${} {}", range.min, range.max, range.currency)
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
