use crate::bucketizer::ClickEvent;
use crate::period::Period;
use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Envelope used by every response of the link service.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedLink {
    pub short_code: String,
}

/// Raw click history for one short code, as returned by the link service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClickHistory {
    #[serde(rename = "his_clicks_total", default)]
    pub total_clicks: u64,
    #[serde(rename = "clean_his_clicks", default)]
    pub events: Vec<String>,
}

impl ClickHistory {
    /// Parsed click instants. Timestamps that cannot be read are skipped.
    pub fn click_events<Tz: TimeZone>(&self, tz: &Tz) -> Vec<ClickEvent> {
        let parsed: Vec<ClickEvent> = self
            .events
            .iter()
            .filter_map(|raw| ClickEvent::parse(raw, tz))
            .collect();

        let dropped = self.events.len() - parsed.len();
        if dropped > 0 {
            debug!("skipped {dropped} unreadable click timestamps");
        }
        parsed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub long_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub period: Period,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub url: String,
    #[serde(default)]
    pub period: Period,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub short_code: String,
    pub total_clicks: u64,
    pub period: Period,
    pub buckets: Vec<Bucket>,
}
