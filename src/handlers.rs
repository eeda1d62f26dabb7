use crate::bucketizer::bucketize;
use crate::client::ClientError;
use crate::config::TimeZonePolicy;
use crate::errors::AppError;
use crate::models::{
    Bucket, ClickHistory, HistoryQuery, HistoryResponse, LookupQuery, ShortenRequest,
    ShortenResponse,
};
use crate::period::Period;
use crate::shortcode::extract_short_code;
use crate::state::AppState;
use crate::ui::{render_index, render_not_found, render_stats};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, Utc};
use tracing::info;

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn stats_page() -> Html<String> {
    Html(render_stats())
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(render_not_found()))
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn shorten(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    let long_url = payload.long_url.trim();
    if long_url.is_empty() {
        return Err(AppError::bad_request("long_url must not be empty"));
    }

    let created = state.client.shorten(long_url).await.map_err(|err| match err {
        ClientError::Rejected(message) => AppError::bad_request(message),
        other => AppError::from(other),
    })?;
    info!(short_code = %created.short_code, "link created");

    Ok(Json(ShortenResponse {
        short_url: state.client.short_url(&created.short_code),
        short_code: created.short_code,
    }))
}

pub async fn history(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let response = load_history(&state, short_code, query.period).await?;
    Ok(Json(response))
}

pub async fn lookup(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    if query.url.trim().is_empty() {
        return Err(AppError::bad_request("paste a short link to look up"));
    }
    let short_code = extract_short_code(&query.url)
        .ok_or_else(|| AppError::bad_request("not a short link from this service"))?;

    let response = load_history(&state, short_code, query.period).await?;
    Ok(Json(response))
}

async fn load_history(
    state: &AppState,
    short_code: String,
    period: Period,
) -> Result<HistoryResponse, AppError> {
    let history = state.client.click_history(&short_code).await?;

    Ok(HistoryResponse {
        buckets: chart(state, &history, period),
        total_clicks: history.total_clicks,
        short_code,
        period,
    })
}

// Reads the clock once, in the configured zone, and buckets against it.
fn chart(state: &AppState, history: &ClickHistory, period: Period) -> Vec<Bucket> {
    match state.timezone {
        TimeZonePolicy::Local => {
            let events = history.click_events(&Local);
            bucketize(&events, period, &Local::now(), &state.labels)
        }
        TimeZonePolicy::Utc => {
            let events = history.click_events(&Utc);
            bucketize(&events, period, &Utc::now(), &state.labels)
        }
        TimeZonePolicy::Fixed(offset) => {
            let events = history.click_events(&offset);
            bucketize(&events, period, &Utc::now().with_timezone(&offset), &state.labels)
        }
    }
}
