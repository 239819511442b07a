use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use tracing::info;

use crate::{db, error::AppResult, expiry, stats, AppState};

// ── GET /api/statistics ───────────────────────────────────────────────────────

pub async fn get_statistics(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    let products = db::fetch_all_products_unbounded(&state.db).await?;
    let records = db::fetch_all_records_unbounded(&state.db).await?;
    let elapsed = start.elapsed();

    let statistics = stats::summarize(&products, &records, Utc::now().date_naive());

    info!(
        products = statistics.total_products,
        records = statistics.total_entries + statistics.total_exits,
        elapsed_ms = elapsed.as_millis(),
        "Computed usage statistics"
    );

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "data": statistics,
            "query_time_ms": elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}

// ── GET /api/alerts/expiry ────────────────────────────────────────────────────

pub async fn get_expiry_alerts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    let products = db::fetch_all_products_unbounded(&state.db).await?;
    let elapsed = start.elapsed();

    let alerts = expiry::alerts(&products, Utc::now().date_naive());

    info!(
        expired = alerts.expired.len(),
        expiring_soon = alerts.expiring_soon.len(),
        "Computed expiry alerts"
    );

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "data": alerts,
            "query_time_ms": elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}
