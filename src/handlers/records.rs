use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    db,
    error::AppResult,
    models::{CreateRecord, RecordFilters},
    AppState,
};

pub async fn list_records(
    State(state): State<AppState>,
    Query(filters): Query<RecordFilters>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    let records = db::fetch_all_records(&state.db, &filters).await?;
    let elapsed = start.elapsed();

    info!(count = records.len(), "Listed movement records");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "data": records,
            "count": records.len(),
            "query_time_ms": elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}

pub async fn create_record(
    State(state): State<AppState>,
    Json(payload): Json<CreateRecord>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    let record = db::insert_record(&state.db, &payload).await?;
    let elapsed = start.elapsed();

    info!(
        id = %record.id,
        product_id = %record.product_id,
        kind = ?record.kind,
        quantity = record.quantity,
        "Created movement record"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "data": record,
            "db_time_ms": elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}
