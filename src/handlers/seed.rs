use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::{error::AppResult, seed, AppState};

#[derive(Debug, Deserialize)]
pub struct SeedParams {
    /// Number of products to seed (default: 100, max: 10 000)
    pub products: Option<usize>,
    /// Number of movement records to seed (default: 300, max: 50 000)
    pub records: Option<usize>,
}

// ── POST /api/seed ────────────────────────────────────────────────────────────

pub async fn seed_data(
    State(state): State<AppState>,
    Query(params): Query<SeedParams>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let product_count = params.products.unwrap_or(100).min(10_000);
    let record_count = params.records.unwrap_or(300).min(50_000);

    let start = Instant::now();
    let products = seed::seed_products(&state.db, product_count).await?;
    let records_seeded = seed::seed_records(&state.db, &products, record_count).await?;
    let elapsed = start.elapsed();

    info!(
        products = products.len(),
        records = records_seeded,
        seed_ms = elapsed.as_millis(),
        "Seeding complete"
    );

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "products_seeded": products.len(),
            "records_seeded": records_seeded,
            "seed_time_ms": elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}
