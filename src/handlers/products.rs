use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    db,
    error::AppResult,
    models::{CreateProduct, ProductFilters, ProductView, UpdateProduct},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
    Query(filters): Query<ProductFilters>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    let products = db::fetch_all_products(&state.db, &filters).await?;
    let elapsed = start.elapsed();

    info!(
        count = products.len(),
        elapsed_ms = elapsed.as_millis(),
        "Listed products"
    );

    let today = Utc::now().date_naive();
    let views: Vec<ProductView> = products
        .into_iter()
        .map(|p| ProductView::new(p, today))
        .collect();

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "data": views,
            "count": views.len(),
            "query_time_ms": elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if payload.name.trim().is_empty() {
        return Err(crate::error::AppError::BadRequest(
            "name must not be empty".to_string(),
        ));
    }
    if payload.quantity < 0 {
        return Err(crate::error::AppError::BadRequest(
            "quantity must be >= 0".to_string(),
        ));
    }

    let start = Instant::now();
    let product = db::insert_product(&state.db, &payload).await?;
    let elapsed = start.elapsed();

    info!(id = %product.id, name = %product.name, "Created product");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "data": ProductView::new(product, Utc::now().date_naive()),
            "db_time_ms": elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    let product = db::fetch_product_by_id(&state.db, id).await?;
    let elapsed = start.elapsed();

    info!(id = %id, "Fetched product");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "data": ProductView::new(product, Utc::now().date_naive()),
            "query_time_ms": elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProduct>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if let Some(quantity) = payload.quantity {
        if quantity < 0 {
            return Err(crate::error::AppError::BadRequest(
                "quantity must be >= 0".to_string(),
            ));
        }
    }

    let start = Instant::now();
    let product = db::update_product(&state.db, id, &payload).await?;
    let elapsed = start.elapsed();

    info!(id = %id, "Updated product");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "data": ProductView::new(product, Utc::now().date_naive()),
            "db_time_ms": elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    db::delete_product(&state.db, id).await?;
    let elapsed = start.elapsed();

    info!(id = %id, "Deleted product");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Product deleted",
            "id": id,
            "db_time_ms": elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}
