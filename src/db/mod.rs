use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::*;

// ── Products ──────────────────────────────────────────────────────────────────

pub async fn fetch_all_products(pool: &PgPool, filters: &ProductFilters) -> AppResult<Vec<Product>> {
    let limit = filters.limit.unwrap_or(1000).min(10_000);
    let offset = filters.offset.unwrap_or(0);

    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, product_type, description, quantity, expiry_date,
               photo_url, user_id, user_name, created_at, updated_at
        FROM products
        WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
          AND ($2::text IS NULL OR product_type = $2)
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(filters.search.as_deref())
    .bind(filters.product_type.as_deref())
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn fetch_product_by_id(pool: &PgPool, id: Uuid) -> AppResult<Product> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, product_type, description, quantity, expiry_date,
                photo_url, user_id, user_name, created_at, updated_at
         FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
}

pub async fn insert_product(pool: &PgPool, payload: &CreateProduct) -> AppResult<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, product_type, description, quantity, expiry_date,
                              photo_url, user_id, user_name)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, name, product_type, description, quantity, expiry_date,
                  photo_url, user_id, user_name, created_at, updated_at
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.product_type)
    .bind(&payload.description)
    .bind(payload.quantity)
    .bind(payload.expiry_date)
    .bind(&payload.photo_url)
    .bind(&payload.user_id)
    .bind(&payload.user_name)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

pub async fn update_product(pool: &PgPool, id: Uuid, payload: &UpdateProduct) -> AppResult<Product> {
    // Fetch existing to merge optional fields; id and created_at never change
    let existing = fetch_product_by_id(pool, id).await?;

    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET name         = $1,
            product_type = $2,
            description  = $3,
            quantity     = $4,
            expiry_date  = $5,
            photo_url    = $6,
            updated_at   = $7
        WHERE id = $8
        RETURNING id, name, product_type, description, quantity, expiry_date,
                  photo_url, user_id, user_name, created_at, updated_at
        "#,
    )
    .bind(payload.name.as_deref().unwrap_or(&existing.name))
    .bind(payload.product_type.as_deref().unwrap_or(&existing.product_type))
    .bind(payload.description.as_deref().unwrap_or(&existing.description))
    .bind(payload.quantity.unwrap_or(existing.quantity))
    .bind(payload.expiry_date.unwrap_or(existing.expiry_date))
    .bind(payload.photo_url.as_deref().or(existing.photo_url.as_deref()))
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

    Ok(product)
}

pub async fn delete_product(pool: &PgPool, id: Uuid) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Product {} not found", id)));
    }
    Ok(())
}

/// Fetch all products without filters (used for statistics and expiry alerts).
pub async fn fetch_all_products_unbounded(pool: &PgPool) -> AppResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, product_type, description, quantity, expiry_date,
                photo_url, user_id, user_name, created_at, updated_at
         FROM products ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(products)
}

// ── Movement records ──────────────────────────────────────────────────────────

pub async fn fetch_all_records(
    pool: &PgPool,
    filters: &RecordFilters,
) -> AppResult<Vec<MovementRecord>> {
    let limit = filters.limit.unwrap_or(100).min(10_000);

    let records = sqlx::query_as::<_, MovementRecord>(
        r#"
        SELECT id, product_id, product_name, kind, quantity, user_id, user_name,
               note, recorded_at
        FROM movement_records
        WHERE ($1::uuid IS NULL OR product_id = $1)
        ORDER BY recorded_at DESC
        LIMIT $2
        "#,
    )
    .bind(filters.product_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

pub async fn insert_record(pool: &PgPool, payload: &CreateRecord) -> AppResult<MovementRecord> {
    if payload.quantity < 1 {
        return Err(AppError::BadRequest("quantity must be >= 1".to_string()));
    }

    // The product must exist when the record is written; its name is copied
    // onto the record so the log entry outlives the product row.
    let product = fetch_product_by_id(pool, payload.product_id).await?;

    let record = sqlx::query_as::<_, MovementRecord>(
        r#"
        INSERT INTO movement_records (product_id, product_name, kind, quantity,
                                      user_id, user_name, note)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, product_id, product_name, kind, quantity, user_id, user_name,
                  note, recorded_at
        "#,
    )
    .bind(payload.product_id)
    .bind(&product.name)
    .bind(payload.kind)
    .bind(payload.quantity)
    .bind(&payload.user_id)
    .bind(&payload.user_name)
    .bind(&payload.note)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Fetch the entire movement log (used for statistics).
pub async fn fetch_all_records_unbounded(pool: &PgPool) -> AppResult<Vec<MovementRecord>> {
    let records = sqlx::query_as::<_, MovementRecord>(
        "SELECT id, product_id, product_name, kind, quantity, user_id, user_name,
                note, recorded_at
         FROM movement_records ORDER BY recorded_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(records)
}
