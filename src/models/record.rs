use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "movement_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Entry,
    Exit,
}

/// One entry in the append-only movement log. Never updated or deleted;
/// `product_name` is denormalized at creation so the record stays readable
/// after the product itself is gone.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MovementRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub kind: MovementKind,
    pub quantity: i32,
    pub user_id: String,
    pub user_name: String,
    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecord {
    pub product_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i32,
    pub user_id: String,
    pub user_name: String,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RecordFilters {
    pub product_id: Option<Uuid>,
    pub limit: Option<i64>,
}
