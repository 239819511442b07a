use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expiry::{self, ExpiryStatus};

/// Core product entity. `product_type` is a free-text category label chosen by
/// the user; it is matched by exact string equality everywhere (an empty label
/// is valid and distinct).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub description: String,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub photo_url: Option<String>,
    /// Owning user, denormalized from the external auth context at creation.
    pub user_id: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn expiry_status(&self, today: NaiveDate) -> ExpiryStatus {
        expiry::classify(self.expiry_date, today)
    }
}

/// Product decorated with its computed expiry status for API responses.
#[derive(Debug, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub expiry: ExpiryStatus,
}

impl ProductView {
    pub fn new(product: Product, today: NaiveDate) -> Self {
        let expiry = product.expiry_status(today);
        Self { product, expiry }
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(default)]
    pub description: String,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub photo_url: Option<String>,
    pub user_id: String,
    pub user_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub expiry_date: Option<NaiveDate>,
    pub photo_url: Option<String>,
}

// ── Query parameters ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ProductFilters {
    /// Case-insensitive substring match against name and description.
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::ExpiryTier;
    use chrono::Duration;

    fn make(expiry_date: NaiveDate) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Milk".to_string(),
            product_type: "dairy".to_string(),
            description: String::new(),
            quantity: 4,
            expiry_date,
            photo_url: None,
            user_id: "u-1".to_string(),
            user_name: "Ana".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn expiry_status_follows_the_expiry_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let product = make(today + Duration::days(12));
        let status = product.expiry_status(today);
        assert_eq!(status.tier, ExpiryTier::ExpiringLater);
        assert_eq!(status.days_offset, 12);
    }

    #[test]
    fn product_type_serializes_as_type() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let json = serde_json::to_value(ProductView::new(make(today), today)).unwrap();
        assert_eq!(json["type"], "dairy");
        assert_eq!(json["expiry"]["tier"], "expiring_soon");
        assert_eq!(json["expiry"]["days_offset"], 0);
    }
}
