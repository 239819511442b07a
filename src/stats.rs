use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::expiry::{self, ExpiryTier};
use crate::models::{MovementKind, MovementRecord, Product};

/// How many users the ranked activity list is truncated to.
pub const TOP_USERS: usize = 10;

/// Derived view over a snapshot of products and movement records.
///
/// `expiring_products` counts only the 0–7 day window; products in the 8–30
/// day tier show up on cards but are not counted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageStatistics {
    pub total_products: usize,
    pub total_quantity: i64,
    pub expired_products: usize,
    pub expiring_products: usize,
    pub total_entries: usize,
    pub total_exits: usize,
    pub products_by_type: IndexMap<String, usize>,
    pub user_activity: IndexMap<String, usize>,
    pub top_user_activity: Vec<UserActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserActivity {
    pub user_name: String,
    pub count: usize,
}

/// Computes usage statistics from a snapshot of both collections.
///
/// Pure and single-pass over each input; callers re-invoke it whenever the
/// snapshot changes. Input ordering only affects `top_user_activity` ties,
/// which keep the order users were first seen in (stable sort over an
/// insertion-ordered map).
pub fn summarize(
    products: &[Product],
    records: &[MovementRecord],
    today: NaiveDate,
) -> UsageStatistics {
    let mut stats = UsageStatistics::default();

    for product in products {
        stats.total_products += 1;
        stats.total_quantity += i64::from(product.quantity);

        match expiry::classify(product.expiry_date, today).tier {
            ExpiryTier::Expired => stats.expired_products += 1,
            ExpiryTier::ExpiringSoon => stats.expiring_products += 1,
            ExpiryTier::ExpiringLater | ExpiryTier::Normal => {}
        }

        *stats
            .products_by_type
            .entry(product.product_type.clone())
            .or_insert(0) += 1;
    }

    for record in records {
        match record.kind {
            MovementKind::Entry => stats.total_entries += 1,
            MovementKind::Exit => stats.total_exits += 1,
        }

        *stats
            .user_activity
            .entry(record.user_name.clone())
            .or_insert(0) += 1;
    }

    stats.top_user_activity = top_users(&stats.user_activity);
    stats
}

fn top_users(user_activity: &IndexMap<String, usize>) -> Vec<UserActivity> {
    let mut ranked: Vec<UserActivity> = user_activity
        .iter()
        .map(|(user_name, &count)| UserActivity {
            user_name: user_name.clone(),
            count,
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_USERS);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn product(product_type: &str, quantity: i32, expiry_offset_days: i64) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: format!("{} item", product_type),
            product_type: product_type.to_string(),
            description: String::new(),
            quantity,
            expiry_date: today() + Duration::days(expiry_offset_days),
            photo_url: None,
            user_id: "u-1".to_string(),
            user_name: "Ana".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn record(kind: MovementKind, user_name: &str) -> MovementRecord {
        MovementRecord {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            product_name: "Milk".to_string(),
            kind,
            quantity: 1,
            user_id: user_name.to_lowercase(),
            user_name: user_name.to_string(),
            note: None,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn empty_snapshot_yields_zeroed_statistics() {
        let stats = summarize(&[], &[], today());
        assert_eq!(stats, UsageStatistics::default());
        assert!(stats.products_by_type.is_empty());
        assert!(stats.user_activity.is_empty());
        assert!(stats.top_user_activity.is_empty());
    }

    #[test]
    fn mixed_snapshot_counts_every_field() {
        let products = vec![
            product("dairy", 5, -1),
            product("dairy", 3, 3),
            product("produce", 10, 40),
        ];
        let records = vec![
            record(MovementKind::Entry, "A"),
            record(MovementKind::Exit, "A"),
            record(MovementKind::Entry, "B"),
        ];

        let stats = summarize(&products, &records, today());

        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.total_quantity, 18);
        assert_eq!(stats.expired_products, 1);
        assert_eq!(stats.expiring_products, 1);
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.total_exits, 1);
        assert_eq!(stats.products_by_type["dairy"], 2);
        assert_eq!(stats.products_by_type["produce"], 1);
        assert_eq!(stats.user_activity["A"], 2);
        assert_eq!(stats.user_activity["B"], 1);
    }

    #[test]
    fn expiring_later_tier_is_not_counted_as_expiring() {
        // Day 12 shows a card badge but stays out of the expiring counter.
        let stats = summarize(&[product("dairy", 1, 12)], &[], today());
        assert_eq!(stats.expiring_products, 0);
        assert_eq!(stats.expired_products, 0);
    }

    #[test]
    fn zero_quantity_products_still_count() {
        let stats = summarize(&[product("dairy", 0, 3)], &[], today());
        assert_eq!(stats.total_products, 1);
        assert_eq!(stats.total_quantity, 0);
    }

    #[test]
    fn empty_type_label_is_a_distinct_key() {
        let products = vec![product("", 1, 50), product("dairy", 1, 50)];
        let stats = summarize(&products, &[], today());
        assert_eq!(stats.products_by_type[""], 1);
        assert_eq!(stats.products_by_type["dairy"], 1);
    }

    #[test]
    fn counters_are_permutation_independent() {
        let products = vec![
            product("dairy", 5, -1),
            product("produce", 10, 40),
            product("dairy", 3, 3),
        ];
        let records = vec![
            record(MovementKind::Entry, "A"),
            record(MovementKind::Exit, "A"),
            record(MovementKind::Entry, "B"),
        ];

        let forward = summarize(&products, &records, today());

        let mut products_rev = products.clone();
        products_rev.reverse();
        let mut records_rev = records.clone();
        records_rev.reverse();
        let reversed = summarize(&products_rev, &records_rev, today());

        assert_eq!(forward.total_products, reversed.total_products);
        assert_eq!(forward.total_quantity, reversed.total_quantity);
        assert_eq!(forward.expired_products, reversed.expired_products);
        assert_eq!(forward.expiring_products, reversed.expiring_products);
        assert_eq!(forward.total_entries, reversed.total_entries);
        assert_eq!(forward.total_exits, reversed.total_exits);

        // Maps hold the same associations even though first-seen order differs.
        for (key, count) in &forward.products_by_type {
            assert_eq!(reversed.products_by_type[key], *count);
        }
        for (key, count) in &forward.user_activity {
            assert_eq!(reversed.user_activity[key], *count);
        }
    }

    #[test]
    fn summarize_is_idempotent() {
        let products = vec![product("dairy", 2, 1)];
        let records = vec![record(MovementKind::Exit, "A")];
        assert_eq!(
            summarize(&products, &records, today()),
            summarize(&products, &records, today())
        );
    }

    #[test]
    fn top_users_ranks_by_count_descending() {
        let mut records = Vec::new();
        for _ in 0..3 {
            records.push(record(MovementKind::Entry, "B"));
        }
        records.push(record(MovementKind::Entry, "A"));

        let stats = summarize(&[], &records, today());
        let names: Vec<&str> = stats
            .top_user_activity
            .iter()
            .map(|u| u.user_name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(stats.top_user_activity[0].count, 3);
    }

    #[test]
    fn top_users_ties_keep_first_seen_order() {
        let records = vec![
            record(MovementKind::Entry, "B"),
            record(MovementKind::Exit, "A"),
            record(MovementKind::Entry, "C"),
        ];
        let stats = summarize(&[], &records, today());
        let names: Vec<&str> = stats
            .top_user_activity
            .iter()
            .map(|u| u.user_name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn top_users_truncates_to_ten() {
        let records: Vec<MovementRecord> = (0..15)
            .map(|i| record(MovementKind::Entry, &format!("user-{i:02}")))
            .collect();
        let stats = summarize(&[], &records, today());
        assert_eq!(stats.user_activity.len(), 15);
        assert_eq!(stats.top_user_activity.len(), TOP_USERS);
    }
}
