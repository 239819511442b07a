use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::Product;

/// Days-from-today upper bound of the "expiring soon" window (inclusive).
pub const SOON_WINDOW_DAYS: i64 = 7;
/// Days-from-today upper bound of the "expiring later" window (inclusive).
pub const LATER_WINDOW_DAYS: i64 = 30;

/// Urgency of a product's expiry date relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryTier {
    Expired,
    ExpiringSoon,
    ExpiringLater,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpiryStatus {
    pub tier: ExpiryTier,
    /// Whole calendar days from `today` to the expiry date; negative once past.
    pub days_offset: i64,
}

/// Classifies an expiry date against an explicit reference day.
///
/// `today` is always passed in rather than read from the system clock, so the
/// result is a pure function of its inputs.
pub fn classify(expiry_date: NaiveDate, today: NaiveDate) -> ExpiryStatus {
    let days_offset = (expiry_date - today).num_days();

    let tier = if days_offset < 0 {
        ExpiryTier::Expired
    } else if days_offset <= SOON_WINDOW_DAYS {
        ExpiryTier::ExpiringSoon
    } else if days_offset <= LATER_WINDOW_DAYS {
        ExpiryTier::ExpiringLater
    } else {
        ExpiryTier::Normal
    };

    ExpiryStatus { tier, days_offset }
}

// ── Alerts ────────────────────────────────────────────────────────────────────

/// One product surfaced in the expiry alert banner.
#[derive(Debug, Clone, Serialize)]
pub struct ExpiryAlert {
    pub id: Uuid,
    pub name: String,
    pub days_offset: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExpiryAlerts {
    pub expired: Vec<ExpiryAlert>,
    pub expiring_soon: Vec<ExpiryAlert>,
}

/// Splits the product snapshot into the two alert lists: already expired, and
/// expiring within the soon window. Products in later tiers are not alerted.
pub fn alerts(products: &[Product], today: NaiveDate) -> ExpiryAlerts {
    let mut out = ExpiryAlerts::default();

    for product in products {
        let status = classify(product.expiry_date, today);
        let alert = ExpiryAlert {
            id: product.id,
            name: product.name.clone(),
            days_offset: status.days_offset,
        };
        match status.tier {
            ExpiryTier::Expired => out.expired.push(alert),
            ExpiryTier::ExpiringSoon => out.expiring_soon.push(alert),
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(offset: i64) -> NaiveDate {
        today() + Duration::days(offset)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn past_dates_are_expired_with_negative_offset() {
        for offset in [-1, -7, -365] {
            let status = classify(day(offset), today());
            assert_eq!(status.tier, ExpiryTier::Expired);
            assert_eq!(status.days_offset, offset);
        }
    }

    #[test]
    fn same_day_counts_as_expiring_soon() {
        let status = classify(today(), today());
        assert_eq!(status.tier, ExpiryTier::ExpiringSoon);
        assert_eq!(status.days_offset, 0);
    }

    #[test]
    fn soon_window_is_inclusive_through_day_seven() {
        for offset in 0..=7 {
            assert_eq!(classify(day(offset), today()).tier, ExpiryTier::ExpiringSoon);
        }
        assert_eq!(classify(day(8), today()).tier, ExpiryTier::ExpiringLater);
    }

    #[test]
    fn later_window_runs_from_eight_through_thirty() {
        for offset in [8, 15, 30] {
            assert_eq!(classify(day(offset), today()).tier, ExpiryTier::ExpiringLater);
        }
        assert_eq!(classify(day(31), today()).tier, ExpiryTier::Normal);
    }

    #[test]
    fn far_future_dates_are_normal() {
        let status = classify(day(365), today());
        assert_eq!(status.tier, ExpiryTier::Normal);
        assert_eq!(status.days_offset, 365);
    }

    #[test]
    fn offset_spans_month_and_year_boundaries() {
        let dec_30 = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let jan_2 = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert_eq!(classify(jan_2, dec_30).days_offset, 3);

        // 2024 is a leap year: Feb 28 → Mar 1 is two days.
        let feb_28 = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let mar_1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(classify(mar_1, feb_28).days_offset, 2);
    }

    #[test]
    fn classify_is_deterministic() {
        let a = classify(day(5), today());
        let b = classify(day(5), today());
        assert_eq!(a, b);
    }
}
