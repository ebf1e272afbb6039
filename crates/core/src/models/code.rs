//! Discount codes, shop coupons, and the redemption history

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Discount codes stay valid for 30 days after generation
pub const DISCOUNT_CODE_VALIDITY_DAYS: i64 = 30;
/// Shop coupons stay valid for 60 days after purchase
pub const COUPON_VALIDITY_DAYS: i64 = 60;

/// A website discount code minted by redeeming points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    pub code: String,
    pub name: String,
    pub discount_percent: u8,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// One-time-use flag. The model carries it but no operation flips
    /// it: there is no checkout consumption flow.
    pub used: bool,
}

impl DiscountCode {
    pub fn new(code: String, name: String, discount_percent: u8, now: DateTime<Utc>) -> Self {
        Self {
            code,
            name,
            discount_percent,
            generated_at: now,
            expires_at: now + Duration::days(DISCOUNT_CODE_VALIDITY_DAYS),
            used: false,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Usable right now: not consumed and not past expiry
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.used && !self.is_expired(now)
    }
}

/// A shop item purchased with points, issued as a coupon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRedemption {
    pub item_id: String,
    pub item_name: String,
    pub coupon_code: String,
    pub points_spent: u64,
    pub purchased_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CouponRedemption {
    pub fn new(
        item_id: String,
        item_name: String,
        coupon_code: String,
        points_spent: u64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id,
            item_name,
            coupon_code,
            points_spent,
            purchased_at: now,
            expires_at: now + Duration::days(COUPON_VALIDITY_DAYS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// What a history entry was spent on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionKind {
    DiscountCode,
    ShopCoupon,
}

/// One line of the append-only redemption history (most recent first).
/// Entries are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionEntry {
    pub kind: RedemptionKind,
    pub name: String,
    pub code: String,
    pub cost: u64,
    pub date: DateTime<Utc>,
}

/// Sum of points spent across the whole history
pub fn total_redeemed(history: &[RedemptionEntry]) -> u64 {
    history.iter().map(|entry| entry.cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_code_expiry_window() {
        let now = Utc::now();
        let code = DiscountCode::new("FITCOACH10-ABC123".into(), "10% Off".into(), 10, now);
        assert!(code.is_active(now));
        assert!(code.is_active(now + Duration::days(30)));
        assert!(!code.is_active(now + Duration::days(31)));
    }

    #[test]
    fn test_used_code_is_not_active() {
        let now = Utc::now();
        let mut code = DiscountCode::new("FITCOACH20-XYZ789".into(), "20% Off".into(), 20, now);
        code.used = true;
        assert!(!code.is_active(now));
    }

    #[test]
    fn test_coupon_expires_after_sixty_days() {
        let now = Utc::now();
        let coupon = CouponRedemption::new(
            "yoga_mat".into(),
            "Yoga Mat Premium".into(),
            "YOGAMAT-A1B2C3".into(),
            1000,
            now,
        );
        assert!(!coupon.is_expired(now + Duration::days(60)));
        assert!(coupon.is_expired(now + Duration::days(61)));
    }

    #[test]
    fn test_total_redeemed_sums_costs() {
        let now = Utc::now();
        let history = vec![
            RedemptionEntry {
                kind: RedemptionKind::DiscountCode,
                name: "10% Off".into(),
                code: "FITCOACH10-AAAAAA".into(),
                cost: 1000,
                date: now,
            },
            RedemptionEntry {
                kind: RedemptionKind::ShopCoupon,
                name: "Yoga Mat Premium".into(),
                code: "YOGAMAT-BBBBBB".into(),
                cost: 1000,
                date: now,
            },
        ];
        assert_eq!(total_redeemed(&history), 2000);
    }
}
