//! Storage keys owned by the ledger.
//!
//! No other component reads or writes these; screens go through the
//! ledger operations.

pub const USER_POINTS: &str = "user_points";
pub const CLAIMED_REWARDS: &str = "claimed_rewards";
pub const LOGIN_STREAK: &str = "login_streak";
pub const REFERRAL_COUNT: &str = "referral_count";
pub const PHOTO_LOG: &str = "photo_log";
pub const DISCOUNT_CODES: &str = "discount_codes";
pub const PURCHASED_ITEMS: &str = "purchased_items";
pub const REDEMPTION_HISTORY: &str = "redemption_history";

/// Every key the ledger owns, for full data wipes
pub const ALL_KEYS: &[&str] = &[
    USER_POINTS,
    CLAIMED_REWARDS,
    LOGIN_STREAK,
    REFERRAL_COUNT,
    PHOTO_LOG,
    DISCOUNT_CODES,
    PURCHASED_ITEMS,
    REDEMPTION_HISTORY,
];
