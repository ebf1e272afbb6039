//! Hydration and staging of the ledger's persisted state
//!
//! Every value lives under one flat key as a JSON string. Missing keys
//! hydrate to defaults; unparseable values also hydrate to defaults and
//! are overwritten in place so they cannot poison later sessions.

use crate::keys;
use fitledger_core::{
    ClaimedRewards, CouponRedemption, DiscountCode, LoginStreak, PhotoLog, Points,
    RedemptionEntry, Result,
};
use fitledger_persistence::KeyValueStore;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// The ledger's complete in-memory state
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    pub balance: Points,
    pub claimed: ClaimedRewards,
    pub streak: LoginStreak,
    pub referrals: u32,
    pub photos: PhotoLog,
    pub codes: Vec<DiscountCode>,
    pub coupons: Vec<CouponRedemption>,
    pub history: Vec<RedemptionEntry>,
}

impl LedgerState {
    /// Hydrate from the store. Never fails: read errors and corrupt
    /// values degrade to defaults, and corrupt keys are rewritten.
    pub async fn hydrate(store: &dyn KeyValueStore) -> LedgerState {
        let mut healed: Vec<&'static str> = Vec::new();

        let state = LedgerState {
            balance: read_or_default(store, keys::USER_POINTS, &mut healed).await,
            claimed: read_or_default(store, keys::CLAIMED_REWARDS, &mut healed).await,
            streak: read_or_default(store, keys::LOGIN_STREAK, &mut healed).await,
            referrals: read_or_default(store, keys::REFERRAL_COUNT, &mut healed).await,
            photos: read_or_default(store, keys::PHOTO_LOG, &mut healed).await,
            codes: read_or_default(store, keys::DISCOUNT_CODES, &mut healed).await,
            coupons: read_or_default(store, keys::PURCHASED_ITEMS, &mut healed).await,
            history: read_or_default(store, keys::REDEMPTION_HISTORY, &mut healed).await,
        };

        if !healed.is_empty() {
            debug!(keys = ?healed, "overwriting corrupt stored values with defaults");
            if let Ok(entries) = state.stage(&healed) {
                if let Err(e) = store.set_many(&entries).await {
                    warn!("self-heal write failed: {}", e);
                }
            }
        }

        state
    }

    /// Serialize the given keys into `(key, json)` pairs for a commit
    pub fn stage(&self, changed: &[&str]) -> Result<Vec<(String, String)>> {
        changed.iter()
            .map(|key| {
                let json = match *key {
                    keys::USER_POINTS => serde_json::to_string(&self.balance)?,
                    keys::CLAIMED_REWARDS => serde_json::to_string(&self.claimed)?,
                    keys::LOGIN_STREAK => serde_json::to_string(&self.streak)?,
                    keys::REFERRAL_COUNT => serde_json::to_string(&self.referrals)?,
                    keys::PHOTO_LOG => serde_json::to_string(&self.photos)?,
                    keys::DISCOUNT_CODES => serde_json::to_string(&self.codes)?,
                    keys::PURCHASED_ITEMS => serde_json::to_string(&self.coupons)?,
                    keys::REDEMPTION_HISTORY => serde_json::to_string(&self.history)?,
                    other => {
                        return Err(fitledger_core::Error::InvalidData(format!(
                            "unknown ledger key: {}",
                            other
                        )))
                    }
                };
                Ok((key.to_string(), json))
            })
            .collect()
    }
}

/// Read one key, falling back to `T::default()` on absence, read
/// failure, or a parse failure. Parse failures are queued for healing.
async fn read_or_default<T>(
    store: &dyn KeyValueStore,
    key: &'static str,
    healed: &mut Vec<&'static str>,
) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, "stored value failed to parse, resetting: {}", e);
                healed.push(key);
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, "read failed, assuming default: {}", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitledger_persistence::MemoryStore;

    #[tokio::test]
    async fn test_hydrate_empty_store_yields_defaults() {
        let store = MemoryStore::new();
        let state = LedgerState::hydrate(&store).await;
        assert_eq!(state.balance, Points(0));
        assert_eq!(state.streak.count, 0);
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_reads_prior_session() {
        let store = MemoryStore::with_entries([
            (keys::USER_POINTS.to_string(), "150".to_string()),
            (keys::REFERRAL_COUNT.to_string(), "3".to_string()),
        ]);
        let state = LedgerState::hydrate(&store).await;
        assert_eq!(state.balance, Points(150));
        assert_eq!(state.referrals, 3);
    }

    #[tokio::test]
    async fn test_corrupt_value_is_reset_and_healed() {
        let store = MemoryStore::with_entries([(
            keys::USER_POINTS.to_string(),
            "not json at all {".to_string(),
        )]);
        let state = LedgerState::hydrate(&store).await;
        assert_eq!(state.balance, Points(0));

        // The corrupt key was overwritten with the default
        let raw = store.get(keys::USER_POINTS).await.unwrap();
        assert_eq!(raw.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_stage_roundtrips_through_hydrate() {
        let store = MemoryStore::new();
        let mut state = LedgerState::default();
        state.balance = Points(420);
        state.referrals = 7;

        let entries = state
            .stage(&[keys::USER_POINTS, keys::REFERRAL_COUNT])
            .unwrap();
        store.set_many(&entries).await.unwrap();

        let rehydrated = LedgerState::hydrate(&store).await;
        assert_eq!(rehydrated.balance, Points(420));
        assert_eq!(rehydrated.referrals, 7);
    }
}
