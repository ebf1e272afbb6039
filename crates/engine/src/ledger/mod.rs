//! The rewards ledger: single authority over points and point-granting state

mod state;

pub use state::LedgerState;

use crate::{codes, keys};
use chrono::{DateTime, NaiveDate, Utc};
use fitledger_core::{
    ClaimedRewards, CouponRedemption, DiscountCatalogEntry, DiscountCode, LoginStreak, PhotoLog,
    Points, RedemptionEntry, RedemptionKind, Result, RewardDefinition, RewardKind, ShopItem,
};
use fitledger_persistence::KeyValueStore;
use tracing::{info, warn};

/// Outcome of a reward claim. Claiming something already claimed is a
/// normal no-op, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    Accepted { new_balance: Points },
    AlreadyClaimed,
    /// Milestone condition not met yet, or the reward is granted
    /// through an action rather than a claim button
    NotEligible,
}

/// Outcome of a plain points debit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendOutcome {
    Accepted { new_balance: Points },
    /// Balance untouched; `shortfall` is how many points were missing
    Insufficient { shortfall: u64 },
}

/// Outcome of a redemption that issues a code or coupon
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redemption<T> {
    Accepted { new_balance: Points, issued: T },
    Insufficient { shortfall: u64 },
}

/// Owns the hydrated ledger state and write-throughs every mutation.
///
/// Mutating operations take `&mut self`, so rapid duplicate submissions
/// from a UI cannot interleave; the per-day and per-reward gates make
/// the claim operations idempotent on top of that.
pub struct RewardsLedger<S: KeyValueStore> {
    store: S,
    state: LedgerState,
}

impl<S: KeyValueStore> RewardsLedger<S> {
    /// Hydrate a ledger from the store. Never blocks app usage: read
    /// failures and corrupt values degrade to defaults.
    pub async fn load(store: S) -> Self {
        let state = LedgerState::hydrate(&store).await;
        info!(
            balance = state.balance.get(),
            streak = state.streak.count,
            "ledger hydrated"
        );
        Self { store, state }
    }

    // ── Session ─────────────────────────────────────────────────────

    /// Apply the daily login transition for `today` and return the
    /// updated streak count. Idempotent within a calendar day. Does not
    /// award points; the daily bonus is a separate explicit claim.
    pub async fn evaluate_daily_login(&mut self, today: NaiveDate) -> u32 {
        let next = self.state.streak.advance(today);
        if next != self.state.streak {
            self.state.streak = next;
            info!(streak = self.state.streak.count, "daily login evaluated");
            self.persist(&[keys::LOGIN_STREAK]).await;
        }
        self.state.streak.count
    }

    // ── Claims and spending ─────────────────────────────────────────

    /// Claim a reward from the catalog. Gating depends on the reward
    /// kind; an already-claimed reward is silently rejected.
    pub async fn claim_reward(&mut self, reward: &RewardDefinition, today: NaiveDate) -> ClaimOutcome {
        match reward.kind {
            RewardKind::Daily => {
                if self.state.claimed.daily_claimed(today) {
                    return ClaimOutcome::AlreadyClaimed;
                }
                self.state.claimed.daily_claimed_on = Some(today);
            }
            RewardKind::OneTime => {
                if self.state.claimed.contains(&reward.id) {
                    return ClaimOutcome::AlreadyClaimed;
                }
                self.state.claimed.record(&reward.id);
            }
            RewardKind::StreakMilestone { days } => {
                if self.state.claimed.contains(&reward.id) {
                    return ClaimOutcome::AlreadyClaimed;
                }
                if self.state.streak.count < days {
                    return ClaimOutcome::NotEligible;
                }
                self.state.claimed.record(&reward.id);
            }
            RewardKind::ReferralMilestone { count } => {
                if self.state.claimed.contains(&reward.id) {
                    return ClaimOutcome::AlreadyClaimed;
                }
                if self.state.referrals < count {
                    return ClaimOutcome::NotEligible;
                }
                self.state.claimed.record(&reward.id);
            }
            // Action rewards are granted through record_photo_upload /
            // record_referral, not through a claim
            RewardKind::PhotoUpload | RewardKind::Referral => return ClaimOutcome::NotEligible,
        }

        self.state.balance = self.state.balance.credited(reward.points);
        info!(
            reward = %reward.id,
            points = reward.points,
            balance = self.state.balance.get(),
            "reward claimed"
        );
        self.persist(&[keys::USER_POINTS, keys::CLAIMED_REWARDS]).await;
        ClaimOutcome::Accepted {
            new_balance: self.state.balance,
        }
    }

    /// Debit `amount` points. Rejects with the exact shortfall and no
    /// mutation when the balance cannot cover it.
    pub async fn spend_points(&mut self, amount: u64) -> SpendOutcome {
        match self.state.balance.checked_debit(amount) {
            Some(new_balance) => {
                self.state.balance = new_balance;
                info!(amount, balance = new_balance.get(), "points spent");
                self.persist(&[keys::USER_POINTS]).await;
                SpendOutcome::Accepted { new_balance }
            }
            None => SpendOutcome::Insufficient {
                shortfall: self.state.balance.shortfall(amount),
            },
        }
    }

    // ── Redemptions ─────────────────────────────────────────────────

    /// Redeem points for a website discount code. The debit, the minted
    /// code, and the history entry commit together or not at all.
    pub async fn redeem_discount_code(
        &mut self,
        entry: &DiscountCatalogEntry,
        now: DateTime<Utc>,
    ) -> Redemption<DiscountCode> {
        let cost = entry.cost.get();
        let Some(new_balance) = self.state.balance.checked_debit(cost) else {
            return Redemption::Insufficient {
                shortfall: self.state.balance.shortfall(cost),
            };
        };

        let existing: Vec<String> = self.state.codes.iter().map(|c| c.code.clone()).collect();
        let code = codes::generate_discount_code(entry.discount.get(), &existing);
        let issued = DiscountCode::new(code.clone(), entry.name.to_string(), entry.discount.get(), now);

        self.state.balance = new_balance;
        self.state.codes.insert(0, issued.clone());
        self.state.history.insert(
            0,
            RedemptionEntry {
                kind: RedemptionKind::DiscountCode,
                name: entry.name.to_string(),
                code,
                cost,
                date: now,
            },
        );

        info!(
            code = %issued.code,
            cost,
            balance = new_balance.get(),
            "discount code redeemed"
        );
        self.persist(&[keys::USER_POINTS, keys::DISCOUNT_CODES, keys::REDEMPTION_HISTORY])
            .await;
        Redemption::Accepted {
            new_balance,
            issued,
        }
    }

    /// Purchase a points-shop item, issuing a partner coupon
    pub async fn purchase_shop_item(
        &mut self,
        item: &ShopItem,
        now: DateTime<Utc>,
    ) -> Redemption<CouponRedemption> {
        let cost = item.cost.get();
        let Some(new_balance) = self.state.balance.checked_debit(cost) else {
            return Redemption::Insufficient {
                shortfall: self.state.balance.shortfall(cost),
            };
        };

        let existing: Vec<String> = self
            .state
            .coupons
            .iter()
            .map(|c| c.coupon_code.clone())
            .collect();
        let code = codes::generate_coupon_code(item.name, &existing);
        let issued = CouponRedemption::new(
            item.id.to_string(),
            item.name.to_string(),
            code.clone(),
            cost,
            now,
        );

        self.state.balance = new_balance;
        self.state.coupons.insert(0, issued.clone());
        self.state.history.insert(
            0,
            RedemptionEntry {
                kind: RedemptionKind::ShopCoupon,
                name: item.name.to_string(),
                code,
                cost,
                date: now,
            },
        );

        info!(
            coupon = %issued.coupon_code,
            cost,
            balance = new_balance.get(),
            "shop item purchased"
        );
        self.persist(&[keys::USER_POINTS, keys::PURCHASED_ITEMS, keys::REDEMPTION_HISTORY])
            .await;
        Redemption::Accepted {
            new_balance,
            issued,
        }
    }

    // ── Action rewards ──────────────────────────────────────────────

    /// Record a progress photo upload and credit the fixed award.
    /// Returns 0 when an upload is not due yet.
    pub async fn record_photo_upload(&mut self, now: DateTime<Utc>) -> u64 {
        if !self.state.photos.is_due(now) {
            return 0;
        }
        self.state.photos.last_upload = Some(now);
        self.state.balance = self.state.balance.credited(fitledger_core::PHOTO_UPLOAD_POINTS);
        info!(balance = self.state.balance.get(), "progress photo recorded");
        self.persist(&[keys::USER_POINTS, keys::PHOTO_LOG]).await;
        fitledger_core::PHOTO_UPLOAD_POINTS
    }

    /// Record one successful referral and credit the fixed award
    pub async fn record_referral(&mut self) -> u64 {
        self.state.referrals += 1;
        self.state.balance = self.state.balance.credited(fitledger_core::REFERRAL_POINTS);
        info!(
            referrals = self.state.referrals,
            balance = self.state.balance.get(),
            "referral recorded"
        );
        self.persist(&[keys::USER_POINTS, keys::REFERRAL_COUNT]).await;
        fitledger_core::REFERRAL_POINTS
    }

    /// Shareable referral code for the given display name
    pub fn referral_code(&self, user_name: &str) -> String {
        codes::generate_referral_code(user_name)
    }

    // ── Read accessors ──────────────────────────────────────────────

    pub fn balance(&self) -> Points {
        self.state.balance
    }

    pub fn streak(&self) -> &LoginStreak {
        &self.state.streak
    }

    pub fn claimed(&self) -> &ClaimedRewards {
        &self.state.claimed
    }

    pub fn referral_count(&self) -> u32 {
        self.state.referrals
    }

    pub fn photo_log(&self) -> &PhotoLog {
        &self.state.photos
    }

    pub fn photo_due(&self, now: DateTime<Utc>) -> bool {
        self.state.photos.is_due(now)
    }

    pub fn codes(&self) -> &[DiscountCode] {
        &self.state.codes
    }

    /// Codes that are neither used nor expired
    pub fn active_codes(&self, now: DateTime<Utc>) -> Vec<&DiscountCode> {
        self.state.codes.iter().filter(|c| c.is_active(now)).collect()
    }

    pub fn coupons(&self) -> &[CouponRedemption] {
        &self.state.coupons
    }

    /// Redemption history, most recent first
    pub fn history(&self) -> &[RedemptionEntry] {
        &self.state.history
    }

    /// Lifetime points spent across all redemptions
    pub fn total_redeemed(&self) -> u64 {
        fitledger_core::total_redeemed(&self.state.history)
    }

    /// Display status for a catalog reward: true when it should render
    /// as claimed. Derived rewards recompute from their counters.
    pub fn reward_claimed(&self, reward: &RewardDefinition, now: DateTime<Utc>) -> bool {
        match reward.kind {
            RewardKind::Daily => self.state.claimed.daily_claimed(now.date_naive()),
            RewardKind::OneTime => self.state.claimed.contains(&reward.id),
            RewardKind::StreakMilestone { .. } | RewardKind::ReferralMilestone { .. } => {
                self.state.claimed.contains(&reward.id)
            }
            RewardKind::PhotoUpload => !self.state.photos.is_due(now),
            RewardKind::Referral => false,
        }
    }

    // ── Maintenance ─────────────────────────────────────────────────

    /// Direct access to the underlying store
    pub fn store_ref(&self) -> &S {
        &self.store
    }

    /// Consume the ledger, returning the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Erase every ledger key and reset in-memory state to defaults
    pub async fn wipe(&mut self) -> Result<()> {
        self.store.remove_many(keys::ALL_KEYS).await?;
        self.state = LedgerState::default();
        info!("ledger wiped");
        Ok(())
    }

    /// Best-effort write-through of the given keys. A failed write
    /// leaves the in-memory state authoritative and is only logged;
    /// it never interrupts the caller.
    async fn persist(&self, changed: &[&str]) {
        let entries = match self.state.stage(changed) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("failed to serialize ledger state: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set_many(&entries).await {
            warn!(keys = ?changed, "write-through failed: {}", e);
        }
    }
}
