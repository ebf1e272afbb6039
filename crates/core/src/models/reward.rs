//! Reward definitions and claim-tracking state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fixed award for an accepted monthly progress photo
pub const PHOTO_UPLOAD_POINTS: u64 = 200;
/// Fixed award per simulated successful referral
pub const REFERRAL_POINTS: u64 = 300;

/// How a reward's eligibility is gated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    /// Claimable once per calendar day (daily login bonus)
    Daily,
    /// Claimable exactly once, recorded in the claimed set
    OneTime,
    /// Unlocked by reaching a login streak; credited at most once
    StreakMilestone { days: u32 },
    /// Unlocked by reaching a referral count; credited at most once
    ReferralMilestone { count: u32 },
    /// Granted through the photo-upload action, not a claim button
    PhotoUpload,
    /// Granted through the referral action, not a claim button
    Referral,
}

/// A single entry in the reward catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardDefinition {
    pub id: String,
    pub title: String,
    pub points: u64,
    pub kind: RewardKind,
}

impl RewardDefinition {
    pub fn new(id: &str, title: &str, points: u64, kind: RewardKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            points,
            kind,
        }
    }
}

/// A display grouping of rewards
#[derive(Debug, Clone)]
pub struct RewardCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub rewards: Vec<RewardDefinition>,
}

/// The static reward catalog shown on the rewards screen
pub fn reward_catalog() -> Vec<RewardCategory> {
    vec![
        RewardCategory {
            id: "daily",
            title: "Daily Login Rewards",
            rewards: vec![
                RewardDefinition::new("daily", "Daily Login Bonus", 10, RewardKind::Daily),
                RewardDefinition::new(
                    "streak_7",
                    "7-Day Login Streak",
                    50,
                    RewardKind::StreakMilestone { days: 7 },
                ),
                RewardDefinition::new(
                    "streak_30",
                    "30-Day Login Streak",
                    500,
                    RewardKind::StreakMilestone { days: 30 },
                ),
            ],
        },
        RewardCategory {
            id: "monthly",
            title: "Monthly Progress Photos",
            rewards: vec![
                RewardDefinition::new(
                    "photo_monthly",
                    "Upload Monthly Progress Photo",
                    PHOTO_UPLOAD_POINTS,
                    RewardKind::PhotoUpload,
                ),
                RewardDefinition::new(
                    "photo_consistency",
                    "3-Month Photo Consistency",
                    750,
                    RewardKind::OneTime,
                ),
            ],
        },
        RewardCategory {
            id: "referral",
            title: "Referral Program",
            rewards: vec![
                RewardDefinition::new("refer", "Refer a Friend", REFERRAL_POINTS, RewardKind::Referral),
                RewardDefinition::new(
                    "referral_5",
                    "5 Successful Referrals",
                    1000,
                    RewardKind::ReferralMilestone { count: 5 },
                ),
                RewardDefinition::new(
                    "referral_10",
                    "10 Referral Champion",
                    2000,
                    RewardKind::ReferralMilestone { count: 10 },
                ),
            ],
        },
    ]
}

/// Persisted record of which rewards have already been claimed.
///
/// Only one-shot grants live in `one_time`; derived statuses (photo due,
/// referral thresholds) are recomputed from their counters on every read.
/// The daily bonus is gated by calendar date rather than set membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedRewards {
    #[serde(default)]
    pub one_time: BTreeSet<String>,
    #[serde(default)]
    pub daily_claimed_on: Option<NaiveDate>,
}

impl ClaimedRewards {
    pub fn contains(&self, reward_id: &str) -> bool {
        self.one_time.contains(reward_id)
    }

    /// Record a one-shot grant. Inserting twice is a no-op.
    pub fn record(&mut self, reward_id: &str) {
        self.one_time.insert(reward_id.to_string());
    }

    pub fn daily_claimed(&self, today: NaiveDate) -> bool {
        self.daily_claimed_on == Some(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_idempotent() {
        let mut claimed = ClaimedRewards::default();
        claimed.record("streak_7");
        claimed.record("streak_7");
        assert_eq!(claimed.one_time.len(), 1);
        assert!(claimed.contains("streak_7"));
    }

    #[test]
    fn test_daily_claimed_resets_across_days() {
        let d1 = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let claimed = ClaimedRewards {
            daily_claimed_on: Some(d1),
            ..Default::default()
        };
        assert!(claimed.daily_claimed(d1));
        assert!(!claimed.daily_claimed(d2));
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut seen = BTreeSet::new();
        for category in reward_catalog() {
            for reward in category.rewards {
                assert!(seen.insert(reward.id.clone()), "duplicate id {}", reward.id);
            }
        }
    }
}
