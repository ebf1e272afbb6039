//! Drives one app session against an in-memory store: hydrate the
//! ledger, evaluate the daily login, claim what is claimable, redeem a
//! code, and print the resulting state.
//!
//! Run with: cargo run -p fitledger-engine --example daily_session

use chrono::Utc;
use fitledger_core::{discount_code_catalog, reward_catalog};
use fitledger_engine::{ClaimOutcome, Redemption, RewardsLedger};
use fitledger_persistence::MemoryStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitledger_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let now = Utc::now();
    let today = now.date_naive();

    let mut ledger = RewardsLedger::load(MemoryStore::new()).await;
    let streak = ledger.evaluate_daily_login(today).await;
    println!("Login streak: {} day(s)", streak);

    for category in reward_catalog() {
        for reward in category.rewards {
            match ledger.claim_reward(&reward, today).await {
                ClaimOutcome::Accepted { new_balance } => {
                    println!("Claimed '{}' (+{}) -> {}", reward.title, reward.points, new_balance)
                }
                ClaimOutcome::AlreadyClaimed => println!("'{}' already claimed", reward.title),
                ClaimOutcome::NotEligible => {}
            }
        }
    }

    // Simulate a few referrals so a redemption can succeed
    for _ in 0..4 {
        ledger.record_referral().await;
    }
    println!("Balance after referrals: {}", ledger.balance());

    let catalog = discount_code_catalog();
    let entry = &catalog[0];
    match ledger.redeem_discount_code(entry, now).await {
        Redemption::Accepted { new_balance, issued } => {
            println!("Redeemed '{}': code {} -> {}", entry.name, issued.code, new_balance);
        }
        Redemption::Insufficient { shortfall } => {
            println!("Need {} more points for '{}'", shortfall, entry.name);
        }
    }

    println!("History entries: {}", ledger.history().len());
    println!("Total points redeemed: {}", ledger.total_redeemed());
    println!("Active codes: {}", ledger.active_codes(now).len());

    Ok(())
}
