//! FitLedger Engine - The rewards ledger and its helpers
//!
//! `RewardsLedger` is the single authority over the points balance and
//! every piece of state that grants or consumes points. UI layers call
//! its operations and render the returned outcomes; they never touch
//! raw storage keys.

pub mod codes;
pub mod keys;
pub mod ledger;
pub mod pricing;

pub use ledger::{ClaimOutcome, Redemption, RewardsLedger, SpendOutcome};
