//! Data models for FitLedger entities

mod catalog;
mod code;
mod progress;
mod reward;
mod streak;

pub use catalog::*;
pub use code::*;
pub use progress::*;
pub use reward::*;
pub use streak::*;
