//! Shared type definitions and newtypes

use serde::{Deserialize, Serialize};

/// Points balance (unsigned by construction, so it can never go negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Points(pub u64);

impl Points {
    pub fn new(amount: u64) -> Self {
        Points(amount)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Credit points onto the balance
    pub fn credited(&self, amount: u64) -> Self {
        Points(self.0.saturating_add(amount))
    }

    /// Debit points from the balance; `None` if the balance is insufficient
    pub fn checked_debit(&self, amount: u64) -> Option<Self> {
        self.0.checked_sub(amount).map(Points)
    }

    /// How many more points are needed to cover `amount` (0 if covered)
    pub fn shortfall(&self, amount: u64) -> u64 {
        amount.saturating_sub(self.0)
    }
}

impl std::fmt::Display for Points {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pts", self.0)
    }
}

/// Currency amount in whole units (shop prices)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub u64);

impl Price {
    pub fn new(amount: u64) -> Self {
        Price(amount)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Percentage value (discount badges, code discounts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub u8);

impl Percent {
    pub fn new(value: u8) -> Self {
        Percent(value)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_debit_insufficient() {
        let balance = Points::new(10);
        assert_eq!(balance.checked_debit(11), None);
        assert_eq!(balance.checked_debit(10), Some(Points::new(0)));
    }

    #[test]
    fn test_shortfall() {
        let balance = Points::new(10);
        assert_eq!(balance.shortfall(1000), 990);
        assert_eq!(balance.shortfall(5), 0);
    }
}
