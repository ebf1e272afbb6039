//! Login streak state and its daily transition

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consecutive-day login counter.
///
/// `last_login` is a calendar date only; the streak is advanced at most
/// once per calendar day, at session start, never per screen view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginStreak {
    pub count: u32,
    pub last_login: Option<NaiveDate>,
}

impl LoginStreak {
    /// Apply the daily transition for `today` and return the new state.
    ///
    /// - same day as `last_login`: unchanged (idempotent within a day)
    /// - exactly one calendar day later: count + 1
    /// - any larger gap, or no prior login: count resets to 1
    ///
    /// `last_login` is always set to `today` after evaluation.
    #[must_use]
    pub fn advance(&self, today: NaiveDate) -> LoginStreak {
        let count = match self.last_login {
            Some(last) if last == today => return self.clone(),
            Some(last) if today - last == chrono::Duration::days(1) => self.count + 1,
            _ => 1,
        };
        LoginStreak {
            count,
            last_login: Some(today),
        }
    }

    /// Whether a login was already recorded for `today`
    pub fn logged_in_on(&self, today: NaiveDate) -> bool {
        self.last_login == Some(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_consecutive_days_increment() {
        let s = LoginStreak::default();
        let s = s.advance(day(1));
        let s = s.advance(day(2));
        let s = s.advance(day(3));
        assert_eq!(s.count, 3);
        assert_eq!(s.last_login, Some(day(3)));
    }

    #[test]
    fn test_gap_resets_to_one() {
        let s = LoginStreak::default().advance(day(1));
        let s = s.advance(day(6));
        assert_eq!(s.count, 1);
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let s = LoginStreak::default().advance(day(1));
        let again = s.advance(day(1));
        assert_eq!(again, s);
        let third = again.advance(day(1));
        assert_eq!(third.count, 1);
    }

    #[test]
    fn test_first_login_starts_at_one() {
        let s = LoginStreak::default().advance(day(10));
        assert_eq!(s.count, 1);
        assert!(s.logged_in_on(day(10)));
    }

    #[test]
    fn test_month_boundary_counts_as_consecutive() {
        let s = LoginStreak::default().advance(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        let s = s.advance(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(s.count, 2);
    }
}
