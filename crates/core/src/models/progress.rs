//! Progress tracking: monthly photo state and BMI computation

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A monthly photo upload becomes due again after 30 days
pub const PHOTO_DUE_AFTER_DAYS: i64 = 30;

/// Monthly progress photo state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoLog {
    pub last_upload: Option<DateTime<Utc>>,
}

impl PhotoLog {
    /// Due when no photo was ever uploaded, or 30+ days have elapsed
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_upload {
            None => true,
            Some(last) => now - last >= Duration::days(PHOTO_DUE_AFTER_DAYS),
        }
    }
}

/// BMI weight category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::NormalWeight
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// BMI from weight in kg and height in cm, rounded to one decimal place.
/// Returns `None` when either input is zero or non-finite.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 || !weight_kg.is_finite() || !height_cm.is_finite() {
        return None;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Some((bmi * 10.0).round() / 10.0)
}
