//! Body metrics derived from the patient profile.
//!
//! BMI, Mosteller BSA, Devine ideal body weight and adjusted body weight.
//! ABW is computed when BMI >= 30 and IBW is available; a merely
//! IBW-exceeding weight does not trigger it.

use serde::{Deserialize, Serialize};

use crate::derive::{Derived, Interpretation, Severity};
use crate::models::{PatientProfile, Sex};

const CM_PER_INCH: f64 = 2.54;

/// BMI bands. The thresholds 18.5 / 25 / 30 partition the positive axis
/// with no gap or overlap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Underweight and Overweight share the warning tier.
    pub fn severity(&self) -> Severity {
        match self {
            BmiCategory::Underweight | BmiCategory::Overweight => Severity::Warning,
            BmiCategory::Normal => Severity::Normal,
            BmiCategory::Obese => Severity::Danger,
        }
    }

    pub fn interpretation(&self) -> Interpretation {
        Interpretation::new(self.label(), self.severity())
    }
}

/// Derived body metrics for one profile state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyMetrics {
    /// BMI in kg/m², 2 decimals
    pub bmi: Derived,
    /// Mosteller BSA in m², 2 decimals
    pub bsa: Derived,
    /// Devine ideal body weight in kg, 1 decimal
    pub ideal_weight: Derived,
    /// Adjusted body weight in kg, 1 decimal
    pub adjusted_weight: Derived,
    /// BMI band, when BMI is available
    pub category: Option<BmiCategory>,
}

/// Compute all body metrics from the profile.
pub fn body_metrics(profile: &PatientProfile) -> BodyMetrics {
    let (bmi, bsa, category) = match (profile.height(), profile.weight()) {
        (Some(h), Some(w)) => {
            let height_m = h / 100.0;
            let bmi = w / (height_m * height_m);
            let bsa = (h * w / 3600.0).sqrt();
            (
                Derived::from_value(bmi),
                Derived::from_value(bsa),
                Some(BmiCategory::from_bmi(bmi)),
            )
        }
        _ => (Derived::Unavailable, Derived::Unavailable, None),
    };

    let ideal_weight = profile
        .height()
        .and_then(|h| ideal_body_weight(h, profile.sex))
        .into();

    let adjusted_weight = adjusted_body_weight(profile.weight(), ideal_weight, category);

    BodyMetrics {
        bmi,
        bsa,
        ideal_weight,
        adjusted_weight,
        category,
    }
}

/// Devine formula. Only defined above 5 feet of height.
fn ideal_body_weight(height_cm: f64, sex: Sex) -> Option<f64> {
    let inches = height_cm / CM_PER_INCH;
    if inches <= 60.0 {
        return None;
    }
    let base = match sex {
        Sex::Male => 50.0,
        Sex::Female => 45.5,
    };
    Some(base + 2.3 * (inches - 60.0))
}

fn adjusted_body_weight(
    weight: Option<f64>,
    ideal: Derived,
    category: Option<BmiCategory>,
) -> Derived {
    match (weight, ideal.value(), category) {
        (Some(w), Some(ibw), Some(BmiCategory::Obese)) => {
            Derived::from_value(ibw + 0.4 * (w - ibw))
        }
        _ => Derived::Unavailable,
    }
}
