//! Patient profile model.

use serde::{Deserialize, Serialize};

/// Patient sex as used by the clearance and body-weight formulas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

/// Shared patient measurements feeding several derivations.
///
/// Every numeric field is either a valid positive number or unset; unset
/// propagates to an unavailable result in each dependent derivation rather
/// than raising an error. The profile is owned by the session and passed
/// immutably to each calculator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PatientProfile {
    /// Height in cm
    pub height_cm: Option<f64>,
    /// Weight in kg
    pub weight_kg: Option<f64>,
    /// Age in years
    pub age_years: Option<f64>,
    /// Serum creatinine in µmol/L
    pub serum_creatinine_umol_l: Option<f64>,
    /// Patient sex
    pub sex: Sex,
}

impl PatientProfile {
    /// Height, if present and strictly positive.
    pub fn height(&self) -> Option<f64> {
        self.height_cm.filter(|h| *h > 0.0)
    }

    /// Weight, if present and strictly positive.
    pub fn weight(&self) -> Option<f64> {
        self.weight_kg.filter(|w| *w > 0.0)
    }

    /// Age, if present and strictly positive.
    pub fn age(&self) -> Option<f64> {
        self.age_years.filter(|a| *a > 0.0)
    }

    /// Serum creatinine, if present and strictly positive.
    pub fn creatinine(&self) -> Option<f64> {
        self.serum_creatinine_umol_l.filter(|c| *c > 0.0)
    }
}
