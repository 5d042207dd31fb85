//! Renal function estimates.
//!
//! Cockcroft-Gault creatinine clearance and CKD-EPI 2021 eGFR. Serum
//! creatinine arrives in µmol/L and is converted to mg/dL internally
//! (1 mg/dL = 88.4 µmol/L).

use crate::derive::Derived;
use crate::models::{PatientProfile, Sex};

const UMOL_PER_MGDL: f64 = 88.4;

/// Cockcroft-Gault creatinine clearance in mL/min, 1 decimal.
pub fn creatinine_clearance(profile: &PatientProfile) -> Derived {
    let (age, weight, creatinine) = match (profile.age(), profile.weight(), profile.creatinine()) {
        (Some(a), Some(w), Some(c)) => (a, w, c),
        _ => return Derived::Unavailable,
    };

    let creatinine_mgdl = creatinine / UMOL_PER_MGDL;
    let sex_multiplier = match profile.sex {
        Sex::Female => 0.85,
        Sex::Male => 1.0,
    };
    Derived::from_value((140.0 - age) * weight * sex_multiplier / (72.0 * creatinine_mgdl))
}

/// CKD-EPI eGFR in mL/min/1.73m², 0 decimals.
///
/// Uses the 2021 refit coefficients. The pre-2021 race multiplier is
/// applied only when `legacy_black_race` is set; it is an explicit opt-in
/// for legacy calculations, never a default.
pub fn egfr(profile: &PatientProfile, legacy_black_race: bool) -> Derived {
    let (age, creatinine) = match (profile.age(), profile.creatinine()) {
        (Some(a), Some(c)) => (a, c),
        _ => return Derived::Unavailable,
    };

    let scr_mgdl = creatinine / UMOL_PER_MGDL;
    let (kappa, alpha, sex_multiplier) = match profile.sex {
        Sex::Female => (0.7, -0.241, 1.012),
        Sex::Male => (0.9, -0.302, 1.0),
    };
    let race_multiplier = if legacy_black_race { 1.159 } else { 1.0 };

    let term1 = (scr_mgdl / kappa).min(1.0).powf(alpha);
    let term2 = (scr_mgdl / kappa).max(1.0).powf(-1.200);
    let term3 = 0.9938_f64.powf(age);

    Derived::from_value(142.0 * term1 * term2 * term3 * sex_multiplier * race_multiplier)
}
