//! Caloric planning.
//!
//! Harris-Benedict resting energy for ambulatory patients, kcal/kg
//! targets for hospitalized ones, and the oral nutrition supplement
//! feeding plan over the fixed product catalogue.

use serde::{Deserialize, Serialize};

use crate::derive::profile::{BmiCategory, BodyMetrics};
use crate::derive::Derived;
use crate::models::{OnsProduct, PatientProfile, Sex};

/// Where the patient is being fed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CareSetting {
    #[default]
    Ambulatory,
    Stable,
    Critical,
}

/// Activity/stress factors for the ambulatory TDEE estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ActivityFactor {
    #[default]
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

impl ActivityFactor {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityFactor::Sedentary => 1.2,
            ActivityFactor::LightlyActive => 1.3,
            ActivityFactor::ModeratelyActive => 1.5,
            ActivityFactor::VeryActive => 1.7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityFactor::Sedentary => "Confined to bed / Sedentary",
            ActivityFactor::LightlyActive => "Ambulatory / Lightly Active",
            ActivityFactor::ModeratelyActive => "Normal Activity / Moderately Active",
            ActivityFactor::VeryActive => "Very Active",
        }
    }
}

/// Which weight fed the hospitalized target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeightBasis {
    Actual,
    Adjusted,
}

impl WeightBasis {
    pub fn label(&self) -> &'static str {
        match self {
            WeightBasis::Actual => "Actual Weight",
            WeightBasis::Adjusted => "Adjusted Body Weight",
        }
    }
}

/// Daily energy estimate for one setting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyTarget {
    /// Basal metabolic rate in kcal/day (ambulatory only), 0 decimals
    pub bmr: Derived,
    /// Daily target in kcal/day, 0 decimals
    pub target: Derived,
    /// Weight used for hospitalized targets
    pub weight_basis: Option<WeightBasis>,
    /// kcal/kg actually applied for hospitalized targets
    pub kcal_per_kg: Option<f64>,
}

impl CareSetting {
    /// Default prescription for hospitalized settings.
    pub fn default_kcal_per_kg(&self) -> Option<f64> {
        match self {
            CareSetting::Ambulatory => None,
            CareSetting::Stable => Some(25.0),
            CareSetting::Critical => Some(20.0),
        }
    }
}

/// Harris-Benedict basal metabolic rate in kcal/day.
pub fn basal_metabolic_rate(profile: &PatientProfile) -> Derived {
    let (weight, height, age) = match (profile.weight(), profile.height(), profile.age()) {
        (Some(w), Some(h), Some(a)) => (w, h, a),
        _ => return Derived::Unavailable,
    };
    let bmr = match profile.sex {
        Sex::Male => 88.362 + 13.397 * weight + 4.799 * height - 5.677 * age,
        Sex::Female => 447.593 + 9.247 * weight + 3.098 * height - 4.330 * age,
    };
    Derived::from_value(bmr)
}

/// Daily caloric target for the given setting.
///
/// Ambulatory: BMR x activity factor. Hospitalized: kcal/kg (default 25
/// stable / 20 critical, overridable) x planning weight, where planning
/// weight is the adjusted body weight for obese patients when available
/// and the actual weight otherwise.
pub fn energy_target(
    profile: &PatientProfile,
    metrics: &BodyMetrics,
    setting: CareSetting,
    activity: ActivityFactor,
    kcal_per_kg_override: Option<f64>,
) -> EnergyTarget {
    match setting {
        CareSetting::Ambulatory => {
            let bmr = basal_metabolic_rate(profile);
            EnergyTarget {
                target: bmr.map(|b| b * activity.multiplier()),
                bmr,
                weight_basis: None,
                kcal_per_kg: None,
            }
        }
        CareSetting::Stable | CareSetting::Critical => {
            let kcal_per_kg = kcal_per_kg_override
                .filter(|k| *k > 0.0)
                .or_else(|| setting.default_kcal_per_kg())
                .unwrap_or(25.0);

            let (weight, basis) = planning_weight(profile, metrics);
            let target = match weight {
                Some(w) => Derived::from_value(kcal_per_kg * w),
                None => Derived::Unavailable,
            };
            EnergyTarget {
                bmr: Derived::Unavailable,
                target,
                weight_basis: basis,
                kcal_per_kg: Some(kcal_per_kg),
            }
        }
    }
}

/// Planning weight: ABW for obese patients when available, else actual.
fn planning_weight(
    profile: &PatientProfile,
    metrics: &BodyMetrics,
) -> (Option<f64>, Option<WeightBasis>) {
    let obese = metrics.category == Some(BmiCategory::Obese);
    if obese {
        if let Some(abw) = metrics.adjusted_weight.value() {
            return (Some(abw), Some(WeightBasis::Adjusted));
        }
    }
    match profile.weight() {
        Some(w) => (Some(w), Some(WeightBasis::Actual)),
        None => (None, None),
    }
}

/// An oral nutrition supplement plan dividing the daily target into
/// equal feedings of one product.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeedingPlan {
    pub product: OnsProduct,
    pub feedings_per_day: u32,
    /// kcal per feeding, 0 decimals
    pub kcal_per_feeding: f64,
    /// Product units per feeding, 1 decimal
    pub amount_per_feeding: f64,
    /// Product units per day, 1 decimal
    pub total_amount: f64,
    /// Grams of protein per day, 1 decimal
    pub total_protein_g: f64,
    /// kcal actually delivered per day, 0 decimals
    pub total_kcal: f64,
    /// Serving unit of the product
    pub unit: &'static str,
}

/// Build a feeding plan. Requires a positive daily target and at least
/// one feeding per day.
pub fn feeding_plan(
    target_kcal_per_day: Option<f64>,
    product: OnsProduct,
    feedings_per_day: u32,
) -> Option<FeedingPlan> {
    let target = target_kcal_per_day.filter(|t| *t > 0.0)?;
    if feedings_per_day == 0 {
        return None;
    }

    let info = product.profile();
    let kcal_per_feeding = target / feedings_per_day as f64;
    let amount_per_feeding = kcal_per_feeding / info.kcal_per_unit;
    let total_amount = amount_per_feeding * feedings_per_day as f64;
    let total_protein_g = total_amount * info.protein_g_per_unit;
    let total_kcal = total_amount * info.kcal_per_unit;

    Some(FeedingPlan {
        product,
        feedings_per_day,
        kcal_per_feeding,
        amount_per_feeding,
        total_amount,
        total_protein_g,
        total_kcal,
        unit: info.unit,
    })
}
