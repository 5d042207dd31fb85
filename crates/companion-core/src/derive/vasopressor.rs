//! Infusion dose and rate conversion.
//!
//! Bag concentration is normalized once (mg bags to mcg/mL, unit bags to
//! Units/mL); dose-from-rate and rate-from-dose are exact inverses of
//! each other. Weight-based drugs report a distinct missing-weight
//! condition instead of the generic dash.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::derive::{Derived, MissingDependency};
use crate::models::{AmountUnit, InfusionDrug};

const MCG_PER_MG: f64 = 1000.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Which direction the converter runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ConversionMode {
    /// Input is an infusion rate in mL/hr; output is a dose.
    #[default]
    DoseFromRate,
    /// Input is a target dose; output is a rate in mL/hr.
    RateFromDose,
}

/// One prepared infusion: drug, dilution, and the single numeric input
/// for the selected mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct InfusionOrder {
    pub drug: InfusionDrug,
    /// Amount in the bag, in the drug's amount unit (mg or Units)
    pub bag_amount: Option<f64>,
    /// Total bag volume in mL
    pub bag_volume_ml: Option<f64>,
    pub mode: ConversionMode,
    /// Rate in mL/hr (dose-from-rate) or dose in the drug's dose unit
    pub input: Option<f64>,
}

/// Bag concentration normalized for dosing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Concentration {
    /// mcg/mL for mg bags, Units/mL for unit bags
    pub value: Derived,
    /// Concentration unit label
    pub unit: &'static str,
    /// Display decimals: whole mcg/mL, hundredths of a Unit/mL
    pub decimals: usize,
}

/// Result of one conversion.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConversionResult {
    pub value: Derived,
    /// Unit of the computed value
    pub unit: &'static str,
    /// Display decimals for the computed value
    pub decimals: usize,
    /// Weight-independent equivalent in mcg/min, reported for
    /// noradrenaline dose-from-rate conversions
    pub mcg_per_min_equivalent: Option<f64>,
}

/// Normalized bag concentration. Requires positive amount and volume.
pub fn concentration(order: &InfusionOrder) -> Concentration {
    let config = order.drug.profile();
    let (unit, decimals) = match config.amount_unit {
        AmountUnit::Milligrams => ("mcg/mL", 0),
        AmountUnit::Units => ("Units/mL", 2),
    };

    let value = match (
        order.bag_amount.filter(|a| *a > 0.0),
        order.bag_volume_ml.filter(|v| *v > 0.0),
    ) {
        (Some(amount), Some(volume)) => {
            let per_ml = amount / volume;
            let normalized = match config.amount_unit {
                AmountUnit::Milligrams => per_ml * MCG_PER_MG,
                AmountUnit::Units => per_ml,
            };
            Derived::from_value(normalized)
        }
        _ => Derived::Unavailable,
    };

    Concentration {
        value,
        unit,
        decimals,
    }
}

/// Run the conversion for the order's mode.
///
/// Weight-based drugs require a positive patient weight; its absence is
/// the missing-weight condition, not ordinary unavailability.
pub fn convert(order: &InfusionOrder, patient_weight_kg: Option<f64>) -> ConversionResult {
    let config = order.drug.profile();
    let conc = concentration(order).value.value();
    let input = order.input.filter(|v| *v > 0.0);
    let weight = patient_weight_kg.filter(|w| *w > 0.0);

    let (unit, decimals) = match order.mode {
        ConversionMode::DoseFromRate if config.weight_based => (config.dose_unit, 2),
        ConversionMode::DoseFromRate => (config.dose_unit, 3),
        ConversionMode::RateFromDose => ("mL/hr", 1),
    };

    let (input, conc) = match (input, conc) {
        (Some(i), Some(c)) => (i, c),
        _ => {
            return ConversionResult {
                value: Derived::Unavailable,
                unit,
                decimals,
                mcg_per_min_equivalent: None,
            }
        }
    };

    if config.weight_based && weight.is_none() {
        debug!(drug = config.label, "conversion blocked on missing patient weight");
        return ConversionResult {
            value: Derived::Missing(MissingDependency::Weight),
            unit,
            decimals,
            mcg_per_min_equivalent: None,
        };
    }

    let value = match (order.mode, config.weight_based) {
        // rate (mL/hr) * conc / 60 / weight = dose per kg per min
        (ConversionMode::DoseFromRate, true) => {
            input * conc / MINUTES_PER_HOUR / weight.unwrap_or(1.0)
        }
        // rate * conc / 60 = dose per min
        (ConversionMode::DoseFromRate, false) => input * conc / MINUTES_PER_HOUR,
        // dose * weight * 60 / conc = mL/hr
        (ConversionMode::RateFromDose, true) => {
            input * weight.unwrap_or(1.0) * MINUTES_PER_HOUR / conc
        }
        // dose * 60 / conc = mL/hr
        (ConversionMode::RateFromDose, false) => input * MINUTES_PER_HOUR / conc,
    };

    let mcg_per_min_equivalent = match (order.drug, order.mode) {
        (InfusionDrug::Noradrenaline, ConversionMode::DoseFromRate) => {
            Some(input * conc / MINUTES_PER_HOUR)
        }
        _ => None,
    };

    ConversionResult {
        value: Derived::from_value(value),
        unit,
        decimals,
        mcg_per_min_equivalent,
    }
}
