//! Fixed medication and nutrition catalogues.
//!
//! Both tables are immutable lookup data owned by the core and exposed
//! read-only. The presentation layer enumerates them for its selectors;
//! no entry is ever mutated at runtime.

use serde::{Deserialize, Serialize};

/// Infusion drugs supported by the dose/rate converter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum InfusionDrug {
    #[default]
    Noradrenaline,
    Adrenaline,
    Vasopressin,
    Dobutamine,
    Dopamine,
}

/// How a drug's bag amount is measured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AmountUnit {
    /// Milligram bags, normalized to mcg/mL for dosing.
    Milligrams,
    /// International-unit bags, dosed in Units/mL.
    Units,
}

/// Per-drug dosing configuration.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DrugProfile {
    /// Display name
    pub label: &'static str,
    /// Unit the bag amount is entered in
    pub amount_unit: AmountUnit,
    /// Unit of the computed dose
    pub dose_unit: &'static str,
    /// Whether dosing divides by patient weight
    pub weight_based: bool,
}

impl InfusionDrug {
    /// Every drug in the catalogue, in display order.
    pub const ALL: [InfusionDrug; 5] = [
        InfusionDrug::Noradrenaline,
        InfusionDrug::Adrenaline,
        InfusionDrug::Vasopressin,
        InfusionDrug::Dobutamine,
        InfusionDrug::Dopamine,
    ];

    /// Dosing configuration for this drug.
    pub fn profile(&self) -> DrugProfile {
        match self {
            InfusionDrug::Noradrenaline => DrugProfile {
                label: "Noradrenaline (Norepinephrine)",
                amount_unit: AmountUnit::Milligrams,
                dose_unit: "mcg/kg/min",
                weight_based: true,
            },
            InfusionDrug::Adrenaline => DrugProfile {
                label: "Adrenaline (Epinephrine)",
                amount_unit: AmountUnit::Milligrams,
                dose_unit: "mcg/kg/min",
                weight_based: true,
            },
            InfusionDrug::Vasopressin => DrugProfile {
                label: "Vasopressin",
                amount_unit: AmountUnit::Units,
                dose_unit: "Units/min",
                weight_based: false,
            },
            InfusionDrug::Dobutamine => DrugProfile {
                label: "Dobutamine",
                amount_unit: AmountUnit::Milligrams,
                dose_unit: "mcg/kg/min",
                weight_based: true,
            },
            InfusionDrug::Dopamine => DrugProfile {
                label: "Dopamine",
                amount_unit: AmountUnit::Milligrams,
                dose_unit: "mcg/kg/min",
                weight_based: true,
            },
        }
    }
}

/// Dietary category an oral nutrition supplement belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DietCategory {
    Standard,
    Diabetic,
    Renal,
}

/// Oral nutrition supplements supported by the feeding planner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OnsProduct {
    EnercalPlus,
    EnsureOriginal,
    NutrenOptimum,
    Peptamen,
    Glucerna,
    NutrenDiabetic,
    NeproHp,
    NovasourceRenal,
}

/// Nutritional density record for an ONS product.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct OnsProfile {
    /// Display name
    pub name: &'static str,
    /// kcal per serving unit
    pub kcal_per_unit: f64,
    /// Protein grams per serving unit
    pub protein_g_per_unit: f64,
    /// Serving unit ("scoop" or "ml")
    pub unit: &'static str,
    /// Dietary category for filtering
    pub category: DietCategory,
}

impl OnsProduct {
    /// Every product in the catalogue, in display order.
    pub const ALL: [OnsProduct; 8] = [
        OnsProduct::EnercalPlus,
        OnsProduct::EnsureOriginal,
        OnsProduct::NutrenOptimum,
        OnsProduct::Peptamen,
        OnsProduct::Glucerna,
        OnsProduct::NutrenDiabetic,
        OnsProduct::NeproHp,
        OnsProduct::NovasourceRenal,
    ];

    /// Density record for this product.
    pub fn profile(&self) -> OnsProfile {
        match self {
            OnsProduct::EnercalPlus => OnsProfile {
                name: "Enercal Plus",
                kcal_per_unit: 60.0,
                protein_g_per_unit: 2.4,
                unit: "scoop",
                category: DietCategory::Standard,
            },
            OnsProduct::EnsureOriginal => OnsProfile {
                name: "Ensure Original",
                kcal_per_unit: 44.0,
                protein_g_per_unit: 1.75,
                unit: "scoop",
                category: DietCategory::Standard,
            },
            OnsProduct::NutrenOptimum => OnsProfile {
                name: "Nutren Optimum",
                kcal_per_unit: 36.0,
                protein_g_per_unit: 1.45,
                unit: "scoop",
                category: DietCategory::Standard,
            },
            OnsProduct::Peptamen => OnsProfile {
                name: "Peptamen",
                kcal_per_unit: 36.0,
                protein_g_per_unit: 1.45,
                unit: "scoop",
                category: DietCategory::Standard,
            },
            OnsProduct::Glucerna => OnsProfile {
                name: "Glucerna",
                kcal_per_unit: 45.0,
                protein_g_per_unit: 2.04,
                unit: "scoop",
                category: DietCategory::Diabetic,
            },
            OnsProduct::NutrenDiabetic => OnsProfile {
                name: "Nutren Diabetic",
                kcal_per_unit: 36.0,
                protein_g_per_unit: 1.6,
                unit: "scoop",
                category: DietCategory::Diabetic,
            },
            OnsProduct::NeproHp => OnsProfile {
                name: "Nepro HP",
                kcal_per_unit: 1.82,
                protein_g_per_unit: 0.08,
                unit: "ml",
                category: DietCategory::Renal,
            },
            OnsProduct::NovasourceRenal => OnsProfile {
                name: "Novasource Renal",
                kcal_per_unit: 2.0,
                protein_g_per_unit: 0.09,
                unit: "ml",
                category: DietCategory::Renal,
            },
        }
    }

    /// Products matching a dietary category, in catalogue order.
    pub fn in_category(category: DietCategory) -> Vec<OnsProduct> {
        Self::ALL
            .iter()
            .copied()
            .filter(|p| p.profile().category == category)
            .collect()
    }
}

/// Category selected for a patient: fluid restriction forces renal
/// products, then the diabetic flag selects diabetic, otherwise standard.
pub fn diet_category_for(diabetic: bool, fluid_restricted: bool) -> DietCategory {
    if fluid_restricted {
        DietCategory::Renal
    } else if diabetic {
        DietCategory::Diabetic
    } else {
        DietCategory::Standard
    }
}
