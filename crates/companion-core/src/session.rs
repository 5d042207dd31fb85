//! Form-state boundary between the presentation layer and the engine.
//!
//! The session owns every raw field the UI tracks. Numeric fields are
//! kept as the strings the user typed; parsing happens here, once, and
//! anything non-numeric reads as absent. Derived accessors rebuild the
//! patient profile on each call and delegate to the pure derivations,
//! so recomputation from the same inputs always yields the same
//! outputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::derive::cardiac::{self, EccentricityResult, EfClass, LvotInputs, LvotOutput};
use crate::derive::dates::{self, DateSpan};
use crate::derive::hemodynamics::{self, IvcCollapse};
use crate::derive::lung::{self, DuetsScore};
use crate::derive::nutrition::{self, ActivityFactor, CareSetting, EnergyTarget, FeedingPlan};
use crate::derive::profile::{body_metrics, BodyMetrics};
use crate::derive::renal;
use crate::derive::scores::{self, AnginaDuringExercise, DukeResult};
use crate::derive::vasopressor::{self, Concentration, ConversionMode, ConversionResult, InfusionOrder};
use crate::derive::{Derived, Interpretation};
use crate::models::{
    EffusionFindings, InfusionDrug, LungSurvey, OnsProduct, PatientProfile, Side, Sex,
};

/// Parse a raw form field. Empty and non-numeric strings are absent,
/// never an error.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Shared patient-data card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PatientFields {
    pub height: String,
    pub weight: String,
    pub age: String,
    pub serum_creatinine: String,
    pub sex: Sex,
}

/// Renal card: the legacy race term is an explicit opt-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RenalFields {
    pub legacy_black_race: bool,
}

/// Echocardiography card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EchoFields {
    pub edv: String,
    pub esv: String,
    pub lvidd: String,
    pub lvids: String,
    pub auto_ef: String,
    pub lvot_diameter: String,
    pub lvot_vti: String,
    pub heart_rate: String,
    pub epss: String,
    pub mapse: String,
    pub tapse: String,
    pub eccentricity_d2: String,
    pub eccentricity_d1: String,
}

/// Hemodynamics card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HemoFields {
    pub ivc_diameter: String,
    pub ivc_collapse: IvcCollapse,
    pub spap: String,
    pub dpap: String,
}

/// Raw pleural effusion fields for one side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EffusionFields {
    pub present: bool,
    pub deepest_pool: String,
    pub echogenicity: crate::models::Echogenicity,
    pub septations: bool,
    pub diaphragmatic_nodules: bool,
    pub pleural_thickness: String,
    pub height: String,
    pub basal_depth: String,
    pub interpleural_distance: String,
}

impl EffusionFields {
    fn to_findings(&self) -> EffusionFindings {
        EffusionFindings {
            present: self.present,
            deepest_pool_cm: parse_number(&self.deepest_pool),
            echogenicity: self.echogenicity,
            septations: self.septations,
            diaphragmatic_nodules: self.diaphragmatic_nodules,
            pleural_thickness_cm: parse_number(&self.pleural_thickness),
            height_cm: parse_number(&self.height),
            basal_depth_cm: parse_number(&self.basal_depth),
            interpleural_distance_cm: parse_number(&self.interpleural_distance),
        }
    }
}

/// Lung ultrasound page: the zone grid plus both effusion cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LungFields {
    pub survey: LungSurvey,
    pub right_effusion: EffusionFields,
    pub left_effusion: EffusionFields,
}

/// Caloric needs card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NutritionFields {
    pub setting: CareSetting,
    pub activity: ActivityFactor,
    pub kcal_per_kg_override: String,
    pub diabetic: bool,
    pub fluid_restricted: bool,
    pub product: Option<OnsProduct>,
    pub feedings_per_day: String,
}

/// Vasopressor card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct InfusionFields {
    pub drug: InfusionDrug,
    pub bag_amount: String,
    pub bag_volume: String,
    pub mode: ConversionMode,
    pub input: String,
}

/// Day and date card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DateFields {
    pub span_start: String,
    pub span_end: String,
    pub target_start: String,
    pub duration_days: String,
}

/// Treadmill and symptom-score card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScoreFields {
    pub exercise_duration: String,
    pub st_deviation: String,
    pub angina: AnginaDuringExercise,
    pub ipss: String,
}

/// All tracked form state for one UI session.
///
/// Nothing here persists past [`Session::clear`]; entities are value
/// types owned by the session, and no derivation mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Session {
    pub patient: PatientFields,
    pub renal: RenalFields,
    pub echo: EchoFields,
    pub hemo: HemoFields,
    pub lung: LungFields,
    pub nutrition: NutritionFields,
    pub infusion: InfusionFields,
    pub dates: DateFields,
    pub scores: ScoreFields,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every tracked field to its initial unset value in one
    /// logical step. No partial reset is observable.
    pub fn clear(&mut self) {
        debug!("clearing all session fields");
        *self = Session::default();
    }

    // =====================================================================
    // Patient profile
    // =====================================================================

    /// The read-only profile passed to each dependent derivation.
    pub fn profile(&self) -> PatientProfile {
        PatientProfile {
            height_cm: parse_number(&self.patient.height),
            weight_kg: parse_number(&self.patient.weight),
            age_years: parse_number(&self.patient.age),
            serum_creatinine_umol_l: parse_number(&self.patient.serum_creatinine),
            sex: self.patient.sex,
        }
    }

    pub fn body_metrics(&self) -> BodyMetrics {
        body_metrics(&self.profile())
    }

    // =====================================================================
    // Renal function
    // =====================================================================

    pub fn creatinine_clearance(&self) -> Derived {
        renal::creatinine_clearance(&self.profile())
    }

    pub fn egfr(&self) -> Derived {
        renal::egfr(&self.profile(), self.renal.legacy_black_race)
    }

    // =====================================================================
    // Echocardiography
    // =====================================================================

    pub fn simpson_lvef(&self) -> Derived {
        cardiac::simpson_lvef(parse_number(&self.echo.edv), parse_number(&self.echo.esv))
    }

    pub fn teichholz_lvef(&self) -> Derived {
        cardiac::teichholz_lvef(
            parse_number(&self.echo.lvidd),
            parse_number(&self.echo.lvids),
        )
    }

    /// Band for a machine-reported automated LVEF.
    pub fn auto_ef_class(&self) -> Option<EfClass> {
        parse_number(&self.echo.auto_ef)
            .filter(|v| *v > 0.0)
            .map(EfClass::from_lvef)
    }

    pub fn lvot(&self) -> LvotOutput {
        let inputs = LvotInputs {
            diameter_cm: parse_number(&self.echo.lvot_diameter),
            vti_cm: parse_number(&self.echo.lvot_vti),
            heart_rate_bpm: parse_number(&self.echo.heart_rate),
        };
        cardiac::lvot_hemodynamics(&inputs, self.body_metrics().bsa)
    }

    pub fn epss(&self) -> Option<Interpretation> {
        cardiac::epss_interpretation(parse_number(&self.echo.epss))
    }

    pub fn mapse(&self) -> Option<Interpretation> {
        cardiac::mapse_interpretation(parse_number(&self.echo.mapse))
    }

    pub fn tapse(&self) -> Option<Interpretation> {
        cardiac::tapse_interpretation(parse_number(&self.echo.tapse))
    }

    pub fn eccentricity(&self) -> EccentricityResult {
        cardiac::eccentricity_index(
            parse_number(&self.echo.eccentricity_d2),
            parse_number(&self.echo.eccentricity_d1),
        )
    }

    // =====================================================================
    // Hemodynamics
    // =====================================================================

    pub fn estimated_rap(&self) -> Option<&'static str> {
        hemodynamics::estimated_rap(parse_number(&self.hemo.ivc_diameter), self.hemo.ivc_collapse)
    }

    pub fn mean_pap(&self) -> Derived {
        hemodynamics::mean_pap(parse_number(&self.hemo.spap), parse_number(&self.hemo.dpap))
    }

    // =====================================================================
    // Lung ultrasound
    // =====================================================================

    fn effusion(&self, side: Side) -> EffusionFindings {
        match side {
            Side::Right => self.lung.right_effusion.to_findings(),
            Side::Left => self.lung.left_effusion.to_findings(),
        }
    }

    pub fn lung_interpretation(&self) -> Vec<String> {
        lung::interpret(
            &self.lung.survey,
            &self.effusion(Side::Right),
            &self.effusion(Side::Left),
        )
    }

    pub fn effusion_volume_dimension(&self, side: Side) -> Derived {
        lung::volume_dimension_method(&self.effusion(side))
    }

    pub fn effusion_volume_balik(&self, side: Side) -> Derived {
        lung::volume_balik_method(&self.effusion(side))
    }

    pub fn duets(&self, side: Side) -> Option<DuetsScore> {
        lung::duets_score(&self.effusion(side), &self.lung.survey, side)
    }

    // =====================================================================
    // Nutrition
    // =====================================================================

    pub fn energy_target(&self) -> EnergyTarget {
        let profile = self.profile();
        let metrics = body_metrics(&profile);
        nutrition::energy_target(
            &profile,
            &metrics,
            self.nutrition.setting,
            self.nutrition.activity,
            parse_number(&self.nutrition.kcal_per_kg_override),
        )
    }

    /// Products offered for the current dietary flags, in catalogue order.
    pub fn ons_products(&self) -> Vec<OnsProduct> {
        let category = crate::models::diet_category_for(
            self.nutrition.diabetic,
            self.nutrition.fluid_restricted,
        );
        OnsProduct::in_category(category)
    }

    /// Feeding plan for the selected product against the current energy
    /// target. The selected product must be offered under the current
    /// dietary flags.
    pub fn feeding_plan(&self) -> Option<FeedingPlan> {
        let product = self.nutrition.product?;
        if !self.ons_products().contains(&product) {
            return None;
        }
        let feedings = parse_number(&self.nutrition.feedings_per_day)
            .filter(|f| *f >= 1.0)
            .map(|f| f as u32)?;
        nutrition::feeding_plan(self.energy_target().target.value(), product, feedings)
    }

    // =====================================================================
    // Vasopressors
    // =====================================================================

    fn infusion_order(&self) -> InfusionOrder {
        InfusionOrder {
            drug: self.infusion.drug,
            bag_amount: parse_number(&self.infusion.bag_amount),
            bag_volume_ml: parse_number(&self.infusion.bag_volume),
            mode: self.infusion.mode,
            input: parse_number(&self.infusion.input),
        }
    }

    pub fn infusion_concentration(&self) -> Concentration {
        vasopressor::concentration(&self.infusion_order())
    }

    pub fn infusion_conversion(&self) -> ConversionResult {
        vasopressor::convert(&self.infusion_order(), self.profile().weight())
    }

    // =====================================================================
    // Dates and scores
    // =====================================================================

    pub fn date_span(&self) -> Option<DateSpan> {
        let start = parse_date(&self.dates.span_start)?;
        let end = parse_date(&self.dates.span_end)?;
        Some(dates::span_between(start, end))
    }

    /// Formatted target date, e.g. "Friday, March 1, 2024".
    pub fn target_date(&self) -> Option<String> {
        let start = parse_date(&self.dates.target_start)?;
        let duration = parse_number(&self.dates.duration_days)? as i64;
        dates::target_date(start, duration).map(dates::format_target_date)
    }

    pub fn duke_treadmill(&self) -> Option<DukeResult> {
        scores::duke_treadmill_score(
            parse_number(&self.scores.exercise_duration),
            parse_number(&self.scores.st_deviation),
            self.scores.angina,
        )
    }

    pub fn ipss(&self) -> Option<&'static str> {
        let score = parse_number(&self.scores.ipss).filter(|s| *s >= 0.0)?;
        scores::ipss_interpretation(Some(score as u32))
    }
}
