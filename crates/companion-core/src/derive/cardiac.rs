//! Echocardiographic derivations.
//!
//! LVEF by Simpson and Teichholz, ejection-fraction banding, the LVOT
//! stroke-volume chain, and the single-measurement interpretations
//! (EPSS, MAPSE, TAPSE, eccentricity index).

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::derive::{Derived, Interpretation, MissingDependency, Severity};

/// Simpson biplane LVEF in percent, 1 decimal.
///
/// Valid only when EDV > ESV > 0; anything else is out of domain and
/// degrades rather than producing a negative or >100 fraction.
pub fn simpson_lvef(edv_ml: Option<f64>, esv_ml: Option<f64>) -> Derived {
    match (edv_ml, esv_ml) {
        (Some(edv), Some(esv)) if esv > 0.0 && edv > esv => {
            Derived::from_value((edv - esv) / edv * 100.0)
        }
        _ => Derived::Unavailable,
    }
}

/// Teichholz LVEF from M-mode internal diameters in cm, 1 decimal.
pub fn teichholz_lvef(lvidd_cm: Option<f64>, lvids_cm: Option<f64>) -> Derived {
    match (lvidd_cm, lvids_cm) {
        (Some(lvidd), Some(lvids)) if lvids > 0.0 && lvidd > lvids => {
            let edv = teichholz_volume(lvidd);
            let esv = teichholz_volume(lvids);
            Derived::from_value((edv - esv) / edv * 100.0)
        }
        _ => Derived::Unavailable,
    }
}

fn teichholz_volume(diameter_cm: f64) -> f64 {
    7.0 * diameter_cm.powi(3) / (2.4 + diameter_cm)
}

/// Ejection-fraction bands used to classify a measured or automated LVEF.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EfClass {
    Preserved,
    MildlyReduced,
    ModeratelyReduced,
    SeverelyReduced,
}

impl EfClass {
    /// Band boundaries: >=50 preserved, 41-49 mildly, 30-40 moderately,
    /// <30 severely reduced.
    pub fn from_lvef(lvef_percent: f64) -> Self {
        if lvef_percent >= 50.0 {
            EfClass::Preserved
        } else if lvef_percent >= 41.0 {
            EfClass::MildlyReduced
        } else if lvef_percent >= 30.0 {
            EfClass::ModeratelyReduced
        } else {
            EfClass::SeverelyReduced
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EfClass::Preserved => "Preserved LVEF",
            EfClass::MildlyReduced => "Mildly reduced LVEF",
            EfClass::ModeratelyReduced => "Moderately reduced LVEF",
            EfClass::SeverelyReduced => "Severely reduced LVEF",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            EfClass::Preserved => Severity::Normal,
            EfClass::MildlyReduced | EfClass::ModeratelyReduced => Severity::Warning,
            EfClass::SeverelyReduced => Severity::Danger,
        }
    }

    pub fn interpretation(&self) -> Interpretation {
        Interpretation::new(self.label(), self.severity())
    }
}

/// Inputs to the LVOT stroke-volume chain. Each stage requires its own
/// inputs; a partially filled set yields a partially unavailable chain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct LvotInputs {
    /// LVOT diameter in cm
    pub diameter_cm: Option<f64>,
    /// LVOT velocity-time integral in cm
    pub vti_cm: Option<f64>,
    /// Heart rate in bpm
    pub heart_rate_bpm: Option<f64>,
}

/// Results of the LVOT chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LvotOutput {
    /// Cross-sectional area in cm², 2 decimals
    pub area: Derived,
    /// Stroke volume in mL, 1 decimal
    pub stroke_volume: Derived,
    /// Cardiac output in L/min, 2 decimals
    pub cardiac_output: Derived,
    /// Cardiac index in L/min/m², 2 decimals
    pub cardiac_index: Derived,
}

/// Run the LVOT chain. BSA comes from the patient profile derivation;
/// when cardiac output is computable but BSA is not, the index surfaces
/// the BSA gap instead of the generic dash.
pub fn lvot_hemodynamics(inputs: &LvotInputs, bsa: Derived) -> LvotOutput {
    let diameter = inputs.diameter_cm.filter(|d| *d > 0.0);
    let vti = inputs.vti_cm.filter(|v| *v > 0.0);
    let heart_rate = inputs.heart_rate_bpm.filter(|h| *h > 0.0);

    let (area, stroke_volume) = match (diameter, vti) {
        (Some(d), Some(v)) => {
            let radius = d / 2.0;
            let area = PI * radius * radius;
            (Derived::from_value(area), Derived::from_value(area * v))
        }
        _ => (Derived::Unavailable, Derived::Unavailable),
    };

    let cardiac_output = match (stroke_volume.value(), heart_rate) {
        (Some(sv), Some(hr)) => Derived::from_value(sv * hr / 1000.0),
        _ => Derived::Unavailable,
    };

    let cardiac_index = match cardiac_output.value() {
        Some(co) => match bsa.value() {
            Some(bsa) => Derived::from_value(co / bsa),
            None => Derived::Missing(MissingDependency::BodySurfaceArea),
        },
        None => Derived::Unavailable,
    };

    LvotOutput {
        area,
        stroke_volume,
        cardiac_output,
        cardiac_index,
    }
}

/// EPSS in mm: below 7 suggests a normal LVEF.
pub fn epss_interpretation(epss_mm: Option<f64>) -> Option<Interpretation> {
    let epss = epss_mm.filter(|e| *e > 0.0)?;
    Some(if epss < 7.0 {
        Interpretation::new("Suggests normal LVEF", Severity::Normal)
    } else {
        Interpretation::new("Suggests reduced LVEF", Severity::Warning)
    })
}

/// MAPSE in cm: 1.0 or more suggests normal longitudinal function.
pub fn mapse_interpretation(mapse_cm: Option<f64>) -> Option<Interpretation> {
    let mapse = mapse_cm.filter(|m| *m > 0.0)?;
    Some(if mapse >= 1.0 {
        Interpretation::new("Suggests normal LV longitudinal function", Severity::Normal)
    } else {
        Interpretation::new("Suggests reduced LV longitudinal function", Severity::Warning)
    })
}

/// TAPSE in cm: 1.7 or more suggests normal RV systolic function.
pub fn tapse_interpretation(tapse_cm: Option<f64>) -> Option<Interpretation> {
    let tapse = tapse_cm.filter(|t| *t > 0.0)?;
    Some(if tapse >= 1.7 {
        Interpretation::new("Suggests normal RV systolic function", Severity::Normal)
    } else {
        Interpretation::new(
            "Suggests reduced RV systolic function (RV dysfunction)",
            Severity::Warning,
        )
    })
}

/// Eccentricity index D2/D1 from the parasternal short axis, 2 decimals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EccentricityResult {
    pub index: Derived,
    pub interpretation: Option<Interpretation>,
}

/// D2 is the diameter parallel to the septum, D1 perpendicular to it.
/// An index above 1.1 indicates RV overload with a D-shaped LV.
pub fn eccentricity_index(d2_parallel_cm: Option<f64>, d1_perpendicular_cm: Option<f64>) -> EccentricityResult {
    match (
        d2_parallel_cm.filter(|d| *d > 0.0),
        d1_perpendicular_cm.filter(|d| *d > 0.0),
    ) {
        (Some(d2), Some(d1)) => {
            let index = d2 / d1;
            let interpretation = if index > 1.1 {
                Interpretation::new("RV overload with D-shaped LV", Severity::Warning)
            } else {
                Interpretation::new("Normal LV geometry", Severity::Normal)
            };
            EccentricityResult {
                index: Derived::from_value(index),
                interpretation: Some(interpretation),
            }
        }
        _ => EccentricityResult {
            index: Derived::Unavailable,
            interpretation: None,
        },
    }
}
