//! Lung ultrasound aggregation.
//!
//! Pure aggregation over the eight zone records plus per-side pleural
//! effusion findings: composite interpretation text, two independent
//! effusion volume estimates, and the DUETS transudate/exudate score.

use serde::{Deserialize, Serialize};

use crate::derive::Derived;
use crate::models::{EffusionFindings, LungSurvey, Side, Zone};

/// Zones with B-lines needed before the pattern reads as interstitial.
const INTERSTITIAL_ZONE_THRESHOLD: usize = 2;

/// DUETS cutoff: a score above this suggests an exudate.
const DUETS_EXUDATE_CUTOFF: u8 = 1;

/// Effusion volume by the dimension method: 70 * (H + D) mL.
/// Needs the effusion height and the lung-base depth.
pub fn volume_dimension_method(effusion: &EffusionFindings) -> Derived {
    if !effusion.present {
        return Derived::Unavailable;
    }
    match (
        effusion.height_cm.filter(|h| *h > 0.0),
        effusion.basal_depth_cm.filter(|d| *d > 0.0),
    ) {
        (Some(h), Some(d)) => Derived::from_value(70.0 * (h + d)),
        _ => Derived::Unavailable,
    }
}

/// Effusion volume by the Balik method: 20 mL per mm of end-expiratory
/// interpleural distance, i.e. 200 * C with C in cm.
pub fn volume_balik_method(effusion: &EffusionFindings) -> Derived {
    if !effusion.present {
        return Derived::Unavailable;
    }
    match effusion.interpleural_distance_cm.filter(|c| *c > 0.0) {
        Some(c) => Derived::from_value(200.0 * c),
        None => Derived::Unavailable,
    }
}

/// Transudate/exudate suggestion from a DUETS score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EffusionCharacter {
    Transudate,
    Exudate,
}

impl EffusionCharacter {
    pub fn label(&self) -> &'static str {
        match self {
            EffusionCharacter::Transudate => "Suggestive of transudate.",
            EffusionCharacter::Exudate => "Suggestive of exudate.",
        }
    }
}

/// A computed DUETS score for one side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DuetsScore {
    pub score: u8,
    pub character: EffusionCharacter,
}

/// DUETS score for one side. `None` while no effusion is marked present.
///
/// Components: pleural thickness > 0.2 cm (+2), non-anechoic fluid (+1),
/// diaphragmatic nodules (+3), B-lines or shred sign in the adjacent
/// basal zone (+1).
pub fn duets_score(effusion: &EffusionFindings, survey: &LungSurvey, side: Side) -> Option<DuetsScore> {
    if !effusion.present {
        return None;
    }

    let mut score = 0u8;

    if effusion.pleural_thickness_cm.map_or(false, |t| t > 0.2) {
        score += 2;
    }
    if !effusion.echogenicity.is_anechoic() {
        score += 1;
    }
    if effusion.diaphragmatic_nodules {
        score += 3;
    }

    let adjacent = survey.zone(Zone::adjacent_to_effusion(side));
    if adjacent.b_line || adjacent.shred {
        score += 1;
    }

    let character = if score > DUETS_EXUDATE_CUTOFF {
        EffusionCharacter::Exudate
    } else {
        EffusionCharacter::Transudate
    };

    Some(DuetsScore { score, character })
}

/// Composite clinical interpretation across zones and effusions.
///
/// The parenchymal rules are independent and concatenated; only when
/// none fires does the study read as a normal aeration pattern.
pub fn interpret(
    survey: &LungSurvey,
    right_effusion: &EffusionFindings,
    left_effusion: &EffusionFindings,
) -> Vec<String> {
    let mut findings = Vec::new();

    let b_line_zones = survey.count(|z| z.b_line);
    if b_line_zones >= INTERSTITIAL_ZONE_THRESHOLD {
        findings.push(
            "Multiple B-lines suggest interstitial syndrome (e.g., pulmonary edema, \
             pneumonitis, ARDS)."
                .to_string(),
        );
    }

    if survey.count(|z| z.shred) > 0 {
        findings.push("Shred sign indicates lung consolidation.".to_string());
    }

    if survey.count(|z| !z.sliding) > 0 {
        findings.push(
            "Absent lung sliding is suspicious for pneumothorax. Confirmation with a \
             \"lung point\" is recommended."
                .to_string(),
        );
    }

    if findings.is_empty() {
        findings.push("Normal lung aeration pattern (A-lines with sliding).".to_string());
    }

    for (side, effusion) in [(Side::Right, right_effusion), (Side::Left, left_effusion)] {
        if let Some(summary) = effusion_summary(effusion, side) {
            findings.push(summary);
        }
    }

    findings
}

fn effusion_summary(effusion: &EffusionFindings, side: Side) -> Option<String> {
    if !effusion.present {
        return None;
    }

    let mut summary = format!("A {} pleural effusion is noted.", side.label());

    if effusion.has_complex_features() {
        summary.push_str(
            " Complex features (echogenic, septated) may suggest an exudate \
             (e.g., parapneumonic effusion, empyema, hemothorax).",
        );
    } else {
        summary.push_str(" Anechoic appearance is consistent with a simple effusion or transudate.");
    }

    if effusion.has_malignancy_features() {
        summary.push_str(
            " Pleural nodules or thickening (>1 cm) are concerning and raise suspicion \
             for malignancy.",
        );
    }

    Some(summary)
}
