//! Serialized snapshot of every derived value.
//!
//! The presentation layer renders display strings and severity tags; this
//! module collects them all for one session state so a host can consume
//! the whole worksheet at once.

use serde::Serialize;

use crate::derive::lung::DuetsScore;
use crate::derive::nutrition::FeedingPlan;
use crate::derive::Interpretation;
use crate::models::Side;
use crate::session::Session;

/// A labeled display value with its optional reading.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportEntry {
    pub label: &'static str,
    /// Formatted value, "-" when unavailable, or a dependency warning
    pub value: String,
    pub unit: &'static str,
    pub interpretation: Option<Interpretation>,
}

impl ReportEntry {
    fn new(label: &'static str, value: String, unit: &'static str) -> Self {
        Self {
            label,
            value,
            unit,
            interpretation: None,
        }
    }

    fn with_interpretation(mut self, interpretation: Option<Interpretation>) -> Self {
        self.interpretation = interpretation;
        self
    }
}

/// Per-side effusion figures.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EffusionReport {
    pub side: Side,
    pub volume_dimension_ml: String,
    pub volume_balik_ml: String,
    pub duets: Option<DuetsScore>,
}

/// Full derived snapshot of a session.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionReport {
    pub body: Vec<ReportEntry>,
    pub renal: Vec<ReportEntry>,
    pub cardiac: Vec<ReportEntry>,
    pub hemodynamics: Vec<ReportEntry>,
    pub lung_findings: Vec<String>,
    pub effusions: Vec<EffusionReport>,
    pub nutrition: Vec<ReportEntry>,
    pub infusion: Vec<ReportEntry>,
    pub feeding_plan: Option<FeedingPlan>,
}

impl SessionReport {
    /// Snapshot the session's derived state.
    pub fn from_session(session: &Session) -> Self {
        let metrics = session.body_metrics();
        let body = vec![
            ReportEntry::new("BMI", metrics.bmi.display(2), "kg/m²").with_interpretation(
                metrics.category.map(|c| c.interpretation()),
            ),
            ReportEntry::new("BSA (Mosteller)", metrics.bsa.display(2), "m²"),
            ReportEntry::new("Ideal Body Weight", metrics.ideal_weight.display(1), "kg"),
            ReportEntry::new(
                "Adjusted Body Weight",
                metrics.adjusted_weight.display(1),
                "kg",
            ),
        ];

        let renal = vec![
            ReportEntry::new("CrCl", session.creatinine_clearance().display(1), "mL/min"),
            ReportEntry::new("eGFR", session.egfr().display(0), "mL/min/1.73m²"),
        ];

        let lvot = session.lvot();
        let eccentricity = session.eccentricity();
        let cardiac = vec![
            ReportEntry::new("LVEF (Simpson)", session.simpson_lvef().display(1), "%"),
            ReportEntry::new("LVEF (Teichholz)", session.teichholz_lvef().display(1), "%"),
            ReportEntry::new("Automated LVEF band", "-".to_string(), "")
                .with_interpretation(session.auto_ef_class().map(|c| c.interpretation())),
            ReportEntry::new("LVOT Area", lvot.area.display(2), "cm²"),
            ReportEntry::new("Stroke Volume", lvot.stroke_volume.display(1), "mL"),
            ReportEntry::new("Cardiac Output", lvot.cardiac_output.display(2), "L/min"),
            ReportEntry::new("Cardiac Index", lvot.cardiac_index.display(2), "L/min/m²"),
            ReportEntry::new("EPSS", "-".to_string(), "mm")
                .with_interpretation(session.epss()),
            ReportEntry::new("MAPSE", "-".to_string(), "cm")
                .with_interpretation(session.mapse()),
            ReportEntry::new("TAPSE", "-".to_string(), "cm")
                .with_interpretation(session.tapse()),
            ReportEntry::new("Eccentricity Index", eccentricity.index.display(2), "")
                .with_interpretation(eccentricity.interpretation),
        ];

        let hemodynamics = vec![
            ReportEntry::new(
                "Est. RAP",
                session.estimated_rap().unwrap_or("-").to_string(),
                "mmHg",
            ),
            ReportEntry::new("mPAP", session.mean_pap().display(1), "mmHg"),
        ];

        let effusions = [Side::Right, Side::Left]
            .into_iter()
            .map(|side| EffusionReport {
                side,
                volume_dimension_ml: session.effusion_volume_dimension(side).display(0),
                volume_balik_ml: session.effusion_volume_balik(side).display(0),
                duets: session.duets(side),
            })
            .collect();

        let target = session.energy_target();
        let nutrition = vec![
            ReportEntry::new("BMR", target.bmr.display(0), "kcal/day"),
            ReportEntry::new("Est. Caloric Needs", target.target.display(0), "kcal/day"),
        ];

        let concentration = session.infusion_concentration();
        let conversion = session.infusion_conversion();
        let infusion = vec![
            ReportEntry::new(
                "Final Concentration",
                concentration.value.display(concentration.decimals),
                concentration.unit,
            ),
            ReportEntry::new(
                "Conversion",
                conversion.value.display(conversion.decimals),
                conversion.unit,
            ),
        ];

        SessionReport {
            body,
            renal,
            cardiac,
            hemodynamics,
            lung_findings: session.lung_interpretation(),
            effusions,
            nutrition,
            infusion,
            feeding_plan: session.feeding_plan(),
        }
    }

    /// Serialize for the host.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_report_is_all_dashes() {
        let report = SessionReport::from_session(&Session::new());
        for entry in report.body.iter().chain(&report.renal) {
            assert_eq!(entry.value, "-");
        }
        assert_eq!(report.lung_findings.len(), 1);
        assert!(report.feeding_plan.is_none());
    }

    #[test]
    fn test_report_serializes() {
        let mut session = Session::new();
        session.patient.height = "170".into();
        session.patient.weight = "70".into();
        let report = SessionReport::from_session(&session);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"BMI\""));
        assert!(json.contains("24.22"));
    }

    #[test]
    fn test_report_carries_dependency_warning() {
        let mut session = Session::new();
        session.infusion.bag_amount = "4".into();
        session.infusion.bag_volume = "50".into();
        session.infusion.input = "5".into();
        let report = SessionReport::from_session(&session);
        let conversion = report
            .infusion
            .iter()
            .find(|e| e.label == "Conversion")
            .unwrap();
        assert_eq!(conversion.value, "weight required for this calculation");
    }
}
