//! Multi-field clinical scores.

use serde::{Deserialize, Serialize};

use crate::derive::{Interpretation, Severity};

/// Angina observed during the treadmill test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AnginaDuringExercise {
    #[default]
    None,
    NonLimiting,
    ExerciseLimiting,
}

impl AnginaDuringExercise {
    fn weight(&self) -> f64 {
        match self {
            AnginaDuringExercise::None => 0.0,
            AnginaDuringExercise::NonLimiting => 1.0,
            AnginaDuringExercise::ExerciseLimiting => 2.0,
        }
    }
}

/// Duke risk bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TreadmillRisk {
    Low,
    Moderate,
    High,
}

impl TreadmillRisk {
    /// >= 5 low, >= -10 moderate, below that high.
    pub fn from_score(score: f64) -> Self {
        if score >= 5.0 {
            TreadmillRisk::Low
        } else if score >= -10.0 {
            TreadmillRisk::Moderate
        } else {
            TreadmillRisk::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TreadmillRisk::Low => "Low Risk",
            TreadmillRisk::Moderate => "Moderate Risk",
            TreadmillRisk::High => "High Risk",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            TreadmillRisk::Low => Severity::Normal,
            TreadmillRisk::Moderate => Severity::Warning,
            TreadmillRisk::High => Severity::Danger,
        }
    }

    pub fn interpretation(&self) -> Interpretation {
        Interpretation::new(self.label(), self.severity())
    }
}

/// Duke treadmill score with its risk band, 0 decimals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DukeResult {
    pub score: f64,
    pub risk: TreadmillRisk,
}

/// Duke treadmill score = duration - 5 * ST deviation - 4 * angina code.
pub fn duke_treadmill_score(
    exercise_duration_min: Option<f64>,
    st_deviation_mm: Option<f64>,
    angina: AnginaDuringExercise,
) -> Option<DukeResult> {
    let duration = exercise_duration_min?;
    let st = st_deviation_mm?;
    let score = duration - 5.0 * st - 4.0 * angina.weight();
    Some(DukeResult {
        score,
        risk: TreadmillRisk::from_score(score),
    })
}

/// IPSS symptom bands over the 0-35 score range.
pub fn ipss_interpretation(score: Option<u32>) -> Option<&'static str> {
    let score = score?;
    Some(match score {
        0..=7 => "Mildly symptomatic",
        8..=19 => "Moderately symptomatic",
        20..=35 => "Severely symptomatic",
        _ => "Invalid score (must be 0-35)",
    })
}
