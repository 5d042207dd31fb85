//! Clinical derivation engine.
//!
//! Each submodule is a leaf: pure functions from typed inputs to typed
//! results. The only shared input is the read-only [`PatientProfile`]
//! passed in by the caller.
//!
//! [`PatientProfile`]: crate::models::PatientProfile

pub mod cardiac;
pub mod dates;
pub mod hemodynamics;
pub mod lung;
pub mod nutrition;
pub mod profile;
pub mod renal;
pub mod scores;
pub mod vasopressor;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A value owned by another calculator that this derivation requires.
///
/// Distinct from ordinary missing input: the presentation layer shows the
/// message as a warning instead of the generic dash.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Error)]
pub enum MissingDependency {
    #[error("weight required for this calculation")]
    Weight,

    #[error("BSA required for this calculation")]
    BodySurfaceArea,
}

/// Outcome of a single numeric derivation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Derived {
    /// Computed value.
    Value(f64),
    /// Input absent or outside the formula's domain.
    Unavailable,
    /// A value from another module is needed and absent.
    Missing(MissingDependency),
}

impl Derived {
    /// Wrap a finite value; anything else degrades to `Unavailable`.
    pub fn from_value(value: f64) -> Self {
        if value.is_finite() {
            Derived::Value(value)
        } else {
            Derived::Unavailable
        }
    }

    /// The numeric value, if one was computed.
    pub fn value(&self) -> Option<f64> {
        match self {
            Derived::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Derived::Value(_))
    }

    /// Render with a fixed number of decimal places.
    ///
    /// `Unavailable` renders as `-`; a dependency gap renders as its
    /// warning message.
    pub fn display(&self, decimals: usize) -> String {
        match self {
            Derived::Value(v) => format!("{:.*}", decimals, v),
            Derived::Unavailable => "-".to_string(),
            Derived::Missing(gap) => gap.to_string(),
        }
    }

    /// Map the computed value, preserving `Unavailable` and gaps.
    pub fn map<F: FnOnce(f64) -> f64>(self, f: F) -> Self {
        match self {
            Derived::Value(v) => Derived::from_value(f(v)),
            other => other,
        }
    }
}

impl From<Option<f64>> for Derived {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Derived::from_value(v),
            None => Derived::Unavailable,
        }
    }
}

/// Tri-state classification used for presentation styling.
///
/// The core exposes only the classification; mapping to color belongs to
/// the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Danger,
}

/// A qualitative clinical reading attached to a derived value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interpretation {
    /// Human-readable reading keyed to a clinical cutoff.
    pub text: String,
    /// Styling classification.
    pub severity: Severity,
}

impl Interpretation {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}
