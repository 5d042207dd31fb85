//! Right-heart pressure estimates.

use serde::{Deserialize, Serialize};

use crate::derive::Derived;

/// IVC collapse with sniff, relative to the 50% cutoff.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum IvcCollapse {
    /// Collapses by 50% or more
    #[default]
    AtLeastHalf,
    /// Collapses by less than 50%
    LessThanHalf,
}

/// Estimated RAP band from IVC caliber and collapsibility.
///
/// Guideline lookup keyed on the 2.1 cm diameter cutoff and the sniff
/// collapse cutoff; exactly four bands, no fall-through case.
pub fn estimated_rap(ivc_diameter_cm: Option<f64>, collapse: IvcCollapse) -> Option<&'static str> {
    let diameter = ivc_diameter_cm?;
    let dilated = diameter > 2.1;
    Some(match (dilated, collapse) {
        (false, IvcCollapse::AtLeastHalf) => "3 (0-5)",
        (true, IvcCollapse::AtLeastHalf) => "8 (5-10)",
        (false, IvcCollapse::LessThanHalf) => "8 (5-10)",
        (true, IvcCollapse::LessThanHalf) => "15 (10-20)",
    })
}

/// Mean PAP in mmHg from systolic and diastolic PAP, 1 decimal.
/// Requires sPAP > dPAP > 0.
pub fn mean_pap(spap_mmhg: Option<f64>, dpap_mmhg: Option<f64>) -> Derived {
    match (spap_mmhg, dpap_mmhg) {
        (Some(s), Some(d)) if d > 0.0 && s > d => Derived::from_value((s + 2.0 * d) / 3.0),
        _ => Derived::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rap_all_four_bands() {
        assert_eq!(
            estimated_rap(Some(1.8), IvcCollapse::AtLeastHalf),
            Some("3 (0-5)")
        );
        assert_eq!(
            estimated_rap(Some(2.5), IvcCollapse::AtLeastHalf),
            Some("8 (5-10)")
        );
        assert_eq!(
            estimated_rap(Some(1.8), IvcCollapse::LessThanHalf),
            Some("8 (5-10)")
        );
        assert_eq!(
            estimated_rap(Some(2.5), IvcCollapse::LessThanHalf),
            Some("15 (10-20)")
        );
    }

    #[test]
    fn test_rap_cutoff_is_inclusive() {
        // 2.1 itself is not dilated
        assert_eq!(
            estimated_rap(Some(2.1), IvcCollapse::AtLeastHalf),
            Some("3 (0-5)")
        );
    }

    #[test]
    fn test_rap_requires_diameter() {
        assert_eq!(estimated_rap(None, IvcCollapse::AtLeastHalf), None);
    }

    #[test]
    fn test_mean_pap() {
        assert_eq!(mean_pap(Some(40.0), Some(20.0)).display(1), "26.7");
    }

    #[test]
    fn test_mean_pap_domain() {
        assert_eq!(mean_pap(Some(20.0), Some(40.0)), Derived::Unavailable);
        assert_eq!(mean_pap(Some(20.0), Some(20.0)), Derived::Unavailable);
        assert_eq!(mean_pap(Some(20.0), Some(0.0)), Derived::Unavailable);
        assert_eq!(mean_pap(None, Some(20.0)), Derived::Unavailable);
    }
}
