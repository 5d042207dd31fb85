//! Property tests for the derivation contracts.

use proptest::prelude::*;

use companion_core::derive::cardiac::simpson_lvef;
use companion_core::derive::profile::{body_metrics, BmiCategory};
use companion_core::derive::vasopressor::{convert, ConversionMode, InfusionOrder};
use companion_core::models::InfusionDrug;
use companion_core::{PatientProfile, Session};

proptest! {
    /// BMI and BSA follow the stated formulas exactly for any positive
    /// height and weight.
    #[test]
    fn bmi_and_bsa_are_exact(height in 50.0f64..250.0, weight in 2.0f64..300.0) {
        let profile = PatientProfile {
            height_cm: Some(height),
            weight_kg: Some(weight),
            ..Default::default()
        };
        let metrics = body_metrics(&profile);
        let height_m = height / 100.0;
        let expected_bmi = weight / (height_m * height_m);
        let expected_bsa = (height * weight / 3600.0).sqrt();
        prop_assert!((metrics.bmi.value().unwrap() - expected_bmi).abs() < 1e-12);
        prop_assert!((metrics.bsa.value().unwrap() - expected_bsa).abs() < 1e-12);
    }

    /// Category assignment partitions the positive axis: every BMI gets
    /// exactly the band its thresholds dictate.
    #[test]
    fn bmi_categories_partition(bmi in 1.0f64..100.0) {
        let category = BmiCategory::from_bmi(bmi);
        let expected = if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        };
        prop_assert_eq!(category, expected);
    }

    /// Valid Simpson inputs give a fraction strictly inside (0, 100).
    #[test]
    fn simpson_lvef_is_bounded(esv in 1.0f64..500.0, delta in 0.1f64..500.0) {
        let edv = esv + delta;
        let lvef = simpson_lvef(Some(edv), Some(esv)).value().unwrap();
        prop_assert!(lvef > 0.0 && lvef < 100.0);
        prop_assert!((lvef - (edv - esv) / edv * 100.0).abs() < 1e-12);
    }

    /// Inverted or degenerate volumes never produce a number.
    #[test]
    fn simpson_lvef_rejects_out_of_domain(edv in 1.0f64..500.0, extra in 0.0f64..100.0) {
        let esv = edv + extra;
        prop_assert!(simpson_lvef(Some(edv), Some(esv)).value().is_none());
    }

    /// Converting a rate to a dose and back reproduces the rate.
    #[test]
    fn vasopressor_rate_round_trips(
        rate in 0.1f64..500.0,
        bag_amount in 1.0f64..64.0,
        bag_volume in 20.0f64..1000.0,
        weight in 30.0f64..200.0,
    ) {
        let order = InfusionOrder {
            drug: InfusionDrug::Noradrenaline,
            bag_amount: Some(bag_amount),
            bag_volume_ml: Some(bag_volume),
            mode: ConversionMode::DoseFromRate,
            input: Some(rate),
        };
        let dose = convert(&order, Some(weight)).value.value().unwrap();

        let back = InfusionOrder {
            mode: ConversionMode::RateFromDose,
            input: Some(dose),
            ..order
        };
        let rate_back = convert(&back, Some(weight)).value.value().unwrap();
        prop_assert!((rate_back - rate).abs() <= rate * 1e-12);
    }

    /// Clearing a session with arbitrary patient input restores the
    /// pristine state, with no field left behind.
    #[test]
    fn clear_all_resets_everything(
        height in "[0-9]{0,4}",
        weight in ".{0,12}",
        edv in ".{0,12}",
        b_line in any::<bool>(),
        effusion_present in any::<bool>(),
    ) {
        let mut session = Session::new();
        session.patient.height = height;
        session.patient.weight = weight;
        session.echo.edv = edv;
        session.lung.survey.zone_mut(companion_core::Zone::L2).b_line = b_line;
        session.lung.right_effusion.present = effusion_present;

        session.clear();
        prop_assert_eq!(session, Session::default());
    }

    /// Recomputation is referentially transparent: the same session
    /// state always derives the same report.
    #[test]
    fn derivations_are_deterministic(height in 100.0f64..220.0, weight in 30.0f64..200.0) {
        let mut session = Session::new();
        session.patient.height = format!("{height}");
        session.patient.weight = format!("{weight}");
        let first = session.body_metrics();
        let second = session.body_metrics();
        prop_assert_eq!(first, second);
    }
}
