//! Golden and property tests for the dose calculator.

use clinic_desk_core::models::{DoseRequest, DoseUnit, LiquidFormulation};
use clinic_desk_core::{clamp_input, compute_dose};
use proptest::prelude::*;

/// Test case from golden file.
struct GoldenCase {
    id: &'static str,
    weight_kg: f64,
    dose_per_kg: f64,
    dose_unit: DoseUnit,
    liquid: Option<(f64, DoseUnit, f64)>,
    expected_total: f64,
    expected_volume: Option<f64>,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "tablet-mg",
            weight_kg: 10.0,
            dose_per_kg: 5.0,
            dose_unit: DoseUnit::Mg,
            liquid: None,
            expected_total: 50.0,
            expected_volume: None,
        },
        GoldenCase {
            id: "amoxicillin-suspension",
            weight_kg: 10.0,
            dose_per_kg: 5.0,
            dose_unit: DoseUnit::Mg,
            liquid: Some((125.0, DoseUnit::Mg, 5.0)),
            expected_total: 50.0,
            expected_volume: Some(2.0),
        },
        GoldenCase {
            id: "zero-weight",
            weight_kg: 0.0,
            dose_per_kg: 5.0,
            dose_unit: DoseUnit::Mg,
            liquid: Some((125.0, DoseUnit::Mg, 5.0)),
            expected_total: 0.0,
            expected_volume: Some(0.0),
        },
        GoldenCase {
            id: "paracetamol-suspension",
            weight_kg: 14.0,
            dose_per_kg: 15.0,
            dose_unit: DoseUnit::Mg,
            liquid: Some((250.0, DoseUnit::Mg, 5.0)),
            expected_total: 210.0,
            expected_volume: Some(4.2),
        },
        GoldenCase {
            id: "microgram-dose-mg-liquid",
            weight_kg: 8.0,
            dose_per_kg: 500.0,
            dose_unit: DoseUnit::Mcg,
            liquid: Some((1.0, DoseUnit::Mg, 1.0)),
            expected_total: 4000.0,
            expected_volume: Some(4.0),
        },
        GoldenCase {
            id: "gram-dose-mg-liquid",
            weight_kg: 20.0,
            dose_per_kg: 0.05,
            dose_unit: DoseUnit::G,
            liquid: Some((100.0, DoseUnit::Mg, 1.0)),
            expected_total: 1.0,
            expected_volume: Some(10.0),
        },
        GoldenCase {
            id: "microgram-liquid",
            weight_kg: 3.5,
            dose_per_kg: 10.0,
            dose_unit: DoseUnit::Mcg,
            liquid: Some((50.0, DoseUnit::Mcg, 1.0)),
            expected_total: 35.0,
            expected_volume: Some(0.7),
        },
        GoldenCase {
            id: "liquid-without-volume",
            weight_kg: 10.0,
            dose_per_kg: 5.0,
            dose_unit: DoseUnit::Mg,
            liquid: Some((125.0, DoseUnit::Mg, 0.0)),
            expected_total: 50.0,
            expected_volume: None,
        },
        GoldenCase {
            id: "negative-weight",
            weight_kg: -12.0,
            dose_per_kg: 5.0,
            dose_unit: DoseUnit::Mg,
            liquid: None,
            expected_total: 0.0,
            expected_volume: None,
        },
    ]
}

#[test]
fn test_golden_cases() {
    for case in get_golden_cases() {
        let request = DoseRequest::new(case.weight_kg, case.dose_per_kg, case.dose_unit);
        let liquid = case
            .liquid
            .map(|(amount, unit, volume)| LiquidFormulation::new(amount, unit, volume));

        let result = compute_dose(&request, liquid.as_ref());

        assert!(
            (result.total_dose - case.expected_total).abs() < 1e-9,
            "Case {}: total mismatch - expected {}, got {}",
            case.id, case.expected_total, result.total_dose
        );
        assert_eq!(result.dose_unit, case.dose_unit, "Case {}: unit mismatch", case.id);

        match (case.expected_volume, result.volume_ml) {
            (Some(expected), Some(actual)) => assert!(
                (actual - expected).abs() < 1e-9,
                "Case {}: volume mismatch - expected {}, got {}",
                case.id, expected, actual
            ),
            (None, None) => {}
            (expected, actual) => panic!(
                "Case {}: volume mismatch - expected {:?}, got {:?}",
                case.id, expected, actual
            ),
        }
    }
}

fn any_unit() -> impl Strategy<Value = DoseUnit> {
    prop_oneof![Just(DoseUnit::Mcg), Just(DoseUnit::Mg), Just(DoseUnit::G)]
}

proptest! {
    #[test]
    fn prop_total_is_exact_product(
        weight in 0.0f64..500.0,
        dose in 0.0f64..5000.0,
        unit in any_unit(),
    ) {
        let result = compute_dose(&DoseRequest::new(weight, dose, unit), None);
        prop_assert_eq!(result.total_dose, weight * dose);
        prop_assert_eq!(result.dose_unit, unit);
    }

    #[test]
    fn prop_never_negative_or_nan(
        weight in any::<f64>(),
        dose in any::<f64>(),
        amount in any::<f64>(),
        volume in any::<f64>(),
        unit in any_unit(),
        liquid_unit in any_unit(),
    ) {
        let request = DoseRequest::new(weight, dose, unit);
        let liquid = LiquidFormulation::new(amount, liquid_unit, volume);
        let result = compute_dose(&request, Some(&liquid));

        prop_assert!(!result.total_dose.is_nan());
        prop_assert!(result.total_dose >= 0.0);
        if let Some(v) = result.volume_ml {
            prop_assert!(v.is_finite());
            prop_assert!(v >= 0.0);
        }
    }

    #[test]
    fn prop_volume_only_for_defined_liquid(
        amount in -10.0f64..1000.0,
        volume in -10.0f64..100.0,
    ) {
        let request = DoseRequest::new(10.0, 5.0, DoseUnit::Mg);
        let liquid = LiquidFormulation::new(amount, DoseUnit::Mg, volume);
        let result = compute_dose(&request, Some(&liquid));

        let defined = clamp_input(amount) > 0.0 && clamp_input(volume) > 0.0;
        prop_assert_eq!(result.volume_ml.is_some(), defined);
    }

    #[test]
    fn prop_volume_scales_with_unit(
        weight in 1.0f64..100.0,
        dose in 1.0f64..100.0,
    ) {
        // Same mass expressed in mg and in g must need the same volume.
        let liquid = LiquidFormulation::new(250.0, DoseUnit::Mg, 5.0);
        let in_mg = compute_dose(&DoseRequest::new(weight, dose, DoseUnit::Mg), Some(&liquid));
        let in_g = compute_dose(
            &DoseRequest::new(weight, dose / 1000.0, DoseUnit::G),
            Some(&liquid),
        );

        let a = in_mg.volume_ml.unwrap();
        let b = in_g.volume_ml.unwrap();
        prop_assert!((a - b).abs() <= 1e-9 * a.max(1.0));
    }
}
