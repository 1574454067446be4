mod common;

use bodyforge::adjust::adjust_inputs;
use bodyforge::measurement::MeasurementKey;
use bodyforge::solver::BodySolver;
use bodyforge::variant::Variant;
use common::{inputs_with, solver};
use proptest::prelude::*;
use std::sync::OnceLock;

fn male() -> &'static BodySolver {
    static SOLVER: OnceLock<BodySolver> = OnceLock::new();
    SOLVER.get_or_init(|| solver(Variant::Male))
}

fn female() -> &'static BodySolver {
    static SOLVER: OnceLock<BodySolver> = OnceLock::new();
    SOLVER.get_or_init(|| solver(Variant::Female))
}

// --- STRATEGIES ---

prop_compose! {
    fn arb_body()(
        height in 150.0..200.0f64,
        thigh in 38.0..55.0f64,
        calf in 38.0..52.0f64,
        waist in 60.0..90.0f64,
        hips in 85.0..115.0f64,
        fat in 8.0..40.0f64,
        muscle in 10.0..70.0f64,
    ) -> Vec<(MeasurementKey, f64)> {
        vec![
            (MeasurementKey::Height, height),
            (MeasurementKey::ThighLength, thigh),
            (MeasurementKey::CalfLength, calf),
            (MeasurementKey::Waist, waist),
            (MeasurementKey::Hips, hips),
            (MeasurementKey::BodyFat, fat),
            (MeasurementKey::Muscle, muscle),
        ]
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_solve_is_deterministic(body in arb_body()) {
        let s = female();
        let raw = inputs_with(s, &body);
        let a = s.solve(&raw).unwrap();
        let b = s.solve(&raw).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_output_is_finite_and_complete(body in arb_body()) {
        let s = male();
        let out = s.solve(&inputs_with(s, &body)).unwrap();

        prop_assert_eq!(out.body_dimensions.len(), 15);
        prop_assert_eq!(out.body_dimension_lengths.len(), 14);
        for w in &out.body_dimensions {
            prop_assert!(w.value.is_finite());
        }
        for b in &out.body_dimension_lengths {
            prop_assert!(b.value.y.is_finite());
            prop_assert!(b.value.y > 0.0);
        }
    }

    #[test]
    fn prop_only_one_fat_category_is_active(body in arb_body()) {
        let s = female();
        let out = s.solve(&inputs_with(s, &body)).unwrap();
        let over = out.weight("b_{main}_overweight").unwrap();
        let skinny = out.weight("b_{main}_skinny").unwrap();
        prop_assert!(over == 0.0 || skinny == 0.0);
        prop_assert!(over >= 0.0);
        prop_assert!(skinny >= 0.0);
    }

    #[test]
    fn prop_thigh_scale_grows_with_thigh_length(
        a in 40.0..55.0f64,
        b in 40.0..55.0f64,
    ) {
        prop_assume!((a - b).abs() > 1e-6);
        let (short, long) = if a < b { (a, b) } else { (b, a) };
        let s = male();

        // Height follows so the torso and spine stay put.
        let basis = s.dataset().basis.clone();
        let base_thigh = basis.value(MeasurementKey::ThighLength).unwrap();
        let base_height = basis.value(MeasurementKey::Height).unwrap();
        let run = |thigh: f64| {
            s.solve(&inputs_with(s, &[
                (MeasurementKey::ThighLength, thigh),
                (MeasurementKey::Height, base_height + thigh - base_thigh),
            ]))
            .unwrap()
        };
        let out_short = run(short);
        let out_long = run(long);

        prop_assert!(out_long.bone("thighR").unwrap().y > out_short.bone("thighR").unwrap().y);
        prop_assert!((out_short.bone("spine").unwrap().y - 1.0).abs() < 1e-9);
        prop_assert!((out_long.bone("spine").unwrap().y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_adjust_keeps_non_percentage_values(height in 100.0..250.0f64, waist in 40.0..150.0f64) {
        let raw = bodyforge::measurement::MeasurementVector::from([
            (MeasurementKey::Height, height),
            (MeasurementKey::Waist, waist),
        ]);
        let adjusted = adjust_inputs(&raw, Variant::Male);
        prop_assert_eq!(adjusted, raw);
    }
}
