//! Property-based tests for the core primitives.

use proptest::prelude::*;
use tonix_core::{
    LayoutError, ParamDescriptor, StreamLayout, Waveshaper, db_to_linear, flush_denormal,
    linear_to_db,
};

fn waveshaper_strategy() -> impl Strategy<Value = Waveshaper> {
    (0usize..3).prop_map(|i| Waveshaper::from_index(i).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn waveshaper_output_is_finite_and_small(
        variant in waveshaper_strategy(),
        x in -1.0e6f64..1.0e6,
    ) {
        let y = variant.process(x);
        prop_assert!(y.is_finite());
        prop_assert!(y.abs() < 1.0, "{variant:?}({x}) = {y}");
    }

    #[test]
    fn waveshaper_saturates_past_clamp(variant in waveshaper_strategy(), over in 0.0f64..100.0) {
        let (low, high) = variant.clamp_range();
        prop_assert_eq!(variant.process(high + over), variant.process(high));
        prop_assert_eq!(variant.process(low - over), variant.process(low));
    }

    #[test]
    fn db_conversion_inverts(db in -120.0f64..40.0) {
        let back = linear_to_db(db_to_linear(db));
        prop_assert!((back - db).abs() < 1e-9, "{db} -> {back}");
    }

    #[test]
    fn flush_denormal_keeps_or_zeroes(x in prop::num::f64::ANY) {
        let y = flush_denormal(x);
        if x.abs() < 1e-20 {
            prop_assert_eq!(y, 0.0);
        } else if !x.is_nan() {
            prop_assert_eq!(y, x);
        }
    }

    #[test]
    fn clamp_stays_in_range(value in prop::num::f32::ANY) {
        let descriptors = [
            ParamDescriptor::gain_db("Trim", "Trim", -10.0, 10.0, 0.0),
            ParamDescriptor::percent("Amount", "Amount", 0.0),
            ParamDescriptor::choice("Mode", "Mode", &["A", "B", "C"], 1),
            ParamDescriptor::toggle("On", "On", true),
        ];
        for desc in descriptors {
            let clamped = desc.clamp(value);
            prop_assert!(clamped >= desc.min && clamped <= desc.max, "{} -> {clamped}", desc.name);
            let normalized = desc.normalize(value);
            prop_assert!((0.0..=1.0).contains(&normalized));
        }
    }

    #[test]
    fn layout_accepts_only_symmetric_fast_streams(
        sample_rate in 0.0f64..400_000.0,
        inputs in 0usize..9,
        outputs in 0usize..9,
    ) {
        let result = StreamLayout::new(sample_rate, inputs, outputs).validate();
        if sample_rate < 44100.0 {
            prop_assert_eq!(result, Err(LayoutError::InvalidSampleRate(sample_rate)));
        } else if inputs != outputs {
            prop_assert_eq!(result, Err(LayoutError::AsymmetricChannels { inputs, outputs }));
        } else if outputs == 0 {
            prop_assert_eq!(result, Err(LayoutError::NoChannels));
        } else {
            prop_assert_eq!(result, Ok(()));
        }
    }
}
