use proptest::prelude::*;

use resonance::classify::{self, Complexity};
use resonance::config::{Params, Variant};
use resonance::profiles::DISEASES;
use resonance::scoring::{ScoreKind, score};
use resonance::waves::waves;

fn in_range_params() -> impl Strategy<Value = Params> {
    (
        (0.0..=5.0f64, 0.0..=1.0f64, 0.0..=5.0f64),
        (-2.0..=2.0f64, 0.0..=1.0f64, 0.0..=5.0f64),
        (0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64),
    )
        .prop_map(
            |((membrane, entropy, structural), (charge, selectivity, stability), (delivery, recognition, flexibility))| {
                Params {
                    membrane,
                    entropy,
                    structural,
                    charge,
                    selectivity,
                    stability,
                    delivery,
                    recognition,
                    flexibility,
                }
            },
        )
}

fn any_variant() -> impl Strategy<Value = Variant> {
    prop::sample::select(Variant::ALL.to_vec())
}

proptest! {
    #[test]
    fn scores_stay_in_percent_range(p in in_range_params(), v in any_variant(), d in 0..DISEASES.len()) {
        let s = score(&p, &DISEASES[d], v);
        for value in s.values() {
            prop_assert!((0.0..=100.0).contains(&value), "{value} out of range for {v}");
        }
    }

    #[test]
    fn selectivity_score_is_monotone(p in in_range_params(), a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        for v in [Variant::Disease, Variant::Molecular] {
            let mut low = p.clone();
            low.selectivity = lo;
            let mut high = p.clone();
            high.selectivity = hi;
            let s_lo = score(&low, &DISEASES[0], v).get(ScoreKind::Selectivity).unwrap();
            let s_hi = score(&high, &DISEASES[0], v).get(ScoreKind::Selectivity).unwrap();
            prop_assert!(s_lo <= s_hi);
        }
    }

    #[test]
    fn classify_agrees_with_thresholds(p in in_range_params()) {
        let total = classify::total_complexity(&p);
        let expected = if total < 6.0 {
            Complexity::Simple
        } else if total < 10.0 {
            Complexity::Medium
        } else if total < 14.0 {
            Complexity::Complex
        } else {
            Complexity::Advanced
        };
        prop_assert_eq!(classify::classify(&p), expected);
    }

    #[test]
    fn buckets_are_ordered_by_total(a in 0.0..30.0f64, b in 0.0..30.0f64) {
        if a <= b {
            prop_assert!(classify::bucket(a) <= classify::bucket(b));
        }
    }

    #[test]
    fn waves_are_deterministic(p in in_range_params(), v in any_variant(), t in 0.0..100.0f64) {
        let a = waves(&p, &DISEASES[1], v, t);
        let b = waves(&p, &DISEASES[1], v, t);
        prop_assert_eq!(a, b);
    }
}
