// tests/alert_ordering.rs
//
// The alert predicates are independent: shuffling their evaluation order must
// never change which alerts fire.

use market_pulse_analyzer::alerts::{evaluate, Alert, AlertInput, PREDICATES};
use market_pulse_analyzer::config::AlertThresholds;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

fn sample_inputs() -> Vec<AlertInput> {
    let mut inputs = Vec::new();
    let grid = [0.0, 0.3, 0.55, 0.61, 0.69, 0.71, 0.85, 1.0];
    for &composite in &grid {
        for &panic in &[0.0, 0.5, 0.65, 0.9] {
            for &herd in &[0.3, 0.61, 0.95] {
                for &depth in &[0.2, 0.71] {
                    for &contradictory in &[false, true] {
                        inputs.push(AlertInput {
                            composite_score: composite,
                            panic_indicator: panic,
                            herd_factor: herd,
                            depth_proxy: depth,
                            contradictory,
                        });
                    }
                }
            }
        }
    }
    inputs
}

#[test]
fn shuffled_predicate_order_yields_identical_alert_sets() {
    let thresholds = AlertThresholds::default();
    let mut rng = rand::rng();

    for input in sample_inputs() {
        let reference: BTreeSet<Alert> =
            evaluate(&input, &thresholds).into_iter().collect();

        let mut predicates = PREDICATES.to_vec();
        for _ in 0..8 {
            predicates.shuffle(&mut rng);
            let shuffled: BTreeSet<Alert> = predicates
                .iter()
                .filter(|(_, pred)| pred(&input, &thresholds))
                .map(|(alert, _)| *alert)
                .collect();
            assert_eq!(shuffled, reference, "order changed the alert set");
        }
    }
}

#[test]
fn alert_labels_serialize_snake_case() {
    let json = serde_json::to_string(&Alert::HighVolatility).unwrap();
    assert_eq!(json, "\"high_volatility\"");
    assert_eq!(Alert::PanicSell.as_str(), "panic_sell");
}

#[test]
fn custom_thresholds_shift_the_firing_point() {
    let mut thresholds = AlertThresholds::default();
    let input = AlertInput {
        composite_score: 0.6,
        ..Default::default()
    };
    assert!(evaluate(&input, &thresholds).is_empty());

    thresholds.high_volatility = 0.5;
    assert_eq!(evaluate(&input, &thresholds), vec![Alert::HighVolatility]);
}
