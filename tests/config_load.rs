// tests/config_load.rs
//
// The shipped config/pulse.toml must parse and agree with the built-in seed,
// and overrides must only touch what they name.

use market_pulse_analyzer::PulseConfig;

const SHIPPED: &str = include_str!("../config/pulse.toml");

#[test]
fn shipped_config_parses_and_matches_the_seed() {
    let cfg = PulseConfig::from_toml_str(SHIPPED).expect("shipped config must parse");
    let seed = PulseConfig::default_seed();

    assert!((cfg.weights.activation - seed.weights.activation).abs() < 1e-12);
    assert!((cfg.weights.total() - 1.0).abs() < 1e-9);
    assert!((cfg.thresholds.high_volatility - seed.thresholds.high_volatility).abs() < 1e-12);
    assert!((cfg.saturation.k_m - seed.saturation.k_m).abs() < 1e-12);
    assert_eq!(cfg.keywords.panic, seed.keywords.panic);
    assert_eq!(cfg.keywords.urgency, seed.keywords.urgency);
    assert_eq!(cfg.keywords.market_movers, seed.keywords.market_movers);
}

#[test]
fn override_touches_only_named_fields() {
    let cfg = PulseConfig::from_toml_str(
        r#"
similarity_threshold = 0.5

[saturation]
k_m = 0.3

[keywords]
panic = ["doom"]
"#,
    )
    .expect("override config must parse");

    assert!((cfg.similarity_threshold - 0.5).abs() < 1e-12);
    assert!((cfg.saturation.k_m - 0.3).abs() < 1e-12);
    // untouched saturation fields keep their defaults
    assert!((cfg.saturation.k_i - 0.8).abs() < 1e-12);
    assert_eq!(cfg.keywords.panic, vec!["doom".to_string()]);
    // sibling keyword tables keep their seeds
    assert!(cfg.keywords.euphoria.iter().any(|w| w == "surge"));
}

#[test]
fn garbage_toml_is_an_error_not_a_panic() {
    assert!(PulseConfig::from_toml_str("weights = 3").is_err());
}
