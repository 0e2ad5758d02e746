//! # Coherence Math
//!
//! The two pure functions at the heart of the pipeline: the saturating
//! activation curve and the coherence composite. Both are stateless; the
//! activation curve validates its input domain, everything downstream relies
//! on `FeatureVector`'s `[0,1]` construction invariant.

use crate::config::SaturationParams;
use crate::features::FeatureVector;

/// Saturating activation: `q_max·x / (k_m + x + x²/k_i)`.
///
/// Caps the contribution of extreme activation values. With the default
/// parameters the curve peaks at `x = √(k_m·k_i) = 0.4` with value 0.5 and
/// is bounded above by `q_max`.
///
/// Rejects `x` outside `[0,1]` — feeding an unclamped value in is a caller
/// bug, not a runtime condition to absorb.
pub fn optimized_activation(x: f64, p: &SaturationParams) -> anyhow::Result<f64> {
    if !(0.0..=1.0).contains(&x) || x.is_nan() {
        anyhow::bail!("activation input {x} outside [0, 1]");
    }
    if p.k_i == 0.0 {
        anyhow::bail!("saturation parameter k_i must be non-zero");
    }
    let denom = p.k_m + x + (x * x) / p.k_i;
    if denom == 0.0 {
        anyhow::bail!("saturation denominator is zero (k_m = {}, x = {x})", p.k_m);
    }
    Ok(p.q_max * x / denom)
}

/// The argmax of the activation curve, `√(k_m·k_i)`.
pub fn activation_peak(p: &SaturationParams) -> f64 {
    (p.k_m * p.k_i).sqrt()
}

/// GCT coherence composite: `ψ + ρ·ψ + q_opt + f·ψ`.
///
/// Unbounded positive; an all-zero vector yields exactly 0. The activation
/// input is the emotional-intensity feature.
pub fn coherence(fv: &FeatureVector, p: &SaturationParams) -> anyhow::Result<f64> {
    let q_opt = optimized_activation(fv.emotional_intensity, p)?;
    let psi = fv.consistency_proxy;
    Ok(psi + fv.depth_proxy * psi + q_opt + fv.social_proxy * psi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> SaturationParams {
        SaturationParams::default()
    }

    #[test]
    fn activation_rejects_out_of_domain_input() {
        assert!(optimized_activation(-0.01, &p()).is_err());
        assert!(optimized_activation(1.01, &p()).is_err());
        assert!(optimized_activation(f64::NAN, &p()).is_err());
        let err = optimized_activation(2.0, &p()).unwrap_err();
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[test]
    fn activation_is_zero_at_zero_and_bounded_by_q_max() {
        assert_eq!(optimized_activation(0.0, &p()).unwrap(), 0.0);
        for i in 0..=100 {
            let x = i as f64 / 100.0;
            let y = optimized_activation(x, &p()).unwrap();
            assert!(y >= 0.0 && y <= p().q_max, "f({x}) = {y}");
        }
    }

    #[test]
    fn activation_is_non_decreasing_up_to_its_peak() {
        let peak = activation_peak(&p());
        assert!((peak - 0.4).abs() < 1e-12);

        let mut prev = 0.0;
        let steps = 400;
        for i in 0..=steps {
            let x = peak * i as f64 / steps as f64;
            let y = optimized_activation(x, &p()).unwrap();
            assert!(y + 1e-12 >= prev, "dip before peak at x = {x}");
            prev = y;
        }
        // peak value for the default parameters
        let at_peak = optimized_activation(peak, &p()).unwrap();
        assert!((at_peak - 0.5).abs() < 1e-9);
    }

    #[test]
    fn coherence_of_zero_vector_is_zero() {
        let fv = FeatureVector::default();
        assert_eq!(coherence(&fv, &p()).unwrap(), 0.0);
    }

    #[test]
    fn coherence_matches_hand_computed_value() {
        let fv = FeatureVector {
            consistency_proxy: 0.6,
            depth_proxy: 0.5,
            emotional_intensity: 0.8,
            social_proxy: 0.4,
            ..Default::default()
        };
        // q_opt(0.8) = 0.8 / (0.2 + 0.8 + 0.64/0.8) = 0.8 / 1.8
        let q_opt = 0.8 / 1.8;
        let expected = 0.6 + 0.5 * 0.6 + q_opt + 0.4 * 0.6;
        let got = coherence(&fv, &p()).unwrap();
        assert!((got - expected).abs() < 1e-12, "got {got}, want {expected}");
    }
}
