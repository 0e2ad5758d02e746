//! # Composite Scoring
//!
//! Combines a `FeatureVector` into the volatility composite: the activation
//! term goes through the saturating curve, the rest is a plain weighted sum.
//! Deterministic by design — identical inputs always yield identical outputs;
//! anything time-dependent (recency) takes its reference point as an argument.

use crate::article::NewsArticle;
use crate::config::{SaturationParams, ScoreWeights};
use crate::features::{FeatureVector, NUMERIC_EVIDENCE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-life of news impact, in hours.
const RECENCY_HALF_LIFE_HOURS: f64 = 6.0;

/// Volatility composite in `[0,1]`.
///
/// `w_act·sat(emotional) + w_urg·urgency + w_den·density + w_con·ψ +
/// w_dep·ρ + w_soc·f`, clamped. Weights are documented to sum to 1.0.
pub fn composite_score(
    fv: &FeatureVector,
    w: &ScoreWeights,
    p: &SaturationParams,
) -> anyhow::Result<f64> {
    let activation = crate::gct::optimized_activation(fv.emotional_intensity, p)?;
    let raw = activation * w.activation
        + fv.urgency * w.urgency
        + fv.keyword_density * w.keyword_density
        + fv.consistency_proxy * w.consistency
        + fv.depth_proxy * w.depth
        + fv.social_proxy * w.social;
    Ok(raw.clamp(0.0, 1.0))
}

/// Largest value `composite_score` can produce for a given weight table:
/// every linear term at 1.0 plus the activation term at its curve peak.
pub fn max_composite(w: &ScoreWeights, p: &SaturationParams) -> f64 {
    let peak = crate::gct::activation_peak(p).min(1.0);
    // peak is inside [0,1] for the defaults, so this cannot fail
    let at_peak = crate::gct::optimized_activation(peak, p).unwrap_or(p.q_max);
    (at_peak * w.activation
        + w.urgency
        + w.keyword_density
        + w.consistency
        + w.depth
        + w.social)
        .clamp(0.0, 1.0)
}

/// Exponential decay of impact with article age: `2^(-age_h / 6)`,
/// clamped to `[0.1, 2.0]`. Pure — the caller supplies `now`.
pub fn recency_multiplier(published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_hours = (now - published_at).num_seconds() as f64 / 3600.0;
    let multiplier = 2f64.powf(-age_hours / RECENCY_HALF_LIFE_HOURS);
    multiplier.clamp(0.1, 2.0)
}

/// Wisdom paradox: low depth plus high activation reads as panic selling.
pub fn panic_indicator(fv: &FeatureVector) -> f64 {
    (1.0 - fv.depth_proxy) * fv.emotional_intensity
}

/// Social amplification: high belonging reads as herd behavior.
pub fn herd_factor(fv: &FeatureVector) -> f64 {
    (fv.social_proxy * 1.2).clamp(0.0, 1.0)
}

/// Ordinal impact label derived from the volatility composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImpactCategory {
    Minimal,
    Low,
    Medium,
    High,
    Extreme,
}

impl ImpactCategory {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Extreme
        } else if score >= 0.6 {
            Self::High
        } else if score >= 0.4 {
            Self::Medium
        } else if score >= 0.2 {
            Self::Low
        } else {
            Self::Minimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "MINIMAL",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Extreme => "EXTREME",
        }
    }
}

/// Confidence in one article's analysis: mean of content length (/1000 chars),
/// source reliability, and numeric-evidence (/10 matches) factors.
pub fn confidence_level(article: &NewsArticle, source_reliability: f64) -> f64 {
    let length_factor = (article.body.len() as f64 / 1000.0).min(1.0);
    let numeric_factor = (NUMERIC_EVIDENCE.find_iter(&article.body).count() as f64 / 10.0).min(1.0);
    let confidence = (length_factor + source_reliability + numeric_factor) / 3.0;
    confidence.clamp(0.0, 1.0)
}
