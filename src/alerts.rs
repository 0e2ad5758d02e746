//! # Alert Evaluation
//!
//! An ordered set of independent boolean predicates over one score result.
//! Each predicate is a conjunction of simple comparisons against static
//! thresholds; none depends on another, so evaluation order never changes
//! which alerts fire.

use crate::config::AlertThresholds;
use serde::{Deserialize, Serialize};

/// Named alert labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    PanicSell,
    SmartMoney,
    Contradiction,
    HighVolatility,
}

impl Alert {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PanicSell => "panic_sell",
            Self::SmartMoney => "smart_money",
            Self::Contradiction => "contradiction",
            Self::HighVolatility => "high_volatility",
        }
    }
}

/// The slice of a score result the predicates look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertInput {
    pub composite_score: f64,
    pub panic_indicator: f64,
    pub herd_factor: f64,
    pub depth_proxy: f64,
    /// Set by pairwise contradiction detection, false for a lone article.
    pub contradictory: bool,
}

type Predicate = fn(&AlertInput, &AlertThresholds) -> bool;

/// Predicate table. Public so the order-independence property can be tested
/// by evaluating it in shuffled order.
pub const PREDICATES: [(Alert, Predicate); 4] = [
    (Alert::PanicSell, |a, t| {
        a.panic_indicator > t.panic_zone && a.herd_factor > t.herd
    }),
    (Alert::SmartMoney, |a, t| {
        a.depth_proxy > 0.7 && a.composite_score > t.smart_money
    }),
    (Alert::Contradiction, |a, t| {
        a.contradictory && a.composite_score > t.contradiction
    }),
    (Alert::HighVolatility, |a, t| {
        a.composite_score > t.high_volatility
    }),
];

/// Evaluate every predicate and return the subset that holds,
/// in declaration order.
pub fn evaluate(input: &AlertInput, thresholds: &AlertThresholds) -> Vec<Alert> {
    PREDICATES
        .iter()
        .filter(|(_, pred)| pred(input, thresholds))
        .map(|(alert, _)| *alert)
        .collect()
}
