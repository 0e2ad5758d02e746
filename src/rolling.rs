//! # Rolling Snapshot
//! Windowed aggregate summary over recent score results (default 4h).
//!
//! The history is a caller-owned, append-only slice; the snapshot is
//! recomputed on demand and never persisted. An empty window falls back to
//! the most recent results instead of failing.

use crate::pipeline::ScoreResult;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default trailing window for the snapshot.
pub const DEFAULT_WINDOW_HOURS: i64 = 4;
/// Fallback slice size when the window is empty.
const FALLBACK_RECENT_N: usize = 10;
/// How many top concerns to report.
const TOP_CONCERNS: usize = 5;
/// Headline words this short carry no topical signal.
const MIN_CONCERN_LEN: usize = 4;

/// Overall mood label derived from mean volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketSentiment {
    VeryBearish,
    Bearish,
    Neutral,
    Bullish,
    VeryBullish,
}

impl MarketSentiment {
    fn from_mean_volatility(v: f64) -> Self {
        if v > 0.7 {
            Self::VeryBearish
        } else if v > 0.5 {
            Self::Bearish
        } else if v > 0.3 {
            Self::Neutral
        } else if v > 0.1 {
            Self::Bullish
        } else {
            Self::VeryBullish
        }
    }
}

/// Aggregate over the most recent window of score results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollingSnapshot {
    pub sentiment: MarketSentiment,
    pub mean_volatility: f64,
    pub mean_panic: f64,
    pub mean_herd: f64,
    /// Most frequent headline words across the window.
    pub top_concerns: Vec<String>,
    /// Number of results the snapshot was computed from; 0 marks the
    /// explicit empty-history case.
    pub count: usize,
    pub window_secs: u64,
}

impl RollingSnapshot {
    /// Neutral snapshot for an empty history.
    fn empty(window: Duration) -> Self {
        Self {
            sentiment: MarketSentiment::Neutral,
            mean_volatility: 0.0,
            mean_panic: 0.0,
            mean_herd: 0.0,
            top_concerns: Vec::new(),
            count: 0,
            window_secs: window.num_seconds().max(0) as u64,
        }
    }
}

/// Compute the snapshot over `history` (ordered oldest → newest).
///
/// Filters to results published within `window` before `now`; if none match,
/// falls back to the last [`FALLBACK_RECENT_N`] entries. A fully empty
/// history yields the neutral zero snapshot.
pub fn snapshot(history: &[ScoreResult], now: DateTime<Utc>, window: Duration) -> RollingSnapshot {
    if history.is_empty() {
        return RollingSnapshot::empty(window);
    }

    let cutoff = now - window;
    let recent: Vec<&ScoreResult> = history
        .iter()
        .filter(|r| r.published_at >= cutoff)
        .collect();

    let recent: Vec<&ScoreResult> = if recent.is_empty() {
        history
            .iter()
            .rev()
            .take(FALLBACK_RECENT_N)
            .rev()
            .collect()
    } else {
        recent
    };

    let n = recent.len() as f64;
    let mean_volatility = recent.iter().map(|r| r.composite_score).sum::<f64>() / n;
    let mean_panic = recent.iter().map(|r| r.panic_indicator).sum::<f64>() / n;
    let mean_herd = recent.iter().map(|r| r.herd_factor).sum::<f64>() / n;

    RollingSnapshot {
        sentiment: MarketSentiment::from_mean_volatility(mean_volatility),
        mean_volatility,
        mean_panic,
        mean_herd,
        top_concerns: top_concerns(&recent),
        count: recent.len(),
        window_secs: window.num_seconds().max(0) as u64,
    }
}

/// Convenience wrapper with the default 4h window.
pub fn snapshot_default(history: &[ScoreResult], now: DateTime<Utc>) -> RollingSnapshot {
    snapshot(history, now, Duration::hours(DEFAULT_WINDOW_HOURS))
}

/// Most frequently mentioned headline words, alphabetical on ties.
fn top_concerns(recent: &[&ScoreResult]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in recent {
        for word in crate::features::tokenize(&r.headline) {
            if word.len() >= MIN_CONCERN_LEN {
                *counts.entry(word).or_insert(0) += 1;
            }
        }
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    // count desc, then alphabetical for a deterministic order
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(TOP_CONCERNS)
        .map(|(w, _)| w)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureVector;
    use crate::scoring::ImpactCategory;

    fn result(headline: &str, score: f64, age_hours: i64, now: DateTime<Utc>) -> ScoreResult {
        ScoreResult {
            article_id: format!("test_{headline}"),
            headline: headline.to_string(),
            source: "test".into(),
            published_at: now - Duration::hours(age_hours),
            features: FeatureVector::default(),
            coherence: 0.0,
            composite_score: score,
            panic_indicator: score * 0.5,
            herd_factor: 0.2,
            category: ImpactCategory::from_score(score),
            alerts: Vec::new(),
            confidence: 0.5,
        }
    }

    #[test]
    fn empty_history_yields_neutral_marker() {
        let snap = snapshot_default(&[], Utc::now());
        assert_eq!(snap.count, 0);
        assert_eq!(snap.sentiment, MarketSentiment::Neutral);
        assert!(snap.top_concerns.is_empty());
    }

    #[test]
    fn window_filters_old_results() {
        let now = Utc::now();
        let history = vec![
            result("old inflation story", 0.9, 20, now),
            result("fresh market rally", 0.2, 1, now),
        ];
        let snap = snapshot_default(&history, now);
        assert_eq!(snap.count, 1);
        assert!((snap.mean_volatility - 0.2).abs() < 1e-12);
        assert_eq!(snap.sentiment, MarketSentiment::Bullish);
    }

    #[test]
    fn empty_window_falls_back_to_recent_slice() {
        let now = Utc::now();
        // everything older than the window
        let history: Vec<ScoreResult> = (0..15)
            .map(|i| result(&format!("story {i}"), 0.6, 30 + i, now))
            .collect();
        let snap = snapshot_default(&history, now);
        assert_eq!(snap.count, 10, "falls back to the last 10 entries");
        assert!((snap.mean_volatility - 0.6).abs() < 1e-12);
        assert_eq!(snap.sentiment, MarketSentiment::Bearish);
    }

    #[test]
    fn top_concerns_rank_by_frequency() {
        let now = Utc::now();
        let history = vec![
            result("inflation fears grow", 0.5, 1, now),
            result("inflation data released", 0.5, 1, now),
            result("earnings season begins", 0.5, 1, now),
        ];
        let snap = snapshot_default(&history, now);
        assert_eq!(snap.top_concerns.first().map(String::as_str), Some("inflation"));
        assert!(snap.top_concerns.len() <= 5);
    }

    #[test]
    fn mean_over_full_window() {
        let now = Utc::now();
        let history = vec![
            result("a story", 0.4, 1, now),
            result("b story", 0.8, 2, now),
        ];
        let snap = snapshot_default(&history, now);
        assert_eq!(snap.count, 2);
        assert!((snap.mean_volatility - 0.6).abs() < 1e-12);
    }
}
