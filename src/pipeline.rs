//! # Scoring Pipeline
//!
//! Maps a batch of articles through feature extraction, composite scoring,
//! and alert evaluation. Single-threaded, synchronous, one pass per item; no
//! state is shared across items. A malformed article is logged and skipped —
//! the worst outcome for any item is a neutral score, never an aborted batch.

use crate::alerts::{self, Alert, AlertInput};
use crate::article::NewsArticle;
use crate::config::PulseConfig;
use crate::features::{self, FeatureVector};
use crate::scoring::{self, ImpactCategory};
use crate::source_weights::SourceReliability;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// The full analysis of one article. Derived deterministically from the
/// article and the configuration; recomputed, never patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub article_id: String,
    pub headline: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub features: FeatureVector,
    /// Unbounded-positive GCT coherence composite.
    pub coherence: f64,
    /// Volatility composite in [0,1] after the recency multiplier.
    pub composite_score: f64,
    pub panic_indicator: f64,
    pub herd_factor: f64,
    pub category: ImpactCategory,
    pub alerts: Vec<Alert>,
    pub confidence: f64,
}

impl ScoreResult {
    fn alert_input(&self, contradictory: bool) -> AlertInput {
        AlertInput {
            composite_score: self.composite_score,
            panic_indicator: self.panic_indicator,
            herd_factor: self.herd_factor,
            depth_proxy: self.features.depth_proxy,
            contradictory,
        }
    }
}

/// Analyze one article. Pure given `now`; `now` exists only for the recency
/// multiplier, the composite itself is a function of features and weights.
pub fn analyze_article(
    article: &NewsArticle,
    cfg: &PulseConfig,
    reliability: &SourceReliability,
    now: DateTime<Utc>,
) -> anyhow::Result<ScoreResult> {
    article.validate()?;

    let fv = features::extract(&article.headline, &article.body, &cfg.keywords);
    let coherence = crate::gct::coherence(&fv, &cfg.saturation)?;

    let base = scoring::composite_score(&fv, &cfg.weights, &cfg.saturation)?;
    let recency = scoring::recency_multiplier(article.published_at, now);
    let composite = (base * recency).clamp(0.0, 1.0);

    let panic = scoring::panic_indicator(&fv);
    let herd = scoring::herd_factor(&fv);
    let confidence = scoring::confidence_level(article, reliability.weight_for(&article.source));

    let mut result = ScoreResult {
        article_id: article.id.clone(),
        headline: article.headline.clone(),
        source: article.source.clone(),
        published_at: article.published_at,
        features: fv,
        coherence,
        composite_score: composite,
        panic_indicator: panic,
        herd_factor: herd,
        category: ImpactCategory::from_score(composite),
        alerts: Vec::new(),
        confidence,
    };
    result.alerts = alerts::evaluate(&result.alert_input(false), &cfg.thresholds);

    debug!(
        id = %result.article_id,
        score = result.composite_score,
        category = result.category.as_str(),
        "article analyzed"
    );
    Ok(result)
}

/// Analyze a batch and rank by composite score, descending. Sort is stable,
/// so ties keep their input order. Malformed items are logged and skipped.
pub fn analyze_batch(
    articles: &[NewsArticle],
    cfg: &PulseConfig,
    reliability: &SourceReliability,
    now: DateTime<Utc>,
) -> Vec<ScoreResult> {
    let mut results = Vec::with_capacity(articles.len());
    let mut skipped = 0usize;

    for article in articles {
        match analyze_article(article, cfg, reliability, now) {
            Ok(result) => results.push(result),
            Err(e) => {
                skipped += 1;
                warn!(id = %article.id, error = %e, "skipping article");
            }
        }
    }

    results.sort_by(|a, b| {
        b.composite_score
            .partial_cmp(&a.composite_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    info!(
        analyzed = results.len(),
        skipped, "batch analysis complete"
    );
    results
}

/// Article pairs covering the same topic with diverging emotional readings.
/// Topic overlap uses headline bigram similarity; divergence follows the
/// emotional-intensity / panic-indicator gap rule.
pub fn find_contradictions<'a>(
    results: &'a [ScoreResult],
    cfg: &PulseConfig,
) -> Vec<(&'a ScoreResult, &'a ScoreResult)> {
    let mut pairs = Vec::new();
    for (i, a) in results.iter().enumerate() {
        for b in &results[i + 1..] {
            if !similar_topics(&a.headline, &b.headline, cfg.similarity_threshold) {
                continue;
            }
            let emotion_gap = (a.features.emotional_intensity - b.features.emotional_intensity).abs();
            let panic_gap = (a.panic_indicator - b.panic_indicator).abs();
            if emotion_gap > 0.5 || panic_gap > 0.5 {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

/// Re-evaluate alerts for every result that sits in a contradictory pair.
/// Returns the ids that gained the contradiction alert.
pub fn apply_contradiction_alerts(results: &mut [ScoreResult], cfg: &PulseConfig) -> Vec<String> {
    let contradictory_ids: std::collections::HashSet<String> = find_contradictions(results, cfg)
        .into_iter()
        .flat_map(|(a, b)| [a.article_id.clone(), b.article_id.clone()])
        .collect();

    let mut flagged = Vec::new();
    for result in results.iter_mut() {
        if !contradictory_ids.contains(&result.article_id) {
            continue;
        }
        let before = result.alerts.clone();
        result.alerts = alerts::evaluate(&result.alert_input(true), &cfg.thresholds);
        if result.alerts.contains(&Alert::Contradiction) && !before.contains(&Alert::Contradiction)
        {
            flagged.push(result.article_id.clone());
        }
    }
    flagged
}

fn similar_topics(headline_a: &str, headline_b: &str, threshold: f64) -> bool {
    strsim::sorensen_dice(&headline_a.to_lowercase(), &headline_b.to_lowercase()) > threshold
}
