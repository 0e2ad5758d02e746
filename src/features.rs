//! # Feature Extraction
//!
//! Turns raw article text into a fixed vector of scalar features, each in
//! `[0,1]` by construction (min/max clamping). Everything here is keyword or
//! regex counting over tokenized text; extraction itself never fails — zero
//! denominators are guarded and produce neutral zeros.

use crate::config::KeywordTables;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w+\b").expect("token regex"));
/// Prices, percentages, and other numeric evidence. Shared with the
/// confidence computation in `scoring`.
pub static NUMERIC_EVIDENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$€£¥]?\d+\.?\d*%?").expect("numeric regex"));
static SYMBOL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{2,5}\b").expect("symbol regex"));
static TIME_REF_RES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"\b(this|today|now|currently|just|moments ago|minutes ago)\b")
            .expect("time regex"),
        Regex::new(r"\b(breaking|developing|happening now|live)\b").expect("time regex"),
        Regex::new(r"\b(urgent|immediate|emergency|critical)\b").expect("time regex"),
    ]
});

/// Scalar features extracted from one article, all in `[0,1]`.
/// Computed once per article, never mutated afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Time-sensitive language (breaking/urgent/...), headline-weighted.
    pub urgency: f64,
    /// Density of panic, euphoria, magnitude, and uncertainty vocabulary.
    /// This is the activation term the scorer saturates.
    pub emotional_intensity: f64,
    /// Concentration of market-moving keywords and tickers.
    pub keyword_density: f64,
    /// ψ — internal consistency: market terminology, numeric evidence, symbols.
    pub consistency_proxy: f64,
    /// ρ — analytic depth: analysis, causal, historical, expert vocabulary.
    pub depth_proxy: f64,
    /// f — social belonging: participant, sentiment, community vocabulary.
    pub social_proxy: f64,
}

/// Lowercased alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// How many tokens are members of `list` (single-word entries only).
fn token_hits(tokens: &[String], list: &[String]) -> usize {
    let set: HashSet<&str> = list.iter().map(String::as_str).collect();
    tokens.iter().filter(|t| set.contains(t.as_str())).count()
}

/// How many entries of `list` appear in `text_lower` at least once.
/// Used for the multi-word phrase tables (causal, expert, ...).
fn phrase_hits(text_lower: &str, list: &[String]) -> usize {
    list.iter().filter(|p| text_lower.contains(p.as_str())).count()
}

/// Total substring occurrences of every entry of `list` in `text_lower`.
fn occurrence_count(text_lower: &str, list: &[String]) -> usize {
    list.iter()
        .map(|kw| text_lower.matches(kw.as_str()).count())
        .sum()
}

/// Extract the full feature vector from one article's headline and body.
pub fn extract(headline: &str, body: &str, kw: &KeywordTables) -> FeatureVector {
    let body_lower = body.to_lowercase();
    let tokens = tokenize(body);
    let sentences = split_sentences(body);

    FeatureVector {
        urgency: urgency(headline, body, &body_lower, kw),
        emotional_intensity: emotional_intensity(&tokens, kw),
        keyword_density: keyword_density(&body_lower, &tokens, kw),
        consistency_proxy: consistency_proxy(body, &tokens, &sentences, kw),
        depth_proxy: depth_proxy(&body_lower, kw),
        social_proxy: social_proxy(&body_lower, &tokens, kw),
    }
}

/// ψ — market terminology ratio, numeric evidence per sentence, and
/// uppercase-symbol presence, combined 0.4/0.3/0.3.
fn consistency_proxy(
    body: &str,
    tokens: &[String],
    sentences: &[&str],
    kw: &KeywordTables,
) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }

    let mut market_terms = kw.trading_terms.clone();
    market_terms.extend(kw.market_indicators.iter().cloned());
    let market_count = token_hits(tokens, &market_terms);
    let market_consistency = clamp01(market_count as f64 / tokens.len() as f64 * 50.0);

    let numeric_count = NUMERIC_EVIDENCE.find_iter(body).count();
    let numeric_consistency = clamp01(numeric_count as f64 / sentences.len().max(1) as f64 * 2.0);

    let symbol_count = SYMBOL_RE.find_iter(body).count();
    let symbol_consistency = clamp01(symbol_count as f64 / 10.0);

    clamp01(market_consistency * 0.4 + numeric_consistency * 0.3 + symbol_consistency * 0.3)
}

/// ρ — analytic depth from analysis, causal, historical, and expert
/// vocabulary, combined 0.3/0.3/0.2/0.2.
fn depth_proxy(body_lower: &str, kw: &KeywordTables) -> f64 {
    let analysis = clamp01(phrase_hits(body_lower, &kw.analysis) as f64 / 10.0);
    let causal = clamp01(phrase_hits(body_lower, &kw.causal) as f64 / 5.0);
    let historical = clamp01(phrase_hits(body_lower, &kw.historical) as f64 / 5.0);
    let expert = clamp01(phrase_hits(body_lower, &kw.expert) as f64 / 5.0);
    clamp01(analysis * 0.3 + causal * 0.3 + historical * 0.2 + expert * 0.2)
}

/// Share of emotionally charged tokens, scaled ×15 for visibility.
fn emotional_intensity(tokens: &[String], kw: &KeywordTables) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let mut emotional = kw.panic.clone();
    emotional.extend(kw.euphoria.iter().cloned());
    emotional.extend(kw.magnitude.iter().cloned());
    emotional.extend(kw.uncertainty.iter().cloned());

    let hits = token_hits(tokens, &emotional);
    clamp01(hits as f64 / tokens.len() as f64 * 15.0)
}

/// Headline urgency (weight 0.5), body urgency (0.3), and time-reference
/// regex hits (0.2). Headlines get the steeper scale — they carry the punch.
fn urgency(headline: &str, body: &str, body_lower: &str, kw: &KeywordTables) -> f64 {
    let headline_tokens = tokenize(headline);
    let headline_hits = token_hits(&headline_tokens, &kw.urgency);
    let headline_score = clamp01(headline_hits as f64 / headline_tokens.len().max(1) as f64 * 5.0);

    let body_tokens = tokenize(body);
    let body_hits = token_hits(&body_tokens, &kw.urgency);
    let body_score = clamp01(body_hits as f64 / body_tokens.len().max(1) as f64 * 20.0);

    let time_hits: usize = TIME_REF_RES
        .iter()
        .map(|re| re.find_iter(body_lower).count())
        .sum();
    let time_score = clamp01(time_hits as f64 * 0.1);

    clamp01(headline_score * 0.5 + body_score * 0.3 + time_score * 0.2)
}

/// Occurrences of every volatility keyword and market-mover ticker over the
/// token count, scaled ×10.
fn keyword_density(body_lower: &str, tokens: &[String], kw: &KeywordTables) -> f64 {
    let mut total = 0usize;
    for list in [
        &kw.panic,
        &kw.euphoria,
        &kw.fed,
        &kw.magnitude,
        &kw.urgency,
        &kw.uncertainty,
    ] {
        total += occurrence_count(body_lower, list);
    }
    let movers_lower: Vec<String> = kw.market_movers.iter().map(|m| m.to_lowercase()).collect();
    total += occurrence_count(body_lower, &movers_lower);

    let density = total as f64 / tokens.len().max(1) as f64;
    clamp01(density * 10.0)
}

/// f — market participant, collective sentiment, and economic community
/// vocabulary, combined 0.4/0.4/0.2.
fn social_proxy(body_lower: &str, tokens: &[String], kw: &KeywordTables) -> f64 {
    let participant = clamp01(phrase_hits(body_lower, &kw.participant) as f64 / 5.0);
    let sentiment = clamp01(phrase_hits(body_lower, &kw.sentiment) as f64 / 5.0);
    let community = clamp01(token_hits(tokens, &kw.community) as f64 / 10.0);
    clamp01(participant * 0.4 + sentiment * 0.4 + community * 0.2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeywordTables;

    fn kw() -> KeywordTables {
        KeywordTables::default()
    }

    const PANICKY: &str = "Markets crash as panic selloff spreads. Investors fear a collapse. \
        The selloff was dramatic and the volatility extreme.";

    #[test]
    fn all_features_stay_in_unit_interval() {
        let fv = extract("BREAKING: Markets crash now", PANICKY, &kw());
        for (name, v) in [
            ("urgency", fv.urgency),
            ("emotional_intensity", fv.emotional_intensity),
            ("keyword_density", fv.keyword_density),
            ("consistency_proxy", fv.consistency_proxy),
            ("depth_proxy", fv.depth_proxy),
            ("social_proxy", fv.social_proxy),
        ] {
            assert!((0.0..=1.0).contains(&v), "{name} out of range: {v}");
        }
    }

    #[test]
    fn empty_text_yields_neutral_zero_vector() {
        let fv = extract("", "", &kw());
        assert_eq!(fv, FeatureVector::default());
    }

    #[test]
    fn emotional_text_outscores_calm_text() {
        let calm = "The quarterly report was published on schedule with no surprises.";
        let calm_fv = extract("Quarterly report published", calm, &kw());
        let hot_fv = extract("Markets crash", PANICKY, &kw());
        assert!(hot_fv.emotional_intensity > calm_fv.emotional_intensity);
        assert!(hot_fv.keyword_density > calm_fv.keyword_density);
    }

    #[test]
    fn urgency_favors_headline_hits() {
        let body = "Nothing time-sensitive in here at all, just a plain recap of events.";
        let plain = extract("Markets steady in afternoon session", body, &kw());
        let urgent = extract("BREAKING: urgent alert happening", body, &kw());
        assert!(urgent.urgency > plain.urgency);
    }

    #[test]
    fn depth_counts_each_phrase_once() {
        let body = "Analysts offered analysis driven by fundamentals; the move was driven by \
            rates, driven by policy, and driven by fear.";
        let fv = extract("Outlook", body, &kw());
        // "driven by" appears four times but contributes a single causal hit
        assert!(fv.depth_proxy <= 0.3 * 0.2 + 0.3 * 0.2 + 0.2 + 0.2);
    }

    #[test]
    fn tokenizer_lowercases_and_splits_on_punctuation() {
        let toks = tokenize("The Dow is down 3.5%!");
        assert_eq!(toks, vec!["the", "dow", "is", "down", "3", "5"]);
    }
}
