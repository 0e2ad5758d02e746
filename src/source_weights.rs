//! # Source Reliability
//!
//! Configurable mapping from news outlets (e.g. "Bloomberg", "Reuters") to
//! normalized reliability weights in `[0.0, 1.0]`, feeding the per-article
//! confidence level.
//!
//! - Loads from JSON config (weights + aliases).
//! - Case-insensitive lookup with normalization of punctuation, dashes, etc.
//! - Aliases map alternative spellings to canonical outlet names.
//! - Fallback order: aliases → exact match → substring match → default.
//! - Includes a built-in `default_seed()` with the major financial outlets.

use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

/// Outlet reliability table, loaded from JSON or defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceReliability {
    /// Default weight if no match is found.
    #[serde(default = "default_default_weight")]
    pub default_weight: f64,
    /// Explicit weights for canonical outlet names.
    #[serde(default)]
    pub weights: HashMap<String, f64>,
    /// Aliases mapping non-canonical names → canonical names.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

fn default_default_weight() -> f64 {
    0.70
}

impl Default for SourceReliability {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl SourceReliability {
    /// Load the table from a JSON file.
    /// Falls back to `default_seed()` on error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|_| Self::default_seed()),
            Err(_) => Self::default_seed(),
        }
    }

    /// Get the reliability weight for an outlet name.
    ///
    /// Steps:
    /// 1. Alias lookup (normalized) → canonical → weight.
    /// 2. Exact weight match.
    /// 3. Substring fallback (e.g. "mock_fed_news" → "mock").
    /// 4. Default weight.
    pub fn weight_for(&self, source: &str) -> f64 {
        let s = normalize(source);

        // 1) Alias resolution.
        if let Some(canon) = self.aliases.get(&s) {
            let c = normalize(canon);
            if let Some(&w) = self.weights.get(&c) {
                return clamp01(w);
            }
        }

        // 2) Exact weight match.
        if let Some(&w) = self.weights.get(&s) {
            return clamp01(w);
        }

        // 3) Substring fallback.
        for (k, &w) in &self.weights {
            if s.contains(k) {
                return clamp01(w);
            }
        }

        // 4) Default.
        clamp01(self.default_weight)
    }

    /// Built-in seed with the major financial news outlets.
    /// Mock sources used in tests score a deliberate 0.50.
    pub fn default_seed() -> Self {
        let mut weights = HashMap::new();
        let mut aliases = HashMap::new();

        for (k, v) in [
            ("bloomberg", 0.95),
            ("reuters", 0.95),
            ("wall street journal", 0.90),
            ("financial times", 0.90),
            ("cnbc", 0.85),
            ("marketwatch", 0.80),
            ("yahoo finance", 0.75),
            ("mock", 0.50),
        ] {
            weights.insert(k.to_string(), v);
        }

        for (a, c) in [
            ("wsj", "wall street journal"),
            ("the wall street journal", "wall street journal"),
            ("wsj com", "wall street journal"),
            ("ft", "financial times"),
            ("ft com", "financial times"),
            ("yahoo", "yahoo finance"),
            ("bloomberg markets", "bloomberg"),
            ("thomson reuters", "reuters"),
        ] {
            aliases.insert(a.to_string(), c.to_string());
        }

        Self {
            default_weight: default_default_weight(),
            weights,
            aliases,
        }
    }
}

/// Normalize input string: lowercase, replace punctuation/dashes with spaces,
/// collapse multiple spaces into one.
fn normalize(s: &str) -> String {
    let mut out = s.trim().to_ascii_lowercase();

    // Replace common separators with spaces.
    for ch in ['—', '–', '-', '_', '/', '\\'] {
        out = out.replace(ch, " ");
    }

    // Replace disruptive punctuation/whitespace with spaces.
    out = out.replace(['\n', '\r', '\t', '.', ',', '\''], " ");

    // Collapse multiple spaces.
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
