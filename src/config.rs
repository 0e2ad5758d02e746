//! # Pulse Configuration
//!
//! Static tuning tables for the scoring pipeline: keyword lexicons, composite
//! weights, alert thresholds, and the activation-curve parameters.
//!
//! Loaded once at startup from TOML and treated as immutable for the run.
//! Resolution order mirrors the relevance-gate pattern: explicit path →
//! `PULSE_CONFIG_PATH` env var → built-in `default_seed()`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/pulse.toml";
pub const ENV_CONFIG_PATH: &str = "PULSE_CONFIG_PATH";

/// Top-level immutable configuration value object.
#[derive(Debug, Clone, Deserialize)]
pub struct PulseConfig {
    #[serde(default)]
    pub keywords: KeywordTables,
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub thresholds: AlertThresholds,
    #[serde(default)]
    pub saturation: SaturationParams,
    /// Headline similarity needed before two articles count as "same topic".
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

fn default_similarity_threshold() -> f64 {
    0.3
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl PulseConfig {
    /// Built-in configuration, identical to the shipped `config/pulse.toml`.
    pub fn default_seed() -> Self {
        Self {
            keywords: KeywordTables::default(),
            weights: ScoreWeights::default(),
            thresholds: AlertThresholds::default(),
            saturation: SaturationParams::default(),
            similarity_threshold: default_similarity_threshold(),
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: PulseConfig = toml::from_str(toml_str)?;
        Ok(cfg)
    }

    /// Load from a TOML file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("failed to read pulse config at {}: {}", path.display(), e)
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the config path (`PULSE_CONFIG_PATH` or the default location)
    /// and load it. Falls back to `default_seed()` when the file is absent, so
    /// the pipeline always starts with a usable table.
    pub fn load() -> Self {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        match Self::from_path(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "pulse config not loadable, using built-in seed");
                Self::default_seed()
            }
        }
    }
}

/* ----------------------------
Keyword lexicons
---------------------------- */

/// Fixed keyword tables driving feature extraction. Single-word lists are
/// matched against tokens; multi-word lists are matched as lowercase phrases.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    pub panic: Vec<String>,
    pub euphoria: Vec<String>,
    pub fed: Vec<String>,
    pub magnitude: Vec<String>,
    pub urgency: Vec<String>,
    pub uncertainty: Vec<String>,
    pub trading_terms: Vec<String>,
    pub market_indicators: Vec<String>,
    pub analysis: Vec<String>,
    pub causal: Vec<String>,
    pub historical: Vec<String>,
    pub expert: Vec<String>,
    pub participant: Vec<String>,
    pub sentiment: Vec<String>,
    pub community: Vec<String>,
    /// Ticker symbols that move markets; counted into keyword density.
    pub market_movers: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            panic: strings(&[
                "crash",
                "plunge",
                "collapse",
                "crisis",
                "panic",
                "fear",
                "selloff",
                "tumble",
                "nosedive",
            ]),
            euphoria: strings(&[
                "surge",
                "soar",
                "rocket",
                "boom",
                "rally",
                "explode",
                "skyrocket",
                "moon",
                "breakout",
            ]),
            fed: strings(&[
                "federal reserve",
                "fed",
                "powell",
                "fomc",
                "interest rates",
                "monetary policy",
                "hawkish",
                "dovish",
            ]),
            magnitude: strings(&[
                "unprecedented",
                "historic",
                "massive",
                "shocking",
                "dramatic",
                "extreme",
                "wild",
            ]),
            urgency: strings(&[
                "breaking",
                "urgent",
                "alert",
                "just in",
                "happening now",
                "live",
                "developing",
                "immediate",
                "emergency",
                "flash",
                "update",
                "latest",
                "now",
                "today",
            ]),
            uncertainty: strings(&[
                "volatility",
                "uncertainty",
                "risk",
                "fear",
                "doubt",
                "concern",
                "worry",
                "tension",
            ]),
            trading_terms: strings(&[
                "bull",
                "bear",
                "long",
                "short",
                "puts",
                "calls",
                "options",
                "futures",
                "derivatives",
                "margin",
                "leverage",
            ]),
            market_indicators: strings(&[
                "gdp",
                "inflation",
                "cpi",
                "ppi",
                "unemployment",
                "jobs report",
                "yield curve",
                "vix",
                "dxy",
                "oil prices",
                "gold",
            ]),
            analysis: strings(&[
                "analysis",
                "forecast",
                "projection",
                "estimate",
                "outlook",
                "trend",
                "pattern",
                "correlation",
                "fundamental",
                "technical",
            ]),
            causal: strings(&[
                "due to",
                "because of",
                "driven by",
                "caused by",
                "results from",
                "leads to",
                "triggers",
                "impacts",
                "affects",
                "influences",
            ]),
            historical: strings(&[
                "historically",
                "previously",
                "last quarter",
                "year-over-year",
                "compared to",
                "since",
                "following",
                "after",
                "before",
            ]),
            expert: strings(&[
                "analyst",
                "economist",
                "ceo",
                "cfo",
                "expert",
                "strategist",
                "according to",
                "says",
                "notes",
                "expects",
                "believes",
            ]),
            participant: strings(&[
                "investors",
                "traders",
                "market",
                "wall street",
                "retail",
                "institutional",
                "hedge funds",
                "mutual funds",
                "pension funds",
            ]),
            sentiment: strings(&[
                "sentiment",
                "mood",
                "confidence",
                "optimism",
                "pessimism",
                "fear",
                "greed",
                "risk appetite",
                "risk aversion",
            ]),
            community: strings(&[
                "economy",
                "markets",
                "industry",
                "sector",
                "global",
                "worldwide",
                "international",
                "domestic",
            ]),
            market_movers: strings(&[
                "AAPL", "GOOGL", "MSFT", "AMZN", "TSLA", "NVDA", "META", "SPY", "QQQ", "BTC-USD",
            ]),
        }
    }
}

/* ----------------------------
Weights, thresholds, saturation
---------------------------- */

/// Composite score weights. Documented to sum to 1.0 so the output range
/// stays stable; not runtime-enforced.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight of the saturated activation term (emotional intensity).
    pub activation: f64,
    pub urgency: f64,
    pub keyword_density: f64,
    pub consistency: f64,
    pub depth: f64,
    pub social: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            activation: 0.35,
            urgency: 0.20,
            keyword_density: 0.20,
            consistency: 0.10,
            depth: 0.10,
            social: 0.05,
        }
    }
}

impl ScoreWeights {
    /// Sum of the weight table; unit tests pin this at 1.0 for the defaults.
    pub fn total(&self) -> f64 {
        self.activation
            + self.urgency
            + self.keyword_density
            + self.consistency
            + self.depth
            + self.social
    }
}

/// Static thresholds for the alert predicates.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub high_volatility: f64,
    pub panic_zone: f64,
    pub smart_money: f64,
    pub contradiction: f64,
    /// Minimum herd factor required alongside the panic indicator.
    pub herd: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            high_volatility: 0.7,
            panic_zone: 0.6,
            smart_money: 0.7,
            contradiction: 0.5,
            herd: 0.6,
        }
    }
}

/// Parameters of the saturating activation curve
/// `q_opt = q_max·x / (k_m + x + x²/k_i)`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SaturationParams {
    pub q_max: f64,
    pub k_m: f64,
    pub k_i: f64,
}

impl Default for SaturationParams {
    fn default() -> Self {
        Self {
            q_max: 1.0,
            k_m: 0.2,
            k_i: 0.8,
        }
    }
}
