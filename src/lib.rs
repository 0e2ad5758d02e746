// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod alerts;
pub mod article;
pub mod config;
pub mod features;
pub mod gct;
pub mod pipeline;
pub mod rolling;
pub mod scoring;
pub mod source_weights;

// ---- Re-exports for stable public API ----
pub use crate::alerts::Alert;
pub use crate::article::NewsArticle;
pub use crate::config::PulseConfig;
pub use crate::features::FeatureVector;
pub use crate::pipeline::{analyze_article, analyze_batch, ScoreResult};
pub use crate::rolling::{snapshot, snapshot_default, RollingSnapshot};
pub use crate::scoring::ImpactCategory;
pub use crate::source_weights::SourceReliability;
