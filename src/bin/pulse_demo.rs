//! Demo binary: runs the mock batch through the full pipeline and prints
//! ranked results plus the rolling snapshot as JSON.
//!
//! Usage:
//!   cargo run --bin pulse_demo              # built-in mock articles
//!   cargo run --bin pulse_demo batch.json   # JSON batch from a fetch layer

use chrono::Utc;
use market_pulse_analyzer::{article, pipeline, rolling, PulseConfig, SourceReliability};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op elsewhere. Enables PULSE_CONFIG_PATH.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();

    let cfg = PulseConfig::load();
    let reliability = SourceReliability::default_seed();
    let now = Utc::now();

    let batch = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            article::batch_from_json(&json)?
        }
        None => article::mock_batch(now),
    };

    let batch = article::filter_recent(article::dedup_by_headline(batch), now, 24);
    tracing::info!(count = batch.len(), "batch ready for analysis");

    let mut results = pipeline::analyze_batch(&batch, &cfg, &reliability, now);
    let flagged = pipeline::apply_contradiction_alerts(&mut results, &cfg);
    if !flagged.is_empty() {
        tracing::info!(?flagged, "contradictory articles detected");
    }

    for r in &results {
        println!("{}", serde_json::to_string_pretty(r)?);
    }

    // snapshot wants chronological history, not score-ranked output
    let mut history = results.clone();
    history.sort_by_key(|r| r.published_at);
    let snap = rolling::snapshot_default(&history, now);
    println!("{}", serde_json::to_string_pretty(&snap)?);
    Ok(())
}
