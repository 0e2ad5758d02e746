//! # News Articles
//!
//! Input records for the scoring pipeline. An article is immutable once
//! constructed; its id is derived from a SHA-256 of headline + source so the
//! same story from the same outlet always maps to the same id.
//!
//! The actual fetch layer (RSS/HTML scraping) is an external collaborator;
//! this module only covers the batch hygiene that belongs to the core:
//! deduplication, recency filtering, and JSON interchange.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// A single news article with metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: String,
    pub headline: String,
    pub body: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl NewsArticle {
    pub fn new(
        headline: impl Into<String>,
        body: impl Into<String>,
        source: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        let headline = headline.into();
        let source = source.into();
        let id = derive_id(&headline, &source);
        Self {
            id,
            headline,
            body: body.into(),
            source,
            url: None,
            published_at,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Reject items the extractor cannot work with. A malformed article is a
    /// per-item condition: the batch continues without it.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.headline.trim().is_empty() {
            anyhow::bail!("article {}: empty headline", self.id);
        }
        if self.body.trim().is_empty() {
            anyhow::bail!("article {}: empty body", self.id);
        }
        Ok(())
    }
}

/// `<source>_<first 8 hex chars of sha256(headline + source)>`.
fn derive_id(headline: &str, source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(headline.as_bytes());
    hasher.update(source.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(16);
    for b in digest.iter().take(4) {
        use std::fmt::Write as _;
        let _ = write!(&mut hex, "{:02x}", b);
    }
    format!("{}_{}", source, hex)
}

/// Drop repeated stories, keyed by a case-insensitive headline hash.
/// Keeps the first occurrence; input order is otherwise preserved.
pub fn dedup_by_headline(articles: Vec<NewsArticle>) -> Vec<NewsArticle> {
    let mut seen: HashSet<[u8; 32]> = HashSet::new();
    let mut unique = Vec::with_capacity(articles.len());
    for article in articles {
        let digest: [u8; 32] = Sha256::digest(article.headline.to_lowercase().as_bytes()).into();
        if seen.insert(digest) {
            unique.push(article);
        }
    }
    unique
}

/// Keep only articles published within the trailing `hours` before `now`.
pub fn filter_recent(
    articles: Vec<NewsArticle>,
    now: DateTime<Utc>,
    hours: i64,
) -> Vec<NewsArticle> {
    let cutoff = now - Duration::hours(hours);
    articles
        .into_iter()
        .filter(|a| a.published_at >= cutoff)
        .collect()
}

/// Parse a JSON batch handed over by an external fetch layer.
pub fn batch_from_json(json: &str) -> anyhow::Result<Vec<NewsArticle>> {
    let articles: Vec<NewsArticle> = serde_json::from_str(json)?;
    Ok(articles)
}

/// Serialize a batch for hand-off or archival.
pub fn batch_to_json(articles: &[NewsArticle]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(articles)?)
}

/// Deterministic mock batch for tests and the demo binary.
pub fn mock_batch(now: DateTime<Utc>) -> Vec<NewsArticle> {
    vec![
        NewsArticle::new(
            "Fed Signals Rate Hike Amid Inflation Concerns",
            "The Federal Reserve indicated today that interest rates may need to rise faster \
             than previously anticipated due to persistent inflation pressures. Chairman Powell \
             noted that the central bank is prepared to take aggressive action if necessary.",
            "mock_fed_news",
            now - Duration::hours(2),
        )
        .with_url("https://example.com/fed-rates"),
        NewsArticle::new(
            "Tech Stocks Surge on AI Breakthrough",
            "Major technology companies saw their shares soar after a breakthrough in \
             artificial intelligence capabilities was announced. The development is expected \
             to revolutionize multiple industries and create new market opportunities.",
            "mock_tech_news",
            now - Duration::hours(1),
        )
        .with_url("https://example.com/tech-surge"),
        NewsArticle::new(
            "Market Volatility Spikes as Geopolitical Tensions Rise",
            "Global markets experienced significant volatility today as geopolitical tensions \
             escalated. Investors fled to safe-haven assets while equity markets tumbled \
             across multiple regions.",
            "mock_market_news",
            now - Duration::minutes(30),
        )
        .with_url("https://example.com/market-volatility"),
    ]
}
