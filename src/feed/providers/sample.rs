// src/feed/providers/sample.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::feed::types::{ContentItem, ContentProvider, ProviderId};

/// In-process provider: either synthesizes fresh items or replays a fixture.
pub struct SampleProvider {
    id: ProviderId,
    mode: Mode,
}

enum Mode {
    Generated { seq: AtomicU64 },
    Fixture { items: Vec<ContentItem>, cursor: AtomicUsize },
}

impl SampleProvider {
    pub fn generated(id: impl Into<ProviderId>) -> Self {
        Self {
            id: id.into(),
            mode: Mode::Generated {
                seq: AtomicU64::new(0),
            },
        }
    }

    /// Replay items from a JSON array, round-robin. `source` is re-stamped with `id`.
    pub fn from_fixture_str(id: impl Into<ProviderId>, json: &str) -> Result<Self> {
        let id = id.into();
        let mut items: Vec<ContentItem> =
            serde_json::from_str(json).with_context(|| format!("parsing fixture for {id}"))?;
        for it in &mut items {
            it.source = id.clone();
        }
        Ok(Self {
            id,
            mode: Mode::Fixture {
                items,
                cursor: AtomicUsize::new(0),
            },
        })
    }

    pub fn from_fixture_path(id: impl Into<ProviderId>, path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture from {}", path.display()))?;
        Self::from_fixture_str(id, &json)
    }

    pub fn id(&self) -> &ProviderId {
        &self.id
    }

    fn next_generated(&self, seq: &AtomicU64) -> ContentItem {
        let n = seq.fetch_add(1, Ordering::Relaxed) + 1;
        ContentItem {
            id: format!("{}-{n}", self.id),
            title: format!("{} story #{n}", self.id),
            source: self.id.clone(),
            summary: format!("Generated item {n} from {}", self.id),
            link: None,
            expiry: Some(Utc::now() + Duration::hours(1)),
        }
    }
}

#[async_trait]
impl ContentProvider for SampleProvider {
    async fn fetch(&self, _caller: &str, count: usize) -> Result<Vec<ContentItem>> {
        let out = match &self.mode {
            Mode::Generated { seq } => (0..count).map(|_| self.next_generated(seq)).collect(),
            Mode::Fixture { items, .. } if items.is_empty() => Vec::new(),
            Mode::Fixture { items, cursor } => (0..count)
                .map(|_| {
                    let idx = cursor.fetch_add(1, Ordering::Relaxed) % items.len();
                    items[idx].clone()
                })
                .collect(),
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[
        {"id": "x1", "title": "First", "source": "ignored"},
        {"id": "x2", "title": "Second", "source": "ignored", "link": "https://example.org/2"}
    ]"#;

    #[tokio::test]
    async fn generated_items_are_fresh_and_tagged() {
        let p = SampleProvider::generated("provider1");
        let a = p.fetch("", 1).await.unwrap();
        let b = p.fetch("", 2).await.unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
        assert_ne!(a[0].id, b[0].id);
        assert!(a.iter().chain(&b).all(|it| it.source.as_str() == "provider1"));
    }

    #[tokio::test]
    async fn fixture_cycles_and_restamps_source() {
        let p = SampleProvider::from_fixture_str("provider2", FIXTURE).unwrap();
        let ids: Vec<String> = p
            .fetch("", 3)
            .await
            .unwrap()
            .into_iter()
            .map(|it| {
                assert_eq!(it.source.as_str(), "provider2");
                it.id
            })
            .collect();
        assert_eq!(ids, vec!["x1", "x2", "x1"]);
    }

    #[tokio::test]
    async fn empty_fixture_yields_nothing() {
        let p = SampleProvider::from_fixture_str("provider3", "[]").unwrap();
        assert!(p.fetch("", 1).await.unwrap().is_empty());
    }

    #[test]
    fn malformed_fixture_is_an_error() {
        assert!(SampleProvider::from_fixture_str("p", "{not json").is_err());
    }
}
