// src/feed/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fmt;

/// Identity of one upstream content source, e.g. "provider1".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub source: ProviderId, // stamped by the provider client, never by the scheduler
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

/// A single upstream source. Implementations must tolerate concurrent calls.
///
/// `Ok` with fewer than `count` items means "nothing more available";
/// only `Err` signals a failed fetch.
#[async_trait::async_trait]
pub trait ContentProvider: Send + Sync {
    async fn fetch(&self, caller: &str, count: usize) -> Result<Vec<ContentItem>>;
}
