// src/feed/providers/http.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::feed::types::{ContentItem, ContentProvider, ProviderId};

pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;

/// Upstream reached over HTTP: `GET {url}?count=N&caller=ID` → JSON array of items.
pub struct HttpProvider {
    id: ProviderId,
    url: String,
    client: reqwest::Client,
}

impl HttpProvider {
    pub fn new(id: impl Into<ProviderId>, url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building http provider client")?;
        Ok(Self {
            id: id.into(),
            url: url.into(),
            client,
        })
    }

    pub fn id(&self) -> &ProviderId {
        &self.id
    }
}

#[async_trait]
impl ContentProvider for HttpProvider {
    async fn fetch(&self, caller: &str, count: usize) -> Result<Vec<ContentItem>> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[("count", count.to_string()), ("caller", caller.to_string())])
            .send()
            .await
            .with_context(|| format!("{} http get()", self.id))?
            .error_for_status()
            .with_context(|| format!("{} http status", self.id))?;

        let mut items: Vec<ContentItem> = resp
            .json()
            .await
            .with_context(|| format!("{} decoding items", self.id))?;

        // An upstream may over-deliver; never hand back more than asked for.
        items.truncate(count);
        for it in &mut items {
            it.source = self.id.clone();
        }
        Ok(items)
    }
}
