// src/feed/scheduler.rs
//! Feed scheduler: walks the mix cyclically from `offset` and fetches one item per position.

use anyhow::Result;
use metrics::{counter, histogram};
use std::sync::Arc;

use crate::feed::ensure_metrics_described;
use crate::feed::mix::FeedMix;
use crate::feed::registry::{ClientsHandle, ProviderRegistry};
use crate::feed::types::{ContentItem, ProviderId};

/// Caller identity passed upstream for every per-position fetch.
const ANONYMOUS_CALLER: &str = "";

pub struct FeedScheduler {
    mix: Arc<FeedMix>,
    clients: ClientsHandle,
}

impl FeedScheduler {
    /// Refuses to build when a mix entry has no registered client.
    pub fn new(mix: FeedMix, registry: ProviderRegistry) -> Result<Self> {
        registry.ensure_covers(&mix)?;
        Ok(Self {
            mix: Arc::new(mix),
            clients: ClientsHandle::new(registry),
        })
    }

    pub fn mix(&self) -> &FeedMix {
        &self.mix
    }

    /// Provider that owns absolute feed position `position`.
    pub fn provider_for(&self, position: usize) -> &ProviderId {
        self.mix.provider_at(position)
    }

    /// Validate `registry` against the mix, then publish it in one step.
    /// On error the current registry stays in place.
    pub fn swap_clients(&self, registry: ProviderRegistry) -> Result<()> {
        registry.ensure_covers(&self.mix)?;
        self.clients.publish(registry);
        tracing::info!(target: "feed", "provider registry swapped");
        Ok(())
    }

    /// Items for positions `offset..offset + count`, in position order.
    ///
    /// A provider returning nothing contributes nothing for its slot. The first
    /// failed fetch ends the window: items gathered so far are returned and the
    /// failure is only logged.
    pub async fn window(&self, offset: usize, count: usize) -> Vec<ContentItem> {
        ensure_metrics_described();
        counter!("feed_windows_total").increment(1);

        let registry = self.clients.snapshot();
        // `count` is caller-controlled and may be far larger than what gets served.
        let mut items = Vec::with_capacity(count.min(self.mix.len()));

        for i in 0..count {
            let provider = self.mix.provider_for(offset, i);

            let Some(client) = registry.get(provider) else {
                // Unreachable after `ensure_covers`; treated like a failed fetch.
                tracing::warn!(target: "feed", %provider, position = i, "no client for provider");
                counter!("feed_provider_errors_total", "provider" => provider.to_string())
                    .increment(1);
                counter!("feed_windows_truncated_total").increment(1);
                break;
            };

            let t0 = std::time::Instant::now();
            let fetched = client.fetch(ANONYMOUS_CALLER, 1).await;
            histogram!("feed_provider_fetch_ms", "provider" => provider.to_string())
                .record(t0.elapsed().as_secs_f64() * 1_000.0);

            match fetched {
                Ok(batch) => match batch.into_iter().next() {
                    Some(item) => items.push(item),
                    None => {
                        tracing::debug!(target: "feed", %provider, position = i, "provider returned no items");
                        counter!("feed_provider_empty_total", "provider" => provider.to_string())
                            .increment(1);
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        target: "feed",
                        error = ?e,
                        %provider,
                        position = i,
                        "failed fetching content from provider"
                    );
                    counter!("feed_provider_errors_total", "provider" => provider.to_string())
                        .increment(1);
                    counter!("feed_windows_truncated_total").increment(1);
                    break;
                }
            }
        }

        counter!("feed_items_served_total").increment(items.len() as u64);
        items
    }
}
