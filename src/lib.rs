// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod feed;
pub mod metrics;

pub use crate::api::{create_router, AppState};
pub use crate::feed::{ContentItem, ContentProvider, FeedMix, FeedScheduler, ProviderId, ProviderRegistry};

use tracing::info;

/// Build the scheduler from `FEED_CONFIG_PATH` / `config/feed.*` / built-in default.
/// Fails if the mix names a provider without a client.
pub fn scheduler_from_env() -> anyhow::Result<FeedScheduler> {
    let cfg = feed::config::load_feed_config_default()?;
    let (mix, registry) = cfg.build()?;
    info!(
        target: "feed",
        mix_len = mix.len(),
        providers = ?registry.ids(),
        "feed scheduler configured"
    );
    FeedScheduler::new(mix, registry)
}
