// src/feed/mod.rs
pub mod config;
pub mod mix;
pub mod providers;
pub mod registry;
pub mod scheduler;
pub mod types;

pub use mix::FeedMix;
pub use registry::{ClientsHandle, ProviderRegistry};
pub use scheduler::FeedScheduler;
pub use types::{ContentItem, ContentProvider, ProviderId};

use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_windows_total", "Feed windows requested.");
        describe_counter!("feed_items_served_total", "Content items returned to callers.");
        describe_counter!(
            "feed_provider_errors_total",
            "Per-position provider fetch failures."
        );
        describe_counter!(
            "feed_provider_empty_total",
            "Per-position fetches that returned no item."
        );
        describe_counter!(
            "feed_windows_truncated_total",
            "Windows cut short by a provider failure."
        );
        describe_histogram!(
            "feed_provider_fetch_ms",
            "Single-item provider fetch time in milliseconds."
        );
    });
}
