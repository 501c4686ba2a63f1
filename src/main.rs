//! Feed Mixer: binary entrypoint.
//! Boots the Axum HTTP server, wiring the feed scheduler, metrics, and middleware.

use feed_mixer::{api, metrics::Metrics, scheduler_from_env, AppState};
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact text logs by default, JSON with FEED_LOG_FORMAT=json.
/// Uses `try_init` because the host runtime may already own the global subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("feed_mixer=info,feed=info,api=info,warn"));
    let json = std::env::var("FEED_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json().with_current_span(false)).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    // Refuse to serve when the mix references an unregistered provider.
    let scheduler = scheduler_from_env()?;
    let metrics = Metrics::init(scheduler.mix())?;

    let state = AppState::new(scheduler);
    let router = api::create_router(state).merge(metrics.router());

    Ok(router.into())
}
