use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;

use crate::feed::FeedScheduler;

#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<FeedScheduler>,
}

impl AppState {
    pub fn new(scheduler: FeedScheduler) -> Self {
        Self {
            scheduler: Arc::new(scheduler),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(feed))
        .route("/health", get(|| async { "ok" }))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

fn parse_param(q: &HashMap<String, String>, name: &str) -> Result<usize, Response> {
    q.get(name)
        .and_then(|raw| raw.parse::<usize>().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                format!("failed to parse {name} param"),
            )
                .into_response()
        })
}

async fn feed(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    tracing::info!(target: "api", %method, %uri, "feed request");

    let count = match parse_param(&q, "count") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let offset = match parse_param(&q, "offset") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let items = state.scheduler.window(offset, count).await;
    if items.len() < count {
        tracing::info!(target: "api", requested = count, served = items.len(), "short window");
    }

    match serde_json::to_vec(&items) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(target: "api", error = ?e, "failed encoding response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed encoding response".to_string(),
            )
                .into_response()
        }
    }
}
