// HTTP API: two read-only endpoints, CORS fully open

use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::Aggregator;
use crate::commentary;
use crate::models::{RoastResponse, SystemStats};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) aggregator: Arc<Aggregator>,
}

pub fn app(aggregator: Arc<Aggregator>) -> Router {
    Router::new()
        .route("/stats", get(stats_handler)) // GET /stats
        .route("/roast", get(roast_handler)) // GET /roast
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(AppState { aggregator })
}

/// GET /stats — fresh snapshot per request; absent readings serialize as null.
async fn stats_handler(State(state): State<AppState>) -> Json<SystemStats> {
    Json(state.aggregator.snapshot().await)
}

/// GET /roast — one random flavor line. The snapshot is computed and handed
/// to the generator even though it does not bias the draw.
async fn roast_handler(State(state): State<AppState>) -> Json<RoastResponse> {
    let stats = state.aggregator.snapshot().await;
    Json(RoastResponse {
        message: commentary::roast(&stats),
    })
}
