pub mod api;

use axum::{
    Router,
    routing::{get, post}
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/video", post(api::fetch_video))
        .route("/api/audio", post(api::fetch_audio))
        .route("/api/tools", get(api::tools))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
