//! Cache routes (e.g., /api/v1/cache/*)

use axum::{routing::get, Router};
use crate::api::controller::cache::CacheController;
use crate::app_state::AppState;

pub fn cache_routes() -> Router<AppState> {
    Router::new()
        .route("/snapshot", get(CacheController::get_snapshot))
        .route("/summary", get(CacheController::get_summary))
}
