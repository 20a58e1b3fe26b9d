//! Cache controller: read-only views over the dispatcher cache

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::cache::service::cache_service::CacheSummary;
use crate::errors::AppError;

pub struct CacheController;

impl CacheController {
    pub async fn get_snapshot(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.cache_service.snapshot().await)
    }

    pub async fn get_summary(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<CacheSummary>>, AppError> {
        to_json(state.cache_service.summary().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::build_app_state;
    use crate::core::state::dispatcher::dispatcher_cache::DispatcherCache;
    use crate::core::state::dispatcher::queue_info::QueueSchemeConverter;
    use crate::core::state::dispatcher::test_fixtures::queue;
    use crate::core::state::dispatcher::workload::KindWorkloadClassifier;
    use std::sync::Arc;

    #[tokio::test]
    async fn summary_wraps_counts_in_envelope() {
        let cache = DispatcherCache::new(
            Arc::new(QueueSchemeConverter),
            Arc::new(KindWorkloadClassifier::default()),
        )
        .shared();
        cache.add_queue(&queue("q1", "10")).await;

        let Json(body) = CacheController::get_summary(State(build_app_state(cache)))
            .await
            .unwrap();
        assert!(body.success);
        assert_eq!(body.data.queues, 1);
        assert!(body.data.consistent);
    }
}
