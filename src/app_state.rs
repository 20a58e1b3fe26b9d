use std::sync::Arc;

use crate::core::state::dispatcher::dispatcher_cache::DispatcherCache;
use crate::domain::cache::service::cache_service::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub cache_service: Arc<CacheService>,
}

pub fn build_app_state(cache: Arc<DispatcherCache>) -> AppState {
    AppState {
        cache_service: Arc::new(CacheService::new(cache)),
    }
}
