use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, error};

use crate::core::state::dispatcher::dispatcher_cache::DispatcherCache;
use crate::domain::cache::service::cache_service::CacheSummary;

/// Take a snapshot every `interval` and log its shape.
pub async fn run(cache: Arc<DispatcherCache>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        run_once(&cache).await;
    }
}

/// One snapshot pass. Returns the summary it logged.
pub async fn run_once(cache: &DispatcherCache) -> CacheSummary {
    let snapshot = cache.snapshot().await;
    let summary = CacheSummary::from_snapshot(&snapshot);

    debug!(
        generation = summary.generation,
        queues = summary.queues,
        priority_classes = summary.priority_classes,
        pod_groups = summary.pod_groups,
        resource_bindings = summary.resource_bindings,
        suspended = summary.suspended_bindings,
        "Dispatcher cache snapshot"
    );

    if let Some(reason) = &summary.inconsistency {
        error!("❌ Dispatcher cache snapshot is inconsistent: {}", reason);
    }

    summary
}
