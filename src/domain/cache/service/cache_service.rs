use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::core::state::dispatcher::dispatch_types::DispatchStatus;
use crate::core::state::dispatcher::dispatcher_cache::DispatcherCache;
use crate::core::state::dispatcher::snapshot::DispatcherSnapshot;

/// Table sizes and health of one snapshot.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CacheSummary {
    pub generation: u64,
    pub taken_at: DateTime<Utc>,
    pub queues: usize,
    pub priority_classes: usize,
    pub default_priority_class: Option<String>,
    pub pod_groups: usize,
    pub resource_bindings: usize,
    pub suspended_bindings: usize,
    pub consistent: bool,
    pub inconsistency: Option<String>,
}

impl CacheSummary {
    pub fn from_snapshot(snapshot: &DispatcherSnapshot) -> Self {
        let suspended_bindings = snapshot
            .resource_binding_infos
            .values()
            .flat_map(|infos| infos.values())
            .filter(|info| info.dispatch_status == DispatchStatus::Suspended)
            .count();
        let inconsistency = snapshot.verify_binding_infos().err().map(|e| e.to_string());

        Self {
            generation: snapshot.generation,
            taken_at: snapshot.taken_at,
            queues: snapshot.queues.len(),
            priority_classes: snapshot.priority_classes.len(),
            default_priority_class: snapshot.default_priority_class_name().map(str::to_string),
            pod_groups: snapshot.pod_group_count(),
            resource_bindings: snapshot.resource_binding_count(),
            suspended_bindings,
            consistent: inconsistency.is_none(),
            inconsistency,
        }
    }
}

/// Read-only use cases over the dispatcher cache.
#[derive(Clone)]
pub struct CacheService {
    cache: Arc<DispatcherCache>,
}

impl CacheService {
    pub fn new(cache: Arc<DispatcherCache>) -> Self {
        Self { cache }
    }

    pub async fn snapshot(&self) -> Result<Value> {
        let snapshot = self.cache.snapshot().await;
        Ok(serde_json::to_value(&snapshot)?)
    }

    pub async fn summary(&self) -> Result<CacheSummary> {
        let snapshot = self.cache.snapshot().await;
        Ok(CacheSummary::from_snapshot(&snapshot))
    }
}
