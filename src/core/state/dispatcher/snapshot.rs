use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::client::kube_resources::{PodGroup, PriorityClass};
use crate::core::state::dispatcher::dispatch_types::{NamespacedKey, ResourceBindingInfo};
use crate::core::state::dispatcher::dispatcher_cache_state::{
    count_entries, verify_info, DispatcherCacheState, NamespacedTable,
};
use crate::core::state::dispatcher::queue_info::QueueInfo;
use crate::errors::CacheError;

/// Point-in-time copy of every cache table, taken under the cache lock.
///
/// Values are shared `Arc`s and never mutated after the copy is taken, so
/// a snapshot stays valid while the cache moves on.
#[derive(Debug, Clone, Serialize)]
pub struct DispatcherSnapshot {
    pub generation: u64,
    pub taken_at: DateTime<Utc>,

    pub queues: HashMap<String, Arc<QueueInfo>>,
    pub priority_classes: HashMap<String, Arc<PriorityClass>>,
    pub default_priority_class: Option<Arc<PriorityClass>>,
    pub pod_groups: NamespacedTable<PodGroup>,
    pub resource_binding_infos: NamespacedTable<ResourceBindingInfo>,
}

impl DispatcherSnapshot {
    pub(crate) fn capture(state: &DispatcherCacheState) -> Self {
        let default_priority_class = state
            .default_priority
            .name()
            .and_then(|name| state.priority_classes.get(name))
            .cloned();

        Self {
            generation: state.generation,
            taken_at: Utc::now(),
            queues: state.queues.clone(),
            priority_classes: state.priority_classes.clone(),
            default_priority_class,
            pod_groups: state.pod_groups.clone(),
            resource_binding_infos: state.resource_binding_infos.clone(),
        }
    }

    pub fn queue(&self, name: &str) -> Option<&QueueInfo> {
        self.queues.get(name).map(Arc::as_ref)
    }

    pub fn pod_group(&self, key: &NamespacedKey) -> Option<&PodGroup> {
        self.pod_groups
            .get(&key.namespace)
            .and_then(|pgs| pgs.get(&key.name))
            .map(Arc::as_ref)
    }

    pub fn resource_binding_info(&self, key: &NamespacedKey) -> Option<&ResourceBindingInfo> {
        self.resource_binding_infos
            .get(&key.namespace)
            .and_then(|infos| infos.get(&key.name))
            .map(Arc::as_ref)
    }

    pub fn default_priority_class_name(&self) -> Option<&str> {
        self.default_priority_class
            .as_ref()
            .and_then(|pc| pc.metadata.name.as_deref())
    }

    pub fn pod_group_count(&self) -> usize {
        count_entries(&self.pod_groups)
    }

    pub fn resource_binding_count(&self) -> usize {
        count_entries(&self.resource_binding_infos)
    }

    /// Every info agrees with the binding it carries: same name as its key,
    /// status from the suspend flag, UID from the resource reference.
    ///
    /// A snapshot only holds infos, so pairing with the binding table is
    /// checked on the live state instead.
    pub fn verify_binding_infos(&self) -> Result<(), CacheError> {
        for (namespace, infos) in &self.resource_binding_infos {
            for (name, info) in infos {
                verify_info(namespace, name, info)?;
            }
        }
        Ok(())
    }
}
