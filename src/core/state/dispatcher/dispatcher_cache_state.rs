use std::collections::HashMap;
use std::sync::Arc;

use crate::core::client::kube_resources::{PodGroup, PriorityClass, ResourceBinding};
use crate::core::state::dispatcher::default_priority::DefaultPriority;
use crate::core::state::dispatcher::dispatch_types::{
    DispatchStatus, NamespacedKey, ResourceBindingInfo,
};
use crate::core::state::dispatcher::queue_info::QueueInfo;
use crate::errors::CacheError;

/// namespace → name → value
pub type NamespacedTable<T> = HashMap<String, HashMap<String, Arc<T>>>;

/// Everything guarded by the dispatcher cache lock.
///
/// Only [`DispatcherCache`](super::dispatcher_cache::DispatcherCache) holds
/// one of these; readers get a [`DispatcherSnapshot`](super::snapshot::DispatcherSnapshot).
#[derive(Debug, Default)]
pub struct DispatcherCacheState {
    /// Bumped once per committed transaction
    pub(crate) generation: u64,

    pub(crate) queues: HashMap<String, Arc<QueueInfo>>,
    pub(crate) priority_classes: HashMap<String, Arc<PriorityClass>>,
    pub(crate) default_priority: DefaultPriority,
    pub(crate) pod_groups: NamespacedTable<PodGroup>,
    pub(crate) resource_bindings: NamespacedTable<ResourceBinding>,
    pub(crate) resource_binding_infos: NamespacedTable<ResourceBindingInfo>,
}

impl DispatcherCacheState {
    // ===== Queues =====

    pub fn upsert_queue(&mut self, queue: QueueInfo) {
        self.queues.insert(queue.name.clone(), Arc::new(queue));
    }

    /// Removing an absent queue is a no-op.
    pub fn remove_queue(&mut self, name: &str) -> Option<Arc<QueueInfo>> {
        self.queues.remove(name)
    }

    // ===== PriorityClasses =====

    pub fn upsert_priority_class(&mut self, name: &str, pc: PriorityClass) {
        self.default_priority
            .on_add(name, pc.global_default.unwrap_or(false), pc.value);
        self.priority_classes.insert(name.to_string(), Arc::new(pc));
    }

    pub fn remove_priority_class(&mut self, name: &str, value: i32) -> Option<Arc<PriorityClass>> {
        self.default_priority.on_delete(name, value);
        self.priority_classes.remove(name)
    }

    pub fn default_priority(&self) -> &DefaultPriority {
        &self.default_priority
    }

    // ===== PodGroups =====

    pub fn upsert_pod_group(&mut self, key: &NamespacedKey, pg: PodGroup) {
        self.pod_groups
            .entry(key.namespace.clone())
            .or_default()
            .insert(key.name.clone(), Arc::new(pg));
    }

    /// Fails when the namespace bucket was never created.
    pub fn remove_pod_group(
        &mut self,
        key: &NamespacedKey,
    ) -> Result<Option<Arc<PodGroup>>, CacheError> {
        let bucket = self
            .pod_groups
            .get_mut(&key.namespace)
            .ok_or_else(|| CacheError::NamespaceNotCached {
                kind: "PodGroup",
                namespace: key.namespace.clone(),
                name: key.name.clone(),
            })?;
        Ok(bucket.remove(&key.name))
    }

    // ===== ResourceBindings =====

    /// Store the binding together with its freshly derived info.
    pub fn upsert_resource_binding(&mut self, key: &NamespacedKey, rb: ResourceBinding) {
        let rb = Arc::new(rb);
        let info = ResourceBindingInfo::new(Arc::clone(&rb));

        self.resource_bindings
            .entry(key.namespace.clone())
            .or_default()
            .insert(key.name.clone(), rb);
        self.resource_binding_infos
            .entry(key.namespace.clone())
            .or_default()
            .insert(key.name.clone(), Arc::new(info));
    }

    /// Removes the binding and its info. Fails when the namespace bucket
    /// was never created.
    pub fn remove_resource_binding(
        &mut self,
        key: &NamespacedKey,
    ) -> Result<Option<Arc<ResourceBinding>>, CacheError> {
        let bucket = self
            .resource_bindings
            .get_mut(&key.namespace)
            .ok_or_else(|| CacheError::NamespaceNotCached {
                kind: "ResourceBinding",
                namespace: key.namespace.clone(),
                name: key.name.clone(),
            })?;
        let removed = bucket.remove(&key.name);

        if let Some(infos) = self.resource_binding_infos.get_mut(&key.namespace) {
            infos.remove(&key.name);
        }
        Ok(removed)
    }

    pub fn resource_binding_info(&self, key: &NamespacedKey) -> Option<&Arc<ResourceBindingInfo>> {
        self.resource_binding_infos
            .get(&key.namespace)
            .and_then(|infos| infos.get(&key.name))
    }

    /// Check that bindings and infos pair up one to one.
    pub fn verify_binding_infos(&self) -> Result<(), CacheError> {
        verify_binding_tables(&self.resource_bindings, &self.resource_binding_infos)
    }
}

/// One info against the binding it carries and the key it is stored under.
pub(crate) fn verify_info(
    namespace: &str,
    name: &str,
    info: &ResourceBindingInfo,
) -> Result<(), CacheError> {
    let rb = &info.resource_binding;

    if rb.metadata.name.as_deref() != Some(name) {
        return Err(CacheError::Inconsistent(format!(
            "ResourceBinding stored under <{namespace}/{name}> has a different name"
        )));
    }
    if info.dispatch_status != DispatchStatus::from_suspend(rb.spec.suspend) {
        return Err(CacheError::Inconsistent(format!(
            "ResourceBindingInfo <{namespace}/{name}> is {} but suspend is {}",
            info.dispatch_status, rb.spec.suspend
        )));
    }
    if info.resource_uid != rb.spec.resource.uid {
        return Err(CacheError::Inconsistent(format!(
            "ResourceBindingInfo <{namespace}/{name}> UID does not match its binding"
        )));
    }
    Ok(())
}

pub(crate) fn count_entries<T>(table: &NamespacedTable<T>) -> usize {
    table.values().map(HashMap::len).sum()
}

/// Every binding has exactly one info with matching UID and status, and
/// every info has its binding.
pub(crate) fn verify_binding_tables(
    bindings: &NamespacedTable<ResourceBinding>,
    infos: &NamespacedTable<ResourceBindingInfo>,
) -> Result<(), CacheError> {
    for (namespace, by_name) in bindings {
        for (name, rb) in by_name {
            let info = infos
                .get(namespace)
                .and_then(|i| i.get(name))
                .ok_or_else(|| {
                    CacheError::Inconsistent(format!(
                        "ResourceBinding <{namespace}/{name}> has no ResourceBindingInfo"
                    ))
                })?;

            if !Arc::ptr_eq(&info.resource_binding, rb) {
                return Err(CacheError::Inconsistent(format!(
                    "ResourceBindingInfo <{namespace}/{name}> refers to a stale binding"
                )));
            }
            verify_info(namespace, name, info)?;
        }
    }

    if count_entries(infos) != count_entries(bindings) {
        return Err(CacheError::Inconsistent(format!(
            "{} ResourceBindingInfos for {} ResourceBindings",
            count_entries(infos),
            count_entries(bindings)
        )));
    }
    Ok(())
}
