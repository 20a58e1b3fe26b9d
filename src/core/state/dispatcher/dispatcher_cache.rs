use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, trace};

use crate::core::state::dispatcher::cache_object::{CacheObject, Notification};
use crate::core::state::dispatcher::dispatch_types::NamespacedKey;
use crate::core::state::dispatcher::dispatcher_cache_state::DispatcherCacheState;
use crate::core::state::dispatcher::queue_info::QueueConverter;
use crate::core::state::dispatcher::snapshot::DispatcherSnapshot;
use crate::core::state::dispatcher::workload::WorkloadClassifier;

/// In-memory view of Queues, PodGroups, PriorityClasses and
/// ResourceBindings, fed by the watch handlers.
///
/// A single lock guards all tables together. Conversion and workload
/// classification run before the lock is taken, so critical sections
/// only ever edit maps.
///
/// `update` is delete followed by add, as two separate critical sections.
/// A reader may see the key briefly absent in between and must treat that
/// as "not yet known", not as a deletion.
pub struct DispatcherCache {
    state: Mutex<DispatcherCacheState>,
    queue_converter: Arc<dyn QueueConverter>,
    workload_classifier: Arc<dyn WorkloadClassifier>,
}

impl DispatcherCache {
    pub fn new(
        queue_converter: Arc<dyn QueueConverter>,
        workload_classifier: Arc<dyn WorkloadClassifier>,
    ) -> Self {
        Self {
            state: Mutex::new(DispatcherCacheState::default()),
            queue_converter,
            workload_classifier,
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Run `f` as one critical section over every table and bump the
    /// generation. Every mutation goes through here; `snapshot` takes the
    /// same lock directly so reads leave the generation alone.
    pub(crate) async fn transaction<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut DispatcherCacheState) -> R,
    {
        let mut guard = self.state.lock().await;
        let out = f(&mut guard);
        guard.generation += 1;
        out
    }

    /// Consistent copy of all tables. The only read path into the cache.
    pub async fn snapshot(&self) -> DispatcherSnapshot {
        let guard = self.state.lock().await;
        DispatcherSnapshot::capture(&guard)
    }

    /// Route a watch notification to the handler for its kind.
    pub async fn handle(&self, notification: &Notification) {
        match notification {
            Notification::Add(obj) => {
                trace!("Add {} notification", obj.kind());
                self.add(obj).await
            }
            Notification::Delete(obj) => {
                trace!("Delete {} notification", obj.kind());
                self.delete(obj).await
            }
            Notification::Update(old, new) => {
                trace!("Update {} notification", new.kind());
                match new {
                    CacheObject::Queue(_) => self.update_queue(old, new).await,
                    CacheObject::PodGroup(_) => self.update_pod_group(old, new).await,
                    CacheObject::PriorityClass(_) => self.update_priority_class(old, new).await,
                    CacheObject::ResourceBinding(_) => {
                        self.update_resource_binding(old, new).await
                    }
                }
            }
        }
    }

    async fn add(&self, obj: &CacheObject) {
        match obj {
            CacheObject::Queue(_) => self.add_queue(obj).await,
            CacheObject::PodGroup(_) => self.add_pod_group(obj).await,
            CacheObject::PriorityClass(_) => self.add_priority_class(obj).await,
            CacheObject::ResourceBinding(_) => self.add_resource_binding(obj).await,
        }
    }

    async fn delete(&self, obj: &CacheObject) {
        match obj {
            CacheObject::Queue(_) => self.delete_queue(obj).await,
            CacheObject::PodGroup(_) => self.delete_pod_group(obj).await,
            CacheObject::PriorityClass(_) => self.delete_priority_class(obj).await,
            CacheObject::ResourceBinding(_) => self.delete_resource_binding(obj).await,
        }
    }

    // ===============================================
    // Queue
    // ===============================================

    pub async fn add_queue(&self, obj: &CacheObject) {
        let Some(queue) = obj.as_queue() else {
            return;
        };

        let info = match self.queue_converter.convert(queue) {
            Ok(info) => info,
            Err(e) => {
                error!(
                    "Failed to convert Queue <{}> to the internal schema: {}",
                    queue.metadata.name.as_deref().unwrap_or_default(),
                    e
                );
                return;
            }
        };

        self.transaction(|state| state.upsert_queue(info)).await;
    }

    pub async fn delete_queue(&self, obj: &CacheObject) {
        let Some(name) = obj.as_queue().and_then(|q| q.metadata.name.clone()) else {
            return;
        };

        self.transaction(|state| state.remove_queue(&name)).await;
    }

    pub async fn update_queue(&self, old: &CacheObject, new: &CacheObject) {
        self.delete_queue(old).await;
        self.add_queue(new).await;
    }

    // ===============================================
    // PodGroup
    // ===============================================

    pub async fn add_pod_group(&self, obj: &CacheObject) {
        let Some(pg) = obj.as_pod_group() else {
            return;
        };
        let Some(key) = NamespacedKey::from_meta(&pg.metadata) else {
            debug!("PodGroup without a name, skip add it to cache.");
            return;
        };

        self.transaction(|state| state.upsert_pod_group(&key, pg.clone()))
            .await;
    }

    pub async fn delete_pod_group(&self, obj: &CacheObject) {
        let Some(key) = obj
            .as_pod_group()
            .and_then(|pg| NamespacedKey::from_meta(&pg.metadata))
        else {
            return;
        };

        if let Err(e) = self.transaction(|state| state.remove_pod_group(&key)).await {
            error!("Failed to delete PodGroup <{}>: {}", key, e);
        }
    }

    pub async fn update_pod_group(&self, old: &CacheObject, new: &CacheObject) {
        self.delete_pod_group(old).await;
        self.add_pod_group(new).await;
    }

    // ===============================================
    // PriorityClass
    // ===============================================

    pub async fn add_priority_class(&self, obj: &CacheObject) {
        let Some(pc) = obj.as_priority_class() else {
            return;
        };
        let Some(name) = pc.metadata.name.clone().filter(|n| !n.is_empty()) else {
            debug!("PriorityClass without a name, skip add it to cache.");
            return;
        };

        self.transaction(|state| state.upsert_priority_class(&name, pc.clone()))
            .await;
    }

    pub async fn delete_priority_class(&self, obj: &CacheObject) {
        let Some(pc) = obj.as_priority_class() else {
            return;
        };
        let Some(name) = pc.metadata.name.as_deref() else {
            return;
        };

        self.transaction(|state| state.remove_priority_class(name, pc.value))
            .await;
    }

    pub async fn update_priority_class(&self, old: &CacheObject, new: &CacheObject) {
        self.delete_priority_class(old).await;
        self.add_priority_class(new).await;
    }

    // ===============================================
    // ResourceBinding
    // ===============================================

    /// Bindings whose resource is not a workload, or cannot be classified,
    /// never enter the cache.
    fn workload_binding_key(&self, obj: &CacheObject, action: &str) -> Option<NamespacedKey> {
        let rb = obj.as_resource_binding()?;
        let key = NamespacedKey::from_meta(&rb.metadata)?;

        match self.workload_classifier.is_workload(&rb.spec.resource) {
            Ok(true) => Some(key),
            Ok(false) => {
                debug!(
                    "ResourceBinding <{}> is not a workload, skip {} it.",
                    key, action
                );
                None
            }
            Err(e) => {
                error!(
                    "Failed to check ResourceBinding <{}> if workload, skip {} it: {}",
                    key, action, e
                );
                None
            }
        }
    }

    pub async fn add_resource_binding(&self, obj: &CacheObject) {
        let (Some(rb), Some(key)) = (
            obj.as_resource_binding(),
            self.workload_binding_key(obj, "adding"),
        ) else {
            return;
        };

        self.transaction(|state| state.upsert_resource_binding(&key, rb.clone()))
            .await;
    }

    pub async fn delete_resource_binding(&self, obj: &CacheObject) {
        let Some(key) = self.workload_binding_key(obj, "deleting") else {
            return;
        };

        if let Err(e) = self
            .transaction(|state| state.remove_resource_binding(&key))
            .await
        {
            error!("Failed to delete ResourceBinding <{}>: {}", key, e);
        }
    }

    pub async fn update_resource_binding(&self, old: &CacheObject, new: &CacheObject) {
        self.delete_resource_binding(old).await;
        self.add_resource_binding(new).await;
    }
}
