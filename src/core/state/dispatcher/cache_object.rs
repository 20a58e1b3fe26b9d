use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::client::kube_resources::{PodGroup, PriorityClass, Queue, ResourceBinding};

/// A watched object of one of the four cached kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheObject {
    Queue(Queue),
    PodGroup(PodGroup),
    PriorityClass(PriorityClass),
    ResourceBinding(ResourceBinding),
}

/// One watch notification, routed by [`DispatcherCache::handle`](super::dispatcher_cache::DispatcherCache::handle).
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Add(CacheObject),
    Update(CacheObject, CacheObject),
    Delete(CacheObject),
}

impl CacheObject {
    pub fn kind(&self) -> &'static str {
        match self {
            CacheObject::Queue(_) => "Queue",
            CacheObject::PodGroup(_) => "PodGroup",
            CacheObject::PriorityClass(_) => "PriorityClass",
            CacheObject::ResourceBinding(_) => "ResourceBinding",
        }
    }

    /// `(namespace, name)`; cluster-scoped kinds use an empty namespace.
    pub fn object_key(&self) -> Option<(String, String)> {
        let (meta, namespaced) = match self {
            CacheObject::Queue(q) => (&q.metadata, false),
            CacheObject::PodGroup(pg) => (&pg.metadata, true),
            CacheObject::PriorityClass(pc) => (&pc.metadata, false),
            CacheObject::ResourceBinding(rb) => (&rb.metadata, true),
        };
        let name = meta.name.clone().filter(|n| !n.is_empty())?;
        let namespace = if namespaced {
            meta.namespace.clone().unwrap_or_else(|| "default".to_string())
        } else {
            String::new()
        };
        Some((namespace, name))
    }

    pub fn as_queue(&self) -> Option<&Queue> {
        match self {
            CacheObject::Queue(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_pod_group(&self) -> Option<&PodGroup> {
        match self {
            CacheObject::PodGroup(pg) => Some(pg),
            _ => None,
        }
    }

    pub fn as_priority_class(&self) -> Option<&PriorityClass> {
        match self {
            CacheObject::PriorityClass(pc) => Some(pc),
            _ => None,
        }
    }

    pub fn as_resource_binding(&self) -> Option<&ResourceBinding> {
        match self {
            CacheObject::ResourceBinding(rb) => Some(rb),
            _ => None,
        }
    }

    /// Classify an untyped payload by its `apiVersion`/`kind`.
    ///
    /// Returns `None` for unknown kinds or bodies that do not deserialize.
    pub fn classify(value: &Value) -> Option<Self> {
        let api_version = value.get("apiVersion")?.as_str()?;
        let kind = value.get("kind")?.as_str()?;

        match (api_version, kind) {
            ("scheduling.volcano.sh/v1beta1", "Queue") => decode(value).map(CacheObject::Queue),
            ("scheduling.volcano.sh/v1beta1", "PodGroup") => {
                decode(value).map(CacheObject::PodGroup)
            }
            ("scheduling.k8s.io/v1", "PriorityClass") => {
                decode(value).map(CacheObject::PriorityClass)
            }
            ("work.karmada.io/v1alpha2", "ResourceBinding") => {
                decode(value).map(CacheObject::ResourceBinding)
            }
            _ => None,
        }
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Option<T> {
    serde_json::from_value(value.clone()).ok()
}

impl From<Queue> for CacheObject {
    fn from(q: Queue) -> Self {
        CacheObject::Queue(q)
    }
}

impl From<PodGroup> for CacheObject {
    fn from(pg: PodGroup) -> Self {
        CacheObject::PodGroup(pg)
    }
}

impl From<PriorityClass> for CacheObject {
    fn from(pc: PriorityClass) -> Self {
        CacheObject::PriorityClass(pc)
    }
}

impl From<ResourceBinding> for CacheObject {
    fn from(rb: ResourceBinding) -> Self {
        CacheObject::ResourceBinding(rb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_known_kinds() {
        let rb = json!({
            "apiVersion": "work.karmada.io/v1alpha2",
            "kind": "ResourceBinding",
            "metadata": { "name": "rb1", "namespace": "default" },
            "spec": {
                "resource": { "apiVersion": "apps/v1", "kind": "Deployment", "name": "web", "uid": "abc" },
                "suspend": true
            }
        });

        let obj = CacheObject::classify(&rb).expect("binding should classify");
        let binding = obj.as_resource_binding().unwrap();
        assert!(binding.spec.suspend);
        assert_eq!(binding.spec.resource.uid, "abc");
        assert!(obj.as_queue().is_none());
        assert_eq!(obj.object_key(), Some(("default".into(), "rb1".into())));

        let pc = json!({
            "apiVersion": "scheduling.k8s.io/v1",
            "kind": "PriorityClass",
            "metadata": { "name": "high" },
            "value": 1000,
            "globalDefault": true
        });
        let obj = CacheObject::classify(&pc).unwrap();
        assert_eq!(obj.kind(), "PriorityClass");
        assert_eq!(obj.object_key(), Some((String::new(), "high".into())));
    }

    #[test]
    fn rejects_unknown_or_malformed_payloads() {
        assert!(CacheObject::classify(&json!({ "kind": "Queue" })).is_none());
        assert!(CacheObject::classify(&json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": { "name": "cm" }
        }))
        .is_none());
        // PriorityClass without the required `value`
        assert!(CacheObject::classify(&json!({
            "apiVersion": "scheduling.k8s.io/v1",
            "kind": "PriorityClass",
            "metadata": { "name": "broken" }
        }))
        .is_none());
        assert!(CacheObject::classify(&json!("not an object")).is_none());
    }
}
