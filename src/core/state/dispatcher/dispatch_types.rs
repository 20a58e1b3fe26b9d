use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::client::kube_resources::{ObjectMeta, ResourceBinding};

/// Whether a binding's propagation to member clusters is held back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchStatus {
    UnSuspended,
    Suspended,
}

impl DispatchStatus {
    /// Bindings are expected to be created suspended by the admission webhook,
    /// so the flag present at insertion time is taken as-is.
    pub fn from_suspend(suspend: bool) -> Self {
        if suspend {
            DispatchStatus::Suspended
        } else {
            DispatchStatus::UnSuspended
        }
    }
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchStatus::UnSuspended => write!(f, "UnSuspended"),
            DispatchStatus::Suspended => write!(f, "Suspended"),
        }
    }
}

/// `(namespace, name)` key of a namespaced object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamespacedKey {
    pub namespace: String,
    pub name: String,
}

impl NamespacedKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Objects without a name cannot be keyed and are rejected.
    pub fn from_meta(meta: &ObjectMeta) -> Option<Self> {
        let name = meta.name.as_deref().filter(|n| !n.is_empty())?;
        let namespace = meta.namespace.as_deref().unwrap_or("default");
        Some(Self::new(namespace, name))
    }
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Dispatch view of a cached ResourceBinding.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceBindingInfo {
    pub resource_binding: Arc<ResourceBinding>,

    /// UID of the resource template, copied from `spec.resource.uid`
    pub resource_uid: String,

    pub dispatch_status: DispatchStatus,

    // Filled by the snapshot stage of the dispatch cycle, never by the cache.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl ResourceBindingInfo {
    pub fn new(rb: Arc<ResourceBinding>) -> Self {
        Self {
            resource_uid: rb.spec.resource.uid.clone(),
            dispatch_status: DispatchStatus::from_suspend(rb.spec.suspend),
            resource_binding: rb,
            queue: None,
            priority: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::kube_resources::{ObjectReference, ResourceBindingSpec};

    #[test]
    fn status_follows_suspend_flag() {
        assert_eq!(DispatchStatus::from_suspend(true), DispatchStatus::Suspended);
        assert_eq!(DispatchStatus::from_suspend(false), DispatchStatus::UnSuspended);
    }

    #[test]
    fn info_copies_uid_and_leaves_snapshot_fields_empty() {
        let rb = ResourceBinding::new(
            "rb1",
            ResourceBindingSpec {
                resource: ObjectReference {
                    api_version: "apps/v1".into(),
                    kind: "Deployment".into(),
                    name: "web".into(),
                    uid: "abc".into(),
                    ..Default::default()
                },
                suspend: true,
                ..Default::default()
            },
        );

        let info = ResourceBindingInfo::new(Arc::new(rb));
        assert_eq!(info.resource_uid, "abc");
        assert_eq!(info.dispatch_status, DispatchStatus::Suspended);
        assert!(info.queue.is_none());
        assert!(info.priority.is_none());
    }

    #[test]
    fn key_defaults_namespace_and_requires_name() {
        let meta = ObjectMeta {
            name: Some("pg".into()),
            ..Default::default()
        };
        assert_eq!(NamespacedKey::from_meta(&meta), Some(NamespacedKey::new("default", "pg")));
        assert_eq!(NamespacedKey::from_meta(&ObjectMeta::default()), None);
    }
}
