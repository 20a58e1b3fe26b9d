/// Re-export the Kubernetes resource types the dispatcher watches.
/// This module provides a centralized place for all K8s resource types

pub use k8s_openapi::api::scheduling::v1::PriorityClass;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    ObjectMeta,
};

pub use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

pub use crate::core::client::crds::pod_group::{PodGroup, PodGroupSpec, PodGroupStatus};
pub use crate::core::client::crds::queue::{Guarantee, Queue, QueueSpec, QueueStatus};
pub use crate::core::client::crds::resource_binding::{
    ObjectReference,
    ResourceBinding,
    ResourceBindingSpec,
    TargetCluster,
};

/// Resource list as carried on the wire (`cpu`, `memory`, extended resources).
pub type ResourceList = std::collections::BTreeMap<String, Quantity>;
