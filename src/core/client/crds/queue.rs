//! Volcano `scheduling.volcano.sh/v1beta1` Queue (cluster-scoped).

use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crate::core::client::kube_resources::ResourceList;

fn default_weight() -> i32 {
    1
}

#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[kube(
    group = "scheduling.volcano.sh",
    version = "v1beta1",
    kind = "Queue",
    status = "QueueStatus",
    schema = "disabled",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct QueueSpec {
    #[serde(default = "default_weight")]
    pub weight: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability: Option<ResourceList>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deserved: Option<ResourceList>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guarantee: Option<Guarantee>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reclaimable: Option<bool>,

    /// Parent queue in the hierarchy; `root` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl Default for QueueSpec {
    fn default() -> Self {
        Self {
            weight: default_weight(),
            capability: None,
            deserved: None,
            guarantee: None,
            reclaimable: None,
            parent: None,
            priority: None,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Guarantee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceList>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
    /// Open, Closed, Closing or Unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}
