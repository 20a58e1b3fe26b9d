use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::client::kube_resources::{Queue, ResourceList};
use crate::core::util::quantity_util::QuantityUtil;
use crate::errors::CacheError;

pub const ROOT_QUEUE: &str = "root";

/// Parsed resource amounts (cpu in cores, memory in bytes, ...).
pub type ResourceAmounts = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueState {
    Open,
    Closed,
    Closing,
    Unknown,
}

impl QueueState {
    fn parse(state: Option<&str>) -> Self {
        match state {
            // A queue without status has not been reconciled yet; it accepts work
            None | Some("") | Some("Open") => QueueState::Open,
            Some("Closed") => QueueState::Closed,
            Some("Closing") => QueueState::Closing,
            Some(_) => QueueState::Unknown,
        }
    }
}

/// Queue in the internal processing schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueInfo {
    pub uid: String,
    pub name: String,
    pub weight: i32,
    pub capability: ResourceAmounts,
    pub deserved: ResourceAmounts,
    pub guarantee: ResourceAmounts,
    pub reclaimable: bool,
    pub parent: String,
    pub priority: i32,
    pub state: QueueState,
}

/// Translates a watched `v1beta1` Queue into the internal schema.
pub trait QueueConverter: Send + Sync {
    fn convert(&self, queue: &Queue) -> Result<QueueInfo, CacheError>;
}

/// Default conversion: parses every resource list and applies the
/// upstream defaults (`reclaimable: true`, parent `root`).
#[derive(Debug, Default, Clone, Copy)]
pub struct QueueSchemeConverter;

impl QueueConverter for QueueSchemeConverter {
    fn convert(&self, queue: &Queue) -> Result<QueueInfo, CacheError> {
        let name = queue
            .metadata
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| CacheError::QueueConversion {
                name: String::new(),
                reason: "metadata.name is empty".into(),
            })?;

        let spec = &queue.spec;
        let wrap = |err: CacheError| CacheError::QueueConversion {
            name: name.clone(),
            reason: err.to_string(),
        };

        let capability = parse_resources(spec.capability.as_ref()).map_err(wrap)?;
        let deserved = parse_resources(spec.deserved.as_ref()).map_err(wrap)?;
        let guarantee = parse_resources(
            spec.guarantee.as_ref().and_then(|g| g.resource.as_ref()),
        )
        .map_err(wrap)?;

        Ok(QueueInfo {
            uid: queue.metadata.uid.clone().unwrap_or_default(),
            weight: spec.weight,
            capability,
            deserved,
            guarantee,
            reclaimable: spec.reclaimable.unwrap_or(true),
            parent: spec
                .parent
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| ROOT_QUEUE.to_string()),
            priority: spec.priority.unwrap_or_default(),
            state: QueueState::parse(queue.status.as_ref().and_then(|s| s.state.as_deref())),
            name,
        })
    }
}

fn parse_resources(list: Option<&ResourceList>) -> Result<ResourceAmounts, CacheError> {
    let mut amounts = ResourceAmounts::new();
    for (resource, quantity) in list.into_iter().flatten() {
        amounts.insert(resource.clone(), QuantityUtil::parse(resource, quantity)?);
    }
    Ok(amounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::kube_resources::{Guarantee, Quantity, QueueSpec, QueueStatus};

    fn list(pairs: &[(&str, &str)]) -> ResourceList {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Quantity(v.to_string())))
            .collect()
    }

    #[test]
    fn converts_with_defaults() {
        let queue = Queue::new("q1", QueueSpec::default());
        let info = QueueSchemeConverter.convert(&queue).unwrap();

        assert_eq!(info.name, "q1");
        assert_eq!(info.weight, 1);
        assert!(info.capability.is_empty());
        assert!(info.reclaimable);
        assert_eq!(info.parent, ROOT_QUEUE);
        assert_eq!(info.state, QueueState::Open);
    }

    #[test]
    fn parses_resource_lists_and_status() {
        let mut queue = Queue::new(
            "q1",
            QueueSpec {
                weight: 3,
                capability: Some(list(&[("cpu", "10"), ("memory", "1Gi")])),
                guarantee: Some(Guarantee {
                    resource: Some(list(&[("cpu", "500m")])),
                }),
                reclaimable: Some(false),
                parent: Some("research".into()),
                priority: Some(7),
                ..Default::default()
            },
        );
        queue.status = Some(QueueStatus {
            state: Some("Closing".into()),
        });

        let info = QueueSchemeConverter.convert(&queue).unwrap();
        assert_eq!(info.weight, 3);
        assert_eq!(info.capability.get("cpu"), Some(&10.0));
        assert_eq!(info.capability.get("memory"), Some(&1073741824.0));
        assert_eq!(info.guarantee.get("cpu"), Some(&0.5));
        assert!(!info.reclaimable);
        assert_eq!(info.parent, "research");
        assert_eq!(info.priority, 7);
        assert_eq!(info.state, QueueState::Closing);
    }

    #[test]
    fn bad_quantity_fails_conversion() {
        let queue = Queue::new(
            "q1",
            QueueSpec {
                capability: Some(list(&[("cpu", "ten")])),
                ..Default::default()
            },
        );
        let err = QueueSchemeConverter.convert(&queue).unwrap_err();
        assert!(matches!(err, CacheError::QueueConversion { ref name, .. } if name == "q1"));
    }

    #[test]
    fn overflowing_quantity_fails_conversion() {
        let queue = Queue::new(
            "q1",
            QueueSpec {
                capability: Some(list(&[("cpu", "1e400")])),
                ..Default::default()
            },
        );
        let err = QueueSchemeConverter.convert(&queue).unwrap_err();
        assert!(err.to_string().contains("1e400"));
    }
}
