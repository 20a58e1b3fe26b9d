use std::collections::HashSet;

use crate::core::client::kube_resources::ObjectReference;
use crate::errors::CacheError;

/// Decides whether a binding's resource template is a workload
/// (a controller-managed, replicated object) worth dispatching.
pub trait WorkloadClassifier: Send + Sync {
    fn is_workload(&self, resource: &ObjectReference) -> Result<bool, CacheError>;
}

/// `(group, kind)` pairs treated as workloads out of the box.
const BUILTIN_WORKLOADS: &[(&str, &str)] = &[
    ("apps", "Deployment"),
    ("apps", "StatefulSet"),
    ("apps", "ReplicaSet"),
    ("apps", "DaemonSet"),
    ("batch", "Job"),
    ("batch", "CronJob"),
    ("batch.volcano.sh", "Job"),
];

/// Classifies by API group and kind.
#[derive(Debug, Clone)]
pub struct KindWorkloadClassifier {
    workloads: HashSet<(String, String)>,
    /// Kinds accepted regardless of group
    extra_kinds: HashSet<String>,
}

impl Default for KindWorkloadClassifier {
    fn default() -> Self {
        Self::with_extra_kinds(Vec::<String>::new())
    }
}

impl KindWorkloadClassifier {
    pub fn with_extra_kinds<I, S>(extra_kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            workloads: BUILTIN_WORKLOADS
                .iter()
                .map(|(g, k)| (g.to_string(), k.to_string()))
                .collect(),
            extra_kinds: extra_kinds.into_iter().map(Into::into).collect(),
        }
    }
}

impl WorkloadClassifier for KindWorkloadClassifier {
    fn is_workload(&self, resource: &ObjectReference) -> Result<bool, CacheError> {
        if resource.api_version.is_empty() || resource.kind.is_empty() {
            return Err(CacheError::WorkloadClassification {
                api_version: resource.api_version.clone(),
                kind: resource.kind.clone(),
                reason: "apiVersion and kind are required".into(),
            });
        }

        // `apps/v1` → `apps`; core `v1` has no group
        let group = match resource.api_version.split_once('/') {
            Some((group, version)) if !group.is_empty() && !version.is_empty() => group,
            Some(_) => {
                return Err(CacheError::WorkloadClassification {
                    api_version: resource.api_version.clone(),
                    kind: resource.kind.clone(),
                    reason: "malformed apiVersion".into(),
                })
            }
            None => "",
        };

        if self.extra_kinds.contains(&resource.kind) {
            return Ok(true);
        }
        Ok(self
            .workloads
            .contains(&(group.to_string(), resource.kind.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(api_version: &str, kind: &str) -> ObjectReference {
        ObjectReference {
            api_version: api_version.into(),
            kind: kind.into(),
            name: "obj".into(),
            uid: "uid".into(),
            ..Default::default()
        }
    }

    #[test]
    fn builtin_workloads() {
        let c = KindWorkloadClassifier::default();
        assert!(c.is_workload(&reference("apps/v1", "Deployment")).unwrap());
        assert!(c.is_workload(&reference("batch/v1", "Job")).unwrap());
        assert!(c.is_workload(&reference("batch.volcano.sh/v1alpha1", "Job")).unwrap());
        assert!(!c.is_workload(&reference("v1", "ConfigMap")).unwrap());
        assert!(!c.is_workload(&reference("v1", "Service")).unwrap());
        // Same kind, different group
        assert!(!c.is_workload(&reference("example.com/v1", "Deployment")).unwrap());
    }

    #[test]
    fn extra_kinds_are_accepted() {
        let c = KindWorkloadClassifier::with_extra_kinds(["RayCluster"]);
        assert!(c.is_workload(&reference("ray.io/v1", "RayCluster")).unwrap());
    }

    #[test]
    fn incomplete_reference_is_an_error() {
        let c = KindWorkloadClassifier::default();
        assert!(c.is_workload(&reference("", "Deployment")).is_err());
        assert!(c.is_workload(&reference("apps/v1", "")).is_err());
        assert!(c.is_workload(&reference("/v1", "Deployment")).is_err());
    }
}
