//! Object builders shared by the cache, watcher and API tests.

use crate::core::client::kube_resources::{
    ObjectMeta, ObjectReference, PodGroup, PodGroupSpec, PriorityClass, Quantity, Queue,
    QueueSpec, ResourceBinding, ResourceBindingSpec,
};
use crate::core::state::dispatcher::cache_object::CacheObject;

pub fn queue(name: &str, cpu: &str) -> CacheObject {
    let spec = QueueSpec {
        capability: Some([("cpu".to_string(), Quantity(cpu.to_string()))].into()),
        ..Default::default()
    };
    CacheObject::Queue(Queue::new(name, spec))
}

pub fn pod_group(namespace: &str, name: &str, min_member: i32) -> CacheObject {
    let mut pg = PodGroup::new(
        name,
        PodGroupSpec {
            min_member,
            ..Default::default()
        },
    );
    pg.metadata.namespace = Some(namespace.to_string());
    CacheObject::PodGroup(pg)
}

pub fn priority_class(name: &str, value: i32, global_default: bool) -> CacheObject {
    CacheObject::PriorityClass(PriorityClass {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        value,
        global_default: Some(global_default),
        ..Default::default()
    })
}

pub fn binding(namespace: &str, name: &str, suspend: bool, uid: &str, kind: &str) -> CacheObject {
    let api_version = match kind {
        "Deployment" | "StatefulSet" | "ReplicaSet" | "DaemonSet" => "apps/v1",
        "Job" | "CronJob" => "batch/v1",
        _ => "v1",
    };
    let mut rb = ResourceBinding::new(
        name,
        ResourceBindingSpec {
            resource: ObjectReference {
                api_version: api_version.to_string(),
                kind: kind.to_string(),
                namespace: Some(namespace.to_string()),
                name: format!("{name}-target"),
                uid: uid.to_string(),
                ..Default::default()
            },
            suspend,
            ..Default::default()
        },
    );
    rb.metadata.namespace = Some(namespace.to_string());
    CacheObject::ResourceBinding(rb)
}
