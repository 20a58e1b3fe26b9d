//! Typed custom resources consumed by the dispatcher watches.

pub mod pod_group;
pub mod queue;
pub mod resource_binding;
