//! Dispatcher cache: watches Queues, PodGroups, PriorityClasses and
//! ResourceBindings and keeps a consistent in-memory view of them for the
//! dispatch cycle.

pub mod api;
pub mod app_state;
pub mod core;
pub mod domain;
pub mod errors;
pub mod routes;
pub mod scheduler;

pub use crate::core::state::dispatcher::cache_object::{CacheObject, Notification};
pub use crate::core::state::dispatcher::dispatcher_cache::DispatcherCache;
pub use crate::core::state::dispatcher::snapshot::DispatcherSnapshot;
