//! Dispatcher cache: the in-memory state behind the dispatch cycle.

pub mod cache_object;
pub mod default_priority;
pub mod dispatch_types;
pub mod dispatcher_cache;
pub mod dispatcher_cache_state;
pub mod queue_info;
pub mod snapshot;
pub mod workload;

#[cfg(test)]
pub(crate) mod test_fixtures;
