use serde::Serialize;
use tracing::{debug, trace, warn};

/// Which PriorityClass, if any, is the cluster-wide default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum DefaultPriority {
    #[default]
    NoDefault,
    HasDefault(String),
}

impl DefaultPriority {
    pub fn name(&self) -> Option<&str> {
        match self {
            DefaultPriority::NoDefault => None,
            DefaultPriority::HasDefault(name) => Some(name),
        }
    }

    /// A PriorityClass was stored. Last write wins among defaults.
    ///
    /// Storing a non-default record under the tracked name drops the default,
    /// so the tracker never outlives the record it points at. This is the
    /// "updated away from default" case when the add replaces the entry
    /// without a preceding delete: the tracked default is cleared together
    /// with the map.
    pub fn on_add(&mut self, name: &str, global_default: bool, value: i32) {
        if global_default {
            if let DefaultPriority::HasDefault(previous) = self {
                if previous.as_str() != name {
                    warn!(
                        "Default PriorityClass <{}> overwritten by <{}>, more than one default exists.",
                        previous, name
                    );
                }
            }
            debug!("Set default PriorityClass to <{}>, Priority <{}>.", name, value);
            *self = DefaultPriority::HasDefault(name.to_string());
        } else if self.name() == Some(name) {
            debug!("PriorityClass <{}> is no longer the default.", name);
            *self = DefaultPriority::NoDefault;
        }
    }

    /// A PriorityClass was removed from the map.
    pub fn on_delete(&mut self, name: &str, value: i32) {
        if self.name() == Some(name) {
            trace!("Delete default PriorityClass <{}>, Priority <{}>.", name, value);
            *self = DefaultPriority::NoDefault;
        }
    }
}
