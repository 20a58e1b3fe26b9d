use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use validator::Validate;

use crate::errors::CacheError;

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_SNAPSHOT_INTERVAL_SECS: u64 = 5;

/// Process configuration, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, Validate)]
pub struct DispatcherConfig {
    pub http_addr: SocketAddr,

    #[validate(length(min = 1))]
    pub log_level: String,

    /// Daily rolling log files are written here when set
    pub log_dir: Option<PathBuf>,

    #[validate(range(min = 1, max = 3600))]
    pub snapshot_interval_secs: u64,

    /// Kinds treated as workloads on top of the built-in set
    pub extra_workload_kinds: Vec<String>,

    pub k8s_api_url: Option<String>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
            snapshot_interval_secs: DEFAULT_SNAPSHOT_INTERVAL_SECS,
            extra_workload_kinds: Vec::new(),
            k8s_api_url: None,
        }
    }
}

impl DispatcherConfig {
    /// Build the config from `DISPATCHER_*` environment variables.
    pub fn from_env() -> Result<Self, CacheError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, with an injectable lookup for tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CacheError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("DISPATCHER_HTTP_ADDR") {
            config.http_addr = addr
                .parse()
                .map_err(|e| CacheError::Config(format!("DISPATCHER_HTTP_ADDR {addr:?}: {e}")))?;
        }

        if let Some(level) = lookup("DISPATCHER_LOG_LEVEL") {
            config.log_level = level.trim().to_string();
        }

        config.log_dir = lookup("DISPATCHER_LOG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        if let Some(secs) = lookup("DISPATCHER_SNAPSHOT_INTERVAL_SECS") {
            config.snapshot_interval_secs = secs.trim().parse().map_err(|e| {
                CacheError::Config(format!("DISPATCHER_SNAPSHOT_INTERVAL_SECS {secs:?}: {e}"))
            })?;
        }

        if let Some(kinds) = lookup("DISPATCHER_EXTRA_WORKLOAD_KINDS") {
            config.extra_workload_kinds = kinds
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
        }

        config.k8s_api_url = lookup("DISPATCHER_K8S_API_URL").filter(|u| !u.is_empty());

        config
            .validate()
            .map_err(|e| CacheError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn snapshot_interval(&self) -> Duration {
        Duration::from_secs(self.snapshot_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = DispatcherConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.http_addr.to_string(), DEFAULT_HTTP_ADDR);
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.is_none());
        assert_eq!(config.snapshot_interval(), Duration::from_secs(5));
        assert!(config.extra_workload_kinds.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let config = DispatcherConfig::from_lookup(lookup_from(&[
            ("DISPATCHER_HTTP_ADDR", "127.0.0.1:9090"),
            ("DISPATCHER_LOG_LEVEL", "debug"),
            ("DISPATCHER_LOG_DIR", "/var/log/dispatcher"),
            ("DISPATCHER_SNAPSHOT_INTERVAL_SECS", "30"),
            ("DISPATCHER_EXTRA_WORKLOAD_KINDS", "RayCluster, ,PyTorchJob"),
        ]))
        .unwrap();

        assert_eq!(config.http_addr.port(), 9090);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/dispatcher")));
        assert_eq!(config.snapshot_interval_secs, 30);
        assert_eq!(config.extra_workload_kinds, vec!["RayCluster", "PyTorchJob"]);
    }

    #[test]
    fn rejects_out_of_range_interval() {
        let err = DispatcherConfig::from_lookup(lookup_from(&[(
            "DISPATCHER_SNAPSHOT_INTERVAL_SECS",
            "0",
        )]))
        .unwrap_err();
        assert!(matches!(err, CacheError::Config(_)));
    }

    #[test]
    fn rejects_bad_address() {
        let err =
            DispatcherConfig::from_lookup(lookup_from(&[("DISPATCHER_HTTP_ADDR", "not-an-addr")]))
                .unwrap_err();
        assert!(err.to_string().contains("DISPATCHER_HTTP_ADDR"));
    }
}
