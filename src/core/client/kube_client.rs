use anyhow::{Context, Result};
use axum::http::Uri;
use kube::{Client, Config};
use tracing::debug;

use crate::core::config::dispatcher_config::DispatcherConfig;

/// Creates a Kubernetes client configured for in-cluster or local development
pub async fn build_kube_client(config: &DispatcherConfig) -> Result<Client> {
    let client = if let Some(api_url) = &config.k8s_api_url {
        debug!("Using custom API URL from DISPATCHER_K8S_API_URL: {}", api_url);
        let mut kube_config = Config::infer().await?;
        kube_config.cluster_url = api_url
            .parse::<Uri>()
            .with_context(|| format!("invalid DISPATCHER_K8S_API_URL {api_url:?}"))?;
        Client::try_from(kube_config)?
    } else {
        // In-cluster service account, or the local kubeconfig
        debug!("Using inferred configuration");
        Client::try_default().await?
    };

    debug!("Kubernetes client initialized successfully");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_malformed_api_url() {
        let config = DispatcherConfig {
            k8s_api_url: Some("http://[::1".into()),
            ..Default::default()
        };
        // Fails either on inference (no cluster) or on the URL; never panics
        assert!(build_kube_client(&config).await.is_err());
    }
}
