use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{error, info};

use dispatcher_core::app_state::build_app_state;
use dispatcher_core::core::client::kube_client::build_kube_client;
use dispatcher_core::core::client::watchers::start_watchers;
use dispatcher_core::core::config::dispatcher_config::DispatcherConfig;
use dispatcher_core::core::logging::init_tracing;
use dispatcher_core::core::state::dispatcher::queue_info::QueueSchemeConverter;
use dispatcher_core::core::state::dispatcher::workload::KindWorkloadClassifier;
use dispatcher_core::routes::app_router;
use dispatcher_core::scheduler;
use dispatcher_core::DispatcherCache;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = DispatcherConfig::from_env()?;
    let _log_guard = init_tracing(&config);
    info!("🚀 Starting dispatcher cache with {:?}", config);

    let cache = DispatcherCache::new(
        Arc::new(QueueSchemeConverter),
        Arc::new(KindWorkloadClassifier::with_extra_kinds(
            config.extra_workload_kinds.clone(),
        )),
    )
    .shared();

    let client = build_kube_client(&config).await?;
    let watcher_handles = start_watchers(client, Arc::clone(&cache));

    let snapshot_handle = tokio::spawn(scheduler::tasks::snapshot::task::run(
        Arc::clone(&cache),
        config.snapshot_interval(),
    ));

    let app = app_router().with_state(build_app_state(cache));
    let listener = TcpListener::bind(config.http_addr).await?;
    info!("Listening on {}", config.http_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("HTTP server error: {:?}", e);
    }

    snapshot_handle.abort();
    for handle in watcher_handles {
        handle.abort();
    }
    info!("Dispatcher cache stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {:?}", e);
    }
}
