use log::{error, info, warn};
use mt_content::action::ActionRegistry;
use mt_content::actions;
use mt_content::app::AppState;
use mt_content::config::Config;
use mt_content::routes::router;
use mt_content::store::persistent_store::StorageBackgroundAdapter;
use mt_content::utils::background::{BackgroundService, serve_background, stop_background};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::RwLock;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(err) => {
                warn!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received termination signal, shutting down");
}

#[tokio::main]
async fn main() {
    registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Unable to load config: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = tokio::fs::create_dir_all(&config.upload_dir).await {
        warn!(
            "Unable to create upload dir {}: {}",
            config.upload_dir.display(),
            err
        );
    }

    let background: Vec<Arc<RwLock<dyn BackgroundService + Send + Sync>>> = vec![Arc::new(
        RwLock::new(StorageBackgroundAdapter::new(config.persistent_store.clone())),
    )];
    let mut background_tasks = serve_background(background.clone());

    let address = format!("{}:{}", config.host, config.port);
    let mut action_registry = ActionRegistry::new();
    actions::register(&mut action_registry);
    let app = router(AppState::new(config, action_registry));

    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Unable to bind {}: {}", address, err);
            std::process::exit(1);
        }
    };
    info!("Listening on {}", address);
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
    }

    stop_background(&background).await;
    while background_tasks.join_next().await.is_some() {}
}
