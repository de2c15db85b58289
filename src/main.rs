//! # Authorization service
//!
//! Loads the yaml rules file and serves decisions over HTTP.
//! See `Settings` for the environment variables it reads; `RUST_LOG`
//! controls the log level (default: info).
//!
//! On Unix, `SIGHUP` reloads the rules file. A file that fails to load
//! leaves the previously loaded rules in place.

use std::{io, path::PathBuf, process::ExitCode, sync::Arc};

use authservice::{web, ConfigurationError, RuleSetBuilder, RuleStore, Settings};
use thiserror::Error;
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
enum ServiceError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Server error: {0}.")]
    Server(#[from] io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "authorization service stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServiceError> {
    let settings = Settings::from_env()?;
    info!(
        rules = %settings.rules_path.display(),
        addr = %settings.listen_addr,
        "starting authorization service"
    );

    let rule_set = RuleSetBuilder::from_file(&settings.rules_path).build()?;
    let store = Arc::new(RuleStore::new(rule_set));

    #[cfg(unix)]
    tokio::spawn(reload_on_hangup(
        Arc::clone(&store),
        settings.rules_path.clone(),
    ));

    let listener = TcpListener::bind(settings.listen_addr).await?;
    info!(addr = %settings.listen_addr, "authorization service listening");

    axum::serve(listener, web::router(store).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("authorization service shut down gracefully");
    Ok(())
}

#[cfg(unix)]
async fn reload_on_hangup(store: Arc<RuleStore>, path: PathBuf) {
    let mut hangup = match signal::unix::signal(signal::unix::SignalKind::hangup()) {
        Ok(hangup) => hangup,
        Err(e) => {
            warn!(error = %e, "rules reload on SIGHUP is unavailable");
            return;
        }
    };

    while hangup.recv().await.is_some() {
        info!(path = %path.display(), "reloading authorization rules");
        // failure is logged by the store, the old rules stay active
        let _ = store.reload(|| RuleSetBuilder::from_file(&path).build());
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "unable to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C signal"),
        () = terminate => info!("received SIGTERM signal"),
    }
}
