use std::net::SocketAddr;
use tracing::{info, warn};
use crate::catalog::controller::build_router;
use crate::catalog::factory;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_STORE: &str = "json";

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
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
    info!("shutdown signal received");
}

// serve_from_env runs the catalog HTTP API until ctrl-c or SIGTERM, then writes the final snapshot.
pub async fn serve_from_env(branch_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Configuration::from_env(branch_id)?;
    let store: RepositoryStore = std::env::var("CATALOG_STORE")
        .unwrap_or_else(|_| DEFAULT_STORE.to_string()).parse()?;
    let addr: SocketAddr = std::env::var("CATALOG_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string()).parse()?;

    let service = factory::create_catalog_service(&config, store).await?;
    let app = build_router(AppState::new(service.clone()));

    info!(%addr, ?store, max_loans = config.max_loans, loan_days = config.loan_days, "catalog listening");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.flush().await?;
    info!("catalog stopped");
    Ok(())
}
