use logins_api::config::Config;
use logins_api::db::LoginsStorage;
use logins_api::router::{LoginsState, logins_router};
use logins_api::service::gateway::CredentialGateway;
use mimalloc::MiMalloc;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        db_max_connections = cfg.db_max_connections,
        store_timeout_ms = cfg.store_timeout_ms,
        loglevel = %cfg.loglevel,
    );

    let storage = LoginsStorage::connect(&cfg.database_url, cfg.db_max_connections).await?;
    storage.init_schema().await?;
    warn!("credentials are stored and compared in plaintext");

    // One pool for the life of the process, shared by every request.
    let gateway = CredentialGateway::new(Arc::new(storage.clone()), cfg.store_timeout());
    let app = logins_router(LoginsState::new(gateway), cfg.body_limit_bytes);

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("API running on port {}", cfg.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    storage.pool().close().await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
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
