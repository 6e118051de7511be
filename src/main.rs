//! Application entry point.

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use xrpl_ledger_relay::api::{RateLimitConfig, create_router, create_router_with_rate_limit};
use xrpl_ledger_relay::app::AppState;
use xrpl_ledger_relay::config::LedgerConfig;
use xrpl_ledger_relay::domain::FaucetClient;
use xrpl_ledger_relay::infra::{HttpFaucetClient, JsonRpcGateway, NoFaucet, PostgresStore};

/// Process-level configuration not owned by [`LedgerConfig`].
struct ServerConfig {
    database_url: String,
    host: String,
    port: u16,
    enable_rate_limiting: bool,
    rate_limit_config: RateLimitConfig,
}

impl ServerConfig {
    fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let enable_rate_limiting = env::var("ENABLE_RATE_LIMITING")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let rate_limit_config = RateLimitConfig::from_env();

        Ok(Self {
            database_url,
            host,
            port,
            enable_rate_limiting,
            rate_limit_config,
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,sqlx=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    info!("🏗️  XRPL Ledger Relay v{}", env!("CARGO_PKG_VERSION"));

    let server_config = ServerConfig::from_env()?;
    let ledger_config = LedgerConfig::from_env()?;
    info!(
        "🌐 Network: {} ({})",
        ledger_config.network, ledger_config.json_rpc_url
    );

    info!("📦 Initializing infrastructure...");

    let store = PostgresStore::with_defaults(&server_config.database_url).await?;
    store.run_migrations().await?;
    info!("   ✓ Database connected and migrations applied");

    let gateway = JsonRpcGateway::new(&ledger_config)?;
    info!("   ✓ JSON-RPC gateway created");

    let faucet: Arc<dyn FaucetClient> = match ledger_config.faucet_url.as_deref() {
        Some(url) => {
            info!("   ✓ Faucet client created ({})", url);
            Arc::new(HttpFaucetClient::new(url, ledger_config.http_timeout)?)
        }
        None => {
            info!("   ○ No faucet on this network (account creation disabled)");
            Arc::new(NoFaucet)
        }
    };

    let app_state = Arc::new(AppState::new(
        Arc::new(gateway),
        faucet,
        Arc::new(store),
        ledger_config,
    ));

    let router = if server_config.enable_rate_limiting {
        info!("   ✓ Rate limiting enabled");
        create_router_with_rate_limit(app_state, server_config.rate_limit_config)
    } else {
        info!("   ○ Rate limiting disabled");
        create_router(app_state)
    };

    let addr = format!("{}:{}", server_config.host, server_config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🚀 Server starting on http://{}", addr);
    info!("📖 Swagger UI available at http://{}/swagger-ui", addr);
    info!("📄 OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
