use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState, Views};
use orchard_core::{CoreConfig, MySqlContentStore};

/// Main entry point for Orchard Lite
///
/// Resolves configuration once, compiles the page templates, and serves the HTTP front end.
///
/// # Environment Variables
/// - `ORCHARD_ADDR`: HTTP listen address (default: "0.0.0.0:8080")
/// - `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD`: database target
///   (defaults: localhost, 3306, OrchardLiteDB, root, password)
/// - `ORCHARD_PHASE`, `ORCHARD_DEPLOYMENT_TYPE`, `ORCHARD_DATABASE_TYPE`: health labels
/// - `RUST_LOG`: tracing filter
///
/// # Errors
/// Returns an error if:
/// - the logging configuration cannot be initialised,
/// - `DB_PORT` is not a valid port,
/// - a page template fails to parse,
/// - the listen address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("orchard_lite_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("orchard_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("ORCHARD_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let cfg = Arc::new(CoreConfig::from_env()?);
    tracing::info!("++ Database target {}", cfg.db().descriptor());

    let store = MySqlContentStore::new(cfg.db());
    let app = router(AppState::new(cfg, store, Views::new()?));

    tracing::info!("++ Starting Orchard Lite on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
