use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;

use todo_web::config::ServerConfig;
use todo_web::store::{LibSqlStore, TodoStore};
use todo_web::todos::routes::{TodoRouteState, todo_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env();

    eprintln!("📋 Todo Web v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", config.db_path.display());
    eprintln!("   Listening: http://0.0.0.0:{}/todo\n", config.port);

    let store: Arc<dyn TodoStore> = Arc::new(
        LibSqlStore::new_local(&config.db_path)
            .await
            .with_context(|| {
                format!("failed to open database at {}", config.db_path.display())
            })?,
    );

    let app = todo_routes(TodoRouteState { store }).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, "Todo server started");

    axum::serve(listener, app).await?;

    Ok(())
}
