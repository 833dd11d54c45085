use std::sync::Arc;

use patient_api::store::FileStore;
use patient_api::{router, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let state = AppState {
        store: Arc::new(FileStore::new(&config.db_path)),
    };

    let app = router(state);

    // Run the server
    let listener = tokio::net::TcpListener::bind(config.listen_addr.as_str()).await?;
    tracing::info!("Patient API running on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
