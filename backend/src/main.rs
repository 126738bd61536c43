use std::net::SocketAddr;

use allowance_approval_backend::{create_router, initialize_backend};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let data_directory =
        std::env::var("ALLOWANCE_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    info!("Using data directory {}", data_directory);

    let app_state = initialize_backend(data_directory)?;
    let app = create_router(app_state);

    let addr: SocketAddr = std::env::var("ALLOWANCE_LISTEN_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
