use std::sync::Arc;
use storefront::config::ShopConfig;
use storefront::router::create_app_router;
use storefront::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ShopConfig::from_env()?;
    tracing::info!(
        api_url = %config.api_url,
        data_dir = ?config.data_dir,
        "starting storefront"
    );

    // Initialize application state
    let state = Arc::new(AppState::from_config(&config)?);

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Log filtering follows `RUST_LOG`, defaulting to info with debug output
/// for this crate.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
