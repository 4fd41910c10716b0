use fragrance_match_api::{
    api::{create_router, AppState, RouterConfig},
    config::Config,
    services::RecommendationService,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // Initialize application state
    let service = RecommendationService::from_config(&config)?;
    let state = AppState::new(service);

    // Create the router with all routes
    let app = create_router(
        state,
        &RouterConfig {
            cors_origins: config.cors_origins.clone(),
            request_timeout: config.request_timeout(),
        },
    );

    // Start the server
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
