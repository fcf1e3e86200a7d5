// Toolshelf API server
// Decision: Stateless with respect to sessions - restarts never log
//           anyone out as long as AUTH_SESSION_SECRET is set

use anyhow::{Context, Result};
use toolshelf_api::config::AppConfig;
use toolshelf_api::{build_router, select_store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolshelf_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("toolshelf-api starting...");

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        issuer = %config.auth.issuer_url,
        app_base_url = %config.auth.app_base_url,
        secure_cookies = config.auth.secure_cookies,
        "Authentication configured"
    );

    let store = select_store(&config.storage);
    let app = build_router(&config, store);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
