// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;
use server_core::domains::auth::JwtService;
use server_core::kernel::{LocalImageStorage, PgStore, ServerDeps, TwilioAdapter};
use server_core::server::{build_app, AppOptions, AxumAppState, DEFAULT_MAX_UPLOAD_BYTES};
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twilio::{TwilioOptions, TwilioService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting HomeCook API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Create Twilio service
    let twilio_options = TwilioOptions {
        account_sid: config.twilio_account_sid.clone(),
        auth_token: config.twilio_auth_token.clone(),
        service_id: config.twilio_verify_service_sid.clone(),
    };
    let twilio = match &config.twilio_base_url {
        Some(url) => TwilioService::with_base_url(twilio_options, url.clone()),
        None => TwilioService::new(twilio_options),
    };

    let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_issuer.clone())
        .with_ttl(Duration::hours(config.session_ttl_hours));

    let store = Arc::new(PgStore::new(pool.clone()));
    let image_storage = LocalImageStorage::new(
        config.upload_dir.clone(),
        format!("{}/uploads", config.public_base_url.trim_end_matches('/')),
    );

    let deps = ServerDeps::new(
        store.clone(),
        store.clone(),
        store,
        Arc::new(TwilioAdapter::new(Arc::new(twilio))),
        Arc::new(image_storage),
        Arc::new(jwt_service),
    );

    // Build application
    let app = build_app(
        AxumAppState::new(deps, Some(pool.clone())),
        &AppOptions {
            allowed_origins: config.allowed_origins.clone(),
            upload_dir: Some(config.upload_dir.clone()),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        },
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutting down, closing database pool");
    pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
