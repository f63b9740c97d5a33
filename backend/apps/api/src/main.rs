//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; application-level
//! errors use `kernel::error::AppError`.

use account::{
    AccountConfig, LocalDiskStore, PgAccountRepository, SmtpConfig, SmtpMailer, account_router,
};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,account=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let config = account_config_from_env()?;

    let repo = PgAccountRepository::new(pool.clone());
    let mailer = SmtpMailer::new(smtp_config_from_env())
        .map_err(|e| anyhow::anyhow!("Failed to build SMTP transport: {e}"))?;
    let store = LocalDiskStore::new(
        env::var("STORAGE_ROOT").unwrap_or_else(|_| "storage/public".to_string()),
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api", account_router(repo, mailer, store, config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("APP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the account configuration from environment variables.
///
/// `APP_KEY` must be 32 base64-encoded bytes in production; debug builds
/// fall back to a random key so links only survive one process lifetime.
fn account_config_from_env() -> anyhow::Result<AccountConfig> {
    let mut config = match env::var("APP_KEY") {
        Ok(key_b64) => {
            let key_bytes = general_purpose::STANDARD.decode(&key_b64)?;
            let mut app_key = [0u8; 32];
            if key_bytes.len() != app_key.len() {
                anyhow::bail!("APP_KEY must decode to exactly 32 bytes");
            }
            app_key.copy_from_slice(&key_bytes);
            AccountConfig {
                app_key,
                ..AccountConfig::default()
            }
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("APP_KEY not set; using a random key for this process");
            AccountConfig::development()
        }
        Err(_) => anyhow::bail!("APP_KEY must be set in production"),
    };

    if let Ok(app_url) = env::var("APP_URL") {
        config.app_url = app_url.trim_end_matches('/').to_string();
    }

    if let Ok(pepper) = env::var("PASSWORD_PEPPER") {
        config.password_pepper = Some(pepper.into_bytes());
    }

    Ok(config)
}

/// Build SMTP settings from environment variables
fn smtp_config_from_env() -> SmtpConfig {
    let defaults = SmtpConfig::default();

    SmtpConfig {
        host: env::var("MAIL_HOST").unwrap_or(defaults.host),
        port: env::var("MAIL_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port),
        username: env::var("MAIL_USERNAME").ok(),
        password: env::var("MAIL_PASSWORD").ok(),
        use_tls: env::var("MAIL_ENCRYPTION")
            .map(|v| v.eq_ignore_ascii_case("tls"))
            .unwrap_or(false),
        from: env::var("MAIL_FROM").unwrap_or(defaults.from),
    }
}
