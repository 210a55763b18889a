//! Rivalry - compare your competitive-programming profile against a competitor's.
//!
//! # Endpoints
//!
//! - `GET /` - The comparison page
//! - `POST /compare` - Compare two profiles (form submission)
//! - `GET /api/compare` - Compare two profiles (JSON)
//! - `GET /settings` - Remembered profile identifiers
//! - `GET /health` - Health check
//!
//! # Configuration
//!
//! - `RIVALRY_PORT` - listen port (default 3000)
//! - `RIVALRY_DATABASE_URL` - settings database (default `sqlite:rivalry.db?mode=rwc`)
//! - `RIVALRY_PROFILE_API` - profile API base URL
//! - `RIVALRY_CONTEST_API` - contest API base URL

use std::env;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rivalry::api::{AppState, router};
use rivalry::comparison::Rivalry;
use rivalry::data_sources::{ContestClient, ProfileClient};
use rivalry::storage::Storage;

/// Default port if not specified via environment variable.
const DEFAULT_PORT: u16 = 3000;

/// Default database path if not specified via environment variable.
const DEFAULT_DB_PATH: &str = "sqlite:rivalry.db?mode=rwc";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("rivalry=info".parse()?))
        .init();

    let port: u16 = env::var("RIVALRY_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let db_url = env::var("RIVALRY_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

    let profiles = match env::var("RIVALRY_PROFILE_API") {
        Ok(base_url) => ProfileClient::with_base_url(&base_url),
        Err(_) => ProfileClient::new(),
    };
    let contests = match env::var("RIVALRY_CONTEST_API") {
        Ok(base_url) => ContestClient::with_base_url(&base_url),
        Err(_) => ContestClient::new(),
    };

    info!(port, db_url = %db_url, "Starting Rivalry server");

    let storage = Storage::new(&db_url).await?;
    info!("Settings store initialized");

    let state = AppState {
        storage,
        rivalry: Rivalry::new(profiles, contests),
    };
    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Rivalry is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
