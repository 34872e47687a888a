//! EOR Quote Engine server.
//!
//! Reads process settings from the environment (a `.env` file is honoured):
//!
//! | Variable | Default |
//! |---|---|
//! | `EOR_HOST` | `127.0.0.1` |
//! | `EOR_PORT` | `8080` |
//! | `EOR_DATA_DIR` | `./data/providers` |
//! | `EOR_SETTINGS` | unset (built-in defaults) |
//! | `EOR_LOG_LEVEL` | `info` |

use std::env;
use std::sync::Arc;

use eor_quote_engine::api::{AppState, create_router};
use eor_quote_engine::config::{DirectoryRateSource, SettingsLoader};
use eor_quote_engine::engine::QuoteEngine;
use eor_quote_engine::telemetry;
use tracing::info;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    telemetry::init(&env_or("EOR_LOG_LEVEL", "info"))?;

    let settings = SettingsLoader::load(env::var("EOR_SETTINGS").ok())?;
    let data_dir = env_or("EOR_DATA_DIR", "./data/providers");
    let engine = QuoteEngine::new(Arc::new(DirectoryRateSource::new(&data_dir)), settings);
    let summary = engine.rate_summary();

    let addr = format!(
        "{}:{}",
        env_or("EOR_HOST", "127.0.0.1"),
        env_or("EOR_PORT", "8080")
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        addr = %addr,
        data_dir = %data_dir,
        degraded = summary.degraded,
        "EOR quote engine listening"
    );
    axum::serve(listener, create_router(AppState::new(engine))).await?;
    Ok(())
}
