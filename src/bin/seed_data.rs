//! Seed data script - inserts the zBANK sample accounts
//!
//! Run with: cargo run --bin seed-data
//!
//! Uses the same configuration layers as the server (`config/`, `APP__*`),
//! applies migrations, then creates any sample account that is missing.

use std::sync::Arc;
use tracing::info;

use zbank_api::{auth::PinHasher, config, db, seed, services::AccountService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load_config()?;
    config::init_tracing(app_config.log_level(), app_config.log_json);

    info!("=== zBANK Seed Data ===");

    let pool = db::establish_connection_from_app_config(&app_config).await?;
    db::run_migrations(&pool).await?;

    let hasher = PinHasher::new(app_config.pin_hash_config())?;
    let service = AccountService::new(Arc::new(pool), hasher);

    let created = seed::seed_sample_accounts(&service).await?;

    info!("Created {} sample accounts", created);
    info!("Try these API calls:");
    info!("  curl http://{}:{}/api/v1/accounts", app_config.host, app_config.port);
    info!(
        "  curl http://{}:{}/api/v1/accounts/1234567890/balance",
        app_config.host, app_config.port
    );

    Ok(())
}
