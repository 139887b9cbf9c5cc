use std::sync::Arc;

use anyhow::Result;
use payment_service::config::config_loader;
use payment_service::infrastructure::{
    axum_http::http_serve, observability, observability::metrics::Metrics,
    postgres::postgres_connection,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Payment service exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability()?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(&dotenvy_env.database.url)?;
    info!("Postgres connection has been established");

    let metrics = Metrics::new()?;

    http_serve::start(
        Arc::new(dotenvy_env),
        Arc::new(postgres_pool),
        Arc::new(metrics),
    )
    .await?;

    Ok(())
}
