//! Camp signups server: loads config from the environment, bootstraps the schema and serves the API.

use camp_signups::{app, open, seed_demo_data, AppConfig, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("camp_signups=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = open(&config).await?;
    if config.seed_demo_data {
        seed_demo_data(&pool).await?;
    }

    let router = app(AppState::new(pool), config.body_limit_bytes);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
