use anyhow::Context as _;
use sea_orm::{ConnectOptions, Database};
use tracing::info;

use academy_core::tracing::init_tracing;
use academy_users::config::UsersConfig;
use academy_users::router::build_router;
use academy_users::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = UsersConfig::from_env()?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.database_max_connections)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("failed to connect to database")?;

    let state = AppState { db };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.users_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("users service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
