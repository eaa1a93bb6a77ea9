mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod store;

use std::sync::Arc;

use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{config::Config, store::FilmStore};

pub struct AppState {
    pub films: FilmStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,films=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url, config.db_max_connections).await?;
    let state = Arc::new(AppState { films: FilmStore::new(db) });

    let app = routes::router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, static_dir = %config.static_dir.display(), "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
