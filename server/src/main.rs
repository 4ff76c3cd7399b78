mod application;
mod domain;
mod infrastructure;
mod interfaces;
mod presentation;
mod shared;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::application::IdentifyMediaUseCase;
use crate::domain::services::GuessItScanner;
use crate::infrastructure::database::{create_pool, initialize_schema, ConnectionPoolConfig};
use crate::infrastructure::external::{OpenAiClient, TmdbClient};
use crate::infrastructure::persistence::postgres::{
    PgMediaCacheRepository, PgOpenAiUsageRepository, PgRequestLogRepository,
};
use crate::presentation::http::handlers::{health_handlers, identify_handlers};
use crate::presentation::http::middleware::logging_middleware;
use crate::presentation::http::AppState;
use crate::shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let pool = create_pool(&config.postgres, ConnectionPoolConfig::default())
        .await
        .map_err(anyhow::Error::msg)?;
    initialize_schema(&pool).await?;

    // Repositories
    let cache_repository = Arc::new(PgMediaCacheRepository::new(pool.clone()));
    let request_log = Arc::new(PgRequestLogRepository::new(pool.clone()));
    let usage_repository = Arc::new(PgOpenAiUsageRepository::new(pool.clone()));

    // External services
    let tmdb_client =
        Arc::new(TmdbClient::new(&config.tmdb_api_key).map_err(|e| anyhow::anyhow!(e.to_string()))?);
    let openai_client = Arc::new(
        OpenAiClient::new(&config.openai, usage_repository.clone())
            .map_err(|e| anyhow::anyhow!(e.to_string()))?,
    );

    // The identification facade
    let identify_use_case = Arc::new(IdentifyMediaUseCase::new(
        Arc::new(GuessItScanner::new()),
        cache_repository.clone(),
        tmdb_client,
        openai_client,
    ));

    let state = AppState {
        identify_use_case,
        cache_repository,
        request_log,
    };

    let app = Router::new()
        .route("/api/guess", get(identify_handlers::guess_filename))
        .route("/api/media-info", get(identify_handlers::get_media_info))
        .route(
            "/api/media-info/:media_id",
            get(identify_handlers::get_media_info_by_id),
        )
        .route("/api/statistics", get(identify_handlers::get_statistics))
        .route("/api/health", get(health_handlers::health_check))
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.http_host, config.http_port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
