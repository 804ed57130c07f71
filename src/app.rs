use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    api, auth,
    config::AppConfig,
    middleware::assign_trace_id,
    repo,
    similarity::SimilarityEngine,
    store::{LiteratureStore, PgLiteratureStore},
    util::page::PageFetcher,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LiteratureStore>,
    pub engine: SimilarityEngine,
    pub fetcher: PageFetcher,
}

impl AppState {
    pub fn new(store: Arc<dyn LiteratureStore>, fetcher: PageFetcher) -> Self {
        Self {
            store,
            engine: SimilarityEngine::new(),
            fetcher,
        }
    }
}

/// Connects to Postgres, ensures the schema and builds the router.
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.db.url)
        .await
        .context("failed to connect to database")?;

    repo::migrations::ensure_schema(&pool).await?;

    let fetcher = PageFetcher::new(&config.http_client, &config.plagiarism)?;
    let state = AppState::new(Arc::new(PgLiteratureStore::new(pool)), fetcher);

    Ok(build_router(state))
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let layers = ServiceBuilder::new()
        .layer(middleware::from_fn(assign_trace_id))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let plagiarism_api = Router::new()
        .route(
            "/check_similarity",
            post(api::plagiarism::check_similarity),
        )
        .route(
            "/check_literature",
            post(api::plagiarism::check_literature),
        )
        .route("/check_url", post(api::plagiarism::check_url))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_user,
        ))
        .with_state(state.clone());

    Router::new()
        .route("/healthz", get(api::health::health_check))
        .nest("/api/plagiarism", plagiarism_api)
        .layer(layers)
        .with_state(state)
}
