//! Dilemma Machine server binary.
//!
//! Loads configuration, wires the handlers over the configured store
//! (PostgreSQL when a database URL is set, in-memory otherwise), and
//! serves the game API.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use dilemma_machine::adapters::http::{api_router, GameHandlers};
use dilemma_machine::adapters::postgres::{PostgresChoiceAggregator, PostgresSessionRepository};
use dilemma_machine::adapters::storage::InMemoryGameStore;
use dilemma_machine::application::handlers::choice::RecordChoiceHandler;
use dilemma_machine::application::handlers::session::{
    CompleteSessionHandler, CreateSessionHandler, GetSessionHandler,
};
use dilemma_machine::application::handlers::stats::GetDilemmaStatsHandler;
use dilemma_machine::config::AppConfig;
use dilemma_machine::domain::catalog::DilemmaCatalog;
use dilemma_machine::ports::{ChoiceAggregator, SessionRepository};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.server.log_level)?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalog = load_catalog(&config)?;
    tracing::info!(dilemmas = catalog.len(), "dilemma catalog loaded");

    let (sessions, aggregator) = build_stores(&config).await?;

    let handlers = GameHandlers::new(
        Arc::new(CreateSessionHandler::new(sessions.clone())),
        Arc::new(GetSessionHandler::new(sessions.clone())),
        Arc::new(RecordChoiceHandler::new(
            sessions.clone(),
            aggregator.clone(),
            catalog,
        )),
        Arc::new(CompleteSessionHandler::new(sessions, aggregator.clone())),
        Arc::new(GetDilemmaStatsHandler::new(aggregator)),
    );

    let app = api_router(handlers)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "dilemma machine listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn load_catalog(config: &AppConfig) -> Result<Arc<DilemmaCatalog>, Box<dyn std::error::Error>> {
    match &config.catalog.dilemmas_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(Arc::new(DilemmaCatalog::from_json(&json)?))
        }
        None => Ok(Arc::new(DilemmaCatalog::builtin().clone())),
    }
}

async fn build_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn SessionRepository>, Arc<dyn ChoiceAggregator>), Box<dyn std::error::Error>> {
    match &config.database {
        Some(database) => {
            let pool = PgPoolOptions::new()
                .min_connections(database.min_connections)
                .max_connections(database.max_connections)
                .acquire_timeout(database.acquire_timeout())
                .connect(&database.url)
                .await?;

            if database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("database migrations applied");
            }

            tracing::info!("using PostgreSQL store");
            Ok((
                Arc::new(PostgresSessionRepository::new(pool.clone())),
                Arc::new(PostgresChoiceAggregator::new(pool)),
            ))
        }
        None => {
            tracing::info!("no database configured; using in-memory store");
            let store = InMemoryGameStore::new();
            Ok((Arc::new(store.clone()), Arc::new(store)))
        }
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}
