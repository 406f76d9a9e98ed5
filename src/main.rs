//! SpeakWell API server.

use std::error::Error;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use speakwell::adapters::ai::{GeminiConfig, GeminiProvider};
use speakwell::adapters::http::{progress_routes, ProgressAppState};
use speakwell::adapters::postgres::PostgresAssessmentReader;
use speakwell::adapters::progress::LlmProgressNarrator;
use speakwell::config::{AppConfig, ServerConfig};
use speakwell::ports::{AIProvider, ProgressNarrator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Starting SpeakWell"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let ai_provider: Option<Arc<dyn AIProvider>> = match config.ai.gemini_api_key() {
        Some(key) => {
            let gemini = GeminiConfig::new(key)
                .with_model(config.ai.model.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout())
                .with_max_retries(config.ai.max_retries);
            Some(Arc::new(GeminiProvider::new(gemini)?))
        }
        None => {
            tracing::warn!("No Gemini API key configured; narrative analysis and titles disabled");
            None
        }
    };

    let narrator: Option<Arc<dyn ProgressNarrator>> = match &ai_provider {
        Some(provider) if config.narrative_available() => {
            Some(Arc::new(LlmProgressNarrator::new(provider.clone())))
        }
        _ => None,
    };

    let state = ProgressAppState {
        assessment_reader: Arc::new(PostgresAssessmentReader::new(pool)),
        narrator,
        ai_provider,
        narrative_deadline: config.analytics.narrative_deadline(),
        min_sessions_for_analytics: config.analytics.min_sessions_for_analytics,
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(progress_routes(state))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over config.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if origins.is_empty() && !server.is_production() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
