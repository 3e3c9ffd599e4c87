//! Standalone REST API server binary.
//!
//! Runs the REST API on its own, without the root `gastroplan-run` wrapper.
//! Useful for development and debugging.

use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use gastroplan_api::{router, ApiDoc, AppState};
use gastroplan_core::{constants::DEFAULT_DATA_DIR, CoreConfig, JsonFileRepository};

/// Main entry point for the standalone Gastroplan REST API server.
///
/// # Environment Variables
/// - `GASTROPLAN_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `GASTROPLAN_DATA_DIR`: directory for patient data (default: "gastroplan_data")
///
/// # Errors
/// Returns an error if the logging configuration cannot be initialised, the
/// address cannot be bound, or the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gastroplan_api=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("GASTROPLAN_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir = std::env::var("GASTROPLAN_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());

    tracing::info!("-- Starting Gastroplan REST API on {}", addr);

    let cfg = Arc::new(CoreConfig::new(PathBuf::from(data_dir)));
    let state = AppState {
        repository: Arc::new(JsonFileRepository::new(cfg)),
    };

    let app = router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
