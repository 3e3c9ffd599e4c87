use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use gastroplan_api::{router, ApiDoc, AppState};
use gastroplan_core::{constants::DEFAULT_DATA_DIR, CoreConfig, JsonFileRepository};

/// Main entry point for the Gastroplan application.
///
/// Serves the REST API with OpenAPI/Swagger documentation over a
/// file-backed patient repository.
///
/// # Environment Variables
/// - `GASTROPLAN_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `GASTROPLAN_DATA_DIR`: directory for patient data storage
///   (default: "gastroplan_data")
///
/// # Returns
/// * `Ok(())` - if the server starts and runs successfully
/// * `Err(anyhow::Error)` - if startup or the running server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gastroplan=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("GASTROPLAN_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir =
        std::env::var("GASTROPLAN_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());

    tracing::info!("++ Starting Gastroplan REST on {}", rest_addr);
    tracing::info!("++ Patient data directory: {}", data_dir);

    let cfg = Arc::new(CoreConfig::new(PathBuf::from(data_dir)));
    let state = AppState {
        repository: Arc::new(JsonFileRepository::new(cfg)),
    };

    let app = router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
