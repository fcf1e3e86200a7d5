// Toolshelf API server library
// Decision: Router assembly lives here so integration tests can drive the
//           complete app through tower without a network listener

pub mod auth;
pub mod config;
pub mod opengraph;
pub mod tools;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use toolshelf_core::*;
use toolshelf_storage::{MemoryToolStore, PostgrestToolStore, ToolStore};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage_backend: String,
}

/// State for the health endpoint.
#[derive(Clone)]
struct HealthState {
    storage_backend: String,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage_backend: state.storage_backend.clone(),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        tools::create_tool,
        tools::list_tools,
        tools::get_tool,
        tools::update_tool,
        tools::delete_tool,
        opengraph::fetch_opengraph,
    ),
    components(
        schemas(
            Tool, ToolStatus, PricingModel,
            CreateToolRequest, UpdateToolRequest,
            ListResponse<Tool>,
            OpenGraphRequest, OpenGraphResponse, OpenGraphData,
            ErrorResponse,
        )
    ),
    tags(
        (name = "tools", description = "Tool catalog endpoints"),
        (name = "opengraph", description = "Page metadata fetch endpoints")
    ),
    info(
        title = "Toolshelf API",
        description = "Backend for the AI Software Library dashboard",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

/// Pick the tool store once at startup: the hosted backend when configured,
/// the seeded in-memory catalog otherwise.
pub fn select_store(config: &config::StorageConfig) -> Arc<dyn ToolStore> {
    match config.credentials() {
        Some((url, key)) => {
            tracing::info!(url = %url, "Using hosted PostgREST tool store");
            Arc::new(PostgrestToolStore::new(url, key))
        }
        None => {
            tracing::info!("No hosted backend configured, using in-memory sample catalog");
            Arc::new(MemoryToolStore::with_sample_catalog())
        }
    }
}

/// Assemble the complete application router.
pub fn build_router(config: &config::AppConfig, store: Arc<dyn ToolStore>) -> Router {
    let auth_state = auth::AuthState::new(config.auth.clone());
    let health_state = HealthState {
        storage_backend: if config.storage.credentials().is_some() {
            "postgrest".to_string()
        } else {
            "memory".to_string()
        },
    };

    let app = Router::new()
        .route("/health", get(health).with_state(health_state))
        .merge(auth::routes(auth_state))
        .merge(tools::routes(tools::AppState::new(store)))
        .merge(opengraph::routes(opengraph::AppState::new(
            &config.opengraph,
        )))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // CORS only when the dashboard is served from a different origin
    let cors_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let app = if !cors_origins.is_empty() {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                .allow_credentials(true),
        )
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http())
}
