// Tool catalog CRUD HTTP routes - a thin pass-through to the ToolStore.
// Filtering and sorting happen client-side in the dashboard, so the list
// endpoint returns the full catalog.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use toolshelf_core::{CreateToolRequest, ListResponse, Tool, UpdateToolRequest};
use toolshelf_storage::{CreateTool, StorageError, ToolStore, UpdateTool};
use uuid::Uuid;

/// App state for tool routes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ToolStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ToolStore>) -> Self {
        Self { store }
    }
}

/// Create tool routes.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/tools", post(create_tool).get(list_tools))
        .route(
            "/v1/tools/:tool_id",
            get(get_tool).patch(update_tool).delete(delete_tool),
        )
        .with_state(state)
}

fn storage_failure(operation: &str, err: StorageError) -> StatusCode {
    match err {
        StorageError::NotFound => StatusCode::NOT_FOUND,
        err => {
            tracing::error!(error = %err, "failed to {operation} tool");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// POST /v1/tools - Add a tool to the catalog
#[utoipa::path(
    post,
    path = "/v1/tools",
    request_body = CreateToolRequest,
    responses(
        (status = 201, description = "Tool created successfully", body = Tool),
        (status = 500, description = "Internal server error")
    ),
    tag = "tools"
)]
pub async fn create_tool(
    State(state): State<AppState>,
    Json(req): Json<CreateToolRequest>,
) -> Result<(StatusCode, Json<Tool>), StatusCode> {
    let input = CreateTool {
        name: req.name,
        url: req.url,
        category: req.category,
        description: req.description,
        use_cases: req.use_cases,
        pricing_model: req.pricing_model,
        cost_per_month: req.cost_per_month,
        status: req.status,
        created_by: req.created_by,
    };

    let tool = state
        .store
        .insert(input)
        .await
        .map_err(|e| storage_failure("create", e))?;

    Ok((StatusCode::CREATED, Json(tool)))
}

/// GET /v1/tools - List the catalog, newest first
#[utoipa::path(
    get,
    path = "/v1/tools",
    responses(
        (status = 200, description = "List of tools", body = ListResponse<Tool>),
        (status = 500, description = "Internal server error")
    ),
    tag = "tools"
)]
pub async fn list_tools(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Tool>>, StatusCode> {
    let tools = state
        .store
        .list()
        .await
        .map_err(|e| storage_failure("list", e))?;

    Ok(Json(ListResponse::new(tools)))
}

/// GET /v1/tools/{tool_id} - Get tool by ID
#[utoipa::path(
    get,
    path = "/v1/tools/{tool_id}",
    params(
        ("tool_id" = Uuid, Path, description = "Tool ID")
    ),
    responses(
        (status = 200, description = "Tool found", body = Tool),
        (status = 404, description = "Tool not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "tools"
)]
pub async fn get_tool(
    State(state): State<AppState>,
    Path(tool_id): Path<Uuid>,
) -> Result<Json<Tool>, StatusCode> {
    let tool = state
        .store
        .get(tool_id)
        .await
        .map_err(|e| storage_failure("get", e))?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(tool))
}

/// PATCH /v1/tools/{tool_id} - Update tool
#[utoipa::path(
    patch,
    path = "/v1/tools/{tool_id}",
    params(
        ("tool_id" = Uuid, Path, description = "Tool ID")
    ),
    request_body = UpdateToolRequest,
    responses(
        (status = 200, description = "Tool updated successfully", body = Tool),
        (status = 404, description = "Tool not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "tools"
)]
pub async fn update_tool(
    State(state): State<AppState>,
    Path(tool_id): Path<Uuid>,
    Json(req): Json<UpdateToolRequest>,
) -> Result<Json<Tool>, StatusCode> {
    let input = UpdateTool {
        name: req.name,
        url: req.url,
        category: req.category,
        description: req.description,
        use_cases: req.use_cases,
        pricing_model: req.pricing_model,
        cost_per_month: req.cost_per_month,
        status: req.status,
    };

    let tool = state
        .store
        .update(tool_id, input)
        .await
        .map_err(|e| storage_failure("update", e))?;

    Ok(Json(tool))
}

/// DELETE /v1/tools/{tool_id} - Remove tool from the catalog
#[utoipa::path(
    delete,
    path = "/v1/tools/{tool_id}",
    params(
        ("tool_id" = Uuid, Path, description = "Tool ID")
    ),
    responses(
        (status = 204, description = "Tool deleted"),
        (status = 404, description = "Tool not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "tools"
)]
pub async fn delete_tool(
    State(state): State<AppState>,
    Path(tool_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    state
        .store
        .delete(tool_id)
        .await
        .map_err(|e| storage_failure("delete", e))?;

    Ok(StatusCode::NO_CONTENT)
}
