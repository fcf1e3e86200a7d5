// OpenGraph metadata fetch - proxies the hosted OpenGraph API so the
// dashboard can enrich tool cards without exposing the API key.
// Decision: Upstream failures come back as {success:false, error}, never
//           as an unstructured 500

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use toolshelf_core::{ErrorResponse, OpenGraphData, OpenGraphRequest, OpenGraphResponse};
use url::Url;

use crate::config::OpenGraphConfig;

/// App state for the metadata fetch route.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OpenGraphService>,
}

impl AppState {
    pub fn new(config: &OpenGraphConfig) -> Self {
        Self {
            service: Arc::new(OpenGraphService::new(config)),
        }
    }
}

/// Create the metadata fetch routes.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/opengraph",
            post(fetch_opengraph).get(method_guidance),
        )
        .with_state(state)
}

/// Client for the OpenGraph metadata API.
pub struct OpenGraphService {
    http: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
}

impl OpenGraphService {
    pub fn new(config: &OpenGraphConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Fetch metadata for a validated URL.
    pub async fn fetch(&self, target: &Url) -> OpenGraphResponse {
        let Some(api_key) = &self.api_key else {
            return OpenGraphResponse::failed("OpenGraph API key not configured");
        };

        let encoded: String =
            url::form_urlencoded::byte_serialize(target.as_str().as_bytes()).collect();
        let api_url = format!("{}/site/{}?app_id={}", self.api_base, encoded, api_key);

        let response = match self
            .http
            .get(&api_url)
            .header("Accept", "application/json")
            .header("User-Agent", "Toolshelf/1.0")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, url = %target, "opengraph request failed");
                return OpenGraphResponse::failed(err.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, url = %target, "opengraph api error");
            return OpenGraphResponse::failed(format!("OpenGraph API error: {status}"));
        }

        let payload: serde_json::Value = match response.json().await {
            Ok(payload) => payload,
            Err(err) => return OpenGraphResponse::failed(err.to_string()),
        };

        // The API nests results under hybridGraph/openGraph depending on
        // what it could extract
        let graph = payload
            .get("hybridGraph")
            .or_else(|| payload.get("openGraph"))
            .unwrap_or(&payload);

        OpenGraphResponse::ok(OpenGraphData {
            title: string_field(graph, &["title", "og_title"]),
            description: string_field(graph, &["description", "og_description"]),
            image: string_field(graph, &["image", "og_image"]),
            site_name: string_field(graph, &["site_name", "og_site_name"]),
            url: string_field(graph, &["url"]).or_else(|| Some(target.to_string())),
            kind: string_field(graph, &["type", "og_type"]),
            favicon_url: favicon_url(target),
        })
    }
}

fn string_field(value: &serde_json::Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| value.get(key))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Favicon via DuckDuckGo's icon service (supports .ico, .png, .svg).
fn favicon_url(target: &Url) -> Option<String> {
    target
        .host_str()
        .map(|host| format!("https://icons.duckduckgo.com/ip3/{host}.ico"))
}

/// POST /v1/opengraph - Fetch page metadata for a tool URL
#[utoipa::path(
    post,
    path = "/v1/opengraph",
    request_body = OpenGraphRequest,
    responses(
        (status = 200, description = "Fetch outcome (success flag carries upstream failures)", body = OpenGraphResponse),
        (status = 400, description = "Missing or invalid URL", body = OpenGraphResponse)
    ),
    tag = "opengraph"
)]
pub async fn fetch_opengraph(
    State(state): State<AppState>,
    Json(req): Json<OpenGraphRequest>,
) -> (StatusCode, Json<OpenGraphResponse>) {
    if req.url.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(OpenGraphResponse::failed("URL is required")),
        );
    }

    let target = match Url::parse(req.url.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(OpenGraphResponse::failed("Invalid URL format")),
            )
        }
    };

    (StatusCode::OK, Json(state.service.fetch(&target).await))
}

async fn method_guidance() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new(
            "Method not allowed. Use POST with URL in body.",
        )),
    )
}
