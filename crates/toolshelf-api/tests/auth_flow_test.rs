// Integration test for the complete login flow:
// login -> provider redirect -> callback -> me -> logout -> me (401).
// The identity provider is a wiremock double; cookies are threaded by hand
// the way a browser would.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use toolshelf_api::auth::AuthConfig;
use toolshelf_api::config::{AppConfig, OpenGraphConfig, StorageConfig};
use toolshelf_api::{build_router, select_store};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_app(issuer: &str) -> axum::Router {
    let config = AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        cors_origins: vec![],
        auth: AuthConfig {
            issuer_url: issuer.trim_end_matches('/').to_string(),
            client_id: "client-123".to_string(),
            client_secret: "shhh".to_string(),
            app_base_url: "http://localhost:3000".to_string(),
            session_secret: "integration-test-secret".to_string(),
            secure_cookies: false,
        },
        storage: StorageConfig::default(),
        opengraph: OpenGraphConfig::default(),
    };
    let store = select_store(&config.storage);
    build_router(&config, store)
}

fn cookie_pair(set_cookie: &str) -> (String, String) {
    let pair = set_cookie.split(';').next().unwrap();
    let (name, value) = pair.split_once('=').unwrap();
    (name.to_string(), value.to_string())
}

fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_full_login_flow() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=test-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "at-123",
            "id_token": "it-456",
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(&provider)
        .await;
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "picture": "https://example.com/ada.png",
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let app = test_app(&provider.uri());

    // Step 1: login redirects to the provider and plants the state cookie
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    let authorize_url = url::Url::parse(
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap(),
    )
    .unwrap();
    let state_param = authorize_url
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.to_string())
        .expect("state in authorize URL");

    let state_cookie = set_cookies(&response)
        .into_iter()
        .find(|c| c.starts_with("authState="))
        .expect("state cookie set");
    let (_, state_value) = cookie_pair(&state_cookie);
    assert_eq!(state_value, state_param);

    // Step 2: the provider redirects back with a code; callback trades it
    // for a session cookie
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/api/auth/callback?code=test-code&state={state_param}"
                ))
                .header(header::COOKIE, format!("authState={state_value}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "http://localhost:3000"
    );

    let session_cookie = set_cookies(&response)
        .into_iter()
        .find(|c| c.starts_with("appSession=") && !c.starts_with("appSession=;"))
        .expect("session cookie set");
    let (_, session_value) = cookie_pair(&session_cookie);

    // Step 3: me resolves the user from the cookie alone
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, format!("appSession={session_value}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["name"], "Ada Lovelace");

    // Step 4: logout deletes the cookie on the same response as its redirect
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/logout")
                .header(header::COOKIE, format!("appSession={session_value}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("appSession=;")));

    // Step 5: without the cookie the browser is simply unauthenticated
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_memory_fallback_serves_sample_catalog() {
    let app = test_app("https://tenant.auth0.com");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/tools")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage_backend"], "memory");
}
