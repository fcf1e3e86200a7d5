// Authentication HTTP routes
// Decision: Single dispatcher entry point at /api/auth/:route; the
//           sub-route is decided exactly once, into a known-route enum
// Decision: Provider failures during callback become an opaque
//           ?error=callback_error redirect - detail stays in the server log

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use toolshelf_core::UserProfile;
use utoipa::ToSchema;

use super::{
    config::AuthConfig,
    oauth::{AuthFlowError, OidcClient},
    session::{self, Session, SessionCodec, SessionError, SESSION_COOKIE, STATE_COOKIE},
};

/// Generate a random state nonce for OAuth (32 hex characters).
fn generate_oauth_state() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 16] = rng.gen();
    hex::encode(bytes)
}

/// The known auth sub-routes. Anything else is the explicit unknown case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRoute {
    Login,
    Logout,
    Callback,
    Me,
}

impl AuthRoute {
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "login" => Some(AuthRoute::Login),
            "logout" => Some(AuthRoute::Logout),
            "callback" => Some(AuthRoute::Callback),
            "me" => Some(AuthRoute::Me),
            _ => None,
        }
    }
}

/// Authentication error rendered as a JSON body with its status code.
#[derive(Debug, Clone, Serialize)]
pub struct AuthError {
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl AuthError {
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Auth state shared across the dispatcher's handlers.
#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AuthConfig>,
    pub oidc: Arc<OidcClient>,
    pub codec: Arc<SessionCodec>,
}

impl AuthState {
    pub fn new(config: AuthConfig) -> Self {
        let oidc = Arc::new(OidcClient::new(&config));
        let codec = Arc::new(SessionCodec::new(&config.session_secret));
        Self {
            config: Arc::new(config),
            oidc,
            codec,
        }
    }
}

/// Query parameters the provider appends to the callback redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Body of a successful `me` response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub user: UserProfile,
}

/// Create auth routes.
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/api/auth/:route", get(dispatch))
        .with_state(state)
}

/// GET /api/auth/:route - the single auth entry point.
pub async fn dispatch(
    State(state): State<AuthState>,
    Path(route): Path<String>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> Response {
    match AuthRoute::from_segment(&route) {
        Some(AuthRoute::Login) => login(&state, jar).into_response(),
        Some(AuthRoute::Logout) => logout(&state, jar).into_response(),
        Some(AuthRoute::Callback) => callback(&state, query, jar).await,
        Some(AuthRoute::Me) => me(&state, &jar).into_response(),
        None => AuthError::not_found("Route not found").into_response(),
    }
}

/// Redirect to the provider's login page, remembering the state nonce in a
/// short-lived cookie for verification at callback.
fn login(state: &AuthState, jar: CookieJar) -> (CookieJar, Redirect) {
    let nonce = generate_oauth_state();
    let authorize_url = state.oidc.authorize_url(&nonce);
    let jar = jar.add(session::state_cookie(nonce, state.config.secure_cookies));
    (jar, Redirect::to(&authorize_url))
}

/// Redirect to the provider's logout page. The session cookie deletion
/// rides on the same response as the redirect, present or not.
fn logout(state: &AuthState, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to(&state.oidc.logout_url()))
}

/// Handle the provider redirect: verify state, exchange the code, fetch the
/// profile, and write the session cookie alongside the home redirect.
async fn callback(state: &AuthState, query: CallbackQuery, jar: CookieJar) -> Response {
    let Some(code) = query.code.as_deref().filter(|c| !c.is_empty()) else {
        return AuthError::bad_request("Missing authorization code").into_response();
    };

    // The nonce cookie is single-use: cleared here whatever the outcome.
    let expected_state = jar.get(STATE_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(Cookie::build(STATE_COOKIE).path("/api/auth"));

    match (expected_state.as_deref(), query.state.as_deref()) {
        (Some(expected), Some(returned)) if expected == returned => {}
        _ => {
            tracing::warn!("state mismatch on auth callback, aborting login");
            return (jar, error_redirect(&state.config)).into_response();
        }
    }

    let tokens = match state.oidc.exchange_code(code).await {
        Ok(tokens) => tokens,
        Err(err) => return flow_failure(&state.config, jar, err),
    };

    let user = match state.oidc.fetch_profile(&tokens.access_token).await {
        Ok(user) => user,
        Err(err) => return flow_failure(&state.config, jar, err),
    };

    let session = Session::new(user, &tokens, Utc::now());
    let value = match state.codec.encode(&session) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "failed to encode session, aborting login");
            return (jar, error_redirect(&state.config)).into_response();
        }
    };

    let jar = jar.add(session::session_cookie(
        value,
        tokens.expires_in,
        state.config.secure_cookies,
    ));
    (jar, Redirect::to(&state.config.app_base_url)).into_response()
}

/// Return the current user from the session cookie.
///
/// Absent, expired, and malformed sessions all collapse to 401: to the
/// caller they are simply "not authenticated".
fn me(state: &AuthState, jar: &CookieJar) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return AuthError::unauthorized("No session found").into_response();
    };

    match state.codec.decode(cookie.value()) {
        Ok(session) => Json(MeResponse { user: session.user }).into_response(),
        Err(SessionError::Expired) => AuthError::unauthorized("Session expired").into_response(),
        Err(_) => AuthError::unauthorized("Invalid session").into_response(),
    }
}

fn error_redirect(config: &AuthConfig) -> Redirect {
    Redirect::to(&format!("{}?error=callback_error", config.app_base_url))
}

fn flow_failure(config: &AuthConfig, jar: CookieJar, err: AuthFlowError) -> Response {
    match &err {
        AuthFlowError::TokenExchange(detail) => {
            tracing::error!(detail = %detail, "token exchange failed, aborting login");
        }
        AuthFlowError::ProfileFetch(detail) => {
            tracing::error!(detail = %detail, "profile fetch failed, aborting login");
        }
    }
    (jar, error_redirect(config)).into_response()
}
