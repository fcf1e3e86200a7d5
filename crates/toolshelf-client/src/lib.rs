// Client session store for Toolshelf front-ends
//
// A `SessionStore` asks the server's `me` endpoint who is logged in -
// exactly once. The outcome is cached for the lifetime of the store:
// there is no retry, re-check, or background refresh. A new page load
// constructs a new store and starts over at `Loading`.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::OnceCell;
use toolshelf_core::UserProfile;

/// Failure to determine the session state.
///
/// A 401 from `me` is NOT an error - it is the normal unauthenticated
/// outcome. These variants cover everything else: transport failures,
/// unexpected statuses, and bodies that do not parse.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    UnexpectedStatus(u16),
}

/// Resolved authentication state.
#[derive(Debug)]
pub enum SessionState {
    Authenticated(UserProfile),
    Unauthenticated,
    Errored(SessionStoreError),
}

/// Snapshot handed to consumers for gating protected views:
/// a loading indicator while `is_loading`, an error panel (with a retry
/// link to `login`) when `error` is set, a login prompt when `user` is
/// absent, the protected content when it is present.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub user: Option<UserProfile>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: UserProfile,
}

/// Request-scoped cache over the server's `me` endpoint.
pub struct SessionStore {
    http: reqwest::Client,
    base_url: String,
    state: OnceCell<SessionState>,
}

impl SessionStore {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a pre-configured client (e.g. one with a cookie store attached).
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            state: OnceCell::new(),
        }
    }

    /// Resolve the session state, issuing the `me` request on first call
    /// and returning the cached outcome on every call after that.
    pub async fn resolve(&self) -> &SessionState {
        self.state.get_or_init(|| self.fetch_once()).await
    }

    /// Current snapshot without forcing resolution: `is_loading` is true
    /// until [`resolve`](Self::resolve) has completed once.
    pub fn context(&self) -> AuthContext {
        match self.state.get() {
            None => AuthContext {
                user: None,
                is_loading: true,
                error: None,
            },
            Some(SessionState::Authenticated(user)) => AuthContext {
                user: Some(user.clone()),
                is_loading: false,
                error: None,
            },
            Some(SessionState::Unauthenticated) => AuthContext::default(),
            Some(SessionState::Errored(err)) => AuthContext {
                user: None,
                is_loading: false,
                error: Some(err.to_string()),
            },
        }
    }

    /// The authenticated user, resolving the session if needed.
    pub async fn user(&self) -> Option<&UserProfile> {
        match self.resolve().await {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    async fn fetch_once(&self) -> SessionState {
        let url = format!("{}/api/auth/me", self.base_url);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(error = %err, "session check failed to reach the server");
                return SessionState::Errored(err.into());
            }
        };

        match response.status() {
            StatusCode::OK => match response.json::<MeResponse>().await {
                Ok(body) => SessionState::Authenticated(body.user),
                Err(err) => SessionState::Errored(err.into()),
            },
            // not logged in - the expected outcome, not an error
            StatusCode::UNAUTHORIZED => SessionState::Unauthenticated,
            other => SessionState::Errored(SessionStoreError::UnexpectedStatus(other.as_u16())),
        }
    }
}
