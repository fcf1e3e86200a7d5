// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config, read once at startup -
//           handlers receive this struct and never touch the environment

use anyhow::{Context, Result};

/// Complete authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Identity provider base URL (e.g. `https://tenant.auth0.com`).
    pub issuer_url: String,
    /// OAuth client id registered with the provider.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Externally visible base URL of this application; the provider
    /// redirects back to `{app_base_url}/api/auth/callback`.
    pub app_base_url: String,
    /// Secret used to sign the session cookie.
    pub session_secret: String,
    /// Whether cookies carry the `Secure` attribute (TLS deployments).
    pub secure_cookies: bool,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// `AUTH_ISSUER_BASE_URL`, `AUTH_CLIENT_ID`, and `AUTH_CLIENT_SECRET`
    /// are required; the rest have development defaults.
    pub fn from_env() -> Result<Self> {
        let issuer_url = std::env::var("AUTH_ISSUER_BASE_URL")
            .context("AUTH_ISSUER_BASE_URL environment variable required")?;
        let client_id =
            std::env::var("AUTH_CLIENT_ID").context("AUTH_CLIENT_ID environment variable required")?;
        let client_secret = std::env::var("AUTH_CLIENT_SECRET")
            .context("AUTH_CLIENT_SECRET environment variable required")?;

        let app_base_url = std::env::var("APP_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:9000".to_string());
        let app_base_url = app_base_url.trim_end_matches('/').to_string();

        let session_secret = std::env::var("AUTH_SESSION_SECRET").unwrap_or_else(|_| {
            tracing::warn!("AUTH_SESSION_SECRET not set, generating a per-process secret; sessions will not survive a restart");
            use rand::Rng;
            let bytes: [u8; 32] = rand::thread_rng().gen();
            hex::encode(bytes)
        });

        let secure_cookies = std::env::var("AUTH_COOKIE_SECURE")
            .map(|s| s.to_lowercase() == "true" || s == "1")
            .unwrap_or_else(|_| app_base_url.starts_with("https://"));

        Ok(Self {
            issuer_url: normalize_issuer_url(&issuer_url),
            client_id,
            client_secret,
            app_base_url,
            session_secret,
            secure_cookies,
        })
    }

    /// The fixed redirect URI registered with the provider.
    pub fn redirect_uri(&self) -> String {
        format!("{}/api/auth/callback", self.app_base_url)
    }
}

/// Accept either a full URL or a bare tenant domain, with or without a
/// trailing slash.
fn normalize_issuer_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
