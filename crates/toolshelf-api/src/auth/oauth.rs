// OIDC client for the identity provider
// Decision: Manual OAuth2 implementation to avoid http crate version conflicts
// Decision: Typed failure kinds so the dispatcher can pattern-match instead
//           of stringifying exceptions

use serde::Deserialize;
use thiserror::Error;
use toolshelf_core::UserProfile;

use super::config::AuthConfig;

/// Failure of a provider round trip during the callback flow.
///
/// Both kinds are fatal to the in-flight login: authorization codes are
/// single-use, so nothing here is retried.
#[derive(Debug, Error)]
pub enum AuthFlowError {
    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("profile fetch failed: {0}")]
    ProfileFetch(String),
}

/// Tokens returned by the provider's token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default)]
    pub id_token: String,
    pub expires_in: i64,
}

/// Client for the provider's authorize / token / userinfo / logout surface.
pub struct OidcClient {
    http: reqwest::Client,
    issuer_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    app_base_url: String,
}

impl OidcClient {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            issuer_url: config.issuer_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri(),
            app_base_url: config.app_base_url.clone(),
        }
    }

    /// Authorization URL the browser is redirected to at `login`.
    pub fn authorize_url(&self, state: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", "openid profile email")
            .append_pair("state", state)
            .finish();
        format!("{}/authorize?{}", self.issuer_url, query)
    }

    /// Provider logout URL with the post-logout return address.
    pub fn logout_url(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("returnTo", &self.app_base_url)
            .finish();
        format!("{}/v2/logout?{}", self.issuer_url, query)
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenSet, AuthFlowError> {
        let response = self
            .http
            .post(format!("{}/oauth/token", self.issuer_url))
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthFlowError::TokenExchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthFlowError::TokenExchange(format!(
                "token endpoint returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AuthFlowError::TokenExchange(format!("invalid token response: {e}")))
    }

    /// Fetch the authenticated user's profile with a bearer token.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, AuthFlowError> {
        let response = self
            .http
            .get(format!("{}/userinfo", self.issuer_url))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthFlowError::ProfileFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthFlowError::ProfileFetch(format!(
                "userinfo endpoint returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AuthFlowError::ProfileFetch(format!("invalid userinfo response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(issuer: &str) -> AuthConfig {
        AuthConfig {
            issuer_url: issuer.trim_end_matches('/').to_string(),
            client_id: "client-123".to_string(),
            client_secret: "shhh".to_string(),
            app_base_url: "http://localhost:3000".to_string(),
            session_secret: "session-secret".to_string(),
            secure_cookies: false,
        }
    }

    #[test]
    fn test_authorize_url_shape() {
        let client = OidcClient::new(&test_config("https://tenant.auth0.com"));
        let url = client.authorize_url("nonce-1");

        assert!(url.starts_with("https://tenant.auth0.com/authorize?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fauth%2Fcallback"));
        assert!(url.contains("scope=openid+profile+email"));
        assert!(url.contains("state=nonce-1"));
    }

    #[test]
    fn test_logout_url_shape() {
        let client = OidcClient::new(&test_config("https://tenant.auth0.com"));
        let url = client.logout_url();

        assert!(url.starts_with("https://tenant.auth0.com/v2/logout?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("returnTo=http%3A%2F%2Flocalhost%3A3000"));
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "at-123",
                "id_token": "it-456",
                "token_type": "Bearer",
                "expires_in": 3600,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OidcClient::new(&test_config(&server.uri()));
        let tokens = client.exchange_code("abc").await.unwrap();
        assert_eq!(tokens.access_token, "at-123");
        assert_eq!(tokens.id_token, "it-456");
        assert_eq!(tokens.expires_in, 3600);
    }

    #[tokio::test]
    async fn test_exchange_code_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": "invalid_grant",
            })))
            .mount(&server)
            .await;

        let client = OidcClient::new(&test_config(&server.uri()));
        let err = client.exchange_code("used-code").await.unwrap_err();
        assert!(matches!(err, AuthFlowError::TokenExchange(_)));
    }

    #[tokio::test]
    async fn test_fetch_profile_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header("authorization", "Bearer at-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "picture": "https://example.com/ada.png",
                "sub": "auth0|123",
            })))
            .mount(&server)
            .await;

        let client = OidcClient::new(&test_config(&server.uri()));
        let profile = client.fetch_profile("at-123").await.unwrap();
        assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
        assert!(profile.extra.contains_key("sub"));
    }

    #[tokio::test]
    async fn test_fetch_profile_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = OidcClient::new(&test_config(&server.uri()));
        let err = client.fetch_profile("stale-token").await.unwrap_err();
        assert!(matches!(err, AuthFlowError::ProfileFetch(_)));
    }
}
