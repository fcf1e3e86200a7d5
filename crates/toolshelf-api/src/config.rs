// Application configuration
// Decision: Everything is read from the environment exactly once at
//           startup; request handlers only ever see these structs

use anyhow::Result;

use crate::auth::AuthConfig;

/// Hosted tool catalog backend (PostgREST). Unconfigured means the
/// in-memory sample catalog is used instead.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            url: non_empty(std::env::var("SUPABASE_URL").ok()),
            api_key: non_empty(std::env::var("SUPABASE_ANON_KEY").ok()),
        }
    }

    /// Both pieces present, or nothing.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.url.as_deref(), self.api_key.as_deref()) {
            (Some(url), Some(key)) => Some((url, key)),
            _ => None,
        }
    }
}

/// OpenGraph metadata API access.
#[derive(Debug, Clone)]
pub struct OpenGraphConfig {
    pub api_key: Option<String>,
    pub api_base: String,
}

const DEFAULT_OPENGRAPH_API: &str = "https://opengraph.io/api/1.1";

impl Default for OpenGraphConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_OPENGRAPH_API.to_string(),
        }
    }
}

impl OpenGraphConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty(std::env::var("OPENGRAPH_API_KEY").ok()),
            api_base: std::env::var("OPENGRAPH_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENGRAPH_API.to_string()),
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Origins allowed to call the API with credentials. Empty means
    /// same-origin only (no CORS layer).
    pub cors_origins: Vec<String>,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub opengraph: OpenGraphConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:9000".to_string());

        let cors_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|s| parse_origins(&s))
            .unwrap_or_default();

        Ok(Self {
            bind_addr,
            cors_origins,
            auth: AuthConfig::from_env()?,
            storage: StorageConfig::from_env(),
            opengraph: OpenGraphConfig::from_env(),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_credentials_require_both_pieces() {
        let unconfigured = StorageConfig::default();
        assert!(unconfigured.credentials().is_none());

        let url_only = StorageConfig {
            url: Some("https://project.supabase.co".to_string()),
            api_key: None,
        };
        assert!(url_only.credentials().is_none());

        let complete = StorageConfig {
            url: Some("https://project.supabase.co".to_string()),
            api_key: Some("anon-key".to_string()),
        };
        assert_eq!(
            complete.credentials(),
            Some(("https://project.supabase.co", "anon-key"))
        );
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://app.example.com, https://admin.example.com"),
            vec![
                "https://app.example.com".to_string(),
                "https://admin.example.com".to_string()
            ]
        );
        assert!(parse_origins("").is_empty());
        assert!(parse_origins(" , ").is_empty());
    }

    #[test]
    fn test_opengraph_default_api_base() {
        let config = OpenGraphConfig::default();
        assert_eq!(config.api_base, "https://opengraph.io/api/1.1");
        assert!(config.api_key.is_none());
    }
}
