// OpenGraph metadata contracts
// Field casing mirrors the dashboard's existing wire format: `siteName`
// and `type` are camel/bare, `favicon_url` is snake.

use serde::{Deserialize, Serialize};

/// Request body for the metadata fetch endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OpenGraphRequest {
    pub url: String,
}

/// Page metadata extracted for a tool URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OpenGraphData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, rename = "siteName", skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
}

/// Outcome of a metadata fetch. `success: false` carries an error message
/// instead of data; upstream failures never surface as unstructured 500s.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OpenGraphResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<OpenGraphData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OpenGraphResponse {
    pub fn ok(data: OpenGraphData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_name_uses_camel_case_on_the_wire() {
        let data = OpenGraphData {
            title: Some("ChatGPT".into()),
            site_name: Some("OpenAI".into()),
            kind: Some("website".into()),
            ..Default::default()
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["siteName"], "OpenAI");
        assert_eq!(json["type"], "website");
        assert!(json.get("site_name").is_none());
    }

    #[test]
    fn test_failed_response_shape() {
        let resp = OpenGraphResponse::failed("OpenGraph API key not configured");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"], "OpenGraph API key not configured");
    }
}
