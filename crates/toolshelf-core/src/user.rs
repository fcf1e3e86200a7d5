// Authenticated user profile as returned by the identity provider's
// userinfo endpoint. The provider controls the claim set, so everything
// beyond the three claims the dashboard renders is kept as-is.

use serde::{Deserialize, Serialize};

/// Profile of the authenticated user.
///
/// `name`, `email`, and `picture` are the claims the dashboard displays;
/// any further claims the provider returns ride along in `extra` and
/// survive the session round trip untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(flatten)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
