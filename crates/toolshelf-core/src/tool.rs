// Tool catalog entities
// Decision: Mirror the hosted backend's row shape so the PostgREST
// pass-through can deserialize rows without a mapping layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a cataloged tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    #[default]
    Active,
    Inactive,
    Trial,
}

impl ToolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Active => "active",
            ToolStatus::Inactive => "inactive",
            ToolStatus::Trial => "trial",
        }
    }
}

impl std::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pricing model of a cataloged tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum PricingModel {
    Free,
    Freemium,
    Paid,
    Enterprise,
}

impl PricingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingModel::Free => "free",
            PricingModel::Freemium => "freemium",
            PricingModel::Paid => "paid",
            PricingModel::Enterprise => "enterprise",
        }
    }
}

impl std::fmt::Display for PricingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories offered by the dashboard's category picker.
pub const CATEGORIES: &[&str] = &[
    "AI Writing",
    "Development",
    "Analytics",
    "Design",
    "Productivity",
    "Customer Support",
    "Marketing",
    "Data Processing",
    "Other",
];

/// A cataloged software tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Tool {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub use_cases: Option<String>,
    pub pricing_model: Option<PricingModel>,
    pub cost_per_month: Option<f64>,
    pub status: ToolStatus,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // OpenGraph enrichment, absent until the first metadata fetch
    #[serde(default)]
    pub og_title: Option<String>,
    #[serde(default)]
    pub og_description: Option<String>,
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub og_site_name: Option<String>,
    #[serde(default)]
    pub og_last_fetched: Option<DateTime<Utc>>,
    #[serde(default)]
    pub favicon_url: Option<String>,
}

/// Request to add a tool to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateToolRequest {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub use_cases: Option<String>,
    #[serde(default)]
    pub pricing_model: Option<PricingModel>,
    #[serde(default)]
    pub cost_per_month: Option<f64>,
    #[serde(default)]
    pub status: ToolStatus,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Partial update of a cataloged tool. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateToolRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub use_cases: Option<String>,
    pub pricing_model: Option<PricingModel>,
    pub cost_per_month: Option<f64>,
    pub status: Option<ToolStatus>,
}
