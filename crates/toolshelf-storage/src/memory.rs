// In-memory ToolStore for running without a hosted backend
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// All data is stored in memory and lost on restart. When no backend is
// configured the store starts pre-seeded with a small sample catalog so
// the dashboard renders something meaningful out of the box.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use toolshelf_core::{PricingModel, Tool, ToolStatus};
use uuid::Uuid;

use crate::models::{CreateTool, UpdateTool};
use crate::store::{Result, StorageError, ToolStore};

/// In-memory tool catalog.
#[derive(Default)]
pub struct MemoryToolStore {
    tools: RwLock<HashMap<Uuid, Tool>>,
}

impl MemoryToolStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the sample catalog shown when the hosted
    /// backend is unconfigured.
    pub fn with_sample_catalog() -> Self {
        let store = Self::new();
        {
            let mut tools = store.tools.write();
            for tool in sample_catalog() {
                tools.insert(tool.id, tool);
            }
        }
        store
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }
}

#[async_trait]
impl ToolStore for MemoryToolStore {
    async fn list(&self) -> Result<Vec<Tool>> {
        let mut tools: Vec<Tool> = self.tools.read().values().cloned().collect();
        tools.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tools)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Tool>> {
        Ok(self.tools.read().get(&id).cloned())
    }

    async fn insert(&self, input: CreateTool) -> Result<Tool> {
        let now = Self::now();
        let tool = Tool {
            id: Uuid::now_v7(),
            name: input.name,
            url: input.url,
            category: input.category,
            description: input.description,
            use_cases: input.use_cases,
            pricing_model: input.pricing_model,
            cost_per_month: input.cost_per_month,
            status: input.status,
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
            og_title: None,
            og_description: None,
            og_image: None,
            og_site_name: None,
            og_last_fetched: None,
            favicon_url: None,
        };
        self.tools.write().insert(tool.id, tool.clone());
        Ok(tool)
    }

    async fn update(&self, id: Uuid, input: UpdateTool) -> Result<Tool> {
        let mut tools = self.tools.write();
        let tool = tools.get_mut(&id).ok_or(StorageError::NotFound)?;

        if let Some(name) = input.name {
            tool.name = name;
        }
        if let Some(url) = input.url {
            tool.url = url;
        }
        if let Some(category) = input.category {
            tool.category = Some(category);
        }
        if let Some(description) = input.description {
            tool.description = Some(description);
        }
        if let Some(use_cases) = input.use_cases {
            tool.use_cases = Some(use_cases);
        }
        if let Some(pricing_model) = input.pricing_model {
            tool.pricing_model = Some(pricing_model);
        }
        if let Some(cost_per_month) = input.cost_per_month {
            tool.cost_per_month = Some(cost_per_month);
        }
        if let Some(status) = input.status {
            tool.status = status;
        }
        tool.updated_at = Self::now();

        Ok(tool.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.tools
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

fn sample_tool(
    name: &str,
    url: &str,
    category: &str,
    description: &str,
    use_cases: &str,
    pricing_model: PricingModel,
    cost_per_month: f64,
) -> Tool {
    let now = Utc::now();
    Tool {
        id: Uuid::now_v7(),
        name: name.to_string(),
        url: url.to_string(),
        category: Some(category.to_string()),
        description: Some(description.to_string()),
        use_cases: Some(use_cases.to_string()),
        pricing_model: Some(pricing_model),
        cost_per_month: Some(cost_per_month),
        status: ToolStatus::Active,
        created_by: None,
        created_at: now,
        updated_at: now,
        og_title: None,
        og_description: None,
        og_image: None,
        og_site_name: None,
        og_last_fetched: None,
        favicon_url: None,
    }
}

/// The sample catalog shown when no backend is configured.
fn sample_catalog() -> Vec<Tool> {
    vec![
        sample_tool(
            "ChatGPT",
            "https://chat.openai.com",
            "AI Writing",
            "Advanced AI language model for text generation, editing, and conversation.",
            "Content creation, code assistance, brainstorming, customer support",
            PricingModel::Freemium,
            20.0,
        ),
        sample_tool(
            "GitHub Copilot",
            "https://github.com/features/copilot",
            "Development",
            "AI-powered code completion and generation tool integrated with IDEs.",
            "Code completion, function generation, debugging assistance",
            PricingModel::Paid,
            10.0,
        ),
        sample_tool(
            "Midjourney",
            "https://midjourney.com",
            "Design",
            "AI image generation tool for creating artwork and visual content.",
            "Marketing materials, concept art, social media graphics",
            PricingModel::Paid,
            30.0,
        ),
        sample_tool(
            "Notion AI",
            "https://notion.so",
            "Productivity",
            "AI-powered writing assistant integrated into Notion workspace.",
            "Document writing, summarization, brainstorming, task management",
            PricingModel::Freemium,
            8.0,
        ),
        sample_tool(
            "Grammarly",
            "https://grammarly.com",
            "AI Writing",
            "AI-powered writing assistant for grammar, style, and tone improvement.",
            "Email writing, document editing, content review",
            PricingModel::Freemium,
            12.0,
        ),
    ]
}
