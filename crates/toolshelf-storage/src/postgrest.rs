// PostgREST pass-through ToolStore for the hosted backend
// Decision: Talk to the backend's REST surface with the anon key; the
//           backend keeps ownership of its schema and row-level policies

use async_trait::async_trait;
use toolshelf_core::Tool;
use uuid::Uuid;

use crate::models::{CreateTool, UpdateTool};
use crate::store::{Result, StorageError, ToolStore};

const TOOLS_TABLE: &str = "tools";

/// Tool catalog backed by a hosted PostgREST endpoint.
pub struct PostgrestToolStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestToolStore {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TOOLS_TABLE)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, "tool backend returned an error");
        Err(StorageError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ToolStore for PostgrestToolStore {
    async fn list(&self) -> Result<Vec<Tool>> {
        let response = self
            .request(self.http.get(self.table_url()))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        let rows: Vec<Tool> = self.check(response).await?.json().await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Tool>> {
        let filter = format!("eq.{id}");
        let response = self
            .request(self.http.get(self.table_url()))
            .query(&[("select", "*"), ("id", filter.as_str())])
            .send()
            .await?;
        let rows: Vec<Tool> = self.check(response).await?.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, input: CreateTool) -> Result<Tool> {
        let response = self
            .request(self.http.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&input)
            .send()
            .await?;
        let mut rows: Vec<Tool> = self.check(response).await?.json().await?;
        rows.pop().ok_or(StorageError::Backend {
            status: 500,
            message: "insert returned no representation".to_string(),
        })
    }

    async fn update(&self, id: Uuid, input: UpdateTool) -> Result<Tool> {
        let response = self
            .request(self.http.patch(self.table_url()))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&input)
            .send()
            .await?;
        let mut rows: Vec<Tool> = self.check(response).await?.json().await?;
        rows.pop().ok_or(StorageError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let response = self
            .request(self.http.delete(self.table_url()))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let rows: Vec<Tool> = self.check(response).await?.json().await?;
        if rows.is_empty() {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
