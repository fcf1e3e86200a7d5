// ToolStore trait - the collaborator interface the rest of the system
// consumes for tool records: list / insert / update / delete.

use async_trait::async_trait;
use thiserror::Error;
use toolshelf_core::Tool;
use uuid::Uuid;

use crate::models::{CreateTool, UpdateTool};

/// Storage failure surfaced to route handlers.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("tool not found")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Data store for tool records.
///
/// The server never filters or sorts beyond creation-time ordering; the
/// dashboard does that client-side over the full list.
#[async_trait]
pub trait ToolStore: Send + Sync {
    /// List all tools, newest first.
    async fn list(&self) -> Result<Vec<Tool>>;

    /// Fetch a single tool by id.
    async fn get(&self, id: Uuid) -> Result<Option<Tool>>;

    /// Insert a new tool and return the stored row.
    async fn insert(&self, input: CreateTool) -> Result<Tool>;

    /// Apply a partial update and return the stored row.
    /// Fails with [`StorageError::NotFound`] for unknown ids.
    async fn update(&self, id: Uuid, input: UpdateTool) -> Result<Tool>;

    /// Delete a tool. Fails with [`StorageError::NotFound`] for unknown ids.
    async fn delete(&self, id: Uuid) -> Result<()>;
}
