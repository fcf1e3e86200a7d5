// Toolshelf storage layer
// Decision: Two interchangeable ToolStore implementations - a PostgREST
//           pass-through for the hosted backend and an in-memory fallback
//           so the dashboard runs without any backend configured

pub mod memory;
pub mod models;
pub mod postgrest;
pub mod store;

pub use memory::MemoryToolStore;
pub use models::{CreateTool, UpdateTool};
pub use postgrest::PostgrestToolStore;
pub use store::{StorageError, ToolStore};
