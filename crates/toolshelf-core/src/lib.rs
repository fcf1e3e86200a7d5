// Public contracts for the Toolshelf API
// This crate defines the domain entities and DTOs shared by the server,
// the client session store, and the storage layer.

pub mod common;
pub mod opengraph;
pub mod tool;
pub mod user;

pub use common::*;
pub use opengraph::*;
pub use tool::*;
pub use user::*;
