//! # Spy Cat Agency Adapter Layer
//!
//! External system integrations (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `controller/` - Inbound adapter (HTTP via axum)
//! - `gateway/` - Outbound adapters (breed whitelist)
//! - `repository/` - Persistence implementations (PostgreSQL, in-memory)

pub mod controller;
pub mod gateway;
pub mod repository;

pub use controller::{router, AppState};
pub use gateway::breed_api::{CatApiBreedCatalog, StaticBreedCatalog};
pub use repository::in_memory::InMemoryStore;
pub use repository::postgres::Database;
