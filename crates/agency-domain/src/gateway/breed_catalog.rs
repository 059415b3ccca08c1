//! Breed Catalog - Which breeds the agency is willing to hire
//!
//! The whitelist lives outside the agency. Implementations must never
//! fail loudly: if the list cannot be fetched, the answer is "no".

use async_trait::async_trait;

/// Breed Catalog Trait
///
/// This is a PORT in hexagonal architecture.
#[async_trait]
pub trait BreedCatalog: Send + Sync {
    /// `true` only if `breed` is present in the whitelist
    async fn is_known_breed(&self, breed: &str) -> bool;
}
