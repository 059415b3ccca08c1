//! Breed whitelist backed by TheCatAPI (or anything serving the same shape)

use std::collections::HashSet;
use std::time::Duration;

use agency_domain::BreedCatalog;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct BreedEntry {
    name: String,
}

/// Fetches the full breed list on every lookup
#[derive(Clone)]
pub struct CatApiBreedCatalog {
    client: reqwest::Client,
    url: String,
}

impl CatApiBreedCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: url.into(),
        }
    }

    async fn fetch(&self) -> Result<Vec<BreedEntry>, reqwest::Error> {
        self.client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl BreedCatalog for CatApiBreedCatalog {
    async fn is_known_breed(&self, breed: &str) -> bool {
        match self.fetch().await {
            Ok(entries) => {
                debug!(count = entries.len(), "breed list fetched");
                entries.iter().any(|entry| entry.name == breed)
            }
            Err(e) => {
                error!(url = %self.url, error = %e, "failed to fetch breed info");
                false
            }
        }
    }
}

/// Fixed whitelist, for tests and offline runs
#[derive(Debug, Clone, Default)]
pub struct StaticBreedCatalog {
    breeds: HashSet<String>,
}

impl StaticBreedCatalog {
    pub fn new(breeds: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            breeds: breeds.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl BreedCatalog for StaticBreedCatalog {
    async fn is_known_breed(&self, breed: &str) -> bool {
        self.breeds.contains(breed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::{Json, Router};

    async fn serve_breeds() -> String {
        let app = Router::new().route(
            "/v1/breeds",
            get(|| async {
                Json(serde_json::json!([
                    { "id": "abys", "name": "Abyssinian" },
                    { "id": "beng", "name": "Bengal" }
                ]))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1/breeds", addr)
    }

    #[tokio::test]
    async fn test_static_catalog_is_exact_match() {
        let catalog = StaticBreedCatalog::new(["Bengal", "Siamese"]);

        assert!(catalog.is_known_breed("Bengal").await);
        assert!(!catalog.is_known_breed("bengal").await);
        assert!(!catalog.is_known_breed("Sphynx").await);
    }

    #[tokio::test]
    async fn test_remote_catalog_matches_by_name() {
        let catalog = CatApiBreedCatalog::new(serve_breeds().await);

        assert!(catalog.is_known_breed("Abyssinian").await);
        assert!(!catalog.is_known_breed("abys").await);
        assert!(!catalog.is_known_breed("Sphynx").await);
    }

    #[tokio::test]
    async fn test_unreachable_catalog_rejects_everything() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let catalog = CatApiBreedCatalog::new(format!("http://{}/v1/breeds", addr));
        assert!(!catalog.is_known_breed("Bengal").await);
    }

    #[tokio::test]
    async fn test_error_status_rejects_everything() {
        let url = serve_breeds().await.replace("/v1/breeds", "/missing");
        let catalog = CatApiBreedCatalog::new(url);
        assert!(!catalog.is_known_breed("Bengal").await);
    }
}
