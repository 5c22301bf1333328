use std::sync::Arc;

use shared::{Product, StorageError};

use crate::storage::StorageClient;

/// Read-only access to product records. Pure reads, no side effects;
/// transient storage failures propagate to the caller unretried.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn StorageClient>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn StorageClient>) -> Self {
        Self { store }
    }

    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, StorageError> {
        self.store.get_product(id).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, StorageError> {
        self.store.list_products().await
    }
}
