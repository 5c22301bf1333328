use anyhow::Result;
use bigdecimal::BigDecimal;
use tracing::info;

use shared::Product;

use crate::storage::StorageClient;

const DEMO_CATALOG: [(&str, &str, &str, i32); 3] = [
    ("1", "Paracetamol 750mg", "12.90", 100),
    ("2", "Dipirona 500mg", "9.50", 80),
    ("3", "Vitamina C 1g", "19.90", 50),
];

/// Inserts the demo catalog when the store is empty. Runs once at startup,
/// never per request.
pub async fn seed_demo_catalog(store: &dyn StorageClient) -> Result<()> {
    if !store.list_products().await?.is_empty() {
        return Ok(());
    }

    for (id, name, price, stock) in DEMO_CATALOG {
        store
            .put_product(Product {
                id: id.to_string(),
                name: name.to_string(),
                price: price.parse::<BigDecimal>()?,
                stock,
            })
            .await?;
    }

    info!("seeded demo catalog with {} products", DEMO_CATALOG.len());
    Ok(())
}
