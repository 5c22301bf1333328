//! Persistence layer for products and orders.
//!
//! The admission engine never reads stock and writes it back in separate
//! steps; the only mutation it is given is [`StorageClient::conditional_decrement_stock`],
//! a single guarded operation. Any backend implementing this trait must apply
//! the guard and the decrement indivisibly.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use shared::{Order, Product, StorageError};

/// Outcome of the guarded stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecrement {
    /// The guard `stock >= qty` held and stock was decremented in the same
    /// operation.
    Applied { remaining: i32 },
    /// The guard failed: current stock is below the requested quantity.
    InsufficientStock,
    /// No product with that id exists.
    ProductMissing,
}

#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, StorageError>;

    async fn get_product(&self, id: &str) -> Result<Option<Product>, StorageError>;

    /// Inserts or replaces a product record. Seeding/admin path only.
    async fn put_product(&self, product: Product) -> Result<(), StorageError>;

    /// Atomically decrements `stock` by `qty` iff `stock >= qty`.
    ///
    /// `qty` must be positive; callers validate before reaching the store.
    /// No partial mutation happens on any non-`Applied` outcome.
    async fn conditional_decrement_stock(
        &self,
        id: &str,
        qty: i32,
    ) -> Result<StockDecrement, StorageError>;

    async fn put_order(&self, order: Order) -> Result<(), StorageError>;

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, StorageError>;
}

/// In-memory backend. The products mutex is held across the guard check and
/// the decrement, which is what makes the conditional update indivisible.
pub struct MemoryStore {
    products: Mutex<HashMap<String, Product>>,
    orders: Mutex<HashMap<Uuid, Order>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            products: Mutex::new(HashMap::new()),
            orders: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageClient for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, StorageError> {
        let products = self
            .products
            .lock()
            .map_err(|_| StorageError::Unavailable("products lock poisoned".into()))?;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, StorageError> {
        let products = self
            .products
            .lock()
            .map_err(|_| StorageError::Unavailable("products lock poisoned".into()))?;
        Ok(products.get(id).cloned())
    }

    async fn put_product(&self, product: Product) -> Result<(), StorageError> {
        let mut products = self
            .products
            .lock()
            .map_err(|_| StorageError::Unavailable("products lock poisoned".into()))?;
        products.insert(product.id.clone(), product);
        Ok(())
    }

    async fn conditional_decrement_stock(
        &self,
        id: &str,
        qty: i32,
    ) -> Result<StockDecrement, StorageError> {
        let mut products = self
            .products
            .lock()
            .map_err(|_| StorageError::Unavailable("products lock poisoned".into()))?;

        let Some(product) = products.get_mut(id) else {
            return Ok(StockDecrement::ProductMissing);
        };

        if product.stock < qty {
            return Ok(StockDecrement::InsufficientStock);
        }

        product.stock -= qty;
        Ok(StockDecrement::Applied {
            remaining: product.stock,
        })
    }

    async fn put_order(&self, order: Order) -> Result<(), StorageError> {
        let mut orders = self
            .orders
            .lock()
            .map_err(|_| StorageError::Unavailable("orders lock poisoned".into()))?;
        orders.insert(order.id, order);
        Ok(())
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, StorageError> {
        let orders = self
            .orders
            .lock()
            .map_err(|_| StorageError::Unavailable("orders lock poisoned".into()))?;
        Ok(orders.get(&id).cloned())
    }
}
