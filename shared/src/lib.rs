use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: BigDecimal,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub product_id: String,
    pub qty: i32,
    pub customer: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// `Cancelled` is reserved for a future compensating-restock flow; the
/// admission path only ever writes `Created`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Reasons an order submission can be rejected. The first three are
/// client-caused; `StorageUnavailable` is transient backend failure.
#[derive(Debug, PartialEq, Error)]
pub enum AdmissionError {
    #[error("qty must be a positive integer")]
    InvalidQuantity,
    #[error("unknown product: {0}")]
    UnknownProduct(String),
    #[error("insufficient stock for product {product_id}: requested {requested}")]
    InsufficientStock { product_id: String, requested: i32 },
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),
}
