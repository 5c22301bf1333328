//! Order admission: validate the request, reserve stock atomically, then
//! durably record the order.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use shared::{AdmissionError, Order, OrderStatus};

use crate::catalog::CatalogService;
use crate::storage::{StockDecrement, StorageClient};

/// Total attempts for the order-record write after a successful decrement.
const PUT_ORDER_ATTEMPTS: u32 = 3;
const PUT_ORDER_BACKOFF: Duration = Duration::from_millis(25);

#[derive(Clone)]
pub struct AdmissionEngine {
    catalog: CatalogService,
    store: Arc<dyn StorageClient>,
}

impl AdmissionEngine {
    pub fn new(catalog: CatalogService, store: Arc<dyn StorageClient>) -> Self {
        Self { catalog, store }
    }

    /// Admits an order against current stock.
    ///
    /// Stock sufficiency is never checked in this engine; the check and the
    /// decrement happen as one conditional operation in the storage backend,
    /// so concurrent submissions against the same product serialize there.
    /// A rejected submission mutates nothing.
    pub async fn submit_order(
        &self,
        product_id: &str,
        qty: i32,
        customer: &str,
    ) -> Result<Order, AdmissionError> {
        if qty <= 0 {
            return Err(AdmissionError::InvalidQuantity);
        }

        if self.catalog.get_product(product_id).await?.is_none() {
            return Err(AdmissionError::UnknownProduct(product_id.to_string()));
        }

        match self
            .store
            .conditional_decrement_stock(product_id, qty)
            .await?
        {
            StockDecrement::Applied { remaining } => {
                info!(product_id, qty, remaining, "stock reserved");
            }
            StockDecrement::InsufficientStock => {
                return Err(AdmissionError::InsufficientStock {
                    product_id: product_id.to_string(),
                    requested: qty,
                });
            }
            StockDecrement::ProductMissing => {
                // Deleted between the catalog read and the decrement.
                return Err(AdmissionError::UnknownProduct(product_id.to_string()));
            }
        }

        let order = Order {
            id: Uuid::new_v4(),
            product_id: product_id.to_string(),
            qty,
            customer: customer.to_string(),
            status: OrderStatus::Created,
            created_at: Utc::now(),
        };

        self.persist_reserved_order(order).await
    }

    /// The decrement for this order already happened; only the record write
    /// may be retried. Exhausting the retries strands a reservation, which is
    /// flagged for manual reconciliation rather than auto-corrected.
    async fn persist_reserved_order(&self, order: Order) -> Result<Order, AdmissionError> {
        let mut attempt = 1;
        loop {
            match self.store.put_order(order.clone()).await {
                Ok(()) => {
                    info!(
                        order_id = %order.id,
                        product_id = %order.product_id,
                        qty = order.qty,
                        "order created"
                    );
                    return Ok(order);
                }
                Err(e) if attempt < PUT_ORDER_ATTEMPTS => {
                    warn!(
                        order_id = %order.id,
                        attempt,
                        error = %e,
                        "order write failed, retrying"
                    );
                    attempt += 1;
                    tokio::time::sleep(PUT_ORDER_BACKOFF).await;
                }
                Err(e) => {
                    error!(
                        order_id = %order.id,
                        product_id = %order.product_id,
                        qty = order.qty,
                        "order write exhausted retries after stock decrement; \
                         manual reconciliation required"
                    );
                    return Err(e.into());
                }
            }
        }
    }
}
