//! Concurrency scenarios for order admission: under any interleaving the
//! accepted quantities never exceed the starting stock and stock never goes
//! negative.

use std::sync::Arc;

use futures::future::join_all;

use shared::{AdmissionError, Product};
use storefront_service::admission::AdmissionEngine;
use storefront_service::catalog::CatalogService;
use storefront_service::storage::{MemoryStore, StorageClient};

async fn engine_with_stock(stock: i32) -> (AdmissionEngine, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    store
        .put_product(Product {
            id: "1".to_string(),
            name: "Paracetamol 750mg".to_string(),
            price: "12.90".parse().unwrap(),
            stock,
        })
        .await
        .unwrap();
    let dyn_store: Arc<dyn StorageClient> = store.clone();
    let engine = AdmissionEngine::new(CatalogService::new(dyn_store.clone()), dyn_store);
    (engine, store)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn two_concurrent_submissions_for_more_than_half_the_stock() {
    let (engine, store) = engine_with_stock(100).await;

    let tasks = (0..2).map(|i| {
        let engine = engine.clone();
        tokio::spawn(async move { engine.submit_order("1", 60, &format!("customer-{}", i)).await })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1, "exactly one of the two submissions may win");

    let rejected = results.into_iter().find(|r| r.is_err()).unwrap();
    assert_eq!(
        rejected.unwrap_err(),
        AdmissionError::InsufficientStock {
            product_id: "1".to_string(),
            requested: 60,
        }
    );

    assert_eq!(store.get_product("1").await.unwrap().unwrap().stock, 40);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn oversubscribed_fanout_accepts_at_most_the_starting_stock() {
    let (engine, store) = engine_with_stock(50).await;

    // 20 requests of 5 units each: 100 requested against 50 in stock.
    let tasks = (0..20).map(|i| {
        let engine = engine.clone();
        tokio::spawn(async move { engine.submit_order("1", 5, &format!("customer-{}", i)).await })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let accepted_qty: i32 = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .map(|order| order.qty)
        .sum();
    assert!(accepted_qty <= 50);

    for rejection in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(matches!(
            rejection,
            AdmissionError::InsufficientStock { .. }
        ));
    }

    let remaining = store.get_product("1").await.unwrap().unwrap().stock;
    assert!(remaining >= 0);
    assert_eq!(remaining, 50 - accepted_qty);

    // Each accepted order corresponds to exactly one durable record.
    let mut recorded = 0;
    for order in results.iter().filter_map(|r| r.as_ref().ok()) {
        assert!(store.get_order(order.id).await.unwrap().is_some());
        recorded += 1;
    }
    assert_eq!(recorded, results.iter().filter(|r| r.is_ok()).count());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn uneven_quantities_still_respect_the_stock_ceiling() {
    let (engine, store) = engine_with_stock(30).await;

    let quantities = [7, 3, 8, 5, 2, 6, 4, 9, 1, 8];
    let tasks = quantities.into_iter().enumerate().map(|(i, qty)| {
        let engine = engine.clone();
        tokio::spawn(async move { engine.submit_order("1", qty, &format!("customer-{}", i)).await })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let accepted_qty: i32 = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .map(|order| order.qty)
        .sum();
    let remaining = store.get_product("1").await.unwrap().unwrap().stock;

    assert!(accepted_qty <= 30);
    assert!(remaining >= 0);
    assert_eq!(remaining, 30 - accepted_qty);
}
