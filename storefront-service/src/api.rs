use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{AdmissionError, Order, Product, StorageError};

use crate::admission::AdmissionEngine;
use crate::catalog::CatalogService;
use crate::storage::StorageClient;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub engine: AdmissionEngine,
    pub store: Arc<dyn StorageClient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub product_id: String,
    pub qty: i32,
    pub customer: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/:id", get(get_order))
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}

type ErrorReply = (StatusCode, Json<ErrorMessage>);

fn admission_error_reply(err: AdmissionError) -> ErrorReply {
    let status = match &err {
        AdmissionError::InvalidQuantity
        | AdmissionError::UnknownProduct(_)
        | AdmissionError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
        AdmissionError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorMessage {
            message: err.to_string(),
        }),
    )
}

fn storage_error_reply(err: StorageError) -> ErrorReply {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorMessage {
            message: err.to_string(),
        }),
    )
}

fn not_found_reply(message: String) -> ErrorReply {
    (StatusCode::NOT_FOUND, Json(ErrorMessage { message }))
}

async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ErrorReply> {
    match state
        .engine
        .submit_order(&request.product_id, request.qty, &request.customer)
        .await
    {
        Ok(order) => Ok((StatusCode::CREATED, Json(order))),
        Err(err) => Err(admission_error_reply(err)),
    }
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ErrorReply> {
    match state.store.get_order(id).await {
        Ok(Some(order)) => Ok(Json(order)),
        Ok(None) => Err(not_found_reply(format!("order {} not found", id))),
        Err(err) => Err(storage_error_reply(err)),
    }
}

async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ErrorReply> {
    match state.catalog.list_products().await {
        Ok(products) => Ok(Json(products)),
        Err(err) => Err(storage_error_reply(err)),
    }
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ErrorReply> {
    match state.catalog.get_product(&id).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err(not_found_reply(format!("product {} not found", id))),
        Err(err) => Err(storage_error_reply(err)),
    }
}

async fn health_check() -> &'static str {
    "OK"
}
