use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use storefront_service::admission::AdmissionEngine;
use storefront_service::api::{self, AppState};
use storefront_service::catalog::CatalogService;
use storefront_service::seed;
use storefront_service::storage::{MemoryStore, StorageClient};

#[derive(Parser)]
#[command(name = "storefront-service")]
struct Args {
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    bind: String,

    #[arg(long, env = "PORT", default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let store: Arc<dyn StorageClient> = Arc::new(MemoryStore::new());
    seed::seed_demo_catalog(store.as_ref()).await?;

    let catalog = CatalogService::new(store.clone());
    let engine = AdmissionEngine::new(catalog.clone(), store.clone());
    let state = AppState {
        catalog,
        engine,
        store,
    };

    let app = api::create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", args.bind, args.port)).await?;

    info!("Storefront service started on port {}", args.port);
    info!(
        "Ready to accept orders at http://{}:{}/orders",
        args.bind, args.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
