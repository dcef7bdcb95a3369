// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use souk_agent::app::{create_router, AppState, VERSION};
use souk_agent::services::db::{ListingStore, PgListingStore};
use souk_agent::services::query::SearchService;
use souk_agent::services::search::{MeiliBackend, SearchBackend};
use souk_agent::services::sync::SyncService;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Get configuration from environment variables
    let database_url =
        env::var("DATABASE_URL").expect("DATABASE_URL environment variable must be set");

    let meilisearch_host =
        env::var("MEILISEARCH_HOST").expect("MEILISEARCH_HOST environment variable must be set");

    let meilisearch_api_key = env::var("MEILISEARCH_API_KEY").ok();

    let index_name = env::var("MEILISEARCH_INDEX").unwrap_or_else(|_| "listings".to_string());

    let admin_token = env::var("ADMIN_SYNC_TOKEN").ok();

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    // Connect to the system of record; this applies pending migrations.
    let store = PgListingStore::connect(&database_url)
        .await
        .expect("Failed to connect to Postgres");
    info!("connected to Postgres");

    let backend = MeiliBackend::new(&meilisearch_host, index_name, meilisearch_api_key)
        .expect("Invalid MEILISEARCH_HOST");

    // An unreachable index is not fatal: queries fall back to the database
    // until it becomes reachable again.
    if let Err(e) = backend.init_index().await {
        warn!(error = %e, "failed to initialize search index settings");
    }

    if admin_token.is_none() {
        warn!("ADMIN_SYNC_TOKEN not set; /admin/sync will report misconfiguration");
    }

    let store: Arc<dyn ListingStore> = Arc::new(store);
    let index: Arc<dyn SearchBackend> = Arc::new(backend);

    let state = AppState {
        search_service: Arc::new(SearchService::new(index.clone(), store.clone())),
        sync_service: Arc::new(SyncService::new(store, index)),
        admin_token,
    };

    let app = create_router(state);

    // Bind to 0.0.0.0 to accept connections from any network interface (required for Docker)
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    info!("souk-agent v{} listening on {}", VERSION, addr);

    axum::serve(listener, app).await.expect("Server error");
}
