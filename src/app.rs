// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, route handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router
//! directly without starting the full binary.

use crate::models::search::{SearchPage, SearchRecord, SearchRequest};
use crate::models::sync::{ErrorResponse, SyncErrorResponse, SyncResponse};
use crate::models::version::VersionResponse;
use crate::services::query::SearchService;
use crate::services::sync::SyncService;
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `SOUK_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("SOUK_VERSION");

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<SearchService>,
    pub sync_service: Arc<SyncService>,
    /// Administrative credential for `/admin/sync`. `None` means the
    /// endpoint reports itself as misconfigured.
    pub admin_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Sync failure responses
// ---------------------------------------------------------------------------

/// Failure modes of the sync endpoint.
#[derive(Debug)]
pub enum SyncFailure {
    BadCredential,
    NotConfigured,
    Downstream(String),
}

impl IntoResponse for SyncFailure {
    fn into_response(self) -> Response {
        match self {
            SyncFailure::BadCredential => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "invalid or missing sync credential".to_string(),
                }),
            )
                .into_response(),
            SyncFailure::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SyncErrorResponse {
                    success: false,
                    error: "configuration".to_string(),
                    message: "ADMIN_SYNC_TOKEN is not configured".to_string(),
                }),
            )
                .into_response(),
            SyncFailure::Downstream(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SyncErrorResponse {
                    success: false,
                    error: "sync_failed".to_string(),
                    message,
                }),
            )
                .into_response(),
        }
    }
}

/// Extract the bearer credential from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/version",
    responses((status = 200, description = "Agent name and version", body = VersionResponse))
)]
pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        agent: "souk-agent".to_string(),
        version: VERSION.to_string(),
    })
}

/// Search is soft: this handler always answers 200 with a result page, no
/// matter which backend served it or whether both failed.
#[utoipa::path(
    post,
    path = "/search",
    request_body = SearchRequest,
    responses((status = 200, description = "One page of search results", body = SearchPage))
)]
pub async fn search_handler(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> Json<SearchPage> {
    Json(state.search_service.search(&payload).await)
}

#[utoipa::path(
    post,
    path = "/admin/sync",
    responses(
        (status = 200, description = "Full re-index completed", body = SyncResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 500, description = "Misconfiguration or downstream failure", body = SyncErrorResponse)
    )
)]
pub async fn sync_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SyncResponse>, SyncFailure> {
    let expected = state
        .admin_token
        .as_deref()
        .ok_or(SyncFailure::NotConfigured)?;

    let provided = bearer_token(&headers).ok_or(SyncFailure::BadCredential)?;
    if provided != expected {
        return Err(SyncFailure::BadCredential);
    }

    let count = state
        .sync_service
        .sync()
        .await
        .map_err(|e| SyncFailure::Downstream(format!("{e:#}")))?;

    let message = if count == 0 {
        "no listings to sync".to_string()
    } else {
        format!("synced {} listings", count)
    };

    Ok(Json(SyncResponse {
        success: true,
        message,
        count,
    }))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(version_handler, search_handler, sync_handler),
    components(schemas(
        VersionResponse,
        SearchRequest,
        SearchPage,
        SearchRecord,
        crate::models::listing::ListingStatus,
        crate::models::listing::PriceType,
        SyncResponse,
        SyncErrorResponse,
        ErrorResponse
    ))
)]
pub struct ApiDoc;

/// Build the Axum application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/version", get(version_handler))
        .route("/search", post(search_handler))
        .route("/admin/sync", post(sync_handler))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
