// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response after a successful full re-index.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SyncResponse {
    pub success: bool,
    pub message: String,
    /// Number of records pushed to the search index.
    pub count: usize,
}

/// Response for a sync that failed after authorization.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SyncErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

/// Bare error body used for credential rejections.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
