// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Search resolution: index first, database fallback, empty-result floor.

use crate::models::search::{SearchPage, SearchRecord, SearchRequest};
use crate::services::db::ListingStore;
use crate::services::search::SearchBackend;
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, warn};

/// Default page size when the request does not name one.
pub const DEFAULT_HITS_PER_PAGE: usize = 12;

/// Default facet filter; only active listings are searchable.
pub const DEFAULT_FILTER: &str = "status = active";

/// Resolves search requests, preferring the index and degrading to the
/// system of record.
pub struct SearchService {
    index: Arc<dyn SearchBackend>,
    store: Arc<dyn ListingStore>,
}

impl SearchService {
    pub fn new(index: Arc<dyn SearchBackend>, store: Arc<dyn ListingStore>) -> Self {
        Self { index, store }
    }

    /// Resolve a search request. Never returns an error: an index failure
    /// triggers the database fallback, and a fallback failure yields the
    /// empty page. An empty result set from the index is a valid answer and
    /// does not trigger the fallback. Each path runs at most once.
    ///
    /// The two paths rank differently: the index applies its configured
    /// custom ranking, the fallback returns natural database order.
    pub async fn search(&self, request: &SearchRequest) -> SearchPage {
        let page = request.page.unwrap_or(0);
        let hits_per_page = request
            .hits_per_page
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_HITS_PER_PAGE);
        let filter = request.filters.as_deref().unwrap_or(DEFAULT_FILTER);

        match self
            .index
            .query(&request.query, page, hits_per_page, filter)
            .await
        {
            Ok(result) => result,
            Err(index_err) => {
                warn!(error = %index_err, "search index unavailable, falling back to database");
                match self.fallback(&request.query, page, hits_per_page).await {
                    Ok(result) => result,
                    Err(fallback_err) => {
                        error!(error = %fallback_err, "database fallback failed, returning empty result");
                        SearchPage::empty(&request.query, hits_per_page)
                    }
                }
            }
        }
    }

    /// Query the system of record directly, mapping rows through the same
    /// projection the index stores so both paths return the same shape.
    async fn fallback(&self, query: &str, page: usize, hits_per_page: usize) -> Result<SearchPage> {
        let offset = (page * hits_per_page) as i64;
        let (rows, total) = self
            .store
            .search_active(query, offset, hits_per_page as i64)
            .await?;

        let nb_hits = total as usize;
        Ok(SearchPage {
            hits: rows.iter().map(SearchRecord::from_listing).collect(),
            nb_hits,
            page,
            nb_pages: nb_hits.div_ceil(hits_per_page),
            hits_per_page,
            // The fallback path carries no timing instrumentation.
            processing_time_ms: 0,
            query: query.to_string(),
        })
    }
}
