// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Full-snapshot synchronization of active listings into the search index.

use crate::models::search::SearchRecord;
use crate::services::db::ListingStore;
use crate::services::search::SearchBackend;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Pushes a complete projection of the active listings into the index.
pub struct SyncService {
    store: Arc<dyn ListingStore>,
    index: Arc<dyn SearchBackend>,
}

impl SyncService {
    pub fn new(store: Arc<dyn ListingStore>, index: Arc<dyn SearchBackend>) -> Self {
        Self { store, index }
    }

    /// Re-index every active listing in one batch upsert keyed by
    /// `objectID`. Returns the number of records pushed.
    ///
    /// A store read failure aborts before anything is written. An index
    /// write failure leaves the index stale until the next successful sync.
    /// Records for listings that have left the active set are not deleted;
    /// they remain until overwritten by a later sync.
    pub async fn sync(&self) -> Result<usize> {
        let listings = self
            .store
            .active_listings()
            .await
            .context("failed to read active listings")?;

        if listings.is_empty() {
            info!("no active listings to sync");
            return Ok(0);
        }

        let records: Vec<SearchRecord> =
            listings.iter().map(SearchRecord::from_listing).collect();

        self.index
            .upsert(&records)
            .await
            .context("failed to push records to the search index")?;

        info!(count = records.len(), "search index sync complete");

        Ok(records.len())
    }
}
