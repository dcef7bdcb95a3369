// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! In-memory stand-ins for the store and index seams, shared by unit tests.

use crate::models::listing::{Listing, ListingStatus, PriceType};
use crate::models::search::{SearchPage, SearchRecord};
use crate::services::db::ListingStore;
use crate::services::search::SearchBackend;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::Mutex;
use uuid::Uuid;

/// Build a distinct active listing for tests.
pub fn sample_listing(n: usize) -> Listing {
    let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::hours(n as i64);
    Listing {
        id: Uuid::now_v7(),
        title: format!("Listing {}", n),
        description: format!("Description for listing {}", n),
        long_description: None,
        category_name: "Home Services".to_string(),
        subcategory_name: None,
        price: Some(25.0),
        price_type: PriceType::Fixed,
        city: "Porto".to_string(),
        address: None,
        country: Some("PT".to_string()),
        latitude: None,
        longitude: None,
        contact_phone: None,
        contact_email: None,
        status: ListingStatus::Active,
        is_featured: false,
        is_verified: false,
        views: n as i64,
        owner_name: "Owner".to_string(),
        image_urls: Vec::new(),
        created_at: created,
        updated_at: created,
    }
}

/// In-memory [`ListingStore`] with the same match and paging semantics as
/// the Postgres implementation.
pub struct FakeStore {
    pub listings: Vec<Listing>,
}

#[async_trait]
impl ListingStore for FakeStore {
    async fn active_listings(&self) -> Result<Vec<Listing>> {
        Ok(self
            .listings
            .iter()
            .filter(|l| l.status == ListingStatus::Active)
            .cloned()
            .collect())
    }

    async fn search_active(
        &self,
        query: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Listing>, i64)> {
        let needle = query.to_lowercase();
        let matched: Vec<Listing> = self
            .listings
            .iter()
            .filter(|l| l.status == ListingStatus::Active)
            .filter(|l| {
                needle.is_empty()
                    || l.title.to_lowercase().contains(&needle)
                    || l.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        let total = matched.len() as i64;
        let rows = matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((rows, total))
    }
}

/// Store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl ListingStore for FailingStore {
    async fn active_listings(&self) -> Result<Vec<Listing>> {
        Err(anyhow!("store unreachable"))
    }

    async fn search_active(&self, _: &str, _: i64, _: i64) -> Result<(Vec<Listing>, i64)> {
        Err(anyhow!("store unreachable"))
    }
}

/// Index whose every call fails.
pub struct FailingIndex;

#[async_trait]
impl SearchBackend for FailingIndex {
    async fn query(&self, _: &str, _: usize, _: usize, _: &str) -> Result<SearchPage> {
        Err(anyhow!("index unreachable"))
    }

    async fn upsert(&self, _: &[SearchRecord]) -> Result<()> {
        Err(anyhow!("index unreachable"))
    }
}

/// Index that records upserted batches and answers queries with an empty
/// page.
#[derive(Default)]
pub struct RecordingIndex {
    pub records: Mutex<Vec<SearchRecord>>,
}

#[async_trait]
impl SearchBackend for RecordingIndex {
    async fn query(&self, text: &str, _: usize, hits_per_page: usize, _: &str) -> Result<SearchPage> {
        Ok(SearchPage::empty(text, hits_per_page))
    }

    async fn upsert(&self, records: &[SearchRecord]) -> Result<()> {
        self.records.lock().unwrap().extend_from_slice(records);
        Ok(())
    }
}
