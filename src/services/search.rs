// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Meilisearch client wrapper for the listing index.

use crate::models::search::{SearchPage, SearchRecord};
use anyhow::Result;
use async_trait::async_trait;
use meilisearch_sdk::client::Client;
use meilisearch_sdk::search::Selectors;
use meilisearch_sdk::settings::{MinWordSizeForTypos, TypoToleranceSettings};
use tracing::info;

/// The hosted search index, as seen by the sync and query services. Paging is
/// zero-based on this seam; the Meilisearch implementation translates to the
/// SDK's one-based pages.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a query against the index. Any error here makes the query service
    /// fall back to the system of record.
    async fn query(
        &self,
        text: &str,
        page: usize,
        hits_per_page: usize,
        filter: &str,
    ) -> Result<SearchPage>;

    /// Upsert the full batch in one call, keyed by `objectID`. Records with
    /// an existing key are overwritten.
    async fn upsert(&self, records: &[SearchRecord]) -> Result<()>;
}

/// Meilisearch-backed implementation of [`SearchBackend`].
pub struct MeiliBackend {
    client: Client,
    index_name: String,
}

impl MeiliBackend {
    /// Create a new Meilisearch client.
    pub fn new(host: &str, index_name: String, api_key: Option<String>) -> Result<Self> {
        // Construct the full URL if only host:port is provided
        let url = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };

        let client = Client::new(&url, api_key)?;

        Ok(Self { client, index_name })
    }

    /// Initialize the listing index settings. Out of band of the hot path;
    /// run once at startup or after pointing at a fresh index.
    pub async fn init_index(&self) -> Result<()> {
        let index = self.client.index(&self.index_name);

        // Attribute priority: title outranks description, description
        // outranks the rest.
        let searchable_attrs = vec![
            "title",
            "description",
            "long_description",
            "city",
            "category_name",
            "subcategory_name",
            "address",
            "owner_name",
        ];
        index
            .set_searchable_attributes(searchable_attrs)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to set searchable attributes: {}", e))?;

        let filterable_attrs = vec![
            "category_name",
            "subcategory_name",
            "city",
            "price_type",
            "status",
            "is_featured",
            "is_verified",
            "_tags",
        ];
        index
            .set_filterable_attributes(filterable_attrs)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to set filterable attributes: {}", e))?;

        // Defaults first, then the custom ranking: featured above verified
        // above most-viewed above newest.
        let ranking_rules = vec![
            "words",
            "typo",
            "proximity",
            "attribute",
            "sort",
            "exactness",
            "is_featured:desc",
            "is_verified:desc",
            "views:desc",
            "created_at:desc",
        ];
        index
            .set_ranking_rules(ranking_rules)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to set ranking rules: {}", e))?;

        let typo_tolerance = TypoToleranceSettings {
            enabled: Some(true),
            disable_on_attributes: None,
            disable_on_words: None,
            min_word_size_for_typos: Some(MinWordSizeForTypos {
                one_typo: Some(4),
                two_typos: Some(8),
            }),
        };
        index
            .set_typo_tolerance(&typo_tolerance)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to set typo tolerance: {}", e))?;

        info!(index = %self.index_name, "initialized search index settings");

        Ok(())
    }
}

#[async_trait]
impl SearchBackend for MeiliBackend {
    async fn query(
        &self,
        text: &str,
        page: usize,
        hits_per_page: usize,
        filter: &str,
    ) -> Result<SearchPage> {
        let index = self.client.index(&self.index_name);

        // Meilisearch pages are one-based; the service contract is zero-based.
        let results = index
            .search()
            .with_query(text)
            .with_page(page + 1)
            .with_hits_per_page(hits_per_page)
            .with_filter(filter)
            .with_attributes_to_highlight(Selectors::Some(&["title", "description"]))
            .with_highlight_pre_tag("<em>")
            .with_highlight_post_tag("</em>")
            .execute::<SearchRecord>()
            .await
            .map_err(|e| anyhow::anyhow!("Search failed: {}", e))?;

        Ok(SearchPage {
            hits: results.hits.into_iter().map(|hit| hit.result).collect(),
            nb_hits: results.total_hits.unwrap_or(0),
            page,
            nb_pages: results.total_pages.unwrap_or(0),
            hits_per_page: results.hits_per_page.unwrap_or(hits_per_page),
            processing_time_ms: results.processing_time_ms,
            query: results.query,
        })
    }

    async fn upsert(&self, records: &[SearchRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let index = self.client.index(&self.index_name);

        index
            .add_documents(records, Some("objectID"))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to batch index records: {}", e))?;

        info!(count = records.len(), "pushed records to search index");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_creation_adds_scheme() {
        let backend = MeiliBackend::new("127.0.0.1:7700", "listings".to_string(), None);
        assert!(backend.is_ok());
    }

    #[test]
    fn test_backend_creation_keeps_explicit_scheme() {
        let backend = MeiliBackend::new("https://search.example.com", "listings".to_string(), None);
        assert!(backend.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires Meilisearch running
    async fn test_init_index() {
        let backend = MeiliBackend::new("http://127.0.0.1:7700", "listings_test".to_string(), None)
            .expect("Failed to create backend");

        let result = backend.init_index().await;
        assert!(result.is_ok());
    }
}
