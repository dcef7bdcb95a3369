// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::listing::{Listing, ListingStatus, PriceType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Denormalized projection of a [`Listing`] as stored in the search index.
///
/// Timestamps are epoch seconds so the index's custom ranking can order on
/// them numerically. The same shape is returned by both the index path and
/// the database fallback path, so callers never know which one answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchRecord {
    /// Stable record key in the index, equal to the source listing's id.
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub category_name: String,
    pub subcategory_name: Option<String>,
    pub price: Option<f64>,
    pub price_type: PriceType,
    pub city: String,
    pub address: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub status: ListingStatus,
    pub is_featured: bool,
    pub is_verified: bool,
    pub views: i64,
    pub owner_name: String,
    pub image_urls: Vec<String>,
    /// Seconds since epoch.
    pub created_at: i64,
    /// Seconds since epoch.
    pub updated_at: i64,
    /// Facet tags: `category:<name>`, `city:<name>`, `status:<value>`, plus
    /// bare `featured` / `verified` flags. Empty segments are omitted.
    #[serde(rename = "_tags")]
    pub tags: Vec<String>,
}

impl SearchRecord {
    /// Project a listing into its index record.
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            object_id: listing.id.to_string(),
            title: listing.title.clone(),
            description: listing.description.clone(),
            long_description: listing.long_description.clone(),
            category_name: listing.category_name.clone(),
            subcategory_name: listing.subcategory_name.clone(),
            price: listing.price,
            price_type: listing.price_type,
            city: listing.city.clone(),
            address: listing.address.clone(),
            country: listing.country.clone(),
            latitude: listing.latitude,
            longitude: listing.longitude,
            contact_phone: listing.contact_phone.clone(),
            contact_email: listing.contact_email.clone(),
            status: listing.status,
            is_featured: listing.is_featured,
            is_verified: listing.is_verified,
            views: listing.views,
            owner_name: listing.owner_name.clone(),
            image_urls: listing.image_urls.clone(),
            created_at: listing.created_at.timestamp(),
            updated_at: listing.updated_at.timestamp(),
            tags: build_tags(listing),
        }
    }
}

/// Build the facet tag list for a listing.
pub fn build_tags(listing: &Listing) -> Vec<String> {
    let mut tags = Vec::new();
    if !listing.category_name.is_empty() {
        tags.push(format!("category:{}", listing.category_name));
    }
    if !listing.city.is_empty() {
        tags.push(format!("city:{}", listing.city));
    }
    tags.push(format!("status:{}", listing.status));
    if listing.is_featured {
        tags.push("featured".to_string());
    }
    if listing.is_verified {
        tags.push("verified".to_string());
    }
    tags
}

/// Incoming search request.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct SearchRequest {
    /// Free-text query. Empty means match-all.
    #[serde(default)]
    pub query: String,
    /// Zero-based page index, default 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    /// Page size, default 12.
    #[serde(rename = "hitsPerPage", skip_serializing_if = "Option::is_none")]
    pub hits_per_page: Option<usize>,
    /// Facet filter expression, default restricts to active listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
}

/// One page of search results plus pagination metadata. Both the index path
/// and the database fallback populate every field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchPage {
    pub hits: Vec<SearchRecord>,
    #[serde(rename = "nbHits")]
    pub nb_hits: usize,
    pub page: usize,
    #[serde(rename = "nbPages")]
    pub nb_pages: usize,
    #[serde(rename = "hitsPerPage")]
    pub hits_per_page: usize,
    /// Index-reported processing time; always 0 on the fallback path.
    #[serde(rename = "processingTimeMS")]
    pub processing_time_ms: usize,
    pub query: String,
}

impl SearchPage {
    /// The zero-hit page returned when both backends fail.
    pub fn empty(query: &str, hits_per_page: usize) -> Self {
        Self {
            hits: Vec::new(),
            nb_hits: 0,
            page: 0,
            nb_pages: 0,
            hits_per_page,
            processing_time_ms: 0,
            query: query.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn listing() -> Listing {
        Listing {
            id: Uuid::now_v7(),
            title: "Plumbing repairs".to_string(),
            description: "Fast residential plumbing".to_string(),
            long_description: Some("Available on weekends too".to_string()),
            category_name: "Home Services".to_string(),
            subcategory_name: Some("Plumbing".to_string()),
            price: Some(40.0),
            price_type: PriceType::Hourly,
            city: "Lisbon".to_string(),
            address: Some("Rua Augusta 1".to_string()),
            country: Some("PT".to_string()),
            latitude: Some(38.71),
            longitude: Some(-9.14),
            contact_phone: Some("+351000000000".to_string()),
            contact_email: Some("pro@example.com".to_string()),
            status: ListingStatus::Active,
            is_featured: false,
            is_verified: false,
            views: 7,
            owner_name: "Maria".to_string(),
            image_urls: vec!["https://img.example.com/1.jpg".to_string()],
            created_at: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 1, 16, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_record_keyed_by_listing_id() {
        let l = listing();
        let record = SearchRecord::from_listing(&l);
        assert_eq!(record.object_id, l.id.to_string());
        assert!(record.tags.contains(&"status:active".to_string()));
    }

    #[test]
    fn test_record_timestamps_are_epoch_seconds() {
        let l = listing();
        let record = SearchRecord::from_listing(&l);
        assert_eq!(record.created_at, l.created_at.timestamp());
        assert_eq!(record.updated_at, l.updated_at.timestamp());
    }

    #[test]
    fn test_object_id_serializes_with_index_key_name() {
        let record = SearchRecord::from_listing(&listing());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("objectID").is_some());
        assert!(json.get("_tags").is_some());
        assert!(json.get("object_id").is_none());
    }

    #[test]
    fn test_tags_featured_without_verified() {
        let mut l = listing();
        l.is_featured = true;
        l.is_verified = false;
        let tags = build_tags(&l);
        assert!(tags.contains(&"featured".to_string()));
        assert!(!tags.contains(&"verified".to_string()));
    }

    #[test]
    fn test_tags_include_category_and_city() {
        let tags = build_tags(&listing());
        assert!(tags.contains(&"category:Home Services".to_string()));
        assert!(tags.contains(&"city:Lisbon".to_string()));
    }

    #[test]
    fn test_tags_omit_empty_segments() {
        let mut l = listing();
        l.city = String::new();
        let tags = build_tags(&l);
        assert!(!tags.iter().any(|t| t.starts_with("city:")));
    }

    #[test]
    fn test_empty_page_shape() {
        let page = SearchPage::empty("anything", 12);
        assert!(page.hits.is_empty());
        assert_eq!(page.nb_hits, 0);
        assert_eq!(page.page, 0);
        assert_eq!(page.nb_pages, 0);
        assert_eq!(page.hits_per_page, 12);
        assert_eq!(page.processing_time_ms, 0);
        assert_eq!(page.query, "anything");
    }
}
