// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of a listing. Only `active` listings are searchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Draft,
    Active,
    Paused,
    Expired,
    Rejected,
    PendingApproval,
}

/// How the listing's price should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    Fixed,
    Hourly,
    Daily,
    Monthly,
    Variable,
    Free,
    Contact,
}

/// A service listing as read from the system of record, with its joins
/// (category names, image URLs, owner display name) already flattened in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromStr for ListingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "draft" => ListingStatus::Draft,
            "active" => ListingStatus::Active,
            "paused" => ListingStatus::Paused,
            "expired" => ListingStatus::Expired,
            "rejected" => ListingStatus::Rejected,
            "pending_approval" => ListingStatus::PendingApproval,
            _ => bail!("unknown listing status: {}", s),
        })
    }
}

// Rust enums have no default Display. Manual impl needed to print the
// snake_case database representation rather than the Debug form.
impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ListingStatus::Draft => "draft",
            ListingStatus::Active => "active",
            ListingStatus::Paused => "paused",
            ListingStatus::Expired => "expired",
            ListingStatus::Rejected => "rejected",
            ListingStatus::PendingApproval => "pending_approval",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PriceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "fixed" => PriceType::Fixed,
            "hourly" => PriceType::Hourly,
            "daily" => PriceType::Daily,
            "monthly" => PriceType::Monthly,
            "variable" => PriceType::Variable,
            "free" => PriceType::Free,
            "contact" => PriceType::Contact,
            _ => bail!("unknown price type: {}", s),
        })
    }
}

impl std::fmt::Display for PriceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PriceType::Fixed => "fixed",
            PriceType::Hourly => "hourly",
            PriceType::Daily => "daily",
            PriceType::Monthly => "monthly",
            PriceType::Variable => "variable",
            PriceType::Free => "free",
            PriceType::Contact => "contact",
        };
        write!(f, "{}", s)
    }
}
