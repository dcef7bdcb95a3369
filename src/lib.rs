// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Search synchronization and query service for marketplace listings.
//!
//! Keeps a hosted Meilisearch index consistent with the Postgres system of
//! record and resolves search requests, falling back to the database when
//! the index is unavailable.

pub mod app;
pub mod models;
pub mod services;
