// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod db;
pub mod query;
pub mod search;
pub mod sync;

#[cfg(test)]
pub mod testutil;
