// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod listing;
pub mod search;
pub mod sync;
pub mod version;
