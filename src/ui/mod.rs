// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components drawn over the gallery view.

pub mod overlay;
pub mod toolbar;
