// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometry and layout helpers.

pub mod geometry;
pub mod layout;
