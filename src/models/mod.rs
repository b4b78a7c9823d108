// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for the gallery: room, artworks, catalog and exhibition.

pub mod artwork;
pub mod catalog;
pub mod exhibition;
pub mod room;
