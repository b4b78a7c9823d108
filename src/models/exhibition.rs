// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Exhibition configuration.
//!
//! An exhibition describes the room, how artworks are spread along its walls
//! and which artworks are shown. It is what gets loaded from and saved to
//! YAML or JSON files.

use super::artwork::FrameSize;
use super::catalog::{default_catalog, ArtworkRecord};
use super::room::{LayoutOptions, RoomDimensions};
use serde::{Deserialize, Serialize};

/// Complete exhibition data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exhibition {
    pub room: RoomDimensions,
    pub layout: LayoutOptions,
    /// Frame size used until each image has loaded
    pub frame: FrameSize,
    pub catalog: Vec<ArtworkRecord>,
}

impl Default for Exhibition {
    fn default() -> Self {
        Self {
            room: RoomDimensions::default(),
            layout: LayoutOptions::default(),
            frame: FrameSize::default(),
            catalog: default_catalog(),
        }
    }
}

impl Exhibition {
    /// Create an exhibition for the given room with an empty catalog.
    pub fn new(room: RoomDimensions) -> Self {
        Self {
            room,
            catalog: Vec::new(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exhibition() {
        let exhibition = Exhibition::default();
        assert_eq!(exhibition.room, RoomDimensions::new(10.0, 4.0, 10.0));
        assert_eq!(exhibition.layout.spacing, 2.2);
        assert_eq!(exhibition.catalog.len(), 8);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let yaml = "room:\n  width: 12.0\n  height: 5.0\n  depth: 8.0\n";
        let exhibition: Exhibition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(exhibition.room.width, 12.0);
        assert_eq!(exhibition.layout, LayoutOptions::default());
        assert_eq!(exhibition.catalog.len(), 8);
    }

    #[test]
    fn test_record_fields_are_flat() {
        let json = r#"{
            "catalog": [{
                "title": "Untitled",
                "artist": "Unknown",
                "year": "2024",
                "description": "",
                "image": "art/untitled.png"
            }]
        }"#;
        let exhibition: Exhibition = serde_json::from_str(json).unwrap();
        assert_eq!(exhibition.catalog.len(), 1);
        assert_eq!(exhibition.catalog[0].metadata.title, "Untitled");
        assert_eq!(exhibition.catalog[0].image, "art/untitled.png");
    }
}
