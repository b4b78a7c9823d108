// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Room and wall placement data structures.
//!
//! This module defines the gallery room dimensions, the options that drive
//! the wall layout, and the placement slots the layout produces.

use anyhow::{bail, Result};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Largest accepted room side in meters.
pub const MAX_ROOM_EXTENT: f32 = 1000.0;

/// Interior size of the gallery room in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for RoomDimensions {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 4.0,
            depth: 10.0,
        }
    }
}

impl RoomDimensions {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }

    /// Reject sides that are not finite, not positive or above [`MAX_ROOM_EXTENT`].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height), ("depth", self.depth)] {
            if !value.is_finite() || value <= 0.0 || value > MAX_ROOM_EXTENT {
                bail!(
                    "Room {} must be between 0 and {} meters, got {}",
                    name,
                    MAX_ROOM_EXTENT,
                    value
                );
            }
        }
        Ok(())
    }
}

/// Parameters for distributing artworks along the walls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Center-to-center distance between neighbouring artworks
    pub spacing: f32,
    /// Height of an artwork's center above the floor
    pub hanging_height: f32,
    /// Distance of a slot from the wall plane
    pub wall_offset: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            spacing: 2.2,
            hanging_height: 1.5,
            wall_offset: 0.05,
        }
    }
}

/// One of the four walls of the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    North,
    South,
    East,
    West,
}

impl Wall {
    /// Layout order of the walls.
    pub const ALL: [Wall; 4] = [Wall::North, Wall::South, Wall::East, Wall::West];
}

/// A precomputed wall-mounted position for a single artwork.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementSlot {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rotation about the vertical axis so the artwork faces into the room
    pub rotation_y: f32,
    /// Direction used to push the artwork off the wall surface
    pub normal_angle: Option<f32>,
    pub wall: Wall,
}

impl PlacementSlot {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.rotation_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_room_is_valid() {
        assert!(RoomDimensions::default().validate().is_ok());
        assert!(RoomDimensions::new(MAX_ROOM_EXTENT, 4.0, 0.5).validate().is_ok());
    }

    #[test]
    fn test_unusable_rooms_are_rejected() {
        assert!(RoomDimensions::new(f32::INFINITY, 4.0, 10.0).validate().is_err());
        assert!(RoomDimensions::new(10.0, f32::NAN, 10.0).validate().is_err());
        assert!(RoomDimensions::new(10.0, 4.0, 0.0).validate().is_err());
        assert!(RoomDimensions::new(-3.0, 4.0, 10.0).validate().is_err());
        assert!(RoomDimensions::new(1e20, 4.0, 10.0).validate().is_err());
    }
}
