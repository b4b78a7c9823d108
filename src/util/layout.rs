// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Wall layout generation.
//!
//! Artworks are spread evenly along each wall, centered on the wall's
//! midpoint, in the order north, south, east, west.

use crate::models::room::{LayoutOptions, PlacementSlot, RoomDimensions, Wall, MAX_ROOM_EXTENT};
use std::f32::consts::{FRAC_PI_2, PI};

/// Number of artworks that fit on a wall of the given length.
///
/// One spacing interval is left free so the outermost artworks keep clear
/// of the corners. Short walls, and walls that are not finite or longer
/// than [`MAX_ROOM_EXTENT`], produce zero slots.
pub fn slots_per_wall(wall_length: f32, spacing: f32) -> usize {
    if !wall_length.is_finite() || wall_length > MAX_ROOM_EXTENT || !spacing.is_finite() || spacing <= 0.0 {
        return 0;
    }
    let count = (wall_length / spacing).floor() as i64 - 1;
    count.max(0) as usize
}

/// Offsets along a wall, centered on the wall's midpoint.
pub fn wall_offsets(wall_length: f32, spacing: f32) -> Vec<f32> {
    let count = slots_per_wall(wall_length, spacing);
    let start = -((count as f32) - 1.0) * spacing / 2.0;
    (0..count).map(|i| start + i as f32 * spacing).collect()
}

/// Generate every placement slot of the room.
pub fn generate_slots(room: &RoomDimensions, options: &LayoutOptions) -> Vec<PlacementSlot> {
    let spacing = options.spacing;
    if !spacing.is_finite() || spacing <= 0.0 {
        log::warn!("Invalid artwork spacing {}, no slots generated", spacing);
        return Vec::new();
    }

    let height = options.hanging_height;
    let offset = options.wall_offset;
    let mut slots = Vec::new();

    for wall in Wall::ALL {
        let (length, rotation_y, normal_angle) = match wall {
            Wall::North => (room.width, 0.0, PI),
            Wall::South => (room.width, PI, 0.0),
            Wall::East => (room.depth, -FRAC_PI_2, FRAC_PI_2),
            Wall::West => (room.depth, FRAC_PI_2, -FRAC_PI_2),
        };

        for along in wall_offsets(length, spacing) {
            let (x, z) = match wall {
                Wall::North => (along, -room.depth / 2.0 + offset),
                Wall::South => (along, room.depth / 2.0 - offset),
                Wall::East => (room.width / 2.0 - offset, along),
                Wall::West => (-room.width / 2.0 + offset, along),
            };

            slots.push(PlacementSlot {
                x,
                y: height,
                z,
                rotation_y,
                normal_angle: Some(normal_angle),
                wall,
            });
        }
    }

    log::debug!("Generated {} placement slots", slots.len());
    slots
}
