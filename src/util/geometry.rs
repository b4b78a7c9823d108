// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides rays, rigid transforms, the wall-normal offset rule
//! used when hanging artworks, and the ray-versus-quad test used for picking.
//! Everything here is stateless so several input sources can cast rays in
//! the same frame without sharing scratch state.

use glam::{Quat, Vec2, Vec3};

/// Distance an artwork floats off the wall plane.
pub const WALL_CLEARANCE: f32 = 0.05;

/// A half-line with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray pointing down the local -Z axis of a tracked pose.
    pub fn from_pose(position: Vec3, orientation: Quat) -> Self {
        Self::new(position, orientation * Vec3::NEG_Z)
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Translation, rotation and scale of a scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Map a point from local space into world space.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        self.translation + self.rotation * (local * self.scale)
    }
}

/// Unit vector pointing away from a wall for the given normal angle.
pub fn wall_normal(normal_angle: f32) -> Vec3 {
    Vec3::new(normal_angle.cos(), 0.0, normal_angle.sin())
}

/// Nudge a wall position along its normal so it does not intersect the wall.
pub fn offset_from_wall(position: Vec3, normal_angle: Option<f32>, offset: f32) -> Vec3 {
    match normal_angle {
        Some(angle) => position + wall_normal(angle) * offset,
        None => position,
    }
}

/// Intersect a ray with a double-sided rectangle lying in the local XY plane.
///
/// `half_extents` are already scaled. Returns the distance along the ray to
/// the hit point, or `None` when the ray misses, runs parallel to the quad,
/// or would have to travel backwards.
pub fn intersect_quad(ray: &Ray, center: Vec3, rotation: Quat, half_extents: Vec2) -> Option<f32> {
    let normal = rotation * Vec3::Z;
    let denom = ray.direction.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (center - ray.origin).dot(normal) / denom;
    if !t.is_finite() || t < 0.0 {
        return None;
    }

    let local = rotation.inverse() * (ray.at(t) - center);
    if local.x.abs() <= half_extents.x && local.y.abs() <= half_extents.y {
        Some(t)
    } else {
        None
    }
}
