// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Perspective camera and navigation controls.

use crate::util::geometry::Ray;
use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Eye height of a standing visitor.
pub const EYE_HEIGHT: f32 = 1.6;

/// Distance moved per keyboard step.
pub const WALK_STEP: f32 = 0.1;

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera standing near the middle of the room looking at the north wall.
    pub fn gallery_default(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, EYE_HEIGHT, 3.0),
            target: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            up: Vec3::Y,
            aspect,
            fovy: 75.0_f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Follow the viewport size; degenerate sizes are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Ray through a point given in normalized device coordinates (-1..1, +y up).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = (self.projection_matrix() * self.view_matrix()).inverse();
        let through = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.eye, through - self.eye)
    }

    /// Ray straight down the view axis.
    pub fn center_ray(&self) -> Ray {
        Ray::new(self.eye, self.forward())
    }
}

/// Keyboard walking directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward,
    Backward,
    Left,
    Right,
}

/// Orbit navigation around a target point with damping.
pub struct OrbitControls {
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar_angle: f32,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,

    // Pending spherical rotation (theta, phi) still to be applied
    sphere_delta: Vec2,
    zoom_scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            min_distance: 1.0,
            max_distance: 10.0,
            max_polar_angle: FRAC_PI_2,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            sphere_delta: Vec2::ZERO,
            zoom_scale: 1.0,
        }
    }
}

impl OrbitControls {
    /// Queue a rotation from a pointer drag measured in pixels.
    pub fn rotate(&mut self, drag: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let full_turn = std::f32::consts::TAU * self.rotate_speed / viewport_height;
        self.sphere_delta.x -= drag.x * full_turn;
        self.sphere_delta.y -= drag.y * full_turn;
    }

    /// Queue a dolly step; positive scroll moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        if scroll == 0.0 {
            return;
        }
        let factor = 0.95_f32.powf(self.zoom_speed * scroll.abs() / 50.0);
        if scroll > 0.0 {
            self.zoom_scale *= factor;
        } else {
            self.zoom_scale /= factor;
        }
    }

    /// Walk the camera and its target together.
    pub fn walk(&self, camera: &mut Camera, step: Step) {
        let forward = camera.forward();
        let flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        let right = flat.cross(Vec3::Y).normalize_or_zero();

        let delta = match step {
            Step::Forward => forward * WALK_STEP,
            Step::Backward => -forward * WALK_STEP,
            Step::Left => -right * WALK_STEP,
            Step::Right => right * WALK_STEP,
        };

        camera.eye += delta;
        camera.target += delta;
    }

    /// Whether queued motion is still being damped out.
    pub fn is_animating(&self) -> bool {
        self.sphere_delta.length_squared() > 1e-8 || (self.zoom_scale - 1.0).abs() > 1e-4
    }

    /// Apply a damped share of the queued motion to the camera.
    pub fn update(&mut self, camera: &mut Camera) {
        let offset = camera.eye - camera.target;
        let mut radius = offset.length();
        if radius < 1e-6 {
            return;
        }

        // Spherical coordinates with +Y as the polar axis
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.sphere_delta.x * self.damping_factor;
        phi += self.sphere_delta.y * self.damping_factor;
        phi = phi.clamp(1e-6, self.max_polar_angle.min(std::f32::consts::PI - 1e-6));

        let zoom_step = 1.0 + (self.zoom_scale - 1.0) * self.damping_factor;
        radius = (radius * zoom_step).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.eye = camera.target + new_offset;

        self.sphere_delta *= 1.0 - self.damping_factor;
        self.zoom_scale = 1.0 + (self.zoom_scale - 1.0) * (1.0 - self.damping_factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_matches_ndc_origin() {
        let camera = Camera::gallery_default(16.0 / 9.0);
        let center = camera.ray_from_ndc(Vec2::ZERO);
        assert!((center.origin - camera.eye).length() < 0.0001);
        assert!((center.direction - Vec3::NEG_Z).length() < 0.001);
        assert!((camera.center_ray().direction - Vec3::NEG_Z).length() < 0.0001);
    }

    #[test]
    fn test_ndc_corner_rays_diverge() {
        let camera = Camera::gallery_default(1.0);
        let right = camera.ray_from_ndc(Vec2::new(1.0, 0.0));
        let up = camera.ray_from_ndc(Vec2::new(0.0, 1.0));
        assert!(right.direction.x > 0.0);
        assert!(up.direction.y > 0.0);
        // Half the vertical field of view
        let angle = up.direction.angle_between(Vec3::NEG_Z);
        assert!((angle - 37.5_f32.to_radians()).abs() < 0.001);
    }

    #[test]
    fn test_viewport_updates_aspect() {
        let mut camera = Camera::gallery_default(1.0);
        camera.set_viewport(1920.0, 1080.0);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 0.0001);
        camera.set_viewport(0.0, 1080.0);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 0.0001);
    }

    #[test]
    fn test_walk_moves_eye_and_target() {
        let mut camera = Camera::gallery_default(1.0);
        let controls = OrbitControls::default();

        controls.walk(&mut camera, Step::Forward);
        assert!((camera.eye.z - 2.9).abs() < 0.0001);
        assert!((camera.target.z + 0.1).abs() < 0.0001);

        controls.walk(&mut camera, Step::Left);
        assert!((camera.eye.x + 0.1).abs() < 0.0001);

        controls.walk(&mut camera, Step::Right);
        controls.walk(&mut camera, Step::Backward);
        assert!((camera.eye - Vec3::new(0.0, EYE_HEIGHT, 3.0)).length() < 0.0001);
    }

    #[test]
    fn test_orbit_respects_distance_limits() {
        let mut camera = Camera::gallery_default(1.0);
        let mut controls = OrbitControls::default();
        for _ in 0..200 {
            controls.zoom(-500.0);
            controls.update(&mut camera);
        }
        let distance = (camera.eye - camera.target).length();
        assert!(distance <= 10.0 + 0.0001);
    }

    #[test]
    fn test_orbit_keeps_camera_above_floor_plane() {
        let mut camera = Camera::gallery_default(1.0);
        let mut controls = OrbitControls::default();
        for _ in 0..100 {
            controls.rotate(Vec2::new(0.0, -400.0), 600.0);
            controls.update(&mut camera);
        }
        assert!(camera.eye.y >= camera.target.y - 0.0001);
    }

    #[test]
    fn test_damping_settles() {
        let mut camera = Camera::gallery_default(1.0);
        let mut controls = OrbitControls::default();
        controls.rotate(Vec2::new(100.0, 0.0), 600.0);
        assert!(controls.is_animating());
        for _ in 0..1000 {
            controls.update(&mut camera);
        }
        assert!(!controls.is_animating());
    }
}
