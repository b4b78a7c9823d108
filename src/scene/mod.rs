// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Retained scene description.
//!
//! The gallery is assembled from flat planes and boxes with simple standard
//! materials, lit by ambient, spot and directional lights. The renderer reads
//! this description every frame; nothing here knows how it is drawn.

pub mod camera;

use crate::util::geometry::Transform;
use glam::Vec3;

/// Packed `0xRRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x000000);
    pub const WHITE: Rgb = Rgb(0xffffff);

    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub fn b(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Channels as floats in `0.0..=1.0`.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r() as f32, self.g() as f32, self.b() as f32) / 255.0
    }
}

/// Physically-inspired surface description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
}

impl Material {
    pub fn standard(color: Rgb, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness,
            opacity: 1.0,
            emissive: Rgb::BLACK,
            emissive_intensity: 0.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_emissive(mut self, emissive: Rgb, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }
}

/// Primitive geometry, centered on the local origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Rectangle in the local XY plane facing +Z
    Plane { width: f32, height: f32 },
    Cuboid { width: f32, height: f32, depth: f32 },
}

/// A drawable object.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub shape: Shape,
    pub material: Material,
    pub transform: Transform,
    /// Meshes with a higher order are drawn later among coplanar surfaces
    pub render_order: i32,
}

impl Mesh {
    pub fn new(name: impl Into<String>, shape: Shape, material: Material, transform: Transform) -> Self {
        Self {
            name: name.into(),
            shape,
            material,
            transform,
            render_order: 0,
        }
    }

    pub fn with_render_order(mut self, order: i32) -> Self {
        self.render_order = order;
        self
    }
}

/// Light sources supported by the gallery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient {
        color: Rgb,
        intensity: f32,
    },
    Spot {
        color: Rgb,
        intensity: f32,
        position: Vec3,
        target: Vec3,
        /// Range of the light; zero means unlimited
        distance: f32,
        /// Half-angle of the cone in radians
        angle: f32,
        penumbra: f32,
        decay: f32,
    },
    Directional {
        color: Rgb,
        intensity: f32,
        position: Vec3,
        target: Vec3,
    },
}

/// Everything that is drawn besides the artworks themselves.
#[derive(Debug, Clone)]
pub struct Scene {
    background: Rgb,
    meshes: Vec<Mesh>,
    lights: Vec<Light>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            background: Rgb::BLACK,
            meshes: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn set_background(&mut self, color: Rgb) {
        self.background = color;
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Approximate colored light arriving at a surface point.
    ///
    /// `normal` must face the viewer. Spot cones fade across the penumbra
    /// and with distance following the light's decay exponent.
    pub fn irradiance(&self, point: Vec3, normal: Vec3) -> Vec3 {
        let mut total = Vec3::ZERO;

        for light in &self.lights {
            total += match *light {
                Light::Ambient { color, intensity } => color.to_vec3() * intensity,
                Light::Directional {
                    color,
                    intensity,
                    position,
                    target,
                    ..
                } => {
                    let to_light = (position - target).normalize_or_zero();
                    color.to_vec3() * intensity * normal.dot(to_light).max(0.0)
                }
                Light::Spot {
                    color,
                    intensity,
                    position,
                    target,
                    distance,
                    angle,
                    penumbra,
                    decay,
                    ..
                } => {
                    let offset = position - point;
                    let range = offset.length();
                    if range < 1e-6 {
                        continue;
                    }
                    let to_light = offset / range;

                    let axis = (target - position).normalize_or_zero();
                    let cos_outer = angle.cos();
                    let cos_inner = (angle * (1.0 - penumbra)).cos();
                    let cos_theta = axis.dot(-to_light);
                    let cone = smoothstep(cos_outer, cos_inner, cos_theta);

                    let falloff = if distance > 0.0 {
                        (1.0 - range / distance).clamp(0.0, 1.0).powf(decay)
                    } else {
                        1.0
                    };

                    color.to_vec3() * intensity * cone * falloff * normal.dot(to_light).max(0.0)
                }
            };
        }

        total
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x >= edge0 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
