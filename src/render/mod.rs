// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scene drawing through egui.
//!
//! Every surface is a flat quad. Quads are moved into view space, clipped
//! against the near plane, flat shaded from the scene lights and painted
//! back to front. The room is convex and viewed from inside, so its culled
//! walls never overlap; artworks are painted after the room because they
//! always hang in front of a wall.

use crate::models::artwork::{Artwork, ArtworkId};
use crate::scene::camera::Camera;
use crate::scene::{Material, Scene, Shape};
use crate::util::geometry::{Ray, Transform};
use egui::{Color32, Pos2, Rect, Stroke, TextureHandle, TextureId};
use glam::{Mat4, Vec2, Vec3};
use std::collections::HashMap;

/// Camera matrices bound to a screen rectangle.
pub struct Viewport {
    rect: Rect,
    view: Mat4,
    projection: Mat4,
    near: f32,
    eye: Vec3,
}

impl Viewport {
    pub fn new(camera: &Camera, rect: Rect) -> Self {
        Self {
            rect,
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            near: camera.znear,
            eye: camera.eye,
        }
    }

    fn to_view(&self, world: Vec3) -> Vec3 {
        self.view.transform_point3(world)
    }

    fn view_to_screen(&self, view: Vec3) -> Pos2 {
        let clip = self.projection * view.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        egui::pos2(
            self.rect.left() + (ndc.x + 1.0) * 0.5 * self.rect.width(),
            self.rect.top() + (1.0 - ndc.y) * 0.5 * self.rect.height(),
        )
    }

    /// Normalized device coordinates of a screen position.
    pub fn ndc(&self, pos: Pos2) -> Vec2 {
        Vec2::new(
            (pos.x - self.rect.left()) / self.rect.width() * 2.0 - 1.0,
            -((pos.y - self.rect.top()) / self.rect.height() * 2.0 - 1.0),
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct Corner {
    view: Vec3,
    uv: Vec2,
}

/// A quad in world space with its outward normal.
struct Quad {
    corners: [Vec3; 4],
    normal: Vec3,
}

/// A clipped polygon ready to paint.
struct Face {
    corners: Vec<Corner>,
    color: Color32,
    texture: Option<TextureId>,
    depth: f32,
}

// Corners run top-left, top-right, bottom-right, bottom-left seen from the front
const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

fn local_quad(center: Vec3, right: Vec3, up: Vec3) -> ([Vec3; 4], Vec3) {
    (
        [center - right + up, center + right + up, center + right - up, center - right - up],
        right.cross(up).normalize_or_zero(),
    )
}

fn shape_quads(shape: &Shape, transform: &Transform) -> Vec<Quad> {
    let locals = match *shape {
        Shape::Plane { width, height } => {
            vec![local_quad(Vec3::ZERO, Vec3::X * width / 2.0, Vec3::Y * height / 2.0)]
        }
        Shape::Cuboid { width, height, depth } => {
            let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
            vec![
                local_quad(Vec3::Z * z, Vec3::X * x, Vec3::Y * y),
                local_quad(-Vec3::Z * z, -Vec3::X * x, Vec3::Y * y),
                local_quad(Vec3::X * x, -Vec3::Z * z, Vec3::Y * y),
                local_quad(-Vec3::X * x, Vec3::Z * z, Vec3::Y * y),
                local_quad(Vec3::Y * y, Vec3::X * x, -Vec3::Z * z),
                local_quad(-Vec3::Y * y, Vec3::X * x, Vec3::Z * z),
            ]
        }
    };

    locals
        .into_iter()
        .map(|(corners, normal)| Quad {
            corners: corners.map(|c| transform.apply(c)),
            normal: (transform.rotation * normal).normalize_or_zero(),
        })
        .collect()
}

/// Keep the part of a polygon in front of the near plane.
fn clip_near(corners: &[Corner], near: f32) -> Vec<Corner> {
    let inside = |c: &Corner| c.view.z <= -near;
    let mut clipped = Vec::with_capacity(corners.len() + 2);

    for (i, current) in corners.iter().enumerate() {
        let next = &corners[(i + 1) % corners.len()];
        if inside(current) {
            clipped.push(*current);
        }
        if inside(current) != inside(next) {
            let t = (-near - current.view.z) / (next.view.z - current.view.z);
            clipped.push(Corner {
                view: current.view.lerp(next.view, t),
                uv: current.uv.lerp(next.uv, t),
            });
        }
    }

    clipped
}

fn to_color32(color: Vec3, opacity: f32) -> Color32 {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    Color32::from_rgba_unmultiplied(c.x as u8, c.y as u8, c.z as u8, (opacity.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Flat shade a lit surface.
fn shade(scene: &Scene, material: &Material, point: Vec3, normal: Vec3) -> Color32 {
    // Smooth and metallic surfaces pick up a little extra sheen
    let sheen = (1.0 - material.roughness) * 0.05 + material.metalness * 0.05;
    let light = scene.irradiance(point, normal) + Vec3::splat(sheen);
    let lit = material.color.to_vec3() * light + material.emissive.to_vec3() * material.emissive_intensity;
    to_color32(lit, material.opacity)
}

/// Turn a world quad into a paintable face, or nothing if it is hidden.
fn make_face(
    viewport: &Viewport,
    quad: &Quad,
    double_sided: bool,
    color: impl FnOnce(Vec3, Vec3) -> Color32,
    texture: Option<TextureId>,
) -> Option<Face> {
    let center = quad.corners.iter().copied().sum::<Vec3>() / 4.0;
    let facing = (viewport.eye - center).dot(quad.normal) > 0.0;
    if !facing && !double_sided {
        return None;
    }
    let normal = if facing { quad.normal } else { -quad.normal };

    let corners: Vec<Corner> = quad
        .corners
        .iter()
        .zip(QUAD_UVS)
        .map(|(world, uv)| Corner {
            view: viewport.to_view(*world),
            uv,
        })
        .collect();

    let corners = clip_near(&corners, viewport.near);
    if corners.len() < 3 {
        return None;
    }

    Some(Face {
        corners,
        color: color(center, normal),
        texture,
        depth: (center - viewport.eye).length(),
    })
}

fn paint_face(painter: &egui::Painter, viewport: &Viewport, face: &Face) {
    let points: Vec<Pos2> = face.corners.iter().map(|c| viewport.view_to_screen(c.view)).collect();

    match face.texture {
        Some(texture) => {
            let mut mesh = egui::Mesh::with_texture(texture);
            for (pos, corner) in points.iter().zip(&face.corners) {
                mesh.vertices.push(egui::epaint::Vertex {
                    pos: *pos,
                    uv: egui::pos2(corner.uv.x, corner.uv.y),
                    color: face.color,
                });
            }
            for i in 1..points.len() as u32 - 1 {
                mesh.add_triangle(0, i, i + 1);
            }
            painter.add(egui::Shape::mesh(mesh));
        }
        None => {
            painter.add(egui::Shape::convex_polygon(points, face.color, Stroke::NONE));
        }
    }
}

fn artwork_faces(
    viewport: &Viewport,
    scene: &Scene,
    artwork: &Artwork,
    textures: &HashMap<ArtworkId, TextureHandle>,
) -> Vec<Face> {
    let mut faces = Vec::new();

    // Canvas first so the frame bars paint over its edges
    if let (Some(canvas), Some(transform)) = (artwork.canvas(), artwork.canvas_transform()) {
        let shape = Shape::Plane {
            width: canvas.width,
            height: canvas.height,
        };
        let texture = textures.get(&artwork.id()).map(|t| t.id());
        for quad in shape_quads(&shape, &transform) {
            // Unlit, like a backlit print
            let tint = if texture.is_some() {
                Color32::WHITE
            } else {
                Color32::from_gray(90)
            };
            faces.extend(make_face(viewport, &quad, true, |_, _| tint, texture));
        }
    }

    let material = artwork.frame_material();
    for bar in artwork.frame_bars() {
        let shape = Shape::Cuboid {
            width: bar.size.x,
            height: bar.size.y,
            depth: bar.size.z,
        };
        let transform = Transform::from_translation(bar.center).with_rotation(bar.rotation);
        for quad in shape_quads(&shape, &transform) {
            faces.extend(make_face(
                viewport,
                &quad,
                false,
                |point, normal| shade(scene, &material, point, normal),
                None,
            ));
        }
    }

    faces
}

/// Paint the room, the artworks and any controller pointers.
pub fn paint(
    painter: &egui::Painter,
    viewport: &Viewport,
    scene: &Scene,
    artworks: &[Artwork],
    textures: &HashMap<ArtworkId, TextureHandle>,
    pointers: &[Ray],
) {
    let background = scene.background();
    painter.rect_filled(
        viewport.rect,
        0.0,
        Color32::from_rgb(background.r(), background.g(), background.b()),
    );

    // Room structure, ordered by render order then distance
    let mut room: Vec<(i32, Face)> = Vec::new();
    for mesh in scene.meshes() {
        for quad in shape_quads(&mesh.shape, &mesh.transform) {
            let face = make_face(
                viewport,
                &quad,
                false,
                |point, normal| shade(scene, &mesh.material, point, normal),
                None,
            );
            if let Some(face) = face {
                room.push((mesh.render_order, face));
            }
        }
    }
    room.sort_by(|(order_a, a), (order_b, b)| {
        order_a.cmp(order_b).then(b.depth.total_cmp(&a.depth))
    });
    for (_, face) in &room {
        paint_face(painter, viewport, face);
    }

    // Artworks, farthest first, each painted as a unit
    let mut hung: Vec<(f32, &Artwork)> = artworks
        .iter()
        .map(|a| ((a.anchor() - viewport.eye).length(), a))
        .collect();
    hung.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    for (_, artwork) in hung {
        for face in artwork_faces(viewport, scene, artwork, textures) {
            paint_face(painter, viewport, &face);
        }
    }

    for ray in pointers {
        paint_pointer(painter, viewport, ray);
    }
}

fn paint_pointer(painter: &egui::Painter, viewport: &Viewport, ray: &Ray) {
    let start = Corner {
        view: viewport.to_view(ray.origin),
        uv: Vec2::ZERO,
    };
    let end = Corner {
        view: viewport.to_view(ray.at(crate::xr::POINTER_LENGTH)),
        uv: Vec2::ZERO,
    };

    let near = -viewport.near;
    let (start, end) = match (start.view.z <= near, end.view.z <= near) {
        (true, true) => (start, end),
        (false, false) => return,
        (start_in, _) => {
            let t = (near - start.view.z) / (end.view.z - start.view.z);
            let cut = Corner {
                view: start.view.lerp(end.view, t),
                uv: Vec2::ZERO,
            };
            if start_in {
                (start, cut)
            } else {
                (cut, end)
            }
        }
    };

    painter.line_segment(
        [viewport.view_to_screen(start.view), viewport.view_to_screen(end.view)],
        Stroke::new(2.0, Color32::WHITE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn corner(x: f32, y: f32, z: f32, u: f32, v: f32) -> Corner {
        Corner {
            view: Vec3::new(x, y, z),
            uv: Vec2::new(u, v),
        }
    }

    #[test]
    fn test_clip_keeps_polygon_in_front() {
        let quad = [
            corner(-1.0, 1.0, -5.0, 0.0, 0.0),
            corner(1.0, 1.0, -5.0, 1.0, 0.0),
            corner(1.0, -1.0, -5.0, 1.0, 1.0),
            corner(-1.0, -1.0, -5.0, 0.0, 1.0),
        ];
        assert_eq!(clip_near(&quad, 0.1).len(), 4);
    }

    #[test]
    fn test_clip_drops_polygon_behind() {
        let quad = [
            corner(-1.0, 1.0, 5.0, 0.0, 0.0),
            corner(1.0, 1.0, 5.0, 1.0, 0.0),
            corner(1.0, -1.0, 5.0, 1.0, 1.0),
        ];
        assert!(clip_near(&quad, 0.1).is_empty());
    }

    #[test]
    fn test_clip_straddling_floor_interpolates_uv() {
        // Floor strip running from behind the camera to in front of it
        let quad = [
            corner(-1.0, -1.6, 1.0, 0.0, 0.0),
            corner(1.0, -1.6, 1.0, 1.0, 0.0),
            corner(1.0, -1.6, -3.0, 1.0, 1.0),
            corner(-1.0, -1.6, -3.0, 0.0, 1.0),
        ];
        let clipped = clip_near(&quad, 0.1);
        assert_eq!(clipped.len(), 4);
        for c in &clipped {
            assert!(c.view.z <= -0.1 + 0.0001);
        }
        let cut = clipped.iter().find(|c| (c.view.z + 0.1).abs() < 0.0001).unwrap();
        assert!((cut.uv.y - 1.1 / 4.0).abs() < 0.0001);
    }

    #[test]
    fn test_cuboid_normals_point_outward() {
        let quads = shape_quads(
            &Shape::Cuboid {
                width: 2.0,
                height: 2.0,
                depth: 2.0,
            },
            &Transform::default(),
        );
        assert_eq!(quads.len(), 6);
        for quad in &quads {
            let center = quad.corners.iter().copied().sum::<Vec3>() / 4.0;
            assert!((center.normalize() - quad.normal).length() < 0.0001);
        }
    }

    #[test]
    fn test_rotated_plane_normal() {
        let transform = Transform::default().with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2));
        let quads = shape_quads(&Shape::Plane { width: 10.0, height: 10.0 }, &transform);
        assert!((quads[0].normal - Vec3::Y).length() < 0.0001);
    }

    #[test]
    fn test_project_center_of_view() {
        let camera = Camera::gallery_default(1.0);
        let rect = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(200.0, 200.0));
        let viewport = Viewport::new(&camera, rect);

        let center = viewport.view_to_screen(viewport.to_view(Vec3::new(0.0, 1.6, -2.0)));
        assert!((center.x - 100.0).abs() < 0.01);
        assert!((center.y - 100.0).abs() < 0.01);
        assert!(viewport.to_view(Vec3::new(0.0, 1.6, 10.0)).z > 0.0);

        let ndc = viewport.ndc(egui::pos2(200.0, 0.0));
        assert!((ndc - Vec2::new(1.0, 1.0)).length() < 0.0001);
    }
}
