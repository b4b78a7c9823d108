// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Gallery assembly.
//!
//! Builds the room (floor, walls, ceiling, surrounding ground and lights),
//! lays out the wall slots and hangs one artwork per catalog record.

use crate::io::media::{ImageResponse, ImageSource};
use crate::models::artwork::{Artwork, ArtworkId};
use crate::models::exhibition::Exhibition;
use crate::models::room::{PlacementSlot, RoomDimensions};
use crate::scene::{Light, Material, Mesh, Rgb, Scene, Shape};
use crate::util::geometry::Transform;
use crate::util::layout::generate_slots;
use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

const SPOT_LIGHT_COUNT: usize = 8;
const EXTERIOR_SIZE: f32 = 50.0;

/// The assembled gallery: room geometry lives in the [`Scene`], the
/// artworks live here.
#[derive(Debug)]
pub struct Gallery {
    room: RoomDimensions,
    slots: Vec<PlacementSlot>,
    artworks: Vec<Artwork>,
}

impl Gallery {
    /// Build the room into `scene` and hang the exhibition's artworks.
    ///
    /// Records beyond the number of slots are skipped; slots beyond the
    /// number of records stay empty.
    pub fn build(scene: &mut Scene, exhibition: &Exhibition, images: &mut dyn ImageSource) -> Self {
        let room = exhibition.room;

        add_floor(scene, &room);
        add_walls(scene, &room);
        add_ceiling(scene, &room);
        add_exterior(scene);

        let slots = generate_slots(&room, &exhibition.layout);
        add_lights(scene, &room, &slots);

        if exhibition.catalog.len() > slots.len() {
            log::warn!(
                "Catalog has {} artworks but the room only has {} slots",
                exhibition.catalog.len(),
                slots.len()
            );
        }

        let artworks: Vec<Artwork> = slots
            .iter()
            .zip(&exhibition.catalog)
            .enumerate()
            .map(|(i, (slot, record))| {
                let mut artwork = Artwork::new(ArtworkId(i), *slot, exhibition.frame);
                artwork.set_metadata(record.metadata.clone());
                artwork.request_image(images, &record.image);
                artwork
            })
            .collect();

        log::info!(
            "Built {}x{}x{} gallery with {} artworks on {} slots",
            room.width,
            room.height,
            room.depth,
            artworks.len(),
            slots.len()
        );

        Self { room, slots, artworks }
    }

    pub fn room(&self) -> &RoomDimensions {
        &self.room
    }

    pub fn slots(&self) -> &[PlacementSlot] {
        &self.slots
    }

    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn artworks_mut(&mut self) -> &mut [Artwork] {
        &mut self.artworks
    }

    pub fn get(&self, id: ArtworkId) -> Option<&Artwork> {
        self.artworks.iter().find(|a| a.id() == id)
    }

    /// Slots with no artwork hung on them.
    pub fn empty_slots(&self) -> &[PlacementSlot] {
        &self.slots[self.artworks.len().min(self.slots.len())..]
    }

    /// Apply a finished image load to the artwork that asked for it.
    ///
    /// Results for unknown or disposed artworks, superseded requests and
    /// failed loads are dropped. Returns `true` when a canvas was attached.
    pub fn apply_image(&mut self, response: &ImageResponse) -> bool {
        let Some(artwork) = self.artworks.iter_mut().find(|a| a.id() == response.artwork) else {
            log::warn!("Image arrived for unknown artwork {:?}", response.artwork);
            return false;
        };

        if artwork.is_disposed() {
            return false;
        }

        let current = artwork
            .ticket()
            .map_or(false, |t| t.serial() == response.serial && !t.is_cancelled());
        if !current {
            log::debug!("Ignoring stale image for {:?}", response.artwork);
            return false;
        }

        match &response.result {
            Ok(image) => {
                let attached = artwork.attach_image(image.width, image.height);
                if attached {
                    log::info!(
                        "Attached {}x{} image to {:?}",
                        image.width,
                        image.height,
                        response.artwork
                    );
                }
                attached
            }
            Err(e) => {
                log::warn!(
                    "Failed to load image {} for {:?}: {}",
                    artwork.image_reference().unwrap_or("<none>"),
                    response.artwork,
                    e
                );
                false
            }
        }
    }

    /// Dispose every artwork, cancelling in-flight image loads.
    pub fn teardown(&mut self) {
        for artwork in &mut self.artworks {
            artwork.dispose();
        }
    }
}

fn flat(width: f32, height: f32) -> Shape {
    Shape::Plane { width, height }
}

fn add_floor(scene: &mut Scene, room: &RoomDimensions) {
    let lying = Quat::from_rotation_x(-FRAC_PI_2);

    scene.add_mesh(
        Mesh::new(
            "floor",
            flat(room.width, room.depth),
            Material::standard(Rgb(0xf8f8f8), 0.1, 0.05),
            Transform::default().with_rotation(lying),
        ),
    );

    // Faint glossy layer just above the floor
    scene.add_mesh(
        Mesh::new(
            "floor-reflection",
            flat(room.width, room.depth),
            Material::standard(Rgb::WHITE, 0.05, 0.1).with_opacity(0.2),
            Transform::from_translation(Vec3::new(0.0, 0.01, 0.0)).with_rotation(lying),
        )
        .with_render_order(1),
    );
}

fn add_walls(scene: &mut Scene, room: &RoomDimensions) {
    let material = Material::standard(Rgb::WHITE, 0.05, 0.0);
    let y = room.height / 2.0;

    let walls = [
        ("north-wall", room.width, Vec3::new(0.0, y, -room.depth / 2.0), 0.0),
        ("south-wall", room.width, Vec3::new(0.0, y, room.depth / 2.0), PI),
        ("east-wall", room.depth, Vec3::new(room.width / 2.0, y, 0.0), -FRAC_PI_2),
        ("west-wall", room.depth, Vec3::new(-room.width / 2.0, y, 0.0), FRAC_PI_2),
    ];

    for (name, length, position, rotation_y) in walls {
        scene.add_mesh(
            Mesh::new(
                name,
                flat(length, room.height),
                material,
                Transform::from_translation(position).with_rotation(Quat::from_rotation_y(rotation_y)),
            ),
        );
    }
}

fn add_ceiling(scene: &mut Scene, room: &RoomDimensions) {
    scene.add_mesh(
        Mesh::new(
            "ceiling",
            flat(room.width, room.depth),
            Material::standard(Rgb::WHITE, 0.05, 0.0),
            Transform::from_translation(Vec3::new(0.0, room.height, 0.0))
                .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
        ),
    );
}

fn add_exterior(scene: &mut Scene) {
    // Black surroundings keep the focus on the artworks
    scene.set_background(Rgb::BLACK);

    scene.add_mesh(
        Mesh::new(
            "ground",
            flat(EXTERIOR_SIZE, EXTERIOR_SIZE),
            Material::standard(Rgb(0x111111), 0.1, 0.05),
            Transform::from_translation(Vec3::new(0.0, -0.01, 0.0))
                .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        )
        .with_render_order(-1),
    );
}

fn add_lights(scene: &mut Scene, room: &RoomDimensions, slots: &[PlacementSlot]) {
    scene.add_light(Light::Ambient {
        color: Rgb::WHITE,
        intensity: 0.3,
    });

    // Ring of ceiling spots aimed at the middle of the room
    let center = Vec3::new(0.0, room.height / 2.0, 0.0);
    for i in 0..SPOT_LIGHT_COUNT {
        let angle = (i as f32 / SPOT_LIGHT_COUNT as f32) * TAU;
        let x = (room.width / 3.0) * angle.cos();
        let z = (room.depth / 3.0) * angle.sin();

        scene.add_light(Light::Spot {
            color: Rgb::WHITE,
            intensity: 0.6,
            position: Vec3::new(x, room.height - 0.2, z),
            target: center,
            distance: 20.0,
            angle: PI / 8.0,
            penumbra: 0.8,
            decay: 1.5,
        });
    }

    // One light above every slot
    for slot in slots {
        scene.add_light(Light::Directional {
            color: Rgb::WHITE,
            intensity: 0.8,
            position: Vec3::new(slot.x, room.height - 0.5, slot.z),
            target: slot.position(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::media::{LoadTicket, LoadedImage};
    use crate::models::catalog::ArtworkRecord;

    #[derive(Default)]
    struct RecordingSource {
        requests: Vec<(ArtworkId, String)>,
    }

    impl ImageSource for RecordingSource {
        fn request(&mut self, artwork: ArtworkId, reference: &str) -> LoadTicket {
            self.requests.push((artwork, reference.to_string()));
            LoadTicket::new(self.requests.len() as u64)
        }
    }

    fn exhibition_with(count: usize) -> Exhibition {
        let mut exhibition = Exhibition::new(RoomDimensions::default());
        exhibition.catalog = (0..count)
            .map(|i| {
                ArtworkRecord::new(
                    &format!("Work {}", i),
                    "Artist",
                    "2000",
                    "",
                    &format!("art/{}.png", i),
                )
            })
            .collect();
        exhibition
    }

    fn image(width: u32, height: u32) -> Result<LoadedImage, String> {
        Ok(LoadedImage {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        })
    }

    #[test]
    fn test_artworks_bound_to_slots_in_order() {
        let mut scene = Scene::new();
        let mut images = RecordingSource::default();
        let gallery = Gallery::build(&mut scene, &exhibition_with(5), &mut images);

        assert_eq!(gallery.slots().len(), 12);
        assert_eq!(gallery.artworks().len(), 5);
        for (i, artwork) in gallery.artworks().iter().enumerate() {
            assert_eq!(artwork.id(), ArtworkId(i));
            assert_eq!(artwork.slot(), &gallery.slots()[i]);
            assert_eq!(artwork.metadata().unwrap().title, format!("Work {}", i));
        }
        assert_eq!(images.requests.len(), 5);
        assert_eq!(images.requests[2], (ArtworkId(2), "art/2.png".to_string()));
    }

    #[test]
    fn test_excess_slots_stay_empty() {
        let mut scene = Scene::new();
        let gallery = Gallery::build(&mut scene, &exhibition_with(8), &mut RecordingSource::default());
        assert_eq!(gallery.empty_slots().len(), 4);
        assert!(gallery.artworks().iter().all(|a| a.slot() != &gallery.empty_slots()[0]));
    }

    #[test]
    fn test_excess_records_are_skipped() {
        let mut scene = Scene::new();
        let mut images = RecordingSource::default();
        let gallery = Gallery::build(&mut scene, &exhibition_with(20), &mut images);
        assert_eq!(gallery.artworks().len(), 12);
        assert_eq!(images.requests.len(), 12);
        assert!(gallery.empty_slots().is_empty());
    }

    #[test]
    fn test_room_structure_and_lights() {
        let mut scene = Scene::new();
        let gallery = Gallery::build(&mut scene, &exhibition_with(0), &mut RecordingSource::default());

        let names: Vec<&str> = scene.meshes().iter().map(|m| m.name.as_str()).collect();
        for expected in ["floor", "floor-reflection", "north-wall", "south-wall", "east-wall", "west-wall", "ceiling", "ground"] {
            assert!(names.contains(&expected), "missing {}", expected);
        }

        let spots = scene.lights().iter().filter(|l| matches!(l, Light::Spot { .. })).count();
        let directional = scene
            .lights()
            .iter()
            .filter(|l| matches!(l, Light::Directional { .. }))
            .count();
        assert_eq!(spots, 8);
        assert_eq!(directional, gallery.slots().len());
        assert_eq!(scene.background(), Rgb::BLACK);
    }

    #[test]
    fn test_walls_face_into_the_room() {
        let mut scene = Scene::new();
        Gallery::build(&mut scene, &exhibition_with(0), &mut RecordingSource::default());
        for mesh in scene.meshes().iter().filter(|m| m.name.ends_with("-wall")) {
            let normal = mesh.transform.rotation * Vec3::Z;
            let position = mesh.transform.translation;
            let inward = -Vec3::new(position.x, 0.0, position.z).normalize();
            assert!(normal.dot(inward) > 0.99, "{} faces outward", mesh.name);
        }
    }

    #[test]
    fn test_apply_image_attaches_canvas() {
        let mut scene = Scene::new();
        let mut gallery = Gallery::build(&mut scene, &exhibition_with(2), &mut RecordingSource::default());
        let response = ImageResponse {
            artwork: ArtworkId(1),
            serial: 2,
            result: image(300, 200),
        };
        assert!(gallery.apply_image(&response));
        assert!(gallery.get(ArtworkId(1)).unwrap().canvas().is_some());
        assert!(gallery.get(ArtworkId(0)).unwrap().canvas().is_none());
    }

    #[test]
    fn test_stale_and_failed_images_are_ignored() {
        let mut scene = Scene::new();
        let mut gallery = Gallery::build(&mut scene, &exhibition_with(2), &mut RecordingSource::default());

        let wrong_serial = ImageResponse {
            artwork: ArtworkId(0),
            serial: 99,
            result: image(10, 10),
        };
        assert!(!gallery.apply_image(&wrong_serial));

        let failed = ImageResponse {
            artwork: ArtworkId(0),
            serial: 1,
            result: Err("404".into()),
        };
        assert!(!gallery.apply_image(&failed));
        assert!(gallery.get(ArtworkId(0)).unwrap().canvas().is_none());

        let unknown = ImageResponse {
            artwork: ArtworkId(42),
            serial: 1,
            result: image(10, 10),
        };
        assert!(!gallery.apply_image(&unknown));
    }

    #[test]
    fn test_images_after_teardown_are_ignored() {
        let mut scene = Scene::new();
        let mut gallery = Gallery::build(&mut scene, &exhibition_with(1), &mut RecordingSource::default());
        gallery.teardown();

        let late = ImageResponse {
            artwork: ArtworkId(0),
            serial: 1,
            result: image(10, 10),
        };
        assert!(!gallery.apply_image(&late));
        assert!(gallery.artworks()[0].ticket().unwrap().is_cancelled());
    }
}
