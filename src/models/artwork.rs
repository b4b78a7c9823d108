// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Artwork entity.
//!
//! An artwork is a frame hung on a placement slot. Once its image arrives it
//! gains a canvas sized to the image's aspect ratio and the frame is rebuilt
//! around it. Selection toggles a highlight: the frame glows and the canvas
//! grows slightly.

use crate::io::media::{ImageSource, LoadTicket};
use crate::models::room::PlacementSlot;
use crate::scene::{Material, Rgb};
use crate::util::geometry::{intersect_quad, offset_from_wall, Ray, Transform, WALL_CLEARANCE};
use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Frame size used until the image has loaded.
pub const DEFAULT_FRAME_SIZE: FrameSize = FrameSize {
    width: 1.6,
    height: 1.2,
};

const FRAME_DEPTH: f32 = 0.02;
const FRAME_BORDER: f32 = 0.03;
/// Horizontal space between the default frame width and the canvas
const CANVAS_INSET: f32 = 0.1;
/// Space added around the canvas when the frame is rebuilt
const FRAME_MARGIN: f32 = 0.1;
const HIGHLIGHT_SCALE: f32 = 1.05;
const HIGHLIGHT_INTENSITY: f32 = 0.5;

/// Stable identifier of an artwork within a gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtworkId(pub usize);

/// Width and height of a frame in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

impl Default for FrameSize {
    fn default() -> Self {
        DEFAULT_FRAME_SIZE
    }
}

/// Descriptive information shown when an artwork is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkMetadata {
    pub title: String,
    pub artist: String,
    pub year: String,
    pub description: String,
}

/// Outer dimensions of a minimalist four-sided frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSpec {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub border_width: f32,
}

impl FrameSpec {
    pub fn new(size: FrameSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            depth: FRAME_DEPTH,
            border_width: FRAME_BORDER,
        }
    }

    /// Local centers and sizes of the top, bottom, left and right bars.
    pub fn bars(&self) -> [(Vec3, Vec3); 4] {
        let (w, h, d, b) = (self.width, self.height, self.depth, self.border_width);
        let side_height = (h - 2.0 * b).max(0.0);
        [
            (Vec3::new(0.0, h / 2.0 - b / 2.0, 0.0), Vec3::new(w, b, d)),
            (Vec3::new(0.0, -h / 2.0 + b / 2.0, 0.0), Vec3::new(w, b, d)),
            (Vec3::new(-w / 2.0 + b / 2.0, 0.0, 0.0), Vec3::new(b, side_height, d)),
            (Vec3::new(w / 2.0 - b / 2.0, 0.0, 0.0), Vec3::new(b, side_height, d)),
        ]
    }
}

/// One bar of a frame in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameBar {
    pub center: Vec3,
    pub size: Vec3,
    pub rotation: Quat,
}

/// The textured plane showing the loaded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
    pub scale: Vec3,
    /// Pixel size of the image backing the canvas
    pub image_size: (u32, u32),
}

/// A framed image hung on one placement slot.
#[derive(Debug)]
pub struct Artwork {
    id: ArtworkId,
    slot: PlacementSlot,
    default_size: FrameSize,
    frame: FrameSpec,
    canvas: Option<Canvas>,
    metadata: Option<ArtworkMetadata>,
    image_reference: Option<String>,
    selected: bool,
    scale_before_select: Option<Vec3>,
    ticket: Option<LoadTicket>,
    disposed: bool,
}

impl Artwork {
    /// Create an artwork with an empty frame of the default size.
    pub fn new(id: ArtworkId, slot: PlacementSlot, default_size: FrameSize) -> Self {
        Self {
            id,
            slot,
            default_size,
            frame: FrameSpec::new(default_size),
            canvas: None,
            metadata: None,
            image_reference: None,
            selected: false,
            scale_before_select: None,
            ticket: None,
            disposed: false,
        }
    }

    pub fn id(&self) -> ArtworkId {
        self.id
    }

    pub fn slot(&self) -> &PlacementSlot {
        &self.slot
    }

    pub fn frame(&self) -> &FrameSpec {
        &self.frame
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn metadata(&self) -> Option<&ArtworkMetadata> {
        self.metadata.as_ref()
    }

    /// Attach the information shown in the overlay.
    pub fn set_metadata(&mut self, metadata: ArtworkMetadata) {
        self.metadata = Some(metadata);
    }

    pub fn image_reference(&self) -> Option<&str> {
        self.image_reference.as_deref()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Ticket of the image request currently bound to this artwork.
    pub fn ticket(&self) -> Option<&LoadTicket> {
        self.ticket.as_ref()
    }

    /// Ask `source` for the image; any earlier request is cancelled.
    pub fn request_image(&mut self, source: &mut dyn ImageSource, reference: &str) {
        if self.disposed {
            return;
        }
        if let Some(previous) = self.ticket.take() {
            previous.cancel();
        }
        self.image_reference = Some(reference.to_string());
        self.ticket = Some(source.request(self.id, reference));
    }

    /// World position of frame and canvas, floated off the wall.
    pub fn anchor(&self) -> Vec3 {
        offset_from_wall(self.slot.position(), self.slot.normal_angle, WALL_CLEARANCE)
    }

    pub fn rotation(&self) -> Quat {
        self.slot.rotation()
    }

    /// Size the canvas to a freshly loaded image and rebuild the frame around it.
    ///
    /// Happens at most once. Returns `false` when nothing changed.
    pub fn attach_image(&mut self, width: u32, height: u32) -> bool {
        if self.disposed || self.canvas.is_some() || width == 0 || height == 0 {
            return false;
        }

        let image_aspect = width as f32 / height as f32;
        let canvas_width = self.default_size.width - CANVAS_INSET;
        let canvas_height = canvas_width / image_aspect;

        self.canvas = Some(Canvas {
            width: canvas_width,
            height: canvas_height,
            scale: Vec3::ONE,
            image_size: (width, height),
        });
        self.frame = FrameSpec::new(FrameSize {
            width: canvas_width + FRAME_MARGIN,
            height: canvas_height + FRAME_MARGIN,
        });

        // Already highlighted before the image existed
        if self.selected {
            self.scale_before_select = Some(Vec3::ONE);
            if let Some(canvas) = self.canvas.as_mut() {
                canvas.scale = Vec3::splat(HIGHLIGHT_SCALE);
            }
        }

        true
    }

    /// Highlight the artwork and hand back its metadata.
    pub fn select(&mut self) -> Option<&ArtworkMetadata> {
        if let Some(canvas) = self.canvas.as_mut() {
            let base = match (self.selected, self.scale_before_select) {
                (true, Some(recorded)) => recorded,
                _ => canvas.scale,
            };
            self.scale_before_select = Some(base);
            canvas.scale = base * HIGHLIGHT_SCALE;
        }
        self.selected = true;
        self.metadata.as_ref()
    }

    /// Remove the highlight, restoring the scale recorded by `select`.
    pub fn deselect(&mut self) {
        if !self.selected {
            return;
        }
        self.selected = false;
        if let (Some(canvas), Some(recorded)) = (self.canvas.as_mut(), self.scale_before_select.take()) {
            canvas.scale = recorded;
        }
    }

    /// Material of every frame bar; glows while selected.
    pub fn frame_material(&self) -> Material {
        let base = Material::standard(Rgb::BLACK, 0.05, 0.1);
        if self.selected {
            base.with_emissive(Rgb::WHITE, HIGHLIGHT_INTENSITY)
        } else {
            base.with_emissive(Rgb::BLACK, 0.0)
        }
    }

    /// The four frame bars in world space.
    pub fn frame_bars(&self) -> [FrameBar; 4] {
        let anchor = self.anchor();
        let rotation = self.rotation();
        self.frame.bars().map(|(local, size)| FrameBar {
            center: anchor + rotation * local,
            size,
            rotation,
        })
    }

    /// Placement of the canvas plane, if an image has loaded.
    pub fn canvas_transform(&self) -> Option<Transform> {
        self.canvas.as_ref().map(|canvas| {
            Transform::from_translation(self.anchor())
                .with_rotation(self.rotation())
                .with_scale(canvas.scale)
        })
    }

    /// Distance along `ray` to the canvas, if it is hit.
    pub fn ray_distance(&self, ray: &Ray) -> Option<f32> {
        let canvas = self.canvas.as_ref()?;
        let half_extents = Vec2::new(
            canvas.width * canvas.scale.x / 2.0,
            canvas.height * canvas.scale.y / 2.0,
        );
        intersect_quad(ray, self.anchor(), self.rotation(), half_extents)
    }

    /// Detach from any pending image load; the artwork stops accepting images.
    pub fn dispose(&mut self) {
        if let Some(ticket) = self.ticket.as_ref() {
            ticket.cancel();
        }
        self.disposed = true;
    }
}
