// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Artwork information panel and click feedback.

use crate::models::artwork::ArtworkMetadata;
use crate::selection::{SelectionChange, SourceId};

/// Seconds a click ripple stays on screen.
pub const RIPPLE_DURATION: f64 = 0.5;

/// Starting radius of a click ripple in points.
pub const RIPPLE_RADIUS: f32 = 10.0;

/// Final size of a ripple relative to its starting radius.
pub const RIPPLE_GROWTH: f32 = 3.0;

/// Title, artist, year and description of the artwork in focus.
#[derive(Debug, Default)]
pub struct InfoOverlay {
    content: Option<ArtworkMetadata>,
    visible: bool,
    /// Source whose selection put the current content up
    owner: Option<SourceId>,
}

impl InfoOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, metadata: ArtworkMetadata) {
        self.content = Some(metadata);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.owner = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> Option<&ArtworkMetadata> {
        self.content.as_ref().filter(|_| self.visible)
    }

    /// Show `metadata` on behalf of `source`.
    pub fn show_for(&mut self, source: SourceId, metadata: ArtworkMetadata) {
        self.show(metadata);
        self.owner = Some(source);
    }

    /// Track a selection change made by `source`.
    ///
    /// A new selection replaces the content. A cleared selection only hides
    /// the overlay if `source` is the one that put it up.
    pub fn follow(&mut self, source: SourceId, change: &SelectionChange) {
        match change {
            SelectionChange::Selected {
                metadata: Some(metadata),
                ..
            } => self.show_for(source, metadata.clone()),
            SelectionChange::Selected { metadata: None, .. } => {
                if self.owner.is_none() || self.owner == Some(source) {
                    self.hide();
                }
            }
            SelectionChange::Cleared { .. } => {
                if self.owner == Some(source) {
                    self.hide();
                }
            }
            SelectionChange::Unchanged => {}
        }
    }
}

/// Draw the overlay in the bottom-left corner of the screen.
pub fn draw_info(ctx: &egui::Context, overlay: &InfoOverlay) {
    if !overlay.is_visible() {
        return;
    }
    let Some(metadata) = overlay.content() else {
        return;
    };

    egui::Area::new(egui::Id::new("artwork_info"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(16.0, -16.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(320.0);
                ui.heading(&metadata.title);
                ui.label(egui::RichText::new(format!("{}, {}", metadata.artist, metadata.year)).strong());
                ui.separator();
                ui.label(&metadata.description);
            });
        });
}

#[derive(Debug, Clone, Copy)]
struct Ripple {
    center: egui::Pos2,
    started: f64,
}

/// Expanding circles drawn where the user clicked.
#[derive(Debug, Default)]
pub struct ClickRipples {
    ripples: Vec<Ripple>,
}

impl ClickRipples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, center: egui::Pos2, now: f64) {
        self.ripples.push(Ripple { center, started: now });
    }

    /// Forget ripples that have finished.
    pub fn expire(&mut self, now: f64) {
        self.ripples.retain(|r| now - r.started < RIPPLE_DURATION);
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn draw(&self, painter: &egui::Painter, now: f64) {
        for ripple in &self.ripples {
            let (radius, alpha) = ripple_shape(now - ripple.started);
            let color = egui::Color32::from_white_alpha((alpha * 255.0) as u8);
            painter.circle_stroke(ripple.center, radius, egui::Stroke::new(2.0, color));
        }
    }
}

/// Radius and opacity of a ripple `elapsed` seconds after the click.
fn ripple_shape(elapsed: f64) -> (f32, f32) {
    let t = (elapsed / RIPPLE_DURATION).clamp(0.0, 1.0) as f32;
    (RIPPLE_RADIUS * (1.0 + (RIPPLE_GROWTH - 1.0) * t), 1.0 - t)
}
