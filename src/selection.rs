// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ray-based artwork selection.
//!
//! Every input source (the mouse pointer, the gaze crosshair, each VR
//! controller) casts its own ray and holds at most one artwork. Continuous
//! sources are evaluated once per frame, one-shot sources when their trigger
//! fires (a click, a controller select). Both go through the same
//! [`SelectionController::evaluate`] path.
//!
//! Held artworks are remembered by id only. An id that no longer resolves
//! to an artwork is treated as nothing held.

use crate::models::artwork::{Artwork, ArtworkId, ArtworkMetadata};
use crate::util::geometry::Ray;
use std::collections::HashMap;

/// A ray-casting origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceId {
    Pointer,
    Gaze,
    Controller(usize),
}

/// When a source is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Every frame, as long as the source has a ray
    Continuous,
    /// Only when an input event fires
    OneShot,
}

/// What an evaluation did to a source's selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange {
    /// Nothing was mutated
    Unchanged,
    /// A new artwork is held; any previous one was released first
    Selected {
        artwork: ArtworkId,
        metadata: Option<ArtworkMetadata>,
    },
    /// The previously held artwork was released
    Cleared { artwork: ArtworkId },
}

/// Find the artwork whose canvas is hit closest along `ray`.
///
/// Ties keep the earliest artwork in slice order.
pub fn pick_nearest(ray: &Ray, artworks: &[Artwork]) -> Option<(ArtworkId, f32)> {
    let mut nearest: Option<(ArtworkId, f32)> = None;
    for artwork in artworks {
        if let Some(distance) = artwork.ray_distance(ray) {
            if nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((artwork.id(), distance));
            }
        }
    }
    nearest
}

fn find_mut(artworks: &mut [Artwork], id: ArtworkId) -> Option<&mut Artwork> {
    artworks.iter_mut().find(|a| a.id() == id)
}

/// Per-source selection bookkeeping.
#[derive(Debug, Default)]
pub struct SelectionController {
    modes: HashMap<SourceId, TriggerMode>,
    held: HashMap<SourceId, ArtworkId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) an input source.
    pub fn register(&mut self, source: SourceId, mode: TriggerMode) {
        self.modes.insert(source, mode);
    }

    /// Stop tracking a source, releasing whatever it holds.
    pub fn unregister(&mut self, source: SourceId, artworks: &mut [Artwork]) {
        self.release(source, artworks);
        self.modes.remove(&source);
    }

    /// Registered sources in a stable order.
    pub fn sources(&self) -> Vec<(SourceId, TriggerMode)> {
        let mut sources: Vec<_> = self.modes.iter().map(|(s, m)| (*s, *m)).collect();
        sources.sort_by_key(|(source, _)| *source);
        sources
    }

    pub fn mode(&self, source: SourceId) -> Option<TriggerMode> {
        self.modes.get(&source).copied()
    }

    /// Artwork currently held by `source`.
    pub fn held(&self, source: SourceId) -> Option<ArtworkId> {
        self.held.get(&source).copied()
    }

    fn held_elsewhere(&self, source: SourceId, artwork: ArtworkId) -> bool {
        self.held.iter().any(|(s, a)| *s != source && *a == artwork)
    }

    /// Let go of the artwork held by `source`.
    ///
    /// The highlight stays when another source still holds the same artwork.
    pub fn release(&mut self, source: SourceId, artworks: &mut [Artwork]) -> SelectionChange {
        let Some(previous) = self.held.remove(&source) else {
            return SelectionChange::Unchanged;
        };

        if !self.held_elsewhere(source, previous) {
            if let Some(artwork) = find_mut(artworks, previous) {
                artwork.deselect();
            }
        }

        log::debug!("{:?} released {:?}", source, previous);
        SelectionChange::Cleared { artwork: previous }
    }

    /// Cast `ray` for `source` and move its selection to the nearest hit.
    pub fn evaluate(&mut self, source: SourceId, ray: &Ray, artworks: &mut [Artwork]) -> SelectionChange {
        // Drop bookkeeping that points at an artwork that no longer exists
        if let Some(previous) = self.held(source) {
            if !artworks.iter().any(|a| a.id() == previous) {
                self.held.remove(&source);
            }
        }

        let Some((nearest, distance)) = pick_nearest(ray, artworks) else {
            return self.release(source, artworks);
        };

        if self.held(source) == Some(nearest) {
            return SelectionChange::Unchanged;
        }

        self.release(source, artworks);

        let metadata = find_mut(artworks, nearest).and_then(|artwork| artwork.select().cloned());
        self.held.insert(source, nearest);
        log::debug!("{:?} selected {:?} at {:.2}m", source, nearest, distance);

        SelectionChange::Selected {
            artwork: nearest,
            metadata,
        }
    }

    /// Evaluate every continuous source.
    ///
    /// `ray_for` supplies this frame's ray per source; a continuous source
    /// without a ray (an untracked controller) releases its selection.
    pub fn tick<F>(&mut self, mut ray_for: F, artworks: &mut [Artwork]) -> Vec<(SourceId, SelectionChange)>
    where
        F: FnMut(SourceId) -> Option<Ray>,
    {
        let continuous: Vec<SourceId> = self
            .sources()
            .into_iter()
            .filter(|(_, mode)| *mode == TriggerMode::Continuous)
            .map(|(source, _)| source)
            .collect();

        let mut changes = Vec::new();
        for source in continuous {
            let change = match ray_for(source) {
                Some(ray) => self.evaluate(source, &ray, artworks),
                None => self.release(source, artworks),
            };
            if change != SelectionChange::Unchanged {
                changes.push((source, change));
            }
        }
        changes
    }

    /// Evaluate a source once in response to an input event.
    pub fn trigger(&mut self, source: SourceId, ray: &Ray, artworks: &mut [Artwork]) -> SelectionChange {
        if !self.modes.contains_key(&source) {
            log::warn!("Trigger from unregistered source {:?}", source);
            self.register(source, TriggerMode::OneShot);
        }
        self.evaluate(source, ray, artworks)
    }

    /// Release every source's selection.
    pub fn clear(&mut self, artworks: &mut [Artwork]) {
        let sources: Vec<SourceId> = self.held.keys().copied().collect();
        for source in sources {
            self.release(source, artworks);
        }
    }
}
