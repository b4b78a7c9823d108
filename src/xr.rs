// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! VR runtime access.
//!
//! The gallery never assumes a headset is present. An [`XrInput`] reports
//! whether an immersive session can be started, the poses of tracked
//! controllers and their select events. [`NoXr`] is used when no runtime
//! is available.

use crate::util::geometry::Ray;
use anyhow::{bail, Result};
use glam::{Quat, Vec3};

/// Number of hand controllers the gallery listens to.
pub const CONTROLLER_COUNT: usize = 2;

/// Length of the pointer line drawn from each controller.
pub const POINTER_LENGTH: f32 = 5.0;

/// World-space pose of a tracked controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerPose {
    pub index: usize,
    pub position: Vec3,
    pub orientation: Quat,
}

impl ControllerPose {
    /// Ray along the controller's pointing direction.
    pub fn ray(&self) -> Ray {
        Ray::from_pose(self.position, self.orientation)
    }
}

/// Discrete controller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    SelectStart(usize),
    SelectEnd(usize),
}

/// Access to an immersive VR runtime.
pub trait XrInput {
    /// Whether an immersive session could be started.
    fn session_supported(&self) -> bool;

    /// Enter the immersive session.
    fn start_session(&mut self) -> Result<()>;

    fn session_active(&self) -> bool;

    /// Poses of the controllers tracked this frame.
    fn controller_poses(&self) -> Vec<ControllerPose>;

    /// Events that fired since the last call.
    fn poll_events(&mut self) -> Vec<ControllerEvent>;
}

/// Stand-in used when no VR runtime is available.
#[derive(Debug, Default)]
pub struct NoXr;

impl XrInput for NoXr {
    fn session_supported(&self) -> bool {
        false
    }

    fn start_session(&mut self) -> Result<()> {
        bail!("No VR runtime available")
    }

    fn session_active(&self) -> bool {
        false
    }

    fn controller_poses(&self) -> Vec<ControllerPose> {
        Vec::new()
    }

    fn poll_events(&mut self) -> Vec<ControllerEvent> {
        Vec::new()
    }
}
