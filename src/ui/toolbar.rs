// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Status bar with the VR entry button and navigation help.

/// Request raised from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    EnterVr,
    ToggleGaze,
}

/// What the toolbar reflects this frame.
pub struct ToolbarState {
    pub vr_supported: bool,
    pub vr_active: bool,
    pub gaze_enabled: bool,
    pub loading: usize,
    pub artworks: usize,
    pub empty_slots: usize,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, state: &ToolbarState) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // Only offered when a headset runtime is present
        if state.vr_supported {
            let label = if state.vr_active { "In VR" } else { "Enter VR" };
            if ui.add_enabled(!state.vr_active, egui::Button::new(label)).clicked() {
                action = ToolbarAction::EnterVr;
            }
            ui.separator();
        }

        if ui.selectable_label(state.gaze_enabled, "◎ Gaze select").clicked() {
            action = ToolbarAction::ToggleGaze;
        }

        ui.separator();

        let help = if state.vr_active {
            "Point a controller at a painting, pull the trigger for details"
        } else {
            "Click a painting for details, drag to look around, scroll to zoom, WASD to walk, Esc to clear"
        };
        ui.label(egui::RichText::new(help).italics().weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if state.loading > 0 {
                ui.spinner();
                ui.label(format!("Loading {} image(s)...", state.loading));
            } else {
                ui.label(format!("{} artworks, {} empty slots", state.artworks, state.empty_slots));
            }
        });
    });

    action
}
