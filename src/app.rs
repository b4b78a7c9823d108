// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! The application owns every piece of gallery state: the scene, camera,
//! hung artworks, selection bookkeeping, image loader and overlays. All of
//! it is created once at startup and rebuilt only when another exhibition
//! is opened.

use crate::gallery::Gallery;
use crate::io::media::ImageLoader;
use crate::models::artwork::ArtworkId;
use crate::models::exhibition::Exhibition;
use crate::render::{self, Viewport};
use crate::scene::camera::{Camera, OrbitControls, Step};
use crate::scene::Scene;
use crate::selection::{SelectionChange, SelectionController, SourceId, TriggerMode};
use crate::ui::overlay::{self, ClickRipples, InfoOverlay};
use crate::ui::toolbar::{self, ToolbarAction, ToolbarState};
use crate::util::geometry::Ray;
use crate::xr::{ControllerEvent, XrInput, CONTROLLER_COUNT};
use glam::Vec2;
use std::collections::HashMap;
use std::path::PathBuf;

/// Main application state.
pub struct GalleryApp {
    /// Exhibition currently on display
    exhibition: Exhibition,

    /// Room geometry and lights
    scene: Scene,

    camera: Camera,
    orbit: OrbitControls,

    /// Hung artworks
    gallery: Gallery,

    selection: SelectionController,

    /// Background image loading
    loader: ImageLoader,

    /// Uploaded artwork images
    textures: HashMap<ArtworkId, egui::TextureHandle>,

    overlay: InfoOverlay,
    ripples: ClickRipples,

    xr: Box<dyn XrInput>,

    /// Select whatever is under the screen center every frame
    gaze_enabled: bool,
}

impl GalleryApp {
    /// Build the gallery for `exhibition` and start loading its images.
    pub fn new(exhibition: Exhibition, xr: Box<dyn XrInput>) -> Self {
        let mut scene = Scene::new();
        let mut loader = ImageLoader::new();
        let gallery = Gallery::build(&mut scene, &exhibition, &mut loader);

        let mut selection = SelectionController::new();
        selection.register(SourceId::Pointer, TriggerMode::OneShot);

        Self {
            exhibition,
            scene,
            camera: Camera::gallery_default(16.0 / 9.0),
            orbit: OrbitControls::default(),
            gallery,
            selection,
            loader,
            textures: HashMap::new(),
            overlay: InfoOverlay::new(),
            ripples: ClickRipples::new(),
            xr,
            gaze_enabled: false,
        }
    }

    /// Replace the exhibition, tearing down the current gallery.
    pub fn load_exhibition(&mut self, exhibition: Exhibition) {
        self.selection.clear(self.gallery.artworks_mut());
        self.gallery.teardown();
        self.loader.reset();
        self.textures.clear();
        self.overlay.hide();

        self.scene = Scene::new();
        self.gallery = Gallery::build(&mut self.scene, &exhibition, &mut self.loader);
        self.exhibition = exhibition;
    }

    /// Pointer click at normalized device coordinates.
    ///
    /// Ignored while an immersive session is running.
    pub fn click(&mut self, ndc: Vec2) {
        if self.xr.session_active() {
            return;
        }

        let ray = self.camera.ray_from_ndc(ndc);
        self.selection.trigger(SourceId::Pointer, &ray, self.gallery.artworks_mut());

        let metadata = self
            .selection
            .held(SourceId::Pointer)
            .map(|id| self.gallery.get(id).and_then(|artwork| artwork.metadata().cloned()));
        match metadata {
            // Every click on an artwork brings its details up again
            Some(Some(metadata)) => self.overlay.show_for(SourceId::Pointer, metadata),
            Some(None) => self.overlay.hide(),
            // A miss deselects everything
            None => self.clear_selection(),
        }
    }

    pub fn set_gaze(&mut self, enabled: bool) {
        if enabled == self.gaze_enabled {
            return;
        }
        self.gaze_enabled = enabled;

        if enabled {
            self.selection.register(SourceId::Gaze, TriggerMode::Continuous);
        } else {
            let held = self.selection.held(SourceId::Gaze);
            self.selection.unregister(SourceId::Gaze, self.gallery.artworks_mut());
            if let Some(artwork) = held {
                self.overlay.follow(SourceId::Gaze, &SelectionChange::Cleared { artwork });
            }
        }
        log::info!("Gaze selection {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Drop every selection and hide the panel.
    pub fn clear_selection(&mut self) {
        self.selection.clear(self.gallery.artworks_mut());
        self.overlay.hide();
    }

    pub fn enter_vr(&mut self) {
        match self.xr.start_session() {
            Ok(()) => log::info!("Entered VR session"),
            Err(e) => log::error!("Failed to start VR session: {:#}", e),
        }
    }

    /// Evaluate continuous sources and controller events for this frame.
    pub fn update_sources(&mut self) {
        let vr_active = self.xr.session_active();
        for index in 0..CONTROLLER_COUNT {
            let source = SourceId::Controller(index);
            match (vr_active, self.selection.mode(source)) {
                (true, None) => self.selection.register(source, TriggerMode::Continuous),
                (false, Some(_)) => self.selection.unregister(source, self.gallery.artworks_mut()),
                _ => {}
            }
        }

        let gaze_ray = self.gaze_enabled.then(|| self.camera.center_ray());
        let poses = self.xr.controller_poses();
        let ray_for = |source: SourceId| -> Option<Ray> {
            match source {
                SourceId::Gaze => gaze_ray,
                SourceId::Controller(index) => poses.iter().find(|p| p.index == index).map(|p| p.ray()),
                SourceId::Pointer => None,
            }
        };

        for (source, change) in self.selection.tick(ray_for, self.gallery.artworks_mut()) {
            match (source, &change) {
                // Hovering with a controller only highlights; details need a trigger pull
                (SourceId::Controller(_), SelectionChange::Selected { .. }) => {}
                _ => self.overlay.follow(source, &change),
            }
        }

        for event in self.xr.poll_events() {
            match event {
                ControllerEvent::SelectStart(index) => {
                    let source = SourceId::Controller(index);
                    let metadata = self
                        .selection
                        .held(source)
                        .and_then(|id| self.gallery.get(id))
                        .and_then(|artwork| artwork.metadata().cloned());
                    match metadata {
                        Some(metadata) => self.overlay.show_for(source, metadata),
                        None => self.overlay.hide(),
                    }
                }
                ControllerEvent::SelectEnd(index) => {
                    log::debug!("Controller {} select released", index);
                }
            }
        }
    }

    /// Upload finished image loads as textures.
    fn receive_images(&mut self, ctx: &egui::Context) {
        for response in self.loader.poll() {
            if !self.gallery.apply_image(&response) {
                continue;
            }
            if let Ok(image) = &response.result {
                let size = [image.width as usize, image.height as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
                let texture = ctx.load_texture(
                    format!("artwork_{}", response.artwork.0),
                    color_image,
                    egui::TextureOptions::LINEAR,
                );
                self.textures.insert(response.artwork, texture);
            }
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let (steps, toggle_gaze, clear) = ctx.input(|i| {
            let steps: Vec<Step> = [
                (egui::Key::W, Step::Forward),
                (egui::Key::S, Step::Backward),
                (egui::Key::A, Step::Left),
                (egui::Key::D, Step::Right),
            ]
            .into_iter()
            .filter(|(key, _)| i.key_down(*key))
            .map(|(_, step)| step)
            .collect();
            (steps, i.key_pressed(egui::Key::G), i.key_pressed(egui::Key::Escape))
        });

        for step in steps {
            self.orbit.walk(&mut self.camera, step);
        }
        if toggle_gaze {
            self.set_gaze(!self.gaze_enabled);
        }
        if clear {
            self.clear_selection();
        }
    }

    fn export_exhibition(&self, path: PathBuf) {
        match crate::io::serialization::export_exhibition(&self.exhibition, &path) {
            Ok(()) => log::info!("Exported exhibition to {}", path.display()),
            Err(e) => log::error!("Failed to export exhibition: {:#}", e),
        }
    }

    fn open_exhibition(&mut self, path: PathBuf) {
        match crate::io::serialization::import_exhibition(&path) {
            Ok(exhibition) => {
                log::info!(
                    "Loaded exhibition with {} artworks from {}",
                    exhibition.catalog.len(),
                    path.display()
                );
                self.load_exhibition(exhibition);
            }
            Err(e) => log::error!("Failed to open exhibition: {:#}", e),
        }
    }

    fn show_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Exhibition...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Exhibition", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.open_exhibition(path);
                        }
                        ui.close_menu();
                    }
                    ui.menu_button("Export Exhibition", |ui| {
                        if ui.button("Export as YAML...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("exhibition.yaml")
                                .save_file()
                            {
                                self.export_exhibition(path);
                            }
                            ui.close_menu();
                        }
                        if ui.button("Export as JSON...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("exhibition.json")
                                .save_file()
                            {
                                self.export_exhibition(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        let state = ToolbarState {
            vr_supported: self.xr.session_supported(),
            vr_active: self.xr.session_active(),
            gaze_enabled: self.gaze_enabled,
            loading: self.loader.in_flight(),
            artworks: self.gallery.artworks().len(),
            empty_slots: self.gallery.empty_slots().len(),
        };

        let action = egui::TopBottomPanel::bottom("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &state))
            .inner;

        match action {
            ToolbarAction::EnterVr => self.enter_vr(),
            ToolbarAction::ToggleGaze => self.set_gaze(!self.gaze_enabled),
            ToolbarAction::None => {}
        }
    }

    fn show_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
                self.camera.set_viewport(rect.width(), rect.height());

                if response.dragged() {
                    let drag = response.drag_delta();
                    self.orbit.rotate(Vec2::new(drag.x, drag.y), rect.height());
                }
                if response.hovered() {
                    let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                    self.orbit.zoom(scroll);
                }
                self.orbit.update(&mut self.camera);

                let now = ui.input(|i| i.time);
                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let viewport = Viewport::new(&self.camera, rect);
                        self.click(viewport.ndc(pos));
                        self.ripples.spawn(pos, now);
                    }
                }

                self.update_sources();

                let viewport = Viewport::new(&self.camera, rect);
                let pointers: Vec<Ray> = self.xr.controller_poses().iter().map(|p| p.ray()).collect();
                let painter = ui.painter_at(rect);
                render::paint(
                    &painter,
                    &viewport,
                    &self.scene,
                    self.gallery.artworks(),
                    &self.textures,
                    &pointers,
                );

                self.ripples.expire(now);
                self.ripples.draw(&painter, now);
            });
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.receive_images(ctx);
        self.handle_keyboard(ctx);

        self.show_menu(ctx);
        self.show_toolbar(ctx);
        self.show_view(ctx);
        overlay::draw_info(ctx, &self.overlay);

        // Keep animating while anything on screen is still changing
        if self.loader.in_flight() > 0
            || self.orbit.is_animating()
            || !self.ripples.is_empty()
            || self.gaze_enabled
            || self.xr.session_active()
        {
            ctx.request_repaint();
        }
    }
}

impl Drop for GalleryApp {
    fn drop(&mut self) {
        self.gallery.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::ArtworkRecord;
    use crate::models::room::RoomDimensions;
    use crate::xr::ControllerPose;
    use anyhow::Result;
    use glam::{Quat, Vec3};
    use std::collections::VecDeque;

    /// Headset stand-in that replays scripted poses and events.
    #[derive(Default)]
    struct ScriptedXr {
        active: bool,
        poses: Vec<ControllerPose>,
        events: VecDeque<ControllerEvent>,
    }

    impl XrInput for ScriptedXr {
        fn session_supported(&self) -> bool {
            true
        }

        fn start_session(&mut self) -> Result<()> {
            self.active = true;
            Ok(())
        }

        fn session_active(&self) -> bool {
            self.active
        }

        fn controller_poses(&self) -> Vec<ControllerPose> {
            self.poses.clone()
        }

        fn poll_events(&mut self) -> Vec<ControllerEvent> {
            self.events.drain(..).collect()
        }
    }

    fn exhibition() -> Exhibition {
        let mut exhibition = Exhibition::new(RoomDimensions::default());
        exhibition.catalog = (0..3)
            .map(|i| {
                ArtworkRecord::new(
                    &format!("Painting {}", i),
                    "Artist",
                    "1900",
                    "Oil on canvas",
                    &format!("/nonexistent/painting-{}.png", i),
                )
            })
            .collect();
        exhibition
    }

    /// App with every artwork's image already attached.
    fn app_with(xr: ScriptedXr) -> GalleryApp {
        let mut app = GalleryApp::new(exhibition(), Box::new(xr));
        for artwork in app.gallery.artworks_mut() {
            artwork.attach_image(800, 600);
        }
        app
    }

    fn ndc_of(app: &GalleryApp, world: Vec3) -> Vec2 {
        let clip = app.camera.projection_matrix() * app.camera.view_matrix() * world.extend(1.0);
        Vec2::new(clip.x / clip.w, clip.y / clip.w)
    }

    #[test]
    fn test_click_on_artwork_shows_overlay() {
        let mut app = app_with(ScriptedXr::default());
        // Middle north slot is straight ahead of the default camera
        let target = app.gallery.artworks()[1].anchor();
        app.click(ndc_of(&app, target));

        assert_eq!(app.selection.held(SourceId::Pointer), Some(ArtworkId(1)));
        assert!(app.gallery.artworks()[1].is_selected());
        assert!(app.overlay.is_visible());
        assert_eq!(app.overlay.content().map(|m| m.title.as_str()), Some("Painting 1"));
    }

    #[test]
    fn test_click_on_nothing_hides_overlay() {
        let mut app = app_with(ScriptedXr::default());
        app.overlay.show(app.gallery.artworks()[0].metadata().cloned().unwrap());

        // Straight up at the ceiling
        app.click(Vec2::new(0.0, 0.99));

        assert!(!app.overlay.is_visible());
        assert_eq!(app.selection.held(SourceId::Pointer), None);
        assert!(app.gallery.artworks().iter().all(|a| !a.is_selected()));
    }

    #[test]
    fn test_click_on_nothing_clears_gaze_selection() {
        let mut app = app_with(ScriptedXr::default());
        app.set_gaze(true);
        app.update_sources();
        assert!(app.gallery.artworks()[1].is_selected());

        app.click(Vec2::new(0.0, 0.99));

        assert!(!app.overlay.is_visible());
        assert!(app.gallery.artworks().iter().all(|a| !a.is_selected()));
        assert_eq!(app.selection.held(SourceId::Gaze), None);

        // Still looking at it, so the next frame picks it up again with details
        app.update_sources();
        assert!(app.gallery.artworks()[1].is_selected());
        assert!(app.overlay.is_visible());
    }

    #[test]
    fn test_click_on_held_artwork_shows_it_again() {
        let mut app = app_with(ScriptedXr::default());
        let left = app.gallery.artworks()[0].anchor();
        app.click(ndc_of(&app, left));

        // Gaze rests on the middle painting and takes over the panel
        app.set_gaze(true);
        app.update_sources();
        assert_eq!(app.overlay.content().map(|m| m.title.as_str()), Some("Painting 1"));

        app.click(ndc_of(&app, left));
        assert_eq!(app.selection.held(SourceId::Pointer), Some(ArtworkId(0)));
        assert_eq!(app.overlay.content().map(|m| m.title.as_str()), Some("Painting 0"));
    }

    #[test]
    fn test_click_ignored_in_vr() {
        let mut app = app_with(ScriptedXr {
            active: true,
            ..Default::default()
        });
        let target = app.gallery.artworks()[1].anchor();
        app.click(ndc_of(&app, target));
        assert_eq!(app.selection.held(SourceId::Pointer), None);
    }

    #[test]
    fn test_gaze_follows_view_center() {
        let mut app = app_with(ScriptedXr::default());
        app.set_gaze(true);
        app.update_sources();

        assert_eq!(app.selection.held(SourceId::Gaze), Some(ArtworkId(1)));
        assert!(app.overlay.is_visible());

        app.set_gaze(false);
        assert_eq!(app.selection.held(SourceId::Gaze), None);
        assert!(!app.gallery.artworks()[1].is_selected());
        assert!(!app.overlay.is_visible());
    }

    #[test]
    fn test_controller_hover_then_trigger() {
        let mut app = app_with(ScriptedXr {
            active: true,
            poses: vec![ControllerPose {
                index: 0,
                position: Vec3::new(0.0, 1.5, 0.0),
                orientation: Quat::IDENTITY,
            }],
            ..Default::default()
        });

        app.update_sources();
        let source = SourceId::Controller(0);
        assert_eq!(app.selection.held(source), Some(ArtworkId(1)));
        assert!(app.gallery.artworks()[1].is_selected());
        assert!(!app.overlay.is_visible());

        // Pulling the trigger brings up the details of the hovered artwork
        app.xr = Box::new(ScriptedXr {
            active: true,
            poses: app.xr.controller_poses(),
            events: VecDeque::from([ControllerEvent::SelectStart(0)]),
        });
        app.update_sources();
        assert!(app.overlay.is_visible());
        assert_eq!(app.overlay.content().map(|m| m.title.as_str()), Some("Painting 1"));

        // Controller lost tracking
        app.xr = Box::new(ScriptedXr {
            active: true,
            ..Default::default()
        });
        app.update_sources();
        assert_eq!(app.selection.held(source), None);
        assert!(!app.gallery.artworks()[1].is_selected());
        assert!(!app.overlay.is_visible());
    }

    #[test]
    fn test_escape_clears_everything() {
        let mut app = app_with(ScriptedXr::default());
        let target = app.gallery.artworks()[1].anchor();
        app.click(ndc_of(&app, target));
        app.clear_selection();

        assert!(app.gallery.artworks().iter().all(|a| !a.is_selected()));
        assert!(!app.overlay.is_visible());
    }

    #[test]
    fn test_load_exhibition_rebuilds_gallery() {
        let mut app = app_with(ScriptedXr::default());
        let target = app.gallery.artworks()[1].anchor();
        app.click(ndc_of(&app, target));

        app.load_exhibition(Exhibition::new(RoomDimensions::new(6.0, 3.0, 6.0)));
        assert!(app.gallery.artworks().is_empty());
        assert_eq!(app.gallery.room().width, 6.0);
        assert_eq!(app.selection.held(SourceId::Pointer), None);
        assert!(!app.overlay.is_visible());
    }
}
