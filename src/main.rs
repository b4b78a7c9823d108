// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Virtual Gallery
//!
//! A walk-through 3D art gallery. Paintings hang evenly spaced along the
//! walls of a lit room and can be picked with the mouse, the view center
//! or VR controllers to show their details.

mod app;
mod gallery;
mod io;
mod models;
mod render;
mod scene;
mod selection;
mod ui;
mod util;
mod xr;

use anyhow::Result;
use app::GalleryApp;
use clap::Parser;
use models::exhibition::Exhibition;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vgallery")]
#[command(about = "Walk-through 3D art gallery", long_about = None)]
#[command(version)]
struct Args {
    /// Exhibition file to open (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective exhibition to this file and exit
    #[arg(long)]
    export_config: Option<PathBuf>,

    /// Room width in meters
    #[arg(long)]
    width: Option<f32>,

    /// Room depth in meters
    #[arg(long)]
    depth: Option<f32>,

    /// Room height in meters
    #[arg(long)]
    height: Option<f32>,
}

impl Args {
    /// Exhibition from `--config` (or the built-in one) with room overrides applied.
    fn exhibition(&self) -> Result<Exhibition> {
        let mut exhibition = match &self.config {
            Some(path) => {
                let exhibition = io::serialization::import_exhibition(path)?;
                log::info!("Loaded exhibition from {}", path.display());
                exhibition
            }
            None => Exhibition::default(),
        };

        if let Some(width) = self.width {
            exhibition.room.width = width;
        }
        if let Some(depth) = self.depth {
            exhibition.room.depth = depth;
        }
        if let Some(height) = self.height {
            exhibition.room.height = height;
        }
        exhibition.room.validate()?;

        Ok(exhibition)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();
    let exhibition = args.exhibition()?;

    if let Some(path) = &args.export_config {
        io::serialization::export_exhibition(&exhibition, path)?;
        log::info!("Exported exhibition to {}", path.display());
        return Ok(());
    }

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Virtual Gallery"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Virtual Gallery",
        options,
        Box::new(|_cc| Ok(Box::new(GalleryApp::new(exhibition, Box::new(xr::NoXr))))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_overrides() {
        let args = Args::parse_from(["vgallery", "--width", "12", "--height", "5"]);
        let exhibition = args.exhibition().unwrap();
        assert_eq!(exhibition.room.width, 12.0);
        assert_eq!(exhibition.room.height, 5.0);
        assert_eq!(exhibition.room.depth, 10.0);
        assert_eq!(exhibition.catalog.len(), 8);
    }

    #[test]
    fn test_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("show.yaml");
        std::fs::write(&path, "room:\n  width: 8.0\n  height: 3.0\n  depth: 6.0\ncatalog: []\n").unwrap();

        let args = Args::parse_from(["vgallery", "--config", path.to_str().unwrap(), "--depth", "7"]);
        let exhibition = args.exhibition().unwrap();
        assert_eq!(exhibition.room.width, 8.0);
        assert_eq!(exhibition.room.depth, 7.0);
        assert!(exhibition.catalog.is_empty());
    }

    #[test]
    fn test_unusable_room_override_is_an_error() {
        let args = Args::parse_from(["vgallery", "--width", "inf"]);
        assert!(args.exhibition().is_err());

        let args = Args::parse_from(["vgallery", "--depth", "1e20"]);
        assert!(args.exhibition().is_err());
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let args = Args::parse_from(["vgallery", "--config", "/nonexistent/show.yaml"]);
        assert!(args.exhibition().is_err());
    }
}
