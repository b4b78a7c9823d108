// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Exhibition serialization and deserialization.
//!
//! This module handles exporting and importing exhibitions in YAML and JSON
//! formats. The format is picked from the file extension.

use crate::models::exhibition::Exhibition;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Export an exhibition to YAML format.
pub fn export_yaml(data: &Exhibition, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export an exhibition to JSON format.
pub fn export_json(data: &Exhibition, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import an exhibition from YAML format.
pub fn import_yaml(path: &Path) -> Result<Exhibition> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import an exhibition from JSON format.
pub fn import_json(path: &Path) -> Result<Exhibition> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

/// Import an exhibition, choosing the format by extension.
pub fn import_exhibition(path: &Path) -> Result<Exhibition> {
    let extension = path.extension().and_then(|s| s.to_str());
    let data = match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => bail!("Unsupported file extension: {:?}", extension),
    }
    .with_context(|| format!("Failed to import {}", path.display()))?;

    data.room
        .validate()
        .with_context(|| format!("Invalid room in {}", path.display()))?;
    Ok(data)
}

/// Export an exhibition, choosing the format by extension.
pub fn export_exhibition(data: &Exhibition, path: &Path) -> Result<()> {
    let extension = path.extension().and_then(|s| s.to_str());
    match extension {
        Some("yaml") | Some("yml") => export_yaml(data, path),
        Some("json") => export_json(data, path),
        _ => bail!("Unsupported file extension: {:?}", extension),
    }
    .with_context(|| format!("Failed to export {}", path.display()))?;

    Ok(())
}
