// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Artwork image loading.
//!
//! Images are fetched and decoded on background threads and handed back to
//! the UI thread over a channel, which polls it once per frame. Every
//! request carries a [`LoadTicket`] tied to the artwork that asked for it so
//! results arriving after the artwork is gone can be dropped.

use crate::models::artwork::ArtworkId;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Longest edge of an uploaded artwork texture.
pub const MAX_TEXTURE_EDGE: u32 = 2048;

/// Decoded RGBA8 image.
#[derive(Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Cancellation handle for one in-flight image request.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    serial: u64,
    cancelled: Arc<AtomicBool>,
}

impl LoadTicket {
    pub fn new(serial: u64) -> Self {
        Self {
            serial,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Outcome of an image request, addressed to the requesting artwork.
#[derive(Debug)]
pub struct ImageResponse {
    pub artwork: ArtworkId,
    pub serial: u64,
    pub result: Result<LoadedImage, String>,
}

/// Anything that can fetch artwork images asynchronously.
pub trait ImageSource {
    /// Start loading `reference` on behalf of `artwork`.
    fn request(&mut self, artwork: ArtworkId, reference: &str) -> LoadTicket;
}

/// Background-thread image loader.
pub struct ImageLoader {
    sender: Sender<ImageResponse>,
    receiver: Receiver<ImageResponse>,
    next_serial: u64,
    /// Serials issued since the last reset that have not reported back
    outstanding: HashSet<u64>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            next_serial: 0,
            outstanding: HashSet::new(),
        }
    }

    /// Drain every response that has arrived since the last poll.
    pub fn poll(&mut self) -> Vec<ImageResponse> {
        let responses: Vec<ImageResponse> = self.receiver.try_iter().collect();
        for response in &responses {
            self.outstanding.remove(&response.serial);
        }
        responses
    }

    /// Number of requests that have not reported back yet.
    pub fn in_flight(&self) -> usize {
        self.outstanding.len()
    }

    /// Forget outstanding requests after their tickets were cancelled.
    pub fn reset(&mut self) {
        self.outstanding.clear();
    }
}

impl ImageSource for ImageLoader {
    fn request(&mut self, artwork: ArtworkId, reference: &str) -> LoadTicket {
        self.next_serial += 1;
        let ticket = LoadTicket::new(self.next_serial);
        self.outstanding.insert(self.next_serial);

        let worker_ticket = ticket.clone();
        let sender = self.sender.clone();
        let reference = reference.to_string();

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = load_image(&reference).map_err(|e| format!("{:#}", e));

            if worker_ticket.is_cancelled() {
                log::debug!("Dropping image for {:?}, request was cancelled", artwork);
                return;
            }

            if let Ok(ref image) = result {
                log::info!("Loaded image: {} ({}x{})", reference, image.width, image.height);
            }

            let _ = sender.send(ImageResponse {
                artwork,
                serial: worker_ticket.serial(),
                result,
            });
        });

        ticket
    }
}

fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Fetch and decode an image from a file path or an http(s) URL.
pub fn load_image(reference: &str) -> Result<LoadedImage> {
    let decoded = if is_remote(reference) {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("vgallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        let bytes = client
            .get(reference)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .with_context(|| format!("Failed to download {}", reference))?;
        image::load_from_memory(&bytes).with_context(|| format!("Failed to decode {}", reference))?
    } else {
        image::open(Path::new(reference)).with_context(|| format!("Failed to open {}", reference))?
    };

    let decoded = if decoded.width() > MAX_TEXTURE_EDGE || decoded.height() > MAX_TEXTURE_EDGE {
        decoded.thumbnail(MAX_TEXTURE_EDGE, MAX_TEXTURE_EDGE)
    } else {
        decoded
    };

    let rgba = decoded.to_rgba8();
    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
