#![forbid(unsafe_code)]

use std::collections::{HashMap, HashSet};

use eframe::egui;

/// Decoded-image texture cache keyed by photo URL or attachment key.
///
/// Entries for removed attachments are dropped eagerly so the GPU handle is
/// released with the attachment instead of leaking for the session.
#[derive(Default)]
pub struct TextureStore {
    map: HashMap<String, egui::TextureHandle>,
    failed: HashSet<String>,
}

impl TextureStore {
    pub fn get(&self, key: &str) -> Option<&egui::TextureHandle> {
        self.map.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn is_failed(&self, key: &str) -> bool {
        self.failed.contains(key)
    }

    pub fn mark_failed(&mut self, key: &str) {
        self.failed.insert(key.to_string());
    }

    /// Decodes `bytes` and uploads the texture. A body that does not decode
    /// as an image marks the key failed so it is not retried every frame.
    pub fn insert_bytes(&mut self, ctx: &egui::Context, key: &str, bytes: &[u8]) -> bool {
        match decode_color_image(bytes) {
            Ok(img) => {
                let handle = ctx.load_texture(key.to_string(), img, egui::TextureOptions::LINEAR);
                self.map.insert(key.to_string(), handle);
                true
            }
            Err(_) => {
                self.failed.insert(key.to_string());
                false
            }
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.map.remove(key);
        self.failed.remove(key);
    }
}

fn decode_color_image(bytes: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
