use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use revive_core::{AppViewModel, ImageRef};
use revive_engine::ImageStore;
use revive_logging::{revive_debug, revive_warn};

/// Longest edge of an on-screen texture. Source bytes are never modified.
const MAX_TEXTURE_EDGE: u32 = 2048;

enum Slot {
    Decoding,
    Ready(TextureHandle),
    Unavailable,
}

/// On-screen textures keyed by image reference.
///
/// Reading and decoding run on a worker thread per image; finished images are
/// uploaded on the next `sync`.
pub struct TextureCache {
    entries: HashMap<ImageRef, Slot>,
    decoded_tx: Sender<(ImageRef, Option<ColorImage>)>,
    decoded_rx: Receiver<(ImageRef, Option<ColorImage>)>,
}

impl Default for TextureCache {
    fn default() -> Self {
        let (decoded_tx, decoded_rx) = mpsc::channel();
        Self {
            entries: HashMap::new(),
            decoded_tx,
            decoded_rx,
        }
    }
}

impl TextureCache {
    /// Uploads finished decodes, starts decodes for newly visible images and
    /// drops textures the view no longer shows.
    pub fn sync(&mut self, ctx: &Context, view: &AppViewModel, store: &ImageStore) {
        let wanted = visible_images(view);
        self.entries.retain(|id, _| wanted.contains(id));

        while let Ok((id, decoded)) = self.decoded_rx.try_recv() {
            // Results for images dropped meanwhile are discarded.
            if let Some(slot) = self.entries.get_mut(&id) {
                *slot = match decoded {
                    Some(color) => Slot::Ready(ctx.load_texture(
                        format!("image-{id}"),
                        color,
                        TextureOptions::LINEAR,
                    )),
                    None => Slot::Unavailable,
                };
            }
        }

        for id in wanted {
            if self.entries.contains_key(&id) {
                continue;
            }
            let slot = self.spawn_decode(ctx, store, id);
            self.entries.insert(id, slot);
        }
    }

    pub fn get(&self, id: ImageRef) -> Option<&TextureHandle> {
        match self.entries.get(&id) {
            Some(Slot::Ready(texture)) => Some(texture),
            _ => None,
        }
    }

    /// True while the image is still being read or decoded.
    pub fn is_decoding(&self, id: ImageRef) -> bool {
        matches!(self.entries.get(&id), Some(Slot::Decoding))
    }

    fn spawn_decode(&self, ctx: &Context, store: &ImageStore, id: ImageRef) -> Slot {
        let store = store.clone();
        let ctx = ctx.clone();
        let done = self.decoded_tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("decode-{id}"))
            .spawn(move || {
                let decoded = match store.read(id) {
                    Ok(bytes) => decode_for_display(id, &bytes),
                    Err(err) => {
                        revive_warn!("Cannot read image {} for display: {}", id, err);
                        None
                    }
                };
                // The cache may be gone when the window closed.
                let _ = done.send((id, decoded));
                ctx.request_repaint();
            });
        match spawned {
            Ok(_) => Slot::Decoding,
            Err(err) => {
                revive_warn!("Cannot start decoding image {}: {}", id, err);
                Slot::Unavailable
            }
        }
    }
}

fn visible_images(view: &AppViewModel) -> Vec<ImageRef> {
    let mut ids: Vec<ImageRef> = view.preview.into_iter().collect();
    if let Some(pair) = view.comparison {
        for id in [pair.before, pair.after] {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

/// Decodes image bytes into a texture-sized RGBA image, or `None` for unsupported formats.
fn decode_for_display(id: ImageRef, bytes: &[u8]) -> Option<ColorImage> {
    let decoded = match image::load_from_memory(bytes) {
        Ok(decoded) => decoded,
        Err(err) => {
            revive_warn!("Cannot decode image {} for display: {}", id, err);
            return None;
        }
    };
    let decoded = if decoded.width() > MAX_TEXTURE_EDGE || decoded.height() > MAX_TEXTURE_EDGE {
        decoded.thumbnail(MAX_TEXTURE_EDGE, MAX_TEXTURE_EDGE)
    } else {
        decoded
    };
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    revive_debug!("Texture for image {} is {}x{}", id, size[0], size[1]);
    Some(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, RgbaImage};
    use revive_core::{AppViewModel, ComparisonPair};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbaImage::new(width, height)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn preview_and_pair_are_visible_once() {
        let view = AppViewModel {
            preview: Some(4),
            comparison: Some(ComparisonPair {
                before: 4,
                after: 8,
            }),
            ..AppViewModel::default()
        };
        assert_eq!(visible_images(&view), vec![4, 8]);
        assert!(visible_images(&AppViewModel::default()).is_empty());
    }

    #[test]
    fn small_image_keeps_its_size() {
        let color = decode_for_display(1, &png(3, 2)).unwrap();
        assert_eq!(color.size, [3, 2]);
    }

    #[test]
    fn wide_image_is_scaled_to_the_texture_limit() {
        let color = decode_for_display(1, &png(4096, 8)).unwrap();
        assert_eq!(color.size[0], MAX_TEXTURE_EDGE as usize);
        assert!(color.size[1] <= 8);
    }

    #[test]
    fn undecodable_bytes_have_no_texture() {
        assert!(decode_for_display(1, b"not an image").is_none());
    }
}
