use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use eframe::egui;

/// Raster images from the assets directory, loaded on first use.
///
/// Failed loads are remembered so a missing file is reported once.
pub struct ImageCache {
    base_path: PathBuf,
    textures: RefCell<HashMap<String, Option<egui::TextureHandle>>>,
}

impl ImageCache {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            textures: RefCell::new(HashMap::new()),
        }
    }

    /// Resolve a deck image reference. A leading `/` means the assets root.
    pub fn resolve(base_path: &Path, src: &str) -> PathBuf {
        base_path.join(src.trim_start_matches('/'))
    }

    pub fn get_or_load(&self, ui: &egui::Ui, src: &str) -> Option<egui::TextureHandle> {
        if let Some(entry) = self.textures.borrow().get(src) {
            return entry.clone();
        }

        let path = Self::resolve(&self.base_path, src);
        let texture = match load_color_image(&path) {
            Ok(image) => Some(ui.ctx().load_texture(
                format!("image:{src}"),
                image,
                egui::TextureOptions::LINEAR,
            )),
            Err(e) => {
                tracing::warn!(path = %path.display(), "cannot load image: {e}");
                None
            }
        };
        self.textures
            .borrow_mut()
            .insert(src.to_string(), texture.clone());
        texture
    }
}

fn load_color_image(path: &Path) -> Result<egui::ColorImage, image::ImageError> {
    let image = image::open(path)?.into_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}
