use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use eframe::egui;

use crate::deck::MapSlide;
use crate::highlight::compute_region_states;
use crate::map::{MapLoader, MapStatus};
use crate::render::text::fit_rect;
use crate::theme::{Theme, ThemeMode};

/// Everything a map raster depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RasterKey {
    slide: usize,
    sub_step: Option<usize>,
    theme: ThemeMode,
    width: u32,
    height: u32,
}

/// Binds region states onto the loaded map and keeps the resulting textures.
///
/// Textures not requested during a frame are dropped in [`MapCanvas::end_frame`],
/// so a raster only lives while its slide is on screen. A failed raster is
/// kept as `None` for as long, so it is reported once per visit.
pub struct MapCanvas {
    loader: MapLoader,
    textures: RefCell<HashMap<RasterKey, Option<egui::TextureHandle>>>,
    used: RefCell<HashSet<RasterKey>>,
}

impl MapCanvas {
    pub fn new(loader: MapLoader) -> Self {
        Self {
            loader,
            textures: RefCell::new(HashMap::new()),
            used: RefCell::new(HashSet::new()),
        }
    }

    /// Poll the loader. Returns true when the map just finished loading.
    pub fn poll(&mut self) -> bool {
        let changed = self.loader.poll();
        if changed {
            self.textures.get_mut().clear();
        }
        changed
    }

    pub fn status(&self) -> &MapStatus {
        self.loader.status()
    }

    /// Texture and on-screen rect for `map` at `sub_step`, fitted into `area`.
    /// `None` while the map is loading or after it failed to load.
    pub fn surface(
        &self,
        ui: &egui::Ui,
        slide: usize,
        map: &MapSlide,
        sub_step: Option<usize>,
        theme: &Theme,
        area: egui::Rect,
    ) -> Option<(egui::TextureHandle, egui::Rect)> {
        let document = self.loader.document()?;
        let rect = fit_rect(area, document.aspect_ratio());
        let ppp = ui.ctx().pixels_per_point();
        let key = RasterKey {
            slide,
            sub_step,
            theme: theme.mode,
            width: (rect.width() * ppp).round().max(1.0) as u32,
            height: (rect.height() * ppp).round().max(1.0) as u32,
        };
        self.used.borrow_mut().insert(key);

        if let Some(entry) = self.textures.borrow().get(&key) {
            return entry.clone().map(|texture| (texture, rect));
        }

        let states = compute_region_states(&map.steps, sub_step);
        let texture = match document.rasterize(&states, theme, map.mode, key.width, key.height) {
            Ok(image) => {
                tracing::trace!(?key, "map rasterized");
                Some(ui.ctx().load_texture(
                    format!("map:{}:{:?}", slide, sub_step),
                    image,
                    egui::TextureOptions::LINEAR,
                ))
            }
            Err(e) => {
                tracing::error!("cannot rasterize map: {e}");
                None
            }
        };
        self.textures.borrow_mut().insert(key, texture.clone());
        texture.map(|texture| (texture, rect))
    }

    /// Drop textures that were not requested since the last call.
    pub fn end_frame(&mut self) {
        let used = std::mem::take(self.used.get_mut());
        self.textures.get_mut().retain(|key, _| used.contains(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{MapMode, MapStep};

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
  <rect id="IN-UP" x="0" y="0" width="10" height="10"/>
  <rect id="IN-MH" x="10" y="0" width="10" height="10"/>
</svg>"#;

    fn canvas() -> (tempfile::TempDir, MapCanvas) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        std::fs::write(&path, SVG).unwrap();
        (dir, MapCanvas::new(MapLoader::blocking(path)))
    }

    fn slide() -> MapSlide {
        MapSlide {
            heading: "Map".into(),
            intro: String::new(),
            mode: MapMode::Crisis,
            steps: vec![MapStep {
                region_id: "IN-UP".into(),
                ..MapStep::default()
            }],
        }
    }

    /// Calls `surface` once per entry in `areas` within a single frame.
    fn surfaces(canvas: &MapCanvas, areas: &[egui::Rect]) -> Vec<bool> {
        let ctx = egui::Context::default();
        let map = slide();
        let theme = Theme::dark();
        let mut out = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                out = areas
                    .iter()
                    .map(|area| {
                        canvas
                            .surface(ui, 0, &map, Some(0), &theme, *area)
                            .is_some()
                    })
                    .collect();
            });
        });
        out
    }

    #[test]
    fn raster_is_cached_per_key() {
        let (_dir, canvas) = canvas();
        let area = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(200.0, 100.0));
        assert_eq!(surfaces(&canvas, &[area, area]), [true, true]);
        assert_eq!(canvas.textures.borrow().len(), 1);
    }

    #[test]
    fn failed_raster_is_remembered() {
        let (_dir, mut canvas) = canvas();
        // Too wide for a pixmap row, so rasterizing fails without allocating.
        let area = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(6.0e8, 3.0e8));
        assert_eq!(surfaces(&canvas, &[area, area]), [false, false]);
        {
            let textures = canvas.textures.borrow();
            assert_eq!(textures.len(), 1);
            assert!(textures.values().all(Option::is_none));
        }
        canvas.end_frame();
        canvas.end_frame();
        assert!(canvas.textures.borrow().is_empty());
    }
}
