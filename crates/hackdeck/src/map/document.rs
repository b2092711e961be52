use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use eframe::egui::ColorImage;
use resvg::{tiny_skia, usvg};

use super::MapError;
use crate::deck::MapMode;
use crate::highlight::RegionState;
use crate::theme::{Theme, css_hex};

/// A parsed vector map whose elements can be restyled by id.
pub struct MapDocument {
    source: String,
    tree: usvg::Tree,
}

impl std::fmt::Debug for MapDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.tree.size();
        f.debug_struct("MapDocument")
            .field("width", &size.width())
            .field("height", &size.height())
            .finish()
    }
}

impl MapDocument {
    pub fn open(path: &Path) -> Result<Self, MapError> {
        let source = std::fs::read_to_string(path).map_err(|source| MapError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(source)
    }

    pub fn parse(source: String) -> Result<Self, MapError> {
        let tree = usvg::Tree::from_str(&source, &usvg::Options::default())?;
        let size = tree.size();
        if size.width() < 1.0 || size.height() < 1.0 {
            return Err(MapError::EmptyDocument);
        }
        Ok(Self { source, tree })
    }

    /// Width over height of the document.
    pub fn aspect_ratio(&self) -> f32 {
        let size = self.tree.size();
        size.width() / size.height()
    }

    pub fn has_region(&self, id: &str) -> bool {
        self.tree.node_by_id(id).is_some()
    }

    /// Rasterize the map at `width` x `height` pixels. Every element with an
    /// id takes the theme's idle region style, then each entry in `states`
    /// overrides its region. Regions missing from the document are skipped.
    pub fn rasterize(
        &self,
        states: &BTreeMap<String, RegionState>,
        theme: &Theme,
        mode: MapMode,
        width: u32,
        height: u32,
    ) -> Result<ColorImage, MapError> {
        let base = theme.region_style(RegionState::Default, mode);
        let mut style_sheet = format!(
            "[id] {{ fill: {}; stroke: {}; }}\n",
            css_hex(base.fill),
            css_hex(base.stroke),
        );
        for (id, state) in states {
            if !self.has_region(id) {
                tracing::trace!(region = %id, "region not in map, skipping");
                continue;
            }
            let style = theme.region_style(*state, mode);
            let _ = writeln!(
                style_sheet,
                "[id=\"{}\"] {{ fill: {}; stroke: {}; }}",
                id,
                css_hex(style.fill),
                css_hex(style.stroke),
            );
        }

        let mut pixmap = tiny_skia::Pixmap::new(width.max(1), height.max(1))
            .ok_or(MapError::Pixmap { width, height })?;

        // Later rules of equal specificity win, so the idle rule goes first.
        let options = usvg::Options {
            style_sheet: Some(style_sheet),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&self.source, &options)?;

        let size = tree.size();
        let sx = pixmap.width() as f32 / size.width();
        let sy = pixmap.height() as f32 / size.height();
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        Ok(ColorImage::from_rgba_premultiplied(
            [pixmap.width() as usize, pixmap.height() as usize],
            pixmap.data(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two 10x10 regions side by side.
    const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10" viewBox="0 0 20 10">
  <rect id="IN-UP" x="0" y="0" width="10" height="10" fill="#808080"/>
  <rect id="IN-MH" x="10" y="0" width="10" height="10" fill="#808080"/>
</svg>"##;

    fn document() -> MapDocument {
        MapDocument::parse(SVG.to_string()).unwrap()
    }

    fn pixel(image: &ColorImage, x: usize, y: usize) -> eframe::egui::Color32 {
        image.pixels[y * image.size[0] + x]
    }

    #[test]
    fn regions_resolve_by_id() {
        let doc = document();
        assert!(doc.has_region("IN-UP"));
        assert!(doc.has_region("IN-MH"));
        assert!(!doc.has_region("IN-XX"));
        assert!((doc.aspect_ratio() - 2.0).abs() < f32::EPSILON);
    }

    fn rgb(c: eframe::egui::Color32) -> (u8, u8, u8) {
        (c.r(), c.g(), c.b())
    }

    #[test]
    fn unlisted_regions_follow_the_theme() {
        let doc = document();
        for theme in [Theme::dark(), Theme::light()] {
            let image = doc
                .rasterize(&BTreeMap::new(), &theme, MapMode::Crisis, 20, 10)
                .unwrap();
            assert_eq!(image.size, [20, 10]);
            assert_eq!(rgb(pixel(&image, 5, 5)), rgb(theme.region_default));
            assert_eq!(rgb(pixel(&image, 15, 5)), rgb(theme.region_default));
        }
    }

    #[test]
    fn active_region_takes_highlight_fill() {
        let doc = document();
        let theme = Theme::dark();
        let states = BTreeMap::from([
            ("IN-UP".to_string(), RegionState::Active),
            ("IN-MH".to_string(), RegionState::Default),
        ]);
        let image = doc
            .rasterize(&states, &theme, MapMode::Crisis, 20, 10)
            .unwrap();
        assert_eq!(rgb(pixel(&image, 5, 5)), rgb(theme.alert));
        assert_eq!(rgb(pixel(&image, 15, 5)), rgb(theme.region_default));
    }

    #[test]
    fn unknown_regions_are_ignored() {
        let doc = document();
        let theme = Theme::light();
        let states = BTreeMap::from([
            ("IN-ZZ".to_string(), RegionState::Active),
            ("IN-MH".to_string(), RegionState::Visited),
        ]);
        let image = doc
            .rasterize(&states, &theme, MapMode::Concentration, 20, 10)
            .unwrap();
        assert_eq!(rgb(pixel(&image, 5, 5)), rgb(theme.region_default));
        assert_eq!(rgb(pixel(&image, 15, 5)), rgb(theme.region_visited));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            MapDocument::parse("not an svg".to_string()),
            Err(MapError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = MapDocument::open(Path::new("/definitely/not/here.svg")).unwrap_err();
        assert!(matches!(err, MapError::Read { .. }));
    }
}
