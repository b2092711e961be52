pub mod image_cache;
pub mod layouts;
pub mod map_canvas;
pub mod text;
pub mod transition;

use eframe::egui;

use crate::deck::Slide;
use crate::theme::Theme;

use image_cache::ImageCache;
use map_canvas::MapCanvas;

/// Per-draw inputs that are not part of the slide record itself.
pub struct SlideContext<'a> {
    pub index: usize,
    pub sub_step: Option<usize>,
    pub images: &'a ImageCache,
    pub map: &'a MapCanvas,
}

/// Layouts are authored against a 1920x1080 canvas.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// Render a single slide with the layout for its kind. Returns the height of
/// the drawn content measured from the top of `rect`.
pub fn render_slide(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    ctx: &SlideContext<'_>,
    scale: f32,
) -> f32 {
    match slide {
        Slide::Title(s) => layouts::title::render(ui, s, theme, rect, opacity, scale),
        Slide::Content(s) => layouts::content::render(ui, s, theme, rect, opacity, scale),
        Slide::Stats(s) => layouts::stats::render(ui, s, theme, rect, opacity, scale),
        Slide::Chart(s) => {
            layouts::chart::render(ui, s, theme, rect, opacity, ctx.images, scale)
        }
        Slide::Matrix(s) => layouts::matrix::render(ui, s, theme, rect, opacity, scale),
        Slide::Map(s) => layouts::map::render(ui, s, theme, rect, opacity, ctx, scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_follows_the_tighter_axis() {
        let full_hd = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        assert!((compute_scale(full_hd) - 1.0).abs() < f32::EPSILON);
        let wide = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(3840.0, 1080.0));
        assert!((compute_scale(wide) - 1.0).abs() < f32::EPSILON);
        let small = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(960.0, 720.0));
        assert!((compute_scale(small) - 0.5).abs() < f32::EPSILON);
    }
}
