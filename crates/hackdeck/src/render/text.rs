use std::sync::Arc;

use eframe::egui::{self, Align, Color32, FontFamily, FontId, Galley, Pos2, Stroke};

use crate::theme::Theme;

/// Horizontal placement of a text block inside its width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HAlign {
    Left,
    Center,
}

/// Build a wrapped galley for plain text.
pub fn layout(
    ui: &egui::Ui,
    text: &str,
    font_size: f32,
    color: Color32,
    max_width: f32,
    italic: bool,
    align: HAlign,
) -> Arc<Galley> {
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    if align == HAlign::Center {
        job.halign = Align::Center;
    }
    let format = egui::text::TextFormat {
        font_id: FontId::new(font_size, FontFamily::Proportional),
        color,
        italics: italic,
        ..Default::default()
    };
    job.append(text, 0.0, format);
    ui.painter().layout_job(job)
}

/// Paint text with its top edge at `pos.y`. For centered text `pos.x` is the
/// horizontal center. Returns the height used.
#[allow(clippy::too_many_arguments)]
pub fn draw(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    font_size: f32,
    color: Color32,
    max_width: f32,
    italic: bool,
    align: HAlign,
) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let galley = layout(ui, text, font_size, color, max_width, italic, align);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Draw a slide heading. Returns height used.
#[allow(clippy::too_many_arguments)]
pub fn draw_heading(
    ui: &egui::Ui,
    text: &str,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
    align: HAlign,
) -> f32 {
    let color = Theme::with_opacity(theme.heading_color, opacity);
    draw(
        ui,
        text,
        pos,
        theme.heading_size * scale,
        color,
        max_width,
        false,
        align,
    )
}

/// Draw the italic intro line under a heading. Returns height used.
#[allow(clippy::too_many_arguments)]
pub fn draw_intro(
    ui: &egui::Ui,
    text: &str,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
    align: HAlign,
) -> f32 {
    let color = Theme::with_opacity(theme.foreground, opacity * 0.8);
    draw(
        ui,
        text,
        pos,
        theme.body_size * 1.1 * scale,
        color,
        max_width,
        true,
        align,
    )
}

/// Draw body text. Returns height used.
pub fn draw_body(
    ui: &egui::Ui,
    text: &str,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let color = Theme::with_opacity(theme.foreground, opacity * 0.85);
    draw(
        ui,
        text,
        pos,
        theme.body_size * scale,
        color,
        max_width,
        false,
        HAlign::Left,
    )
}

/// Vertical accent bar to the left of a block, spanning `height`.
pub fn draw_accent_bar(ui: &egui::Ui, x: f32, y: f32, height: f32, color: Color32, scale: f32) {
    let rect = egui::Rect::from_min_size(Pos2::new(x, y), egui::vec2(4.0 * scale, height));
    ui.painter().rect_filled(rect, 2.0 * scale, color);
}

/// Boxed alt text shown where an image could not be loaded.
pub fn draw_image_placeholder(
    ui: &egui::Ui,
    alt: &str,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let border = Theme::with_opacity(theme.foreground, opacity * 0.3);
    ui.painter().rect_stroke(
        rect,
        8.0 * scale,
        Stroke::new(2.0 * scale, border),
        egui::StrokeKind::Inside,
    );
    let label = if alt.is_empty() { "Image unavailable" } else { alt };
    let color = Theme::with_opacity(theme.foreground, opacity * 0.6);
    let galley = layout(
        ui,
        label,
        theme.body_size * scale,
        color,
        rect.width() * 0.8,
        true,
        HAlign::Center,
    );
    let pos = Pos2::new(rect.center().x, rect.center().y - galley.rect.height() / 2.0);
    ui.painter().galley(pos, galley, color);
}

/// Largest rect with the given aspect ratio that fits centered in `area`.
pub fn fit_rect(area: egui::Rect, aspect_ratio: f32) -> egui::Rect {
    if aspect_ratio <= 0.0 || area.width() <= 0.0 || area.height() <= 0.0 {
        return area;
    }
    let (w, h) = if area.width() / area.height() > aspect_ratio {
        (area.height() * aspect_ratio, area.height())
    } else {
        (area.width(), area.width() / aspect_ratio)
    };
    egui::Rect::from_center_size(area.center(), egui::vec2(w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_rect_letterboxes_wide_area() {
        let area = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(400.0, 100.0));
        let fitted = fit_rect(area, 2.0);
        assert_eq!(fitted.size(), egui::vec2(200.0, 100.0));
        assert_eq!(fitted.center(), area.center());
    }

    #[test]
    fn fit_rect_pillarboxes_tall_area() {
        let area = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 400.0));
        let fitted = fit_rect(area, 0.5);
        assert_eq!(fitted.size(), egui::vec2(100.0, 200.0));
    }

    #[test]
    fn fit_rect_ignores_degenerate_ratio() {
        let area = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(10.0, 10.0));
        assert_eq!(fit_rect(area, 0.0), area);
    }
}
