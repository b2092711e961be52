use eframe::egui::{self, Pos2};

use super::SIDE_PADDING;
use crate::deck::TitleSlide;
use crate::render::text::{self, HAlign};
use crate::theme::Theme;

pub fn render(
    ui: &egui::Ui,
    slide: &TitleSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) -> f32 {
    let width = rect.width() - SIDE_PADDING * 2.0 * scale;
    let center_x = rect.center().x;

    let heading = text::layout(
        ui,
        &slide.heading,
        theme.title_size * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        width,
        false,
        HAlign::Center,
    );
    let subheading = text::layout(
        ui,
        &slide.subheading,
        theme.subheading_size * scale,
        Theme::with_opacity(theme.accent, opacity),
        width,
        false,
        HAlign::Center,
    );
    let body_width = width.min(1100.0 * scale);
    let body = text::layout(
        ui,
        &slide.body,
        theme.body_size * scale,
        Theme::with_opacity(theme.foreground, opacity * 0.8),
        body_width,
        false,
        HAlign::Center,
    );

    let heading_gap = 32.0 * scale;
    let rule_gap = 56.0 * scale;
    let total = heading.rect.height()
        + heading_gap
        + subheading.rect.height()
        + rule_gap * 2.0
        + body.rect.height();
    let mut y = (rect.center().y - total / 2.0).max(rect.top() + 40.0 * scale);

    let h = heading.rect.height();
    ui.painter()
        .galley(Pos2::new(center_x, y), heading, theme.heading_color);
    y += h + heading_gap;

    let h = subheading.rect.height();
    ui.painter()
        .galley(Pos2::new(center_x, y), subheading, theme.accent);
    y += h + rule_gap;

    // Thin separator above the body line
    let rule_color = Theme::with_opacity(theme.foreground, opacity * 0.2);
    ui.painter().line_segment(
        [
            Pos2::new(center_x - body_width / 2.0, y),
            Pos2::new(center_x + body_width / 2.0, y),
        ],
        egui::Stroke::new(1.0 * scale, rule_color),
    );
    y += rule_gap;

    let h = body.rect.height();
    ui.painter().galley(Pos2::new(center_x, y), body, theme.foreground);
    y += h;

    y - rect.top()
}
