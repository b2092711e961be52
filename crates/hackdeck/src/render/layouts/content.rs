use eframe::egui::{self, Pos2};

use super::{SIDE_PADDING, TOP_PADDING};
use crate::deck::ContentSlide;
use crate::render::text::{self, HAlign};
use crate::theme::Theme;

/// Heading, intro and a column of titled points, each with a left rule.
pub fn render(
    ui: &egui::Ui,
    slide: &ContentSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) -> f32 {
    let left = rect.left() + SIDE_PADDING * scale;
    let width = rect.width() - SIDE_PADDING * 2.0 * scale;
    let mut y = rect.top() + TOP_PADDING * scale;

    let heading = text::layout(
        ui,
        &slide.heading,
        theme.heading_size * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        width,
        false,
        HAlign::Left,
    );
    let heading_rect = heading.rect.translate(egui::vec2(left, y));
    ui.painter()
        .galley(Pos2::new(left, y), heading, theme.heading_color);
    y = heading_rect.bottom() + 16.0 * scale;

    // Accent underline as wide as the heading text
    let underline = egui::Rect::from_min_size(
        Pos2::new(left, y),
        egui::vec2(heading_rect.width(), 6.0 * scale),
    );
    ui.painter()
        .rect_filled(underline, 0.0, Theme::with_opacity(theme.accent, opacity));
    y += 48.0 * scale;

    let intro_width = width.min(1300.0 * scale);
    y += text::draw_intro(
        ui,
        &slide.intro,
        theme,
        Pos2::new(left, y),
        intro_width,
        opacity,
        scale,
        HAlign::Left,
    );
    y += 56.0 * scale;

    let bar_color = Theme::with_opacity(theme.foreground, opacity * 0.9);
    let inset = 36.0 * scale;
    for point in &slide.points {
        let top = y;
        let head_color = Theme::with_opacity(theme.heading_color, opacity);
        y += text::draw(
            ui,
            &point.head,
            Pos2::new(left + inset, y),
            theme.subheading_size * scale,
            head_color,
            width - inset,
            false,
            HAlign::Left,
        );
        y += 8.0 * scale;
        y += text::draw_body(
            ui,
            &point.body,
            theme,
            Pos2::new(left + inset, y),
            width - inset,
            opacity,
            scale,
        );
        text::draw_accent_bar(ui, left, top, y - top, bar_color, scale);
        y += 40.0 * scale;
    }

    y - rect.top()
}
