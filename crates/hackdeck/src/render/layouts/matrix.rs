use eframe::egui::{self, Color32, Pos2};

use super::{SIDE_PADDING, TOP_PADDING};
use crate::deck::MatrixSlide;
use crate::render::text::{self, HAlign};
use crate::theme::Theme;

const COLUMNS: usize = 2;

pub fn render(
    ui: &egui::Ui,
    slide: &MatrixSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) -> f32 {
    let width = (rect.width() - SIDE_PADDING * 2.0 * scale).min(1500.0 * scale);
    let left = rect.center().x - width / 2.0;
    let center_x = rect.center().x;
    let mut y = rect.top() + TOP_PADDING * 1.4 * scale;

    y += text::draw_heading(
        ui,
        &slide.heading,
        theme,
        Pos2::new(center_x, y),
        width,
        opacity,
        scale,
        HAlign::Center,
    );
    if let Some(intro) = &slide.intro {
        y += 24.0 * scale;
        y += text::draw_intro(
            ui,
            intro,
            theme,
            Pos2::new(center_x, y),
            width,
            opacity,
            scale,
            HAlign::Center,
        );
    }
    y += 64.0 * scale;

    let gap = 32.0 * scale;
    let cell_w = (width - gap * (COLUMNS as f32 - 1.0)) / COLUMNS as f32;
    let pad = 44.0 * scale;
    let text_color = Theme::with_opacity(Color32::WHITE, opacity);
    let body_color = Theme::with_opacity(Color32::WHITE, opacity * 0.95);

    for row in slide.cells.chunks(COLUMNS) {
        let galleys: Vec<_> = row
            .iter()
            .map(|cell| {
                let label = text::layout(
                    ui,
                    &cell.label,
                    theme.subheading_size * 1.1 * scale,
                    text_color,
                    cell_w - pad * 2.0,
                    false,
                    HAlign::Center,
                );
                let description = text::layout(
                    ui,
                    &cell.description,
                    theme.body_size * scale,
                    body_color,
                    cell_w - pad * 2.0,
                    false,
                    HAlign::Center,
                );
                (cell.color, label, description)
            })
            .collect();

        let inner_gap = 20.0 * scale;
        let cell_h = galleys
            .iter()
            .map(|(_, l, d)| l.rect.height() + d.rect.height())
            .fold(0.0_f32, f32::max)
            + inner_gap
            + pad * 2.0;

        for (i, (color, label, description)) in galleys.into_iter().enumerate() {
            let x = left + i as f32 * (cell_w + gap);
            let cell = egui::Rect::from_min_size(Pos2::new(x, y), egui::vec2(cell_w, cell_h));
            ui.painter().rect_filled(
                cell,
                16.0 * scale,
                Theme::with_opacity(theme.tag_color(color), opacity),
            );
            let content_h = label.rect.height() + inner_gap + description.rect.height();
            let mut cy = cell.center().y - content_h / 2.0;
            let label_h = label.rect.height();
            ui.painter()
                .galley(Pos2::new(cell.center().x, cy), label, text_color);
            cy += label_h + inner_gap;
            ui.painter()
                .galley(Pos2::new(cell.center().x, cy), description, body_color);
        }
        y += cell_h + gap;
    }

    y - rect.top()
}
