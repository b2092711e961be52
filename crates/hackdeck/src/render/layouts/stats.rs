use eframe::egui::{self, Pos2, Stroke};

use super::{SIDE_PADDING, TOP_PADDING};
use crate::deck::StatsSlide;
use crate::render::text::{self, HAlign};
use crate::theme::Theme;

/// Narrow windows fall back to two columns.
fn column_count(width: f32, scale: f32, stats: usize) -> usize {
    let cols = if width / scale < 1200.0 { 2 } else { 4 };
    cols.min(stats.max(1))
}

pub fn render(
    ui: &egui::Ui,
    slide: &StatsSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) -> f32 {
    let left = rect.left() + SIDE_PADDING * scale;
    let width = rect.width() - SIDE_PADDING * 2.0 * scale;
    let center_x = rect.center().x;
    let mut y = rect.top() + TOP_PADDING * 1.6 * scale;

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
    y += 28.0 * scale;
    y += text::draw_intro(
        ui,
        &slide.intro,
        theme,
        Pos2::new(center_x, y),
        width,
        opacity * 0.9,
        scale,
        HAlign::Center,
    );
    y += 80.0 * scale;

    if slide.stats.is_empty() {
        return y - rect.top();
    }

    let cols = column_count(width, scale, slide.stats.len());
    let gap = 40.0 * scale;
    let card_w = (width - gap * (cols as f32 - 1.0)) / cols as f32;
    let card_pad = 36.0 * scale;
    let value_color = Theme::with_opacity(theme.accent, opacity);
    let label_color = Theme::with_opacity(theme.foreground, opacity * 0.8);
    let border = Theme::with_opacity(theme.accent, opacity * 0.8);
    let fill = Theme::with_opacity(theme.panel_background, opacity * 0.6);

    for row in slide.stats.chunks(cols) {
        let galleys: Vec<_> = row
            .iter()
            .map(|stat| {
                let value = text::layout(
                    ui,
                    &stat.value,
                    theme.heading_size * 0.6 * scale,
                    value_color,
                    card_w - card_pad * 2.0,
                    false,
                    HAlign::Center,
                );
                let label = text::layout(
                    ui,
                    &stat.label.to_uppercase(),
                    theme.caption_size * scale,
                    label_color,
                    card_w - card_pad * 2.0,
                    false,
                    HAlign::Center,
                );
                (value, label)
            })
            .collect();

        let card_h = galleys
            .iter()
            .map(|(v, l)| v.rect.height() + l.rect.height())
            .fold(0.0_f32, f32::max)
            + card_pad * 2.0
            + 16.0 * scale;

        for (i, (value, label)) in galleys.into_iter().enumerate() {
            let x = left + i as f32 * (card_w + gap);
            let card = egui::Rect::from_min_size(Pos2::new(x, y), egui::vec2(card_w, card_h));
            ui.painter().rect_filled(card, 14.0 * scale, fill);
            ui.painter().rect_stroke(
                card,
                14.0 * scale,
                Stroke::new(1.5 * scale, border),
                egui::StrokeKind::Inside,
            );
            let cx = card.center().x;
            let value_h = value.rect.height();
            ui.painter()
                .galley(Pos2::new(cx, card.top() + card_pad), value, value_color);
            ui.painter().galley(
                Pos2::new(cx, card.top() + card_pad + value_h + 16.0 * scale),
                label,
                label_color,
            );
        }
        y += card_h + gap;
    }

    y - rect.top()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_slides_use_four_columns() {
        assert_eq!(column_count(1600.0, 1.0, 4), 4);
        assert_eq!(column_count(800.0, 0.5, 4), 4);
    }

    #[test]
    fn narrow_slides_use_two_columns() {
        assert_eq!(column_count(1000.0, 1.0, 4), 2);
    }

    #[test]
    fn columns_never_exceed_stat_count() {
        assert_eq!(column_count(1600.0, 1.0, 3), 3);
        assert_eq!(column_count(1600.0, 1.0, 0), 1);
    }
}
