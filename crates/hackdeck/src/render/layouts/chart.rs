use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Pos2, Stroke};

use super::{SIDE_PADDING, TOP_PADDING};
use crate::deck::{Bar, Chart, ChartSlide, PieSegment};
use crate::render::image_cache::ImageCache;
use crate::render::text::{self, HAlign};
use crate::theme::Theme;

pub fn render(
    ui: &egui::Ui,
    slide: &ChartSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    images: &ImageCache,
    scale: f32,
) -> f32 {
    let left = rect.left() + SIDE_PADDING * scale;
    let width = rect.width() - SIDE_PADDING * 2.0 * scale;
    let mut y = rect.top() + TOP_PADDING * scale;

    y += text::draw_heading(
        ui,
        &slide.heading,
        theme,
        Pos2::new(left, y),
        width,
        opacity,
        scale,
        HAlign::Left,
    );
    y += 36.0 * scale;

    let inset = 28.0 * scale;
    let intro_top = y;
    y += text::draw_intro(
        ui,
        &slide.intro,
        theme,
        Pos2::new(left + inset, y),
        width.min(1200.0 * scale) - inset,
        opacity,
        scale,
        HAlign::Left,
    );
    if y > intro_top {
        let accent = Theme::with_opacity(theme.accent, opacity);
        text::draw_accent_bar(ui, left, intro_top, y - intro_top, accent, scale);
    }
    y += 48.0 * scale;

    let footer_h = if slide.footer.is_some() {
        120.0 * scale
    } else {
        0.0
    };
    let panel_h = (rect.bottom() - y - TOP_PADDING * scale - footer_h).max(420.0 * scale);
    let panel = egui::Rect::from_min_size(Pos2::new(left, y), egui::vec2(width, panel_h));
    ui.painter().rect_filled(
        panel,
        20.0 * scale,
        Theme::with_opacity(theme.panel_background, opacity * 0.5),
    );
    let inner = panel.shrink(48.0 * scale);

    match &slide.chart {
        Chart::Pie { segments } => draw_pie(ui, segments, theme, inner, opacity, scale),
        Chart::Bar { bars } => draw_bars(ui, bars, theme, inner, opacity, scale),
        Chart::Image { src, alt } => match images.get_or_load(ui, src) {
            Some(texture) => {
                let size = texture.size_vec2();
                let draw_rect = text::fit_rect(inner, size.x / size.y);
                let tint = Theme::with_opacity(Color32::WHITE, opacity);
                let uv = egui::Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
                ui.painter().image(texture.id(), draw_rect, uv, tint);
            }
            None => text::draw_image_placeholder(ui, alt, theme, inner, opacity, scale),
        },
    }
    y = panel.bottom();

    if let Some(footer) = &slide.footer {
        y += 32.0 * scale;
        y += draw_callout(ui, footer, theme, Pos2::new(left, y), width, opacity, scale);
    }

    y - rect.top()
}

/// Start angle and sweep (radians, clockwise from 12 o'clock) per value.
fn segment_angles(values: &[f32]) -> Vec<(f32, f32)> {
    let total: f32 = values.iter().map(|v| v.max(0.0)).sum();
    if total <= 0.0 {
        return vec![(-FRAC_PI_2, 0.0); values.len()];
    }
    let mut start = -FRAC_PI_2;
    values
        .iter()
        .map(|v| {
            let sweep = v.max(0.0) / total * TAU;
            let angles = (start, sweep);
            start += sweep;
            angles
        })
        .collect()
}

fn wedge_mesh(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    let steps = ((sweep / TAU) * 180.0).ceil().max(1.0) as u32;
    mesh.colored_vertex(center, color);
    for i in 0..=steps {
        let a = start + sweep * i as f32 / steps as f32;
        mesh.colored_vertex(
            Pos2::new(center.x + radius * a.cos(), center.y + radius * a.sin()),
            color,
        );
    }
    for i in 1..=steps {
        mesh.add_triangle(0, i, i + 1);
    }
    mesh
}

fn draw_pie(
    ui: &egui::Ui,
    segments: &[PieSegment],
    theme: &Theme,
    area: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let radius = (area.height() / 2.0).min(area.width() * 0.22);
    let legend_w = area.width() * 0.45;
    let gap = 96.0 * scale;
    let group_w = radius * 2.0 + gap + legend_w;
    let group_left = area.center().x - group_w / 2.0;
    let center = Pos2::new(group_left + radius, area.center().y);

    let values: Vec<f32> = segments.iter().map(|s| s.value).collect();
    for (segment, (start, sweep)) in segments.iter().zip(segment_angles(&values)) {
        if sweep <= 0.0 {
            continue;
        }
        let color = Theme::with_opacity(theme.tag_color(segment.color), opacity);
        ui.painter()
            .add(egui::Shape::mesh(wedge_mesh(center, radius, start, sweep, color)));
    }
    ui.painter().circle_stroke(
        center,
        radius,
        Stroke::new(6.0 * scale, Theme::with_opacity(Color32::WHITE, opacity)),
    );

    let legend_left = group_left + radius * 2.0 + gap;
    let row_h = theme.body_size * 1.8 * scale;
    let mut y = area.center().y - row_h * segments.len() as f32 / 2.0;
    let swatch = 28.0 * scale;
    let text_color = Theme::with_opacity(theme.foreground, opacity);
    for segment in segments {
        let swatch_rect = egui::Rect::from_min_size(
            Pos2::new(legend_left, y + (row_h - swatch) / 2.0),
            egui::vec2(swatch, swatch),
        );
        ui.painter().rect_filled(
            swatch_rect,
            4.0 * scale,
            Theme::with_opacity(theme.tag_color(segment.color), opacity),
        );
        let label = format!("{}: {}%", segment.label, segment.value);
        let galley = text::layout(
            ui,
            &label,
            theme.body_size * scale,
            text_color,
            legend_w - swatch - 16.0 * scale,
            false,
            HAlign::Left,
        );
        let text_y = y + (row_h - galley.rect.height()) / 2.0;
        ui.painter().galley(
            Pos2::new(swatch_rect.right() + 16.0 * scale, text_y),
            galley,
            text_color,
        );
        y += row_h;
    }
}

fn draw_bars(
    ui: &egui::Ui,
    bars: &[Bar],
    theme: &Theme,
    area: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    if bars.is_empty() {
        return;
    }
    let label_h = theme.caption_size * 2.2 * scale;
    let caption_h = theme.body_size * 1.6 * scale;
    let baseline = area.bottom() - label_h;
    let plot_h = (baseline - area.top() - caption_h).max(0.0);

    let gap = 48.0 * scale;
    let slot_w = (area.width() - gap * (bars.len() as f32 - 1.0)) / bars.len() as f32;
    let bar_w = slot_w.min(120.0 * scale);

    let axis = Theme::with_opacity(theme.foreground, opacity * 0.2);
    ui.painter().line_segment(
        [
            Pos2::new(area.left(), baseline),
            Pos2::new(area.right(), baseline),
        ],
        Stroke::new(2.0 * scale, axis),
    );

    let label_color = Theme::with_opacity(theme.foreground, opacity * 0.8);
    let caption_color = Theme::with_opacity(theme.heading_color, opacity);
    for (i, bar) in bars.iter().enumerate() {
        let slot_center = area.left() + i as f32 * (slot_w + gap) + slot_w / 2.0;
        let h = plot_h * bar.value.clamp(0.0, 100.0) / 100.0;
        let bar_rect = egui::Rect::from_min_max(
            Pos2::new(slot_center - bar_w / 2.0, baseline - h),
            Pos2::new(slot_center + bar_w / 2.0, baseline),
        );
        ui.painter().rect_filled(
            bar_rect,
            egui::CornerRadius {
                nw: (8.0 * scale) as u8,
                ne: (8.0 * scale) as u8,
                sw: 0,
                se: 0,
            },
            Theme::with_opacity(theme.tag_color(bar.color), opacity),
        );

        let caption = text::layout(
            ui,
            &bar.caption,
            theme.body_size * scale,
            caption_color,
            slot_w,
            false,
            HAlign::Center,
        );
        let caption_y = bar_rect.top() - caption.rect.height() - 8.0 * scale;
        ui.painter()
            .galley(Pos2::new(slot_center, caption_y), caption, caption_color);

        let label = text::layout(
            ui,
            &bar.label.to_uppercase(),
            theme.caption_size * scale,
            label_color,
            slot_w,
            false,
            HAlign::Center,
        );
        ui.painter().galley(
            Pos2::new(slot_center, baseline + 12.0 * scale),
            label,
            label_color,
        );
    }
}

/// Italic note in a tinted box with an alert-colored left edge.
fn draw_callout(
    ui: &egui::Ui,
    note: &str,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let pad = 24.0 * scale;
    let box_w = width.min(1100.0 * scale);
    let color = Theme::with_opacity(theme.foreground, opacity * 0.85);
    let galley = text::layout(
        ui,
        note,
        theme.body_size * scale,
        color,
        box_w - pad * 2.0,
        true,
        HAlign::Center,
    );
    let box_h = galley.rect.height() + pad * 2.0;
    let left = pos.x + (width - box_w) / 2.0;
    let callout = egui::Rect::from_min_size(Pos2::new(left, pos.y), egui::vec2(box_w, box_h));
    ui.painter().rect_filled(
        callout,
        10.0 * scale,
        Theme::with_opacity(theme.panel_background, opacity * 0.7),
    );
    text::draw_accent_bar(
        ui,
        callout.left(),
        callout.top(),
        box_h,
        Theme::with_opacity(theme.alert, opacity),
        scale,
    );
    ui.painter()
        .galley(Pos2::new(callout.center().x, callout.top() + pad), galley, color);
    box_h
}
