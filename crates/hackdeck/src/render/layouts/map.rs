use eframe::egui::{self, Align2, Color32, FontId, Pos2};

use crate::deck::{MapSlide, MapStep};
use crate::render::SlideContext;
use crate::render::text::{self, HAlign};
use crate::theme::Theme;

const LOADING_TEXT: &str = "Loading Map...";
const HINT_TEXT: &str = "\u{25B6} PRESS NEXT TO EXPLORE";

/// What the card beside the map shows.
#[derive(Debug, PartialEq)]
enum StepCard<'a> {
    Hint,
    Step(&'a MapStep),
}

fn step_card(slide: &MapSlide, sub_step: Option<usize>) -> StepCard<'_> {
    match sub_step.and_then(|i| slide.steps.get(i)) {
        Some(step) => StepCard::Step(step),
        None => StepCard::Hint,
    }
}

/// Text column on the left third, highlighted map on the right.
pub fn render(
    ui: &egui::Ui,
    slide: &MapSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    ctx: &SlideContext<'_>,
    scale: f32,
) -> f32 {
    let pad = 64.0 * scale;
    let column_w = rect.width() / 3.0 - pad * 1.5;
    let left = rect.left() + pad;

    let heading = text::layout(
        ui,
        &slide.heading,
        theme.heading_size * 0.75 * scale,
        Theme::with_opacity(theme.heading_color, opacity),
        column_w - 28.0 * scale,
        false,
        HAlign::Left,
    );
    let intro = text::layout(
        ui,
        &slide.intro,
        theme.body_size * scale,
        Theme::with_opacity(theme.foreground, opacity * 0.8),
        column_w,
        true,
        HAlign::Left,
    );
    let card_min_h = 260.0 * scale;
    let total = heading.rect.height() + 32.0 * scale + intro.rect.height() + 40.0 * scale + card_min_h;
    let mut y = (rect.center().y - total / 2.0).max(rect.top() + pad);

    let heading_h = heading.rect.height();
    text::draw_accent_bar(
        ui,
        left,
        y,
        heading_h,
        Theme::with_opacity(theme.accent, opacity),
        scale,
    );
    ui.painter()
        .galley(Pos2::new(left + 28.0 * scale, y), heading, theme.heading_color);
    y += heading_h + 32.0 * scale;

    let intro_h = intro.rect.height();
    ui.painter()
        .galley(Pos2::new(left, y), intro, theme.foreground);
    y += intro_h + 40.0 * scale;

    y += draw_card(
        ui,
        step_card(slide, ctx.sub_step),
        theme,
        Pos2::new(left, y),
        column_w,
        card_min_h,
        opacity,
        scale,
    );

    let map_area = egui::Rect::from_min_max(
        Pos2::new(rect.left() + rect.width() / 3.0, rect.top() + pad),
        Pos2::new(rect.right() - pad, rect.bottom() - pad),
    );
    match ctx
        .map
        .surface(ui, ctx.index, slide, ctx.sub_step, theme, map_area)
    {
        Some((texture, map_rect)) => {
            let uv = egui::Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
            let tint = Theme::with_opacity(Color32::WHITE, opacity);
            ui.painter().image(texture.id(), map_rect, uv, tint);
        }
        None => {
            ui.painter().text(
                map_area.center(),
                Align2::CENTER_CENTER,
                LOADING_TEXT,
                FontId::proportional(theme.body_size * scale),
                Theme::with_opacity(theme.foreground, opacity * 0.6),
            );
        }
    }

    y - rect.top()
}

#[allow(clippy::too_many_arguments)]
fn draw_card(
    ui: &egui::Ui,
    card: StepCard<'_>,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    min_height: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let pad = 28.0 * scale;
    let inner_w = width - pad * 2.0;
    let heading_color = Theme::with_opacity(theme.heading_color, opacity);
    let accent = Theme::with_opacity(theme.accent, opacity);

    let galleys = match card {
        StepCard::Step(step) => vec![
            (
                text::layout(
                    ui,
                    &step.name,
                    theme.subheading_size * scale,
                    heading_color,
                    inner_w,
                    false,
                    HAlign::Left,
                ),
                12.0 * scale,
            ),
            (
                text::layout(
                    ui,
                    &step.stat.to_uppercase(),
                    theme.body_size * scale,
                    accent,
                    inner_w,
                    false,
                    HAlign::Left,
                ),
                16.0 * scale,
            ),
            (
                text::layout(
                    ui,
                    &step.insight,
                    theme.body_size * 0.9 * scale,
                    Theme::with_opacity(theme.foreground, opacity * 0.9),
                    inner_w,
                    false,
                    HAlign::Left,
                ),
                0.0,
            ),
        ],
        StepCard::Hint => vec![(
            text::layout(
                ui,
                HINT_TEXT,
                theme.caption_size * scale,
                Theme::with_opacity(theme.foreground, opacity * 0.5),
                inner_w,
                false,
                HAlign::Left,
            ),
            0.0,
        )],
    };

    let content_h: f32 = galleys.iter().map(|(g, gap)| g.rect.height() + gap).sum();
    let height = (content_h + pad * 2.0).max(min_height);
    let card_rect = egui::Rect::from_min_size(pos, egui::vec2(width, height));
    ui.painter().rect_filled(
        card_rect,
        egui::CornerRadius {
            nw: 0,
            sw: 0,
            ne: (14.0 * scale) as u8,
            se: (14.0 * scale) as u8,
        },
        Theme::with_opacity(theme.panel_background, opacity * 0.85),
    );
    text::draw_accent_bar(ui, pos.x, pos.y, height, accent, scale);

    let mut y = pos.y + pad;
    for (galley, gap) in galleys {
        let h = galley.rect.height();
        ui.painter()
            .galley(Pos2::new(pos.x + pad, y), galley, heading_color);
        y += h + gap;
    }
    height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::MapMode;

    fn slide() -> MapSlide {
        MapSlide {
            heading: "Skew".to_string(),
            intro: String::new(),
            mode: MapMode::Concentration,
            steps: vec![
                MapStep {
                    region_id: "IN-UP".to_string(),
                    name: "Uttar Pradesh".to_string(),
                    ..Default::default()
                },
                MapStep {
                    region_id: "IN-MH".to_string(),
                    name: "Maharashtra".to_string(),
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn overview_shows_hint() {
        assert_eq!(step_card(&slide(), None), StepCard::Hint);
    }

    #[test]
    fn selected_step_shows_its_card() {
        let s = slide();
        assert_eq!(step_card(&s, Some(1)), StepCard::Step(&s.steps[1]));
        assert_ne!(step_card(&s, Some(0)), step_card(&s, Some(1)));
    }

    #[test]
    fn stale_index_falls_back_to_hint() {
        assert_eq!(step_card(&slide(), Some(7)), StepCard::Hint);
    }
}
