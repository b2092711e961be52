use eframe::egui;
use resvg::{tiny_skia, usvg};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::deck::Deck;
use crate::map::{MAP_FILE, MapLoader, MapStatus};
use crate::navigation::{Cursor, Direction, Move, Navigator};
use crate::render::image_cache::ImageCache;
use crate::render::map_canvas::MapCanvas;
use crate::render::transition::{ActiveTransition, TransitionKind};
use crate::render::{self, SlideContext};
use crate::theme::{Theme, ThemeMode};

const DEFAULT_ASSETS_DIR: &str = "assets";
const DOUBLE_TAP_SECS: f32 = 1.0;
const SCROLL_STEP: f32 = 120.0;
const ICON_SIZE: u32 = 128;

/// Presentation settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub theme: ThemeMode,
    pub transition: TransitionKind,
    /// 0-indexed.
    pub start_slide: usize,
    pub assets_dir: PathBuf,
}

impl Settings {
    /// Flag beats config, config beats the built-in default. `slide` is
    /// 1-indexed as typed by the user.
    pub fn resolve(
        theme: Option<ThemeMode>,
        slide: Option<usize>,
        assets: Option<PathBuf>,
        config: &Config,
    ) -> Self {
        Self {
            theme: theme.or(config.theme()).unwrap_or_default(),
            transition: config
                .transition()
                .unwrap_or(TransitionKind::SlideHorizontal),
            start_slide: slide
                .or(config.start_slide())
                .unwrap_or(1)
                .saturating_sub(1),
            assets_dir: assets
                .or_else(|| config.assets_dir().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
        }
    }

    pub fn map_path(&self) -> PathBuf {
        self.assets_dir.join(MAP_FILE)
    }
}

struct DeckApp {
    deck: Deck,
    navigator: Navigator,
    theme: Theme,
    default_transition: TransitionKind,
    transition: Option<ActiveTransition>,
    image_cache: ImageCache,
    map_canvas: MapCanvas,
    show_hud: bool,
    toast: Option<Toast>,
    last_ctrl_c: Option<Instant>,
    last_esc: Option<Instant>,
    scroll_offset: f32,
    scroll_target: f32,
    /// Content height of the current slide from the last frame, in points.
    content_height: f32,
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 1.5;
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 1.5
    }
}

/// Animation for a move away from `previous`; sub-step moves never animate.
fn transition_for(previous: Cursor, mv: Move, kind: TransitionKind) -> Option<ActiveTransition> {
    match (mv, kind) {
        (_, TransitionKind::None) | (Move::SubStep { .. }, _) => None,
        (Move::Slide { to, direction, .. }, kind) => {
            Some(ActiveTransition::new(previous, to, kind, direction))
        }
    }
}

/// Scrolled content stays inside the slide area.
fn scroll_clip(parent_clip: egui::Rect, slide_rect: egui::Rect) -> egui::Rect {
    parent_clip.intersect(slide_rect)
}

/// Bottom-left position readout, e.g. `SLIDE 11 / 21 • POINT 2`.
pub fn counter_label(cursor: Cursor, slide_count: usize) -> String {
    let mut label = format!("SLIDE {} / {}", cursor.slide + 1, slide_count);
    if let Some(step) = cursor.sub_step {
        label.push_str(&format!(" \u{2022} POINT {}", step + 1));
    }
    label
}

/// Counter and footer line drawn over every slide.
pub fn draw_chrome(
    ui: &egui::Ui,
    deck: &Deck,
    cursor: Cursor,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let counter_color = Theme::with_opacity(theme.foreground, 0.5);
    let counter = ui.painter().layout_no_wrap(
        counter_label(cursor, deck.len()),
        egui::FontId::monospace(16.0 * scale),
        counter_color,
    );
    let counter_pos = egui::pos2(
        rect.left() + 32.0 * scale,
        rect.bottom() - 32.0 * scale - counter.rect.height(),
    );
    ui.painter().galley(counter_pos, counter, counter_color);

    if let Some(footer) = &deck.meta.footer {
        let footer_color = Theme::with_opacity(theme.foreground, 0.4);
        let galley = ui.painter().layout_no_wrap(
            footer.clone(),
            egui::FontId::proportional(14.0 * scale),
            footer_color,
        );
        let pos = egui::pos2(
            rect.center().x - galley.rect.width() / 2.0,
            rect.bottom() - 32.0 * scale - galley.rect.height(),
        );
        ui.painter().galley(pos, galley, footer_color);
    }
}

impl DeckApp {
    fn new(deck: Deck, settings: &Settings, ctx: &egui::Context) -> Self {
        let navigator = Navigator::for_deck(&deck).starting_at(settings.start_slide);
        let loader = MapLoader::spawn(settings.map_path(), Some(ctx.clone()));
        Self {
            deck,
            navigator,
            theme: Theme::from_mode(settings.theme),
            default_transition: settings.transition,
            transition: None,
            image_cache: ImageCache::new(settings.assets_dir.clone()),
            map_canvas: MapCanvas::new(loader),
            show_hud: false,
            toast: None,
            last_ctrl_c: None,
            last_esc: None,
            scroll_offset: 0.0,
            scroll_target: 0.0,
            content_height: 0.0,
        }
    }

    fn navigate_forward(&mut self) {
        let previous = self.navigator.cursor();
        let mv = self.navigator.advance();
        self.apply_move(previous, mv);
    }

    fn navigate_backward(&mut self) {
        let previous = self.navigator.cursor();
        let mv = self.navigator.retreat();
        self.apply_move(previous, mv);
    }

    fn apply_move(&mut self, previous: Cursor, mv: Move) {
        let cursor = self.navigator.cursor();
        if !mv.changed_slide() {
            tracing::debug!(
                slide = cursor.slide + 1,
                point = cursor.sub_step_index(),
                "sub-step changed"
            );
            return;
        }
        if let Some(slide) = self.deck.get(cursor.slide) {
            tracing::debug!(kind = slide.kind().name(), heading = slide.heading(), "showing slide");
        }
        self.scroll_offset = 0.0;
        self.scroll_target = 0.0;
        self.content_height = 0.0;
        self.transition = transition_for(previous, mv, self.default_transition);
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.mode.name())));
    }

    fn cycle_transition(&mut self) {
        self.default_transition = self.default_transition.next();
        self.toast = Some(Toast::new(format!(
            "Transition: {}",
            self.default_transition.name()
        )));
    }

    fn draw_slide(
        &self,
        ui: &egui::Ui,
        index: usize,
        sub_step: Option<usize>,
        rect: egui::Rect,
        opacity: f32,
        scale: f32,
    ) -> f32 {
        let Some(slide) = self.deck.get(index) else {
            return 0.0;
        };
        let ctx = SlideContext {
            index,
            sub_step,
            images: &self.image_cache,
            map: &self.map_canvas,
        };
        render::render_slide(ui, slide, &self.theme, rect, opacity, &ctx, scale)
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        // Viewport commands are sent after the input closure; sending inside
        // ctx.input() deadlocks on the input lock.
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }

            if i.modifiers.ctrl && i.key_pressed(egui::Key::C) {
                if self
                    .last_ctrl_c
                    .is_some_and(|t| t.elapsed().as_secs_f32() < DOUBLE_TAP_SECS)
                {
                    viewport_cmds.push(egui::ViewportCommand::Close);
                    return;
                }
                self.last_ctrl_c = Some(Instant::now());
                self.toast = Some(Toast::new("Press Ctrl+C again to quit".to_string()));
                return;
            }

            if i.key_pressed(egui::Key::Escape) {
                if self
                    .last_esc
                    .is_some_and(|t| t.elapsed().as_secs_f32() < DOUBLE_TAP_SECS)
                {
                    viewport_cmds.push(egui::ViewportCommand::Close);
                    return;
                }
                self.last_esc = Some(Instant::now());
                self.toast = Some(Toast::new("Press Esc again to exit".to_string()));
                return;
            }

            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
                return;
            }

            if i.key_pressed(egui::Key::D) {
                self.toggle_theme();
                return;
            }

            if i.key_pressed(egui::Key::T) {
                self.cycle_transition();
                return;
            }

            if i.key_pressed(egui::Key::H) {
                self.show_hud = !self.show_hud;
            }

            if i.key_pressed(egui::Key::ArrowRight)
                || i.key_pressed(egui::Key::N)
                || i.key_pressed(egui::Key::Space)
            {
                self.navigate_forward();
            }
            if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::P) {
                self.navigate_backward();
            }

            // Clamped against the content height when drawing
            if i.key_pressed(egui::Key::ArrowUp) {
                self.scroll_target = (self.scroll_target - SCROLL_STEP).max(0.0);
            }
            if i.key_pressed(egui::Key::ArrowDown) {
                self.scroll_target += SCROLL_STEP;
            }
            let scroll = i.smooth_scroll_delta;
            if scroll.y != 0.0 {
                self.scroll_target -= scroll.y;
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
    }

    fn draw_presentation(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, rect: egui::Rect, scale: f32) {
        if let Some(t) = self.transition {
            let progress = t.progress();
            match t.kind {
                TransitionKind::Fade => {
                    self.draw_slide(ui, t.from.slide, t.from.sub_step, rect, 1.0 - progress, scale);
                    self.draw_slide(ui, t.to, None, rect, progress, scale);
                }
                TransitionKind::SlideHorizontal => {
                    let w = rect.width();
                    let sign = match t.direction {
                        Direction::Forward => -1.0,
                        Direction::Backward => 1.0,
                    };
                    let from_offset = sign * progress * w;
                    let to_offset = from_offset - sign * w;
                    let from_rect = rect.translate(egui::vec2(from_offset, 0.0));
                    let to_rect = rect.translate(egui::vec2(to_offset, 0.0));
                    self.draw_slide(ui, t.from.slide, t.from.sub_step, from_rect, 1.0, scale);
                    self.draw_slide(ui, t.to, None, to_rect, 1.0, scale);
                }
                TransitionKind::None => {
                    self.draw_slide(ui, t.to, None, rect, 1.0, scale);
                }
            }
            ctx.request_repaint();
            return;
        }

        let overflow = self.content_height - rect.height();
        if overflow <= 0.0 {
            self.scroll_offset = 0.0;
            self.scroll_target = 0.0;
        } else {
            self.scroll_target = self.scroll_target.clamp(0.0, overflow);
            let diff = self.scroll_target - self.scroll_offset;
            if diff.abs() < 0.5 {
                self.scroll_offset = self.scroll_target;
            } else {
                // Move 15% of the remaining distance each frame
                self.scroll_offset += diff * 0.15;
                ctx.request_repaint();
            }
        }

        let cursor = self.navigator.cursor();
        let scrolled_rect = rect.translate(egui::vec2(0.0, -self.scroll_offset));
        let mut child_ui = ui.new_child(egui::UiBuilder::new().max_rect(rect).id_salt("scroll_clip"));
        child_ui.set_clip_rect(scroll_clip(ui.clip_rect(), rect));
        let drawn = self.draw_slide(&child_ui, cursor.slide, cursor.sub_step, scrolled_rect, 1.0, scale);
        // Leave room below the content for the chrome row
        self.content_height = drawn + 96.0 * scale;

        if overflow > 0.0 {
            let fade_h = 80.0 * scale;
            if self.scroll_offset < overflow - 0.5 {
                draw_fade_gradient(ui, rect, fade_h, &self.theme, false);
            }
            if self.scroll_offset > 0.5 {
                draw_fade_gradient(ui, rect, fade_h, &self.theme, true);
            }
        }
    }

    /// Previous/next buttons bottom-right and the theme toggle top-right.
    fn draw_controls(&mut self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let radius = 30.0 * scale;
        let margin = 32.0 * scale;
        let gap = 16.0 * scale;

        let next_center = egui::pos2(
            rect.right() - margin - radius,
            rect.bottom() - margin - radius,
        );
        let prev_center = egui::pos2(next_center.x - radius * 2.0 - gap, next_center.y);
        let theme_center = egui::pos2(
            rect.right() - margin - radius * 0.8,
            rect.top() + margin + radius * 0.8,
        );

        if control_button(ui, "prev", prev_center, radius, &self.theme, |p, c, col| {
            draw_chevron(p, c, radius, col, -1.0, scale)
        }) {
            self.navigate_backward();
        }
        if control_button(ui, "next", next_center, radius, &self.theme, |p, c, col| {
            draw_chevron(p, c, radius, col, 1.0, scale)
        }) {
            self.navigate_forward();
        }

        let dark = self.theme.mode == ThemeMode::Dark;
        let bg = self.theme.background;
        if control_button(
            ui,
            "theme",
            theme_center,
            radius * 0.8,
            &self.theme,
            |p, c, col| {
                if dark {
                    draw_sun(p, c, radius * 0.8, col, scale);
                } else {
                    draw_moon(p, c, radius * 0.8, col, bg);
                }
            },
        ) {
            self.toggle_theme();
        }
    }

    fn draw_toast(&self, ui: &egui::Ui, ctx: &egui::Context, rect: egui::Rect, scale: f32) {
        let Some(toast) = &self.toast else {
            return;
        };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let toast_color = Theme::with_opacity(self.theme.foreground, opacity * 0.9);
        let toast_bg = Theme::with_opacity(self.theme.panel_background, opacity * 0.9);
        let galley = ui.painter().layout_no_wrap(
            toast.message.clone(),
            egui::FontId::proportional(20.0 * scale),
            toast_color,
        );
        let padding = 16.0 * scale;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.bottom() - 120.0 * scale,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
        let text_pos = egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding);
        ui.painter().galley(text_pos, galley, toast_color);
        ctx.request_repaint();
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.map_canvas.poll() {
            if let MapStatus::Failed(message) = self.map_canvas.status() {
                self.toast = Some(Toast::new(format!("Map unavailable: {message}")));
            }
            ctx.request_repaint();
        }

        self.handle_keys(ctx);

        if self.transition.is_some_and(|t| t.is_complete()) {
            self.transition = None;
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let bg = self.theme.background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                let scale = render::compute_scale(rect);

                self.draw_presentation(ui, ctx, rect, scale);
                draw_chrome(
                    ui,
                    &self.deck,
                    self.navigator.cursor(),
                    &self.theme,
                    rect,
                    scale,
                );
                self.draw_controls(ui, rect, scale);
                self.draw_toast(ui, ctx, rect, scale);

                if self.show_hud {
                    draw_hud(ui, &self.theme, rect, scale);
                }
            });

        self.map_canvas.end_frame();
    }
}

/// Round, clickable control. `paint_icon` draws the glyph in the given color.
fn control_button(
    ui: &egui::Ui,
    id: &str,
    center: egui::Pos2,
    radius: f32,
    theme: &Theme,
    paint_icon: impl FnOnce(&egui::Painter, egui::Pos2, egui::Color32),
) -> bool {
    let rect = egui::Rect::from_center_size(center, egui::vec2(radius * 2.0, radius * 2.0));
    let response = ui.interact(rect, ui.id().with(id), egui::Sense::click());
    let hovered = response.hovered();

    let (fill, icon) = if hovered {
        (theme.accent, egui::Color32::WHITE)
    } else {
        (
            Theme::with_opacity(theme.panel_background, 0.7),
            theme.foreground,
        )
    };
    let painter = ui.painter();
    painter.circle_filled(center, radius, fill);
    painter.circle_stroke(
        center,
        radius,
        egui::Stroke::new(1.0, Theme::with_opacity(theme.foreground, 0.1)),
    );
    paint_icon(painter, center, icon);
    if hovered {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.clicked()
}

/// `dir` is -1.0 for a left chevron, 1.0 for a right one.
fn draw_chevron(
    painter: &egui::Painter,
    center: egui::Pos2,
    radius: f32,
    color: egui::Color32,
    dir: f32,
    scale: f32,
) {
    let h = radius * 0.3;
    let tip = egui::pos2(center.x + dir * h * 0.6, center.y);
    let back = center.x - dir * h * 0.6;
    let stroke = egui::Stroke::new(3.0 * scale, color);
    painter.line_segment([egui::pos2(back, center.y - h), tip], stroke);
    painter.line_segment([tip, egui::pos2(back, center.y + h)], stroke);
}

fn draw_sun(painter: &egui::Painter, center: egui::Pos2, radius: f32, color: egui::Color32, scale: f32) {
    painter.circle_filled(center, radius * 0.25, color);
    let stroke = egui::Stroke::new(2.0 * scale, color);
    for i in 0..8 {
        let a = i as f32 * std::f32::consts::TAU / 8.0;
        let dir = egui::vec2(a.cos(), a.sin());
        painter.line_segment(
            [center + dir * radius * 0.38, center + dir * radius * 0.52],
            stroke,
        );
    }
}

fn draw_moon(
    painter: &egui::Painter,
    center: egui::Pos2,
    radius: f32,
    color: egui::Color32,
    background: egui::Color32,
) {
    let r = radius * 0.4;
    painter.circle_filled(center, r, color);
    painter.circle_filled(center + egui::vec2(r * 0.45, -r * 0.35), r * 0.85, background);
}

/// Draw a fade gradient at the top or bottom of a rect.
fn draw_fade_gradient(ui: &egui::Ui, rect: egui::Rect, fade_h: f32, theme: &Theme, top: bool) {
    let bg = theme.background;
    let transparent = egui::Color32::from_rgba_unmultiplied(bg.r(), bg.g(), bg.b(), 0);

    let fade_rect = if top {
        egui::Rect::from_min_max(
            rect.left_top(),
            egui::pos2(rect.right(), rect.top() + fade_h),
        )
    } else {
        egui::Rect::from_min_max(
            egui::pos2(rect.left(), rect.bottom() - fade_h),
            rect.right_bottom(),
        )
    };
    let (top_color, bottom_color) = if top {
        (bg, transparent)
    } else {
        (transparent, bg)
    };

    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(fade_rect.left_top(), top_color);
    mesh.colored_vertex(fade_rect.right_top(), top_color);
    mesh.colored_vertex(fade_rect.left_bottom(), bottom_color);
    mesh.colored_vertex(fade_rect.right_bottom(), bottom_color);
    mesh.add_triangle(0, 2, 1);
    mesh.add_triangle(1, 2, 3);
    ui.painter().add(egui::Shape::mesh(mesh));
}

const SHORTCUTS: &[(&str, &str)] = &[
    ("Space / N / \u{2192}", "Next point / slide"),
    ("P / \u{2190}", "Previous point / slide"),
    ("\u{2191} / \u{2193} / Wheel", "Scroll slide content"),
    ("D", "Toggle theme"),
    ("T", "Cycle transition"),
    ("F", "Toggle fullscreen"),
    ("H", "Toggle this HUD"),
    ("Esc \u{00d7}2", "Exit"),
    ("Q", "Quit"),
];

fn draw_hud(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
    let bg = Theme::with_opacity(theme.panel_background, 0.92);
    let text_color = Theme::with_opacity(theme.foreground, 0.9);
    let key_color = Theme::with_opacity(theme.accent, 0.9);

    let padding = 24.0 * scale;
    let line_height = 32.0 * scale;
    let hud_height = SHORTCUTS.len() as f32 * line_height + padding * 2.0 + 40.0 * scale;
    let hud_width = 400.0 * scale;
    let hud_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(hud_width, hud_height));
    ui.painter().rect_filled(hud_rect, 12.0 * scale, bg);

    let title = ui.painter().layout_no_wrap(
        "Keyboard Shortcuts".to_string(),
        egui::FontId::proportional(20.0 * scale),
        Theme::with_opacity(theme.heading_color, 0.9),
    );
    ui.painter().galley(
        egui::pos2(hud_rect.left() + padding, hud_rect.top() + padding),
        title,
        text_color,
    );

    let mut y = hud_rect.top() + padding + 40.0 * scale;
    for (key, desc) in SHORTCUTS {
        let key_galley = ui.painter().layout_no_wrap(
            key.to_string(),
            egui::FontId::monospace(15.0 * scale),
            key_color,
        );
        ui.painter()
            .galley(egui::pos2(hud_rect.left() + padding, y), key_galley, key_color);
        let desc_galley = ui.painter().layout_no_wrap(
            desc.to_string(),
            egui::FontId::proportional(15.0 * scale),
            text_color,
        );
        ui.painter().galley(
            egui::pos2(hud_rect.left() + padding + 190.0 * scale, y),
            desc_galley,
            text_color,
        );
        y += line_height;
    }
}

fn load_app_icon() -> Option<egui::IconData> {
    let svg = include_bytes!("../assets/icon.svg");
    let tree = usvg::Tree::from_data(svg, &usvg::Options::default()).ok()?;
    let mut pixmap = tiny_skia::Pixmap::new(ICON_SIZE, ICON_SIZE)?;
    let size = tree.size();
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(
            ICON_SIZE as f32 / size.width(),
            ICON_SIZE as f32 / size.height(),
        ),
        &mut pixmap.as_mut(),
    );
    let rgba = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Some(egui::IconData {
        rgba,
        width: ICON_SIZE,
        height: ICON_SIZE,
    })
}

pub fn run(windowed: bool, settings: Settings) -> anyhow::Result<()> {
    let deck = Deck::builtin()?;
    let title = deck.display_title().to_string();
    tracing::info!(
        slides = deck.len(),
        assets = %settings.assets_dir.display(),
        "starting presentation"
    );

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let viewport = match load_app_icon() {
        Some(icon) => viewport.with_icon(Arc::new(icon)),
        None => viewport,
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(DeckApp::new(deck, &settings, &cc.egui_ctx)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Stop;

    #[test]
    fn outgoing_map_slide_keeps_its_point() {
        let mut nav = Navigator::new(vec![Stop::Map { steps: 2 }, Stop::Plain]);
        nav.advance();
        nav.advance();
        let previous = nav.cursor();
        let mv = nav.advance();

        let t = transition_for(previous, mv, TransitionKind::Fade).unwrap();
        assert_eq!(
            t.from,
            Cursor {
                slide: 0,
                sub_step: Some(1)
            }
        );
        assert_eq!(t.to, 1);
        assert_eq!(t.direction, Direction::Forward);
    }

    #[test]
    fn sub_steps_and_none_kind_do_not_animate() {
        let mut nav = Navigator::new(vec![Stop::Map { steps: 2 }, Stop::Plain]);
        let previous = nav.cursor();
        let mv = nav.advance();
        assert!(transition_for(previous, mv, TransitionKind::SlideHorizontal).is_none());

        let mut nav = Navigator::new(vec![Stop::Plain, Stop::Plain]);
        let previous = nav.cursor();
        let mv = nav.advance();
        assert!(transition_for(previous, mv, TransitionKind::None).is_none());
    }

    #[test]
    fn scrolled_content_is_clipped_to_the_slide() {
        let screen = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1920.0, 1080.0));
        let slide = egui::Rect::from_min_max(egui::pos2(0.0, 40.0), egui::pos2(1920.0, 1000.0));
        assert_eq!(scroll_clip(screen, slide), slide);

        let narrow = egui::Rect::from_min_max(egui::pos2(100.0, 0.0), egui::pos2(900.0, 500.0));
        assert_eq!(
            scroll_clip(narrow, slide),
            egui::Rect::from_min_max(egui::pos2(100.0, 40.0), egui::pos2(900.0, 500.0))
        );
    }

    #[test]
    fn counter_on_plain_slide() {
        let cursor = Cursor {
            slide: 0,
            sub_step: None,
        };
        assert_eq!(counter_label(cursor, 21), "SLIDE 1 / 21");
    }

    #[test]
    fn counter_on_map_point() {
        let cursor = Cursor {
            slide: 10,
            sub_step: Some(1),
        };
        assert_eq!(counter_label(cursor, 21), "SLIDE 11 / 21 \u{2022} POINT 2");
    }

    #[test]
    fn settings_fall_back_to_defaults() {
        let settings = Settings::resolve(None, None, None, &Config::default());
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.transition, TransitionKind::SlideHorizontal);
        assert_eq!(settings.start_slide, 0);
        assert_eq!(settings.assets_dir, PathBuf::from("assets"));
        assert_eq!(settings.map_path(), PathBuf::from("assets/india.svg"));
    }

    #[test]
    fn settings_prefer_config_over_defaults() {
        let mut config = Config::default();
        config.set("defaults.theme", "light").unwrap();
        config.set("defaults.transition", "fade").unwrap();
        config.set("defaults.start_slide", "11").unwrap();
        config.set("defaults.assets_dir", "media").unwrap();
        let settings = Settings::resolve(None, None, None, &config);
        assert_eq!(settings.theme, ThemeMode::Light);
        assert_eq!(settings.transition, TransitionKind::Fade);
        assert_eq!(settings.start_slide, 10);
        assert_eq!(settings.assets_dir, PathBuf::from("media"));
    }

    #[test]
    fn settings_prefer_flags_over_config() {
        let mut config = Config::default();
        config.set("defaults.theme", "light").unwrap();
        config.set("defaults.start_slide", "11").unwrap();
        config.set("defaults.assets_dir", "media").unwrap();
        let settings = Settings::resolve(
            Some(ThemeMode::Dark),
            Some(3),
            Some(PathBuf::from("/tmp/deck")),
            &config,
        );
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.start_slide, 2);
        assert_eq!(settings.assets_dir, PathBuf::from("/tmp/deck"));
    }

    #[test]
    fn slide_zero_flag_clamps_to_first() {
        let settings = Settings::resolve(None, Some(0), None, &Config::default());
        assert_eq!(settings.start_slide, 0);
    }

    #[test]
    fn app_icon_rasterizes() {
        let icon = load_app_icon().expect("icon");
        assert_eq!(icon.rgba.len(), (ICON_SIZE * ICON_SIZE * 4) as usize);
    }
}
