use anyhow::Context;
use std::path::{Path, PathBuf};

use eframe::egui;

use crate::app::{self, Settings};
use crate::deck::Deck;
use crate::map::MapLoader;
use crate::navigation::{Cursor, Navigator};
use crate::render::image_cache::ImageCache;
use crate::render::map_canvas::MapCanvas;
use crate::render::{self, SlideContext};
use crate::theme::Theme;

/// `slide-11.png` for a slide, `slide-11-point-2.png` for a map point.
fn stop_filename(cursor: Cursor) -> String {
    match cursor.sub_step {
        None => format!("slide-{:02}.png", cursor.slide + 1),
        Some(step) => format!("slide-{:02}-point-{}.png", cursor.slide + 1, step + 1),
    }
}

struct ExportApp {
    deck: Deck,
    theme: Theme,
    image_cache: ImageCache,
    map_canvas: MapCanvas,
    output_dir: PathBuf,
    stops: Vec<Cursor>,
    current: usize,
    screenshot_requested: bool,
    failures: usize,
    done: bool,
}

impl ExportApp {
    fn new(deck: Deck, settings: &Settings, output_dir: PathBuf) -> Self {
        let stops = Navigator::for_deck(&deck).stops();
        Self {
            deck,
            theme: Theme::from_mode(settings.theme),
            image_cache: ImageCache::new(settings.assets_dir.clone()),
            map_canvas: MapCanvas::new(MapLoader::blocking(settings.map_path())),
            output_dir,
            stops,
            current: 0,
            screenshot_requested: false,
            failures: 0,
            done: false,
        }
    }
}

impl eframe::App for ExportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.done {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        // A screenshot requested last frame shows up as an event
        let mut got_screenshot = false;
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Screenshot { image, .. } = event {
                    let Some(cursor) = self.stops.get(self.current) else {
                        continue;
                    };
                    let filename = stop_filename(*cursor);
                    let path = self.output_dir.join(&filename);
                    match save_color_image(image, &path) {
                        Ok(()) => tracing::info!("saved {filename}"),
                        Err(e) => {
                            tracing::error!("{e:#}");
                            self.failures += 1;
                        }
                    }
                    got_screenshot = true;
                }
            }
        });

        if got_screenshot {
            self.screenshot_requested = false;
            self.current += 1;
            if self.current >= self.stops.len() {
                if self.failures > 0 {
                    tracing::warn!("{} of {} images failed to save", self.failures, self.stops.len());
                }
                self.done = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }

        let Some(cursor) = self.stops.get(self.current).copied() else {
            return;
        };
        let bg = self.theme.background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                let scale = render::compute_scale(rect);

                if let Some(slide) = self.deck.get(cursor.slide) {
                    let slide_ctx = SlideContext {
                        index: cursor.slide,
                        sub_step: cursor.sub_step,
                        images: &self.image_cache,
                        map: &self.map_canvas,
                    };
                    render::render_slide(ui, slide, &self.theme, rect, 1.0, &slide_ctx, scale);
                }
                app::draw_chrome(ui, &self.deck, cursor, &self.theme, rect, scale);
            });
        self.map_canvas.end_frame();

        // Request screenshot after rendering (will arrive next frame)
        if !self.screenshot_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.screenshot_requested = true;
        }

        ctx.request_repaint();
    }
}

fn save_color_image(image: &egui::ColorImage, path: &Path) -> anyhow::Result<()> {
    let width = image.width() as u32;
    let height = image.height() as u32;
    let pixels: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
        .collect();

    image::save_buffer(path, &pixels, width, height, image::ColorType::Rgba8)
        .with_context(|| format!("Failed to save {}", path.display()))
}

pub fn run(settings: &Settings, output_dir: PathBuf, width: u32, height: u32) -> anyhow::Result<()> {
    let deck = Deck::builtin()?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let stop_count = Navigator::for_deck(&deck).stops().len();
    tracing::info!(
        "exporting {} slides ({} images) to {} ({}x{})",
        deck.len(),
        stop_count,
        output_dir.display(),
        width,
        height,
    );

    let title = format!("{} export", deck.display_title());
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([width as f32, height as f32])
        .with_title(&title)
        .with_decorations(false);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let settings = settings.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ExportApp::new(deck, &settings, output_dir)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing::info!("export complete");
    Ok(())
}
