#![cfg(feature = "egui")]

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Vec2};

use crate::config::MediaType;
use crate::layout::Vec2d;
use crate::view::ViewEvent;

use super::state::{AtlasApp, AudioCue, GuideState, LoadState};
use crate::view::Viewport;

const GOLD: Color32 = Color32::from_rgb(0xd4, 0xaf, 0x37);
const MANDALA_STROKE: Color32 = Color32::from_rgb(0x8a, 0x6d, 0x1f);
const MANDALA_FILL: Color32 = Color32::from_rgba_premultiplied(40, 32, 8, 40);
const VERSE_DOT: Color32 = Color32::from_rgb(0xf0, 0xe6, 0xc8);
const VERSE_DOT_FOCUSED: Color32 = Color32::from_rgb(0xff, 0x8c, 0x42);

/// What a click on the canvas hit, resolved before any state is mutated.
enum CanvasHit {
    Verse(usize),
    Mandala(u32),
    Background,
}

/// Render one frame and translate UI events into controller calls.
pub fn update(app: &mut AtlasApp, ctx: &egui::Context, _frame: &mut eframe::Frame) {
    // Cues are queued per frame for an external player.
    app.pending_cues.clear();

    let now_ms = ctx.input(|i| i.time) * 1000.0;

    // Fatal load failure: one error panel, nothing else.
    if let LoadState::Failed { message } = &app.load {
        let message = message.clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.colored_label(
                    Color32::RED,
                    format!(
                        "Error: {message}. Please ensure the dataset and config files are present, then reload."
                    ),
                );
            });
        });
        return;
    }

    // Startup join: the splash stays up until the minimum display duration
    // has elapsed (the dataset itself is already loaded by construction).
    let splash_min_ms = app.controller.config().splash_min_ms;
    if let LoadState::Loading { shown_since_ms } = &mut app.load {
        let since = *shown_since_ms.get_or_insert(now_ms);
        if now_ms - since < splash_min_ms {
            let media_url = app.display.media_url.clone();
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(ui.available_height() * 0.4);
                        ui.spinner();
                        ui.label("Loading the atlas…");
                        if !media_url.is_empty() {
                            ui.weak(media_url);
                        }
                    });
                });
            });
            ctx.request_repaint();
            return;
        }
        app.load = LoadState::Ready;
        if !app.guide.completed {
            app.cue(AudioCue::Open);
            app.guide.open();
        }
    }

    header(app, ctx);
    canvas(app, ctx, now_ms);
    controls_overlay(app, ctx);
    verse_dialog(app, ctx);
    info_dialog(app, ctx);
    guide_dialog(app, ctx);

    // Escape closes whatever is open.
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        if app.verse_dialog.is_some() {
            app.close_verse();
        }
        if app.info_open {
            app.cue(AudioCue::Close);
            app.info_open = false;
        }
        if app.guide.open {
            app.cue(AudioCue::Close);
            app.guide.close();
        }
    }
}

fn header(app: &mut AtlasApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Mandala Atlas");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Guide").clicked() {
                    app.cue(AudioCue::Open);
                    app.guide.open();
                }
                if ui.button("About").clicked() {
                    app.cue(AudioCue::Open);
                    app.info_open = true;
                }
                if ui.button("Random verse").clicked() {
                    app.random_verse();
                }
            });
        });
    });
}

fn canvas(app: &mut AtlasApp, ctx: &egui::Context, now_ms: f64) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let avail = ui.available_rect_before_wrap();
        let origin = avail.min;

        // Resize is destructive: re-derive layout and home transform.
        let viewport = Viewport::new(avail.width() as f64, avail.height() as f64, 0.0);
        let old = app.controller.viewport();
        if (old.width - viewport.width).abs() > 0.5 || (old.height - viewport.height).abs() > 0.5 {
            app.controller.relayout(&mut app.dataset, viewport);
        }

        // Advance any in-flight transition; arrival at a verse opens its
        // dialog exactly once.
        if let Some(event) = app.controller.tick(now_ms) {
            if let ViewEvent::ItemFocused(index) = event {
                app.cue(AudioCue::Open);
                app.open_verse(index);
            }
        }
        if app.controller.is_animating() {
            ctx.request_repaint();
        }

        // Manual gestures.
        let resp = ui.interact(avail, ui.id().with("atlas"), Sense::click_and_drag());
        if resp.dragged() {
            let d = resp.drag_delta();
            app.controller.pan_by(d.x as f64, d.y as f64);
        }
        let scroll_y = ui.input(|i| i.raw_scroll_delta.y);
        if scroll_y.abs() > 0.0 && resp.hovered() {
            let factor = (1.0 + scroll_y as f64 * 0.001).max(0.1);
            let cursor = resp.hover_pos().unwrap_or(avail.center());
            let anchor = Vec2d::new((cursor.x - origin.x) as f64, (cursor.y - origin.y) as f64);
            app.controller.zoom_at(anchor, factor);
        }

        if resp.clicked() {
            if let Some(pos) = resp.interact_pointer_pos() {
                let local = Vec2d::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64);
                match hit_test(app, local) {
                    CanvasHit::Verse(index) => {
                        app.cue(AudioCue::Open);
                        app.open_verse(index);
                    }
                    CanvasHit::Mandala(number) => {
                        app.cue(AudioCue::Zoom);
                        app.controller.focus_group(&app.dataset, number);
                        ctx.request_repaint();
                    }
                    CanvasHit::Background => {}
                }
            }
        }

        draw_scene(app, ui, origin);
    });
}

fn hit_test(app: &AtlasApp, screen: Vec2d) -> CanvasHit {
    let transform = app.controller.current();
    let world = transform.invert(screen);
    let cfg = app.controller.config();
    // Dots are 1 world unit; give clicks a few screen pixels of slack.
    let dot_slack = (4.0 / transform.k).max(1.0);

    let mut best: Option<(f64, usize)> = None;
    for m in &app.dataset.mandalas {
        for v in &m.verses {
            let (ax, ay) = m.verse_position(v);
            let d = ((world.x - ax).powi(2) + (world.y - ay).powi(2)).sqrt();
            if d <= dot_slack && best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, v.original_index));
            }
        }
    }
    if let Some((_, index)) = best {
        return CanvasHit::Verse(index);
    }
    for m in &app.dataset.mandalas {
        let d = ((world.x - m.center_x).powi(2) + (world.y - m.center_y).powi(2)).sqrt();
        if d <= cfg.mandala_radius {
            return CanvasHit::Mandala(m.number);
        }
    }
    CanvasHit::Background
}

fn draw_scene(app: &AtlasApp, ui: &egui::Ui, origin: Pos2) {
    let transform = app.controller.current();
    let cfg = app.controller.config();
    let painter = ui.painter();

    let to_screen = |x: f64, y: f64| -> Pos2 {
        Pos2::new(
            origin.x + (x * transform.k + transform.x) as f32,
            origin.y + (y * transform.k + transform.y) as f32,
        )
    };

    // Central decorative disk; the configured media is represented by its
    // reference, actual decode/playback is external.
    let central_center = to_screen(0.0, 0.0);
    let central_r = (cfg.central_radius * transform.k) as f32;
    painter.circle_filled(central_center, central_r, GOLD);
    let media_tag = match app.display.media_type {
        MediaType::Image => "🖼",
        MediaType::Video => "▶",
    };
    painter.text(
        central_center,
        Align2::CENTER_CENTER,
        media_tag,
        FontId::proportional((central_r * 0.5).clamp(8.0, 120.0)),
        Color32::from_black_alpha(160),
    );

    let focused = app.controller.current_item();
    for m in &app.dataset.mandalas {
        let center = to_screen(m.center_x, m.center_y);
        let r = (cfg.mandala_radius * transform.k) as f32;
        painter.circle_filled(center, r, MANDALA_FILL);
        painter.circle_stroke(center, r, Stroke::new((r * 0.02).clamp(0.5, 3.0), MANDALA_STROKE));
        for v in &m.verses {
            let (ax, ay) = m.verse_position(v);
            let dot_r = (transform.k as f32).max(0.75);
            let color = if focused == Some(v.original_index) {
                VERSE_DOT_FOCUSED
            } else {
                VERSE_DOT
            };
            painter.circle_filled(to_screen(ax, ay), dot_r, color);
        }
    }
}

fn controls_overlay(app: &mut AtlasApp, ctx: &egui::Context) {
    let screen = ctx.screen_rect();
    egui::Area::new("atlas_controls".into())
        .fixed_pos(Pos2::new(screen.left() + 8.0, screen.bottom() - 40.0))
        .show(ctx, |ui| {
            egui::Frame::menu(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    let cfg = *app.controller.config();
                    if ui.small_button("+").clicked() {
                        app.cue(AudioCue::Click);
                        app.controller.zoom_step(cfg.zoom_in_step);
                        ctx.request_repaint();
                    }
                    if ui.small_button("−").clicked() {
                        app.cue(AudioCue::Click);
                        app.controller.zoom_step(cfg.zoom_out_step);
                        ctx.request_repaint();
                    }
                    if ui.small_button("Reset").clicked() {
                        app.cue(AudioCue::Zoom);
                        app.controller.reset_to_home();
                        ctx.request_repaint();
                    }
                    if ui.small_button("🎲").clicked() {
                        app.random_verse();
                        ctx.request_repaint();
                    }
                    // Zoom level relative to the home fit
                    let percent =
                        (app.controller.current().k / app.controller.home().k * 100.0).round();
                    ui.label(format!("{}%", percent as i64));
                });
            });
        });
}

fn verse_dialog(app: &mut AtlasApp, ctx: &egui::Context) {
    let Some(dialog) = app.verse_dialog.clone() else {
        return;
    };
    let Some((_, verse)) = app.dataset.verse_by_original_index(dialog.index) else {
        app.verse_dialog = None;
        return;
    };
    let heading = verse.heading();
    let devanagari = verse.devanagari.clone().unwrap_or_default();
    let transliteration = verse.transliteration_plain();
    let translation = verse.translation.clone().unwrap_or_default();
    let pills = verse.tag_pills();
    let at_start = dialog.index == 0;
    let at_end = dialog.index + 1 >= app.dataset.verse_count();

    let mut open = true;
    let mut step: Option<i64> = None;
    let mut random = false;
    egui::Window::new(heading)
        .id(egui::Id::new("verse_dialog"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .open(&mut open)
        .show(ctx, |ui| {
            ui.set_max_width(420.0);
            if !devanagari.is_empty() {
                ui.label(egui::RichText::new(&devanagari).size(20.0));
                ui.add_space(4.0);
            }
            if !transliteration.is_empty() {
                ui.label(egui::RichText::new(&transliteration).italics());
                ui.add_space(4.0);
            }
            if !translation.is_empty() {
                ui.label(&translation);
            }
            if !pills.is_empty() {
                ui.add_space(6.0);
                ui.horizontal_wrapped(|ui| {
                    for pill in &pills {
                        ui.small_button(pill.as_str());
                    }
                });
            }
            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!at_start, egui::Button::new("◀ Prev"))
                    .clicked()
                {
                    step = Some(-1);
                }
                if ui.add_enabled(!at_end, egui::Button::new("Next ▶")).clicked() {
                    step = Some(1);
                }
                if ui.button("Random").clicked() {
                    random = true;
                }
            });
        });

    if random {
        app.random_verse();
        ctx.request_repaint();
    } else if let Some(direction) = step {
        app.step_verse(direction);
    } else if !open {
        app.close_verse();
    }
}

fn info_dialog(app: &mut AtlasApp, ctx: &egui::Context) {
    if !app.info_open {
        return;
    }
    let media_url = app.display.media_url.clone();
    let mandala_count = app.dataset.mandalas.len();
    let verse_count = app.dataset.verse_count();
    let mut open = true;
    egui::Window::new("About")
        .id(egui::Id::new("info_dialog"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .open(&mut open)
        .show(ctx, |ui| {
            ui.label(format!(
                "{mandala_count} mandalas, {verse_count} verses, laid out on a golden-angle spiral."
            ));
            if !media_url.is_empty() {
                ui.weak(format!("Central media: {media_url}"));
            }
        });
    if !open {
        app.cue(AudioCue::Close);
        app.info_open = false;
    }
}

fn guide_dialog(app: &mut AtlasApp, ctx: &egui::Context) {
    if !app.guide.open {
        return;
    }
    let step = app.guide.step;
    let (title, body) = GuideState::STEPS[step.min(GuideState::STEPS.len() - 1)];
    let counter = app.guide.counter();
    let is_last = app.guide.is_last_step();

    enum GuideAction {
        None,
        Back,
        Next,
        Close,
    }
    let mut action = GuideAction::None;
    egui::Window::new("Getting started")
        .id(egui::Id::new("guide_dialog"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.strong(title);
            ui.label(body);
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(&counter);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if is_last {
                        if ui.button("Close").clicked() {
                            action = GuideAction::Close;
                        }
                    } else {
                        if ui.button("Next").clicked() {
                            action = GuideAction::Next;
                        }
                        if ui.button("Skip").clicked() {
                            action = GuideAction::Close;
                        }
                    }
                    if step > 0 {
                        if ui.button("Back").clicked() {
                            action = GuideAction::Back;
                        }
                    }
                });
            });
        });

    match action {
        GuideAction::None => {}
        GuideAction::Back => {
            app.cue(AudioCue::Click);
            app.guide.back();
        }
        GuideAction::Next => {
            app.cue(AudioCue::Click);
            app.guide.next();
        }
        GuideAction::Close => {
            app.cue(AudioCue::Close);
            app.guide.close();
        }
    }
}
