//! Echo Trail Clock
//!
//! A watch face drawn as one jointed arm: year, month, hour, minute and
//! second hang off each other as pivots. Fifteen echoes trail behind the arm
//! and fifteen overshoot ahead of it, so the face reads as motion.

mod drawing;
mod echoes;
mod geometry;
mod precision;
mod render;
mod style;
mod ui;

use chrono::Utc;
use chrono_tz::Tz;
use log::{debug, info, warn};
use nannou::prelude::*;
use nannou_egui::{self, Egui};
use serde::{Deserialize, Serialize};
use shared::{parse_timezone, snapshot_at, snapshot_now, ConfigStore};

use crate::drawing::{colors, NannouSurface, Viewport};
use crate::geometry::Bounds;
use crate::precision::{ClockState, DEFAULT_PRECISION_WINDOW_TICKS};
use crate::ui::{PickerState, SidebarView};

const CLOCK_NAME: &str = "echo_trail";
const DEFAULT_TZ: &str = "America/Los_Angeles";
const SIDEBAR_WIDTH: f32 = 240.0;
/// Display of the original watch hardware
const DEFAULT_DISPLAY: Bounds = Bounds::new(144, 168);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    nannou::app(model).update(update).run();
}

/// Persisted configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    selected_zone_id: String,
    monochrome: bool,
    display_width: i32,
    display_height: i32,
    precision_window_ticks: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selected_zone_id: DEFAULT_TZ.to_string(),
            monochrome: false,
            display_width: DEFAULT_DISPLAY.width,
            display_height: DEFAULT_DISPLAY.height,
            precision_window_ticks: DEFAULT_PRECISION_WINDOW_TICKS,
        }
    }
}

impl Config {
    /// Replace unusable values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Config::default();
        if let Err(e) = parse_timezone(&self.selected_zone_id) {
            warn!("{}, using {}", e, DEFAULT_TZ);
            self.selected_zone_id = defaults.selected_zone_id;
        }
        if self.display_width <= 0 || self.display_height <= 0 {
            warn!(
                "Invalid display size {}x{}, using {}x{}",
                self.display_width, self.display_height, defaults.display_width, defaults.display_height
            );
            self.display_width = defaults.display_width;
            self.display_height = defaults.display_height;
        }
        self
    }

    fn zone(&self) -> Tz {
        parse_timezone(&self.selected_zone_id).unwrap_or(chrono_tz::America::Los_Angeles)
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.display_width, self.display_height)
    }
}

/// Application state
struct Model {
    config: Config,
    config_store: Option<ConfigStore>,
    selected_zone: Tz,
    /// Snapshot and tick policy shared by ticks and redraws
    clock: ClockState,
    picker_state: PickerState,
    egui: Egui,
}

impl Model {
    fn set_timezone(&mut self, tz: Tz) {
        info!("Switching to {}", tz.name());
        self.selected_zone = tz;
        self.config.selected_zone_id = tz.name().to_string();
        self.clock.resync(snapshot_now(tz));
        save_config(self);
    }

    fn toggle_monochrome(&mut self) {
        self.config.monochrome = !self.config.monochrome;
        save_config(self);
    }

    fn tap(&mut self) {
        debug!("Tap");
        self.clock.handle_trigger();
    }
}

fn save_config(model: &Model) {
    let Some(store) = &model.config_store else {
        return;
    };
    if let Err(e) = store.save(CLOCK_NAME, &model.config) {
        warn!("Failed to save config: {}", e);
    }
}

fn load_config(store: Option<&ConfigStore>) -> Config {
    let Some(store) = store else {
        return Config::default();
    };
    match store.load_or_default::<Config>(CLOCK_NAME) {
        Ok(config) => config.sanitized(),
        Err(e) => {
            warn!("Failed to load config from {}: {}", store.path(CLOCK_NAME).display(), e);
            Config::default()
        }
    }
}

fn canvas_rect(window_rect: Rect) -> Rect {
    let canvas_width = window_rect.w() - SIDEBAR_WIDTH;
    Rect::from_x_y_w_h(
        window_rect.left() + canvas_width / 2.0,
        window_rect.y(),
        canvas_width,
        window_rect.h(),
    )
}

fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Echo Trail Clock")
        .size(760, 620)
        .min_size(480, 400)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let config_store = match ConfigStore::platform() {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("{}; settings will not persist", e);
            None
        }
    };
    let config = load_config(config_store.as_ref());
    let selected_zone = config.zone();

    info!(
        "Starting in {} on a {}x{} display",
        selected_zone.name(),
        config.display_width,
        config.display_height
    );

    let clock = ClockState::new(snapshot_now(selected_zone), config.precision_window_ticks);

    Model {
        config,
        config_store,
        selected_zone,
        clock,
        picker_state: PickerState::default(),
        egui,
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    let now = Utc::now();
    let tz = model.selected_zone;
    if model.clock.poll(now, || snapshot_at(tz, now)) {
        debug!(
            "Tick {} ({} points)",
            model.clock.snapshot().format_time(),
            model.clock.point_count()
        );
    }

    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let snapshot = *model.clock.snapshot();
    let scheduler = model.clock.scheduler();
    let sidebar_view = SidebarView {
        selected_zone: model.selected_zone,
        snapshot: &snapshot,
        tick_unit: scheduler.unit(),
        remaining_ticks: scheduler.remaining_ticks(),
        monochrome: model.config.monochrome,
    };
    let ui_result = ui::draw_sidebar(&ctx, &mut model.picker_state, &sidebar_view);

    drop(ctx);

    if let Some(tz) = ui_result.set_timezone {
        model.set_timezone(tz);
    }
    if ui_result.toggle_monochrome {
        model.toggle_monochrome();
    }
    if ui_result.tap {
        model.tap();
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(colors::BACKGROUND);

    let canvas = canvas_rect(app.window_rect());
    let bounds = model.config.bounds();
    let viewport = Viewport::fit(bounds, canvas.pad(24.0));

    drawing::draw_display_background(&draw, &viewport);

    let mut surface = NannouSurface::new(&draw, viewport, !model.config.monochrome);
    render::draw_frame(
        &mut surface,
        bounds,
        model.clock.snapshot(),
        model.clock.point_count(),
    );

    drawing::draw_display_mask(&draw, &viewport, canvas);
    drawing::draw_caption(&draw, &viewport, &model.clock.snapshot().format_time());

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Space => {
            if !model.picker_state.is_open {
                model.tap();
            }
        }
        Key::M => {
            if !model.picker_state.is_open {
                model.toggle_monochrome();
            }
        }
        Key::Z => {
            if !model.picker_state.is_open {
                model.picker_state.open();
            }
        }
        Key::Escape => {
            if model.picker_state.is_open {
                model.picker_state.close();
            }
        }
        _ => {}
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || model.picker_state.is_open {
        return;
    }
    let canvas = canvas_rect(app.window_rect());
    if canvas.contains(app.mouse.position()) {
        model.tap();
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);

    if let nannou::winit::event::WindowEvent::Focused(true) = event {
        // Resync after the window was in the background
        model.clock.resync(snapshot_now(model.selected_zone));
    }
}
