//! UI module for the Echo Trail clock
//!
//! Sidebar with the timezone picker, display mode and the precision window.

use chrono_tz::Tz;
use nannou_egui::egui;
use shared::{search_timezones, system_timezone, TimeSnapshot};

use crate::precision::TickUnit;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 170, 255);
const MUTED: egui::Color32 = egui::Color32::from_rgb(140, 140, 150);

/// State for the timezone picker
#[derive(Default)]
pub struct PickerState {
    /// Whether the picker is currently open
    pub is_open: bool,
    /// Current search query
    pub search_query: String,
    /// Cached search results
    pub search_results: Vec<Tz>,
    /// Whether the search field should be focused
    pub should_focus_search: bool,
}

impl PickerState {
    pub fn open(&mut self) {
        self.is_open = true;
        self.search_query.clear();
        self.search_results = search_timezones("");
        self.should_focus_search = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.search_query.clear();
        self.search_results.clear();
    }

    pub fn update_search(&mut self) {
        self.search_results = search_timezones(&self.search_query);
    }
}

/// Values the sidebar displays
pub struct SidebarView<'a> {
    pub selected_zone: Tz,
    pub snapshot: &'a TimeSnapshot,
    pub tick_unit: TickUnit,
    pub remaining_ticks: u32,
    pub monochrome: bool,
}

/// Result of sidebar interactions
#[derive(Default)]
pub struct SidebarResult {
    /// Set a new timezone
    pub set_timezone: Option<Tz>,
    /// Toggle the monochrome display
    pub toggle_monochrome: bool,
    /// Fire the motion trigger
    pub tap: bool,
}

fn section_title(ui: &mut egui::Ui, title: &str) {
    ui.label(egui::RichText::new(title).size(13.0).color(ACCENT));
    ui.add_space(5.0);
}

/// Draw the sidebar panel
pub fn draw_sidebar(
    ctx: &egui::Context,
    picker_state: &mut PickerState,
    view: &SidebarView<'_>,
) -> SidebarResult {
    let mut result = SidebarResult::default();

    let mut style = (*ctx.style()).clone();
    style.visuals.window_fill = egui::Color32::from_rgb(16, 16, 20);
    style.visuals.panel_fill = egui::Color32::from_rgb(16, 16, 20);
    style.visuals.override_text_color = Some(egui::Color32::from_rgb(200, 200, 210));
    ctx.set_style(style);

    egui::SidePanel::right("sidebar")
        .resizable(false)
        .min_width(240.0)
        .show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading(egui::RichText::new("Echo Trail").color(ACCENT).size(18.0));
            ui.add_space(10.0);

            ui.group(|ui| {
                section_title(ui, "▸ TIMEZONE");
                ui.label(
                    egui::RichText::new(view.selected_zone.name().replace('_', " "))
                        .size(13.0),
                );
                ui.label(
                    egui::RichText::new(format!(
                        "{}  ·  day {}",
                        view.snapshot.format_time(),
                        view.snapshot.day_of_year + 1
                    ))
                    .size(11.0)
                    .color(MUTED)
                    .monospace(),
                );
                ui.add_space(5.0);
                if ui.button("Change Zone (Z)").clicked() {
                    picker_state.open();
                }
                if ui.button("Use System TZ").clicked() {
                    if let Some(sys_tz) = system_timezone() {
                        result.set_timezone = Some(sys_tz);
                    }
                }
            });

            ui.add_space(10.0);

            ui.group(|ui| {
                section_title(ui, "▸ PRECISION");
                match view.tick_unit {
                    TickUnit::Second => {
                        ui.label(
                            egui::RichText::new(format!(
                                "● Seconds ({} ticks left)",
                                view.remaining_ticks
                            ))
                            .color(egui::Color32::from_rgb(100, 255, 150)),
                        );
                    }
                    TickUnit::Minute => {
                        ui.label(egui::RichText::new("○ Minutes").color(MUTED));
                    }
                }
                ui.add_space(3.0);
                if ui.button("Tap (Space)").clicked() {
                    result.tap = true;
                }
            });

            ui.add_space(10.0);

            ui.group(|ui| {
                section_title(ui, "▸ DISPLAY");
                let mut monochrome = view.monochrome;
                if ui.checkbox(&mut monochrome, "Monochrome (M)").changed() {
                    result.toggle_monochrome = true;
                }
            });

            ui.add_space(10.0);

            ui.group(|ui| {
                section_title(ui, "▸ SHORTCUTS");
                let shortcuts = [
                    ("Space", "Tap: second hand for 30 ticks"),
                    ("Click", "Tap"),
                    ("M", "Toggle monochrome"),
                    ("Z", "Open timezone picker"),
                    ("Esc", "Close picker"),
                ];
                for (key, desc) in shortcuts {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!("{:>5}", key))
                                .size(10.0)
                                .color(ACCENT)
                                .monospace(),
                        );
                        ui.label(egui::RichText::new(desc).size(10.0).color(MUTED));
                    });
                }
            });
        });

    if let Some(tz) = draw_timezone_picker(ctx, picker_state, view.selected_zone) {
        result.set_timezone = Some(tz);
    }

    result
}

/// Draw the timezone picker window; returns the chosen zone
fn draw_timezone_picker(
    ctx: &egui::Context,
    picker_state: &mut PickerState,
    current: Tz,
) -> Option<Tz> {
    if !picker_state.is_open {
        return None;
    }

    let mut selected = None;
    let mut open = true;
    egui::Window::new("Select Time Zone")
        .open(&mut open)
        .collapsible(false)
        .default_width(320.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search:");
                let response = ui.text_edit_singleline(&mut picker_state.search_query);
                if picker_state.should_focus_search {
                    response.request_focus();
                    picker_state.should_focus_search = false;
                }
                if response.changed() {
                    picker_state.update_search();
                }
            });
            ui.separator();
            egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                for &tz in &picker_state.search_results {
                    if ui.selectable_label(tz == current, tz.name()).clicked() {
                        selected = Some(tz);
                    }
                }
            });
        });

    if selected.is_some() || !open {
        picker_state.close();
    }
    selected
}
