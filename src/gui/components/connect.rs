// src/gui/components/connect.rs
//
// Pre-flight views: spinner while the one-shot lookup runs, and the
// retry-or-abandon prompt when it fails.

use eframe::egui;

use crate::gui::app::{App, View};

pub fn draw_connecting(ui: &mut egui::Ui, app: &mut App) {
    ui.add_space(60.0);
    ui.vertical_centered(|ui| {
        ui.spinner();
        ui.add_space(10.0);
        ui.strong(app.status_text());
        ui.weak(app.key().title());
    });
}

pub fn draw_failed(ui: &mut egui::Ui, app: &mut App) {
    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        ui.strong("Connection check failed");
        ui.add_space(6.0);
        let detail = app.connect_error.clone();
        for line in detail.lines() {
            ui.label(line);
        }
        ui.add_space(14.0);
        ui.horizontal(|ui| {
            // center the two buttons crudely
            ui.add_space(ui.available_width() / 2.0 - 90.0);
            if ui.button("Retry").clicked() {
                app.start_preflight(ui.ctx());
            }
            if ui.button("Back").clicked() {
                app.connect_error = s!();
                app.view = View::Settings;
            }
        });
    });
}
