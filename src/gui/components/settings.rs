// src/gui/components/settings.rs
//
// Session setup form: region dropdown plus free-text world/sietch entries.
// Start is gated on all three being filled in.

use eframe::egui;

use crate::config::consts::REGIONS;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.add_space(12.0);
    ui.heading("Sietch Watch");
    ui.label("Pick a region, then name the world and sietch to monitor.");
    ui.add_space(12.0);

    egui::Grid::new("settings_grid")
        .num_columns(2)
        .spacing([10.0, 8.0])
        .show(ui, |ui| {
            ui.strong("Region:");
            egui::ComboBox::from_id_salt("region_select")
                .selected_text(app.region.clone())
                .show_ui(ui, |ui| {
                    for r in REGIONS {
                        ui.selectable_value(&mut app.region, s!(r), r);
                    }
                });
            ui.end_row();

            ui.strong("World:");
            ui.add(egui::TextEdit::singleline(&mut app.world).desired_width(220.0));
            ui.end_row();

            ui.strong("Sietch:");
            ui.add(egui::TextEdit::singleline(&mut app.sietch).desired_width(220.0));
            ui.end_row();
        });

    ui.add_space(12.0);
    let ready = app.key().is_complete();
    if ui.add_enabled(ready, egui::Button::new("Start monitoring")).clicked() {
        app.start_preflight(ui.ctx());
    }
    if !ready {
        ui.weak("World and Sietch are required.");
    }
}
