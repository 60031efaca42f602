// src/gui/components/chart_view.rs
//
// Paints the chart geometry onto an egui canvas. All layout math lives in
// crate::chart; this file only maps tones/anchors onto egui paint calls.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, vec2};

use crate::chart::{self, Anchor, Canvas, Tone};
use crate::gui::app::App;

const CANVAS_BG: Color32 = Color32::from_rgb(0x1e, 0x1e, 0x1e);
const FG: Color32 = Color32::WHITE;
const SERIES: Color32 = Color32::from_rgb(0x00, 0xff, 0x00);
const ALERT: Color32 = Color32::from_rgb(0xff, 0x40, 0x40);

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        if ui.button("Stop").clicked() {
            app.stop_monitor(ui.ctx());
            return;
        }
        ui.separator();
        ui.label(app.status_text());
    });
    if app.view != crate::gui::app::View::Monitoring {
        return; // stopped this frame
    }
    ui.add_space(6.0);

    let canvas = Canvas::default();
    let (response, painter) =
        ui.allocate_painter(vec2(canvas.width, canvas.height), Sense::hover());
    let origin = response.rect.min;
    painter.rect_filled(response.rect, 2.0, CANVAS_BG);

    let geo = chart::layout(&canvas, &app.key(), &app.series);

    for (a, b) in &geo.axes {
        painter.line_segment([at(origin, a), at(origin, b)], Stroke::new(1.0, FG));
    }

    if let Some((a, b)) = &geo.reference {
        painter.extend(Shape::dashed_line(
            &[at(origin, a), at(origin, b)],
            Stroke::new(1.0, ALERT),
            4.0,
            2.0,
        ));
    }

    if geo.polyline.len() >= 2 {
        let pts: Vec<Pos2> = geo.polyline.iter().map(|p| at(origin, p)).collect();
        painter.add(Shape::line(pts, Stroke::new(1.0, SERIES)));
    }

    for m in &geo.markers {
        painter.circle_filled(at(origin, m), geo.marker_radius, SERIES);
    }

    for l in &geo.labels {
        painter.text(at(origin, &l.at), align(l.anchor), &l.text, font(l.strong), tone(l.tone));
    }
}

fn at(origin: Pos2, p: &chart::Pt) -> Pos2 {
    Pos2::new(origin.x + p.x, origin.y + p.y)
}

fn align(a: Anchor) -> Align2 {
    match a {
        Anchor::Left => Align2::LEFT_CENTER,
        Anchor::Center => Align2::CENTER_CENTER,
        Anchor::Right => Align2::RIGHT_CENTER,
    }
}

fn tone(t: Tone) -> Color32 {
    match t {
        Tone::Plain => FG,
        Tone::Ok => SERIES,
        Tone::Alert => ALERT,
    }
}

fn font(strong: bool) -> FontId {
    if strong { FontId::proportional(14.0) } else { FontId::proportional(11.0) }
}
