use crate::MapDrawApp;
use crate::projection;

pub fn map_panel(app: &mut MapDrawApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(12.0);

        egui::Frame::none()
            .stroke(egui::Stroke::new(1.0, egui::Color32::BLACK))
            .show(ui, |ui| {
                app.show_map(ui);
            });

        ui.add_space(4.0);
        crate::panels::mode_panel(app, ui);

        ui.separator();
        if let Some(position) = app.marker_position() {
            let (lon, lat) = projection::to_lon_lat(position);
            ui.label(format!("Marker: {:.5}, {:.5}", lon, lat));
        }
        if let Some(drawn) = app.last_drawn() {
            ui.label(format!(
                "Last {} ({} coordinates): {:?}",
                drawn.kind.name(),
                drawn.coordinates.len(),
                drawn.coordinates
            ));
        }
    });
}
