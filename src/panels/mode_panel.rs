use crate::MapDrawApp;
use crate::components::ModeButton;
use crate::mode::DrawMode;

/// Bar of draw mode buttons under the map
pub fn mode_panel(app: &mut MapDrawApp, ui: &mut egui::Ui) {
    egui::Frame::none()
        .fill(egui::Color32::BLACK)
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let active = app.mode();
                let modes = std::iter::once(DrawMode::None).chain(DrawMode::DRAWING);
                for mode in modes {
                    if ModeButton::new(mode, active == mode).show(ui).clicked() {
                        log::info!("Draw mode selected from UI: {}", mode.name());
                        app.set_mode(mode);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.colored_label(
                        egui::Color32::WHITE,
                        format!("{} features", app.feature_count()),
                    );
                });
            });
        });
}
