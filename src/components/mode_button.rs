use eframe::egui;

use crate::mode::DrawMode;

pub struct ModeButton {
    pub mode: DrawMode,
    pub selected: bool,
}

impl ModeButton {
    pub fn new(mode: DrawMode, selected: bool) -> Self {
        Self { mode, selected }
    }

    fn icon(&self) -> &'static str {
        match self.mode {
            DrawMode::None => "✋",
            DrawMode::Point => "•",
            DrawMode::Line => "╱",
            DrawMode::Polygon => "⬟",
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(96.0, 28.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(100, 181, 246) // Light blue when selected
            } else if response.hovered() {
                egui::Color32::from_gray(40)
            } else {
                egui::Color32::from_gray(20)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.selected {
                egui::Color32::BLACK
            } else {
                egui::Color32::WHITE
            };
            let label = if self.mode == DrawMode::None {
                format!("{} Pan", self.icon())
            } else {
                format!("{} Draw {}", self.icon(), self.mode.name())
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                label,
                egui::FontId::proportional(14.0),
                text_color,
            );

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response.on_hover_text(match self.mode {
            DrawMode::None => "Stop drawing; drag vertices to edit",
            DrawMode::Point => "Click to place a point",
            DrawMode::Line => "Click to add vertices, double-click to finish",
            DrawMode::Polygon => "Click to add vertices, click the first vertex or double-click to close",
        })
    }
}
