use eframe::egui::{self, Ui};

use crate::config::FigureConfig;
use crate::figure::Figure;

mod legend;
mod panel;

pub use legend::Legend;
pub use panel::{finite_runs, panel};

const GRID_ROW_GAP: f32 = 8.0;

/// Draws the whole figure into the remaining space of `ui`: title, the
/// 2×2 panel grid, and the shared x caption in the reserved bottom strip.
pub fn figure(ui: &mut Ui, figure: &Figure, config: &FigureConfig) {
    ui.vertical_centered(|ui| {
        ui.heading(&figure.title);
    });

    let grid_height = (ui.available_height() - config.caption_reserve - GRID_ROW_GAP).max(0.0);
    let cell_height = grid_height / 2.0;
    for (row, pair) in figure.panels.chunks(2).enumerate() {
        if row > 0 {
            ui.add_space(GRID_ROW_GAP);
        }
        ui.columns(2, |columns| {
            for (column, cell) in columns.iter_mut().zip(pair) {
                panel(column, cell, cell_height);
            }
        });
    }

    ui.allocate_ui(egui::vec2(ui.available_width(), config.caption_reserve), |ui| {
        ui.vertical_centered(|ui| {
            ui.label(figure.x_caption);
        });
    });
}
