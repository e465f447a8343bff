use eframe::egui::Ui;
use egui_plot::{Line, Plot, PlotPoints};

use crate::figure::Panel;
use crate::widgets::Legend;

const MIN_PLOT_HEIGHT: f32 = 48.0;

/// Draws `panel` into `height` points: legend on top, plot below.
pub fn panel(ui: &mut Ui, panel: &Panel, height: f32) {
    ui.vertical(|ui| {
        let top = ui.cursor().top();
        ui.vertical_centered(|ui| {
            ui.add(Legend::new(&panel.series, panel.legend_columns()));
        });
        let used = ui.cursor().top() - top;
        let plot_height = (height - used).max(MIN_PLOT_HEIGHT);

        let mut plot = Plot::new(panel.id)
            .height(plot_height)
            .show_grid(panel.grid)
            .default_x_bounds(panel.x_bounds.min, panel.x_bounds.max);
        if let Some(label) = panel.y_label {
            plot = plot.y_axis_label(label);
        }
        if let Some(bounds) = panel.y_bounds {
            plot = plot.default_y_bounds(bounds.min, bounds.max);
        }

        plot.show(ui, |plot_ui| {
            for series in &panel.series {
                for run in finite_runs(panel.points(series)) {
                    plot_ui.line(
                        Line::new(series.label.clone(), PlotPoints::from(run))
                            .color(series.color)
                            .width(1.5),
                    );
                }
            }
        });
    });
}

/// Splits a polyline at non-finite points so a zero denominator shows up
/// as a gap in the line.
pub fn finite_runs(points: impl IntoIterator<Item = [f64; 2]>) -> Vec<Vec<[f64; 2]>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in points {
        if point.iter().all(|v| v.is_finite()) {
            current.push(point);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
