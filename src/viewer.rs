use dark_light::Mode;
use eframe::egui;

use crate::config::FigureConfig;
use crate::figure::Figure;
use crate::{themes, widgets};

pub const APP_NAME: &str = "pacer-plot";

/// Interactive window showing one figure.
pub struct FigureViewer {
    figure: Figure,
    config: FigureConfig,
}

impl FigureViewer {
    pub fn new(figure: Figure, config: FigureConfig) -> Self {
        Self { figure, config }
    }

    /// Opens the window and blocks until it is closed.
    pub fn run(self) -> eframe::Result {
        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(format!("{APP_NAME}: {}", self.figure.title))
                .with_inner_size(self.config.size_points()),
            ..Default::default()
        };

        eframe::run_native(
            APP_NAME,
            native_options,
            Box::new(|cc| {
                let ctx = cc.egui_ctx.clone();
                if let Err(err) =
                    ctrlc::set_handler(move || ctx.send_viewport_cmd(egui::ViewportCommand::Close))
                {
                    log::warn!("failed to set exit signal handler: {err}");
                }

                let theme = match dark_light::detect() {
                    Ok(Mode::Dark) => egui::ThemePreference::Dark,
                    Ok(Mode::Light) | Ok(Mode::Unspecified) | Err(_) => {
                        egui::ThemePreference::Light
                    }
                };
                themes::install(&cc.egui_ctx, theme);

                Ok(Box::new(self))
            }),
        )
    }
}

impl eframe::App for FigureViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::figure(ui, &self.figure, &self.config);
        });
    }
}
