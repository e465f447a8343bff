use std::path::{Path, PathBuf};

use crate::config::FigureConfig;
use crate::figure::Figure;
use crate::viewer::FigureViewer;
use crate::{headless, raster, PlotError};

/// Where a composed figure goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sink {
    /// Open a window and block until it is closed.
    Interactive,
    /// Render off-screen and write an image in the format the path's
    /// extension names.
    File(PathBuf),
}

impl Sink {
    pub fn deliver(
        self,
        figure: Figure,
        config: &FigureConfig,
        backend: &mut impl Backend,
    ) -> Result<(), PlotError> {
        match self {
            Sink::Interactive => backend.show(figure, config),
            Sink::File(path) => backend.save(&figure, &path, config),
        }
    }
}

/// Displays or rasterises figures.
pub trait Backend {
    fn show(&mut self, figure: Figure, config: &FigureConfig) -> Result<(), PlotError>;

    fn save(&mut self, figure: &Figure, path: &Path, config: &FigureConfig) -> Result<(), PlotError>;
}

/// eframe window for `show`, wgpu off-screen capture for `save`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeBackend;

impl Backend for NativeBackend {
    fn show(&mut self, figure: Figure, config: &FigureConfig) -> Result<(), PlotError> {
        FigureViewer::new(figure, *config).run()?;
        Ok(())
    }

    fn save(&mut self, figure: &Figure, path: &Path, config: &FigureConfig) -> Result<(), PlotError> {
        let format = raster::output_format(path)?;
        let image =
            headless::render(figure, config).map_err(|err| PlotError::Render(err.to_string()))?;
        let (width, height) = image.dimensions();
        raster::write_image(path, format, image, config)?;
        tracing::info!(path = %path.display(), ?format, width, height, "wrote figure");
        Ok(())
    }
}
