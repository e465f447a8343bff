use std::io;
use std::path::PathBuf;

/// Everything that can stop a plotting run.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("expected at most one argument (the output image path)")]
    Usage,

    #[error(
        "cannot write {}: the extension names no supported image format \
         (png, jpg, bmp, tif, tga, webp)",
        .0.display()
    )]
    UnsupportedFormat(PathBuf),

    #[error("malformed telemetry table: {0}")]
    DataFormat(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("headless render failed: {0}")]
    Render(String),

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("interactive viewer failed: {0}")]
    Viewer(#[from] eframe::Error),
}

impl PlotError {
    pub(crate) fn data_format(message: impl Into<String>) -> Self {
        PlotError::DataFormat(message.into())
    }

    /// Process exit status for this error. Argument problems exit with 1,
    /// everything that happens after the arguments were accepted with 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            PlotError::Usage | PlotError::UnsupportedFormat(_) => 1,
            PlotError::DataFormat(_)
            | PlotError::Io(_)
            | PlotError::Render(_)
            | PlotError::Encode(_)
            | PlotError::Viewer(_) => 2,
        }
    }
}
