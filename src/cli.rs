use std::ffi::OsString;
use std::path::PathBuf;

use crate::sink::Sink;
use crate::{raster, PlotError};

pub fn usage(program: &str) -> String {
    format!(
        "usage: {program} [OUTPUT] < telemetry.csv\n\
         \n\
         Reads per-cycle GC pacer telemetry as CSV on standard input.\n\
         Without OUTPUT the figure opens in a window; with OUTPUT it is\n\
         written as a 144 DPI image whose format follows the extension\n\
         (.png, .jpg, .bmp, .tif, .tga or .webp)."
    )
}

/// Turns the arguments after the program name into a sink. Zero arguments
/// mean an interactive window; one names the output image.
pub fn parse_args<I, S>(args: I) -> Result<Sink, PlotError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let sink = match (args.next(), args.next()) {
        (None, _) => Sink::Interactive,
        (Some(path), None) => Sink::File(PathBuf::from(path)),
        (Some(_), Some(_)) => return Err(PlotError::Usage),
    };

    if let Sink::File(path) = &sink {
        raster::output_format(path)?;
    }
    Ok(sink)
}
