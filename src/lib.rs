//! Diagnostic charts for GC pacer telemetry.
//!
//! Reads a per-cycle CSV (heap goal, trigger, peak, utilization, pacer R
//! value, ...) and draws four linked panels: heap sizes, goal overshoot,
//! GC CPU utilization and the pacer's R value against the alloc/scan
//! ratio. The figure either opens in a window or is written as a raster
//! image (PNG, JPEG, BMP, TIFF, TGA or WebP).

use std::ffi::OsString;
use std::io::Read;

pub mod cli;
pub mod config;
pub mod derive;
mod error;
pub mod figure;
mod headless;
pub mod raster;
pub mod sink;
pub mod table;
pub mod themes;
pub mod units;
pub mod viewer;
pub mod widgets;

pub use config::FigureConfig;
pub use derive::RunConstants;
pub use error::PlotError;
pub use figure::{compose, Figure};
pub use sink::{Backend, NativeBackend, Sink};
pub use table::{read_table, read_table_path, TelemetryTable};

/// Runs the whole pipeline: arguments, table, figure, sink.
///
/// `args` excludes the program name. Arguments are checked before `input`
/// is touched, so a usage error reads nothing and renders nothing.
pub fn run<I, S>(args: I, input: impl Read, backend: &mut impl Backend) -> Result<(), PlotError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let sink = cli::parse_args(args)?;
    let table = read_table(input)?;
    let constants = RunConstants::from_table(&table);
    tracing::info!(
        cycles = table.len(),
        gogc = constants.gogc,
        globals = %constants.globals,
        "derived run constants"
    );
    let figure = compose(&table, &constants);
    sink.deliver(figure, &FigureConfig::default(), backend)
}
