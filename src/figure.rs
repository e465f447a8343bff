//! Backend-neutral description of the 2×2 pacer figure.
//!
//! `compose` turns a telemetry table into a `Figure`; the `widgets` module
//! draws it. Keeping the layout decisions here (bounds, labels, legend
//! columns) lets them be checked without a display.

use egui::Color32;

use crate::derive::{alloc_scan_ratio, overshoot_percent, RunConstants};
use crate::table::TelemetryTable;
use crate::themes::series_color;

pub const X_CAPTION: &str = "GC cycle";

const MIB: f64 = (1u64 << 20) as f64;

/// Closed axis interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const UNIT: Bounds = Bounds { min: 0.0, max: 1.0 };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// The shared x-domain: cycles `1..=n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleDomain {
    n: usize,
}

impl CycleDomain {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    pub(crate) fn len(&self) -> usize {
        self.n
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(1.0, self.n as f64)
    }

    /// x coordinate of every cycle, in order.
    pub fn cycles(&self) -> impl Iterator<Item = f64> {
        (1..=self.n).map(|cycle| cycle as f64)
    }
}

/// One plotted line.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
    pub color: Color32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    /// Stable id, also used as the egui plot id.
    pub id: &'static str,
    pub y_label: Option<&'static str>,
    pub x_bounds: Bounds,
    /// `None` lets the plot fit the data.
    pub y_bounds: Option<Bounds>,
    pub grid: bool,
    pub series: Vec<Series>,
    domain: CycleDomain,
}

impl Panel {
    fn new(id: &'static str, domain: CycleDomain) -> Self {
        Self {
            id,
            y_label: None,
            x_bounds: domain.bounds(),
            y_bounds: None,
            grid: true,
            series: Vec::new(),
            domain,
        }
    }

    fn y_label(mut self, label: &'static str) -> Self {
        self.y_label = Some(label);
        self
    }

    fn y_bounds(mut self, bounds: Bounds) -> Self {
        self.y_bounds = Some(bounds);
        self
    }

    fn line(mut self, label: &str, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.domain.len());
        let color = series_color(self.series.len());
        self.series.push(Series {
            label: label.to_owned(),
            values,
            color,
        });
        self
    }

    pub fn legend_columns(&self) -> usize {
        legend_columns(self.series.len())
    }

    /// `[cycle, value]` pairs for one of this panel's series.
    pub fn points<'a>(&self, series: &'a Series) -> impl Iterator<Item = [f64; 2]> + 'a {
        self.domain
            .cycles()
            .zip(&series.values)
            .map(|(x, y)| [x, *y])
    }
}

/// Columns for a legend of `entries` items: the integer square root,
/// at least one.
pub fn legend_columns(entries: usize) -> usize {
    entries.isqrt().max(1)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_caption: &'static str,
    /// Row-major 2×2: memory, overshoot, utilization, pacing.
    pub panels: [Panel; 4],
}

pub fn title(constants: &RunConstants) -> String {
    format!("GOGC={}, Globals={}", constants.gogc, constants.globals)
}

pub fn compose(table: &TelemetryTable, constants: &RunConstants) -> Figure {
    let _span = tracing::info_span!("compose_figure", cycles = table.len()).entered();
    let domain = CycleDomain::new(table.len());
    Figure {
        title: title(constants),
        x_caption: X_CAPTION,
        panels: [
            memory_panel(domain, table),
            overshoot_panel(domain, table),
            utilization_panel(domain, table),
            pacing_panel(domain, table, constants),
        ],
    }
}

fn mebibytes(bytes: &[f64]) -> Vec<f64> {
    bytes.iter().map(|b| b / MIB).collect()
}

pub fn memory_panel(domain: CycleDomain, table: &TelemetryTable) -> Panel {
    Panel::new("memory", domain)
        .y_label("MiB")
        .line("Heap goal", mebibytes(&table.goal))
        .line("GC trigger", mebibytes(&table.trigger))
        .line("Peak heap", mebibytes(&table.peak))
        .line("Stack", mebibytes(&table.stack_bytes))
        .line("Live heap", mebibytes(&table.live_bytes))
}

pub fn overshoot_panel(domain: CycleDomain, table: &TelemetryTable) -> Panel {
    Panel::new("overshoot", domain)
        .y_label("Percent")
        .line("Heap overshoot", overshoot_percent(table))
}

/// Utilization is a fraction of CPU time; the axis stays at `[0, 1]` even
/// when a cycle reports more.
pub fn utilization_panel(domain: CycleDomain, table: &TelemetryTable) -> Panel {
    Panel::new("utilization", domain)
        .y_bounds(Bounds::UNIT)
        .line("Actual GC CPU util", table.actual_utilization.clone())
        .line("Target GC CPU util", table.target_utilization.clone())
}

/// R never exceeds gamma, so the axis tops out there.
pub fn pacing_panel(
    domain: CycleDomain,
    table: &TelemetryTable,
    constants: &RunConstants,
) -> Panel {
    Panel::new("pacing", domain)
        .y_bounds(Bounds::new(0.0, constants.gamma))
        .line("R value", table.r.clone())
        .line("Alloc/Scan ratio", alloc_scan_ratio(table))
}
