//! Values computed from the telemetry table rather than read from it.
//!
//! Nothing here guards against zero denominators: a cycle with
//! `Target_Utilization == 0` or `Goal == 0` yields a non-finite value that
//! is kept in the series. The drawing layer leaves a gap for it.

use crate::table::TelemetryTable;
use crate::units::{bytes_to_unit, ByteSize};

/// GOGC equivalent of a pacer gamma: `round((gamma - 1) * 100)`.
pub fn gogc(gamma: f64) -> i64 {
    ((gamma - 1.0) * 100.0).round() as i64
}

/// Run-level values taken from the first cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunConstants {
    pub gogc: i64,
    pub globals: ByteSize,
    /// `Gamma[0]`, the ceiling of the R value.
    pub gamma: f64,
}

impl RunConstants {
    pub fn from_table(table: &TelemetryTable) -> Self {
        let gamma = table.gamma.first().copied().unwrap_or(f64::NAN);
        // Saturating cast: negative and NaN byte counts read as zero.
        let globals_bytes = table.globals_bytes.first().copied().unwrap_or(0.0) as u64;
        Self {
            gogc: gogc(gamma),
            globals: bytes_to_unit(globals_bytes),
            gamma,
        }
    }
}

/// `Allocation_Rate * (1 - u_T) / (Scan_Rate * u_T)` per cycle.
pub fn alloc_scan_ratio(table: &TelemetryTable) -> Vec<f64> {
    table
        .allocation_rate
        .iter()
        .zip(&table.scan_rate)
        .zip(&table.target_utilization)
        .map(|((alloc, scan), target)| alloc * (1.0 - target) / (scan * target))
        .collect()
}

/// Percentage by which the peak heap exceeded the goal, per cycle.
pub fn overshoot_percent(table: &TelemetryTable) -> Vec<f64> {
    table
        .peak
        .iter()
        .zip(&table.goal)
        .map(|(peak, goal)| (peak / goal - 1.0) * 100.0)
        .collect()
}
