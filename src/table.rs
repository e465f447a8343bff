//! Reads the per-cycle telemetry CSV into a column-oriented table.
//!
//! The producer writes one row per GC cycle with a header naming each
//! column. Headers may use spaces (`Stack Bytes`) or underscores
//! (`Stack_Bytes`); both resolve to the same column.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use polars::prelude::*;

use crate::PlotError;

pub const GOAL: &str = "Goal";
pub const TRIGGER: &str = "Trigger";
pub const PEAK: &str = "Peak";
pub const STACK_BYTES: &str = "Stack_Bytes";
pub const LIVE_BYTES: &str = "Live_Bytes";
pub const ALLOCATION_RATE: &str = "Allocation_Rate";
pub const SCAN_RATE: &str = "Scan_Rate";
pub const TARGET_UTILIZATION: &str = "Target_Utilization";
pub const ACTUAL_UTILIZATION: &str = "Actual_Utilization";
pub const GAMMA: &str = "Gamma";
pub const GLOBALS_BYTES: &str = "Globals_Bytes";
pub const R: &str = "R";

/// One `Vec` per column, all of the same length, indexed by cycle - 1.
#[derive(Clone, Debug, PartialEq)]
pub struct TelemetryTable {
    pub goal: Vec<f64>,
    pub trigger: Vec<f64>,
    pub peak: Vec<f64>,
    pub stack_bytes: Vec<f64>,
    pub live_bytes: Vec<f64>,
    pub allocation_rate: Vec<f64>,
    pub scan_rate: Vec<f64>,
    pub target_utilization: Vec<f64>,
    pub actual_utilization: Vec<f64>,
    pub gamma: Vec<f64>,
    pub globals_bytes: Vec<f64>,
    pub r: Vec<f64>,
}

impl TelemetryTable {
    /// Number of GC cycles. Never zero for a table returned by `read_table`.
    pub fn len(&self) -> usize {
        self.goal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goal.is_empty()
    }
}

/// Column names are matched after trimming and turning inner spaces into
/// underscores.
fn normalize_header(name: &str) -> String {
    name.trim().replace(' ', "_")
}

/// Reads the whole stream and parses it. Any malformed input fails the
/// entire read.
pub fn read_table(mut input: impl Read) -> Result<TelemetryTable, PlotError> {
    let _span = tracing::info_span!("read_table").entered();

    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    tracing::debug!(bytes = bytes.len(), "read telemetry input");
    let text = String::from_utf8(bytes)
        .map_err(|_| PlotError::data_format("input is not valid UTF-8 text"))?;
    let normalized = normalize_rows(&text)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(normalized.into_bytes()))
        .finish()
        .map_err(|err| PlotError::data_format(err.to_string()))?;

    let columns: HashMap<String, &Column> = df
        .get_columns()
        .iter()
        .map(|column| (normalize_header(column.name().as_str()), column))
        .collect();
    let numeric = |name: &str| -> Result<Vec<f64>, PlotError> {
        let column = columns.get(name).ok_or_else(|| {
            PlotError::data_format(format!(
                "missing column `{name}`; is the header row present?"
            ))
        })?;
        numeric_column(column, name)
    };

    let table = TelemetryTable {
        goal: numeric(GOAL)?,
        trigger: numeric(TRIGGER)?,
        peak: numeric(PEAK)?,
        stack_bytes: numeric(STACK_BYTES)?,
        live_bytes: numeric(LIVE_BYTES)?,
        allocation_rate: numeric(ALLOCATION_RATE)?,
        scan_rate: numeric(SCAN_RATE)?,
        target_utilization: numeric(TARGET_UTILIZATION)?,
        actual_utilization: numeric(ACTUAL_UTILIZATION)?,
        gamma: numeric(GAMMA)?,
        globals_bytes: numeric(GLOBALS_BYTES)?,
        r: numeric(R)?,
    };
    tracing::info!(cycles = table.len(), "parsed telemetry table");
    Ok(table)
}

/// Opens `path` and reads it like [`read_table`].
pub fn read_table_path(path: &Path) -> Result<TelemetryTable, PlotError> {
    tracing::debug!(path = %path.display(), "opening telemetry file");
    read_table(File::open(path)?)
}

/// Drops blank lines, trims every field and checks that each row has as
/// many fields as the header. Returns the cleaned CSV text.
fn normalize_rows(text: &str) -> Result<String, PlotError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let header = lines.next().ok_or_else(|| {
        PlotError::data_format("input is empty; expected a header row naming each column")
    })?;
    let width = header.split(',').count();

    let mut out = String::with_capacity(text.len());
    push_trimmed(&mut out, header);
    let mut cycles = 0;
    for (index, line) in lines.enumerate() {
        let fields = line.split(',').count();
        if fields != width {
            return Err(PlotError::data_format(format!(
                "cycle {} has {fields} fields, header has {width}",
                index + 1
            )));
        }
        push_trimmed(&mut out, line);
        cycles += 1;
    }
    if cycles == 0 {
        return Err(PlotError::data_format(
            "table has a header but no GC cycle rows",
        ));
    }
    Ok(out)
}

fn push_trimmed(out: &mut String, line: &str) {
    for (i, field) in line.split(',').enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(field.trim());
    }
    out.push('\n');
}

fn numeric_column(column: &Column, name: &str) -> Result<Vec<f64>, PlotError> {
    let series = column
        .as_materialized_series()
        .strict_cast(&DataType::Float64)
        .map_err(|_| {
            PlotError::data_format(format!("column `{name}` contains a non-numeric field"))
        })?;
    let values = series
        .f64()
        .map_err(|err| PlotError::data_format(err.to_string()))?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| {
                PlotError::data_format(format!(
                    "cycle {} is missing a value for `{name}`",
                    row + 1
                ))
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const HEADER: &str = "Goal,Trigger,Peak,Stack_Bytes,Live_Bytes,Allocation_Rate,Scan_Rate,Target_Utilization,Actual_Utilization,Gamma,Globals_Bytes,R";

    pub(crate) fn three_cycles() -> String {
        format!(
            "{HEADER}\n\
             8388608,7340032,8912896,65536,4194304,100.0,400.0,0.25,0.27,2.0,1048576,1.1\n\
             9437184,8388608,9437184,65536,4718592,120.0,400.0,0.25,0.24,2.0,1048576,1.2\n\
             10485760,9437184,11534336,131072,5242880,90.0,300.0,0.25,0.26,2.0,1048576,0.9\n"
        )
    }

    fn err_message(input: &str) -> String {
        match read_table(input.as_bytes()) {
            Err(PlotError::DataFormat(message)) => message,
            other => panic!("expected a data-format error, got {other:?}"),
        }
    }

    #[test]
    fn reads_every_column() {
        let table = read_table(three_cycles().as_bytes()).unwrap();
        assert!(!table.is_empty());
        assert_eq!(table.len(), 3);
        assert_eq!(table.goal, vec![8388608.0, 9437184.0, 10485760.0]);
        assert_eq!(table.actual_utilization, vec![0.27, 0.24, 0.26]);
        assert_eq!(table.r, vec![1.1, 1.2, 0.9]);
        assert_eq!(table.globals_bytes[0], 1048576.0);
    }

    #[test]
    fn header_spaces_match_underscored_names() {
        let input = "Goal,Trigger,Peak,Stack Bytes,Live Bytes,Allocation Rate,Scan Rate,Target Utilization,Actual Utilization,Gamma,Globals Bytes, R\n\
                     100,90,110,1,50,10,20,0.25,0.3,1.5,4096,1.0\n";
        let table = read_table(input.as_bytes()).unwrap();
        assert_eq!(table.stack_bytes, vec![1.0]);
        assert_eq!(table.target_utilization, vec![0.25]);
        assert_eq!(table.r, vec![1.0]);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let input = format!(
            "{HEADER},Survival_Rate\n100,90,110,1,50,10,20,0.25,0.3,1.5,4096,1.0,0.5\n"
        );
        let table = read_table(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn ragged_row_is_rejected_even_in_an_unused_column() {
        let input = format!(
            "{HEADER},Survival_Rate\n\
             100,90,110,1,50,10,20,0.25,0.3,1.5,4096,1.0,0.5\n\
             100,90,110,1,50,10,20,0.25,0.3,1.5,4096,1.0\n"
        );
        assert_eq!(err_message(&input), "cycle 2 has 12 fields, header has 13");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let input = format!("\n{}", three_cycles().replacen("1.1\n", "1.1\n\n", 1));
        let table = read_table(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.r, vec![1.1, 1.2, 0.9]);

        let trailing = format!("{}\n  \n", three_cycles());
        assert_eq!(read_table(trailing.as_bytes()).unwrap().len(), 3);
    }

    #[test]
    fn padded_fields_are_trimmed() {
        let input = format!(
            "{}\n 100 , 90, 110 ,1,50,10,20, 0.25,0.3 ,1.5,4096,1.0\r\n",
            HEADER.replace(',', ", ")
        );
        let table = read_table(input.as_bytes()).unwrap();
        assert_eq!(table.goal, vec![100.0]);
        assert_eq!(table.peak, vec![110.0]);
        assert_eq!(table.target_utilization, vec![0.25]);
        assert_eq!(table.r, vec![1.0]);
    }

    #[test]
    fn reads_from_a_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pacer.csv");
        std::fs::write(&path, three_cycles()).unwrap();

        let table = read_table_path(&path).unwrap();
        assert_eq!(table, read_table(three_cycles().as_bytes()).unwrap());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table_path(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, PlotError::Io(_)), "{err:?}");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(err_message("").contains("empty"));
        assert!(err_message("  \n").contains("empty"));
    }

    #[test]
    fn header_without_rows_is_rejected() {
        assert!(err_message(&format!("{HEADER}\n")).contains("no GC cycle rows"));
        assert!(err_message(&format!("{HEADER}\n\n \n")).contains("no GC cycle rows"));
    }

    #[test]
    fn missing_header_is_rejected() {
        let input = "100,90,110,1,50,10,20,0.25,0.3,1.5,4096,1.0\n\
                     100,90,110,1,50,10,20,0.25,0.3,1.5,4096,1.0\n";
        assert_eq!(
            err_message(input),
            "missing column `Goal`; is the header row present?"
        );
    }

    #[test]
    fn missing_column_is_named() {
        let input = "Goal,Trigger\n1,2\n";
        assert!(err_message(input).contains("missing column `Peak`"));
    }

    #[test]
    fn short_row_is_rejected() {
        let input = format!(
            "{HEADER}\n\
             100,90,110,1,50,10,20,0.25,0.3,1.5,4096,1.0\n\
             100,90,110,1,50,10,20,0.25,0.3,1.5\n"
        );
        assert_eq!(err_message(&input), "cycle 2 has 10 fields, header has 12");
    }

    #[test]
    fn long_row_is_rejected() {
        let input = format!(
            "{HEADER}\n\
             100,90,110,1,50,10,20,0.25,0.3,1.5,4096,1.0,7,8\n"
        );
        assert_eq!(err_message(&input), "cycle 1 has 14 fields, header has 12");
    }

    #[test]
    fn empty_field_names_cycle_and_column() {
        let input = format!(
            "{HEADER}\n\
             100,90,110,1,50,10,20,0.25,0.3,1.5,4096,1.0\n\
             100,90,,1,50,10,20,0.25,0.3,1.5,4096,1.0\n"
        );
        assert_eq!(err_message(&input), "cycle 2 is missing a value for `Peak`");
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let input = format!(
            "{HEADER}\n\
             100,90,110,1,50,10,20,0.25,0.3,1.5,4096,1.0\n\
             100,90,lots,1,50,10,20,0.25,0.3,1.5,4096,1.0\n"
        );
        assert!(err_message(&input).contains("`Peak` contains a non-numeric field"));
    }
}
