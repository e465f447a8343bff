use std::path::{Path, PathBuf};

use pacer_plot::{run, Backend, Figure, FigureConfig, PlotError};

const HEADER: &str = "Goal,Trigger,Peak,Stack_Bytes,Live_Bytes,Allocation_Rate,Scan_Rate,Target_Utilization,Actual_Utilization,Gamma,Globals_Bytes,R";

fn three_cycles() -> String {
    format!(
        "{HEADER}\n\
         8388608,7340032,8912896,65536,4194304,100.0,400.0,0.25,0.27,2.0,1048576,1.1\n\
         9437184,8388608,9437184,65536,4718592,120.0,400.0,0.25,0.24,2.0,1048576,1.2\n\
         10485760,9437184,11534336,131072,5242880,90.0,300.0,0.25,0.26,2.0,1048576,0.9\n"
    )
}

#[derive(Debug, PartialEq)]
enum Call {
    Show(Figure),
    Save(Figure, PathBuf),
}

#[derive(Default)]
struct RecordingBackend {
    calls: Vec<Call>,
}

impl Backend for RecordingBackend {
    fn show(&mut self, figure: Figure, _config: &FigureConfig) -> Result<(), PlotError> {
        self.calls.push(Call::Show(figure));
        Ok(())
    }

    fn save(&mut self, figure: &Figure, path: &Path, config: &FigureConfig) -> Result<(), PlotError> {
        assert_eq!(config.dpi, 144.0);
        self.calls.push(Call::Save(figure.clone(), path.to_path_buf()));
        Ok(())
    }
}

#[test]
fn path_argument_saves_the_figure() {
    let mut backend = RecordingBackend::default();
    run(["gc.png"], three_cycles().as_bytes(), &mut backend).unwrap();

    let [Call::Save(figure, path)] = backend.calls.as_slice() else {
        panic!("expected one save, got {:?}", backend.calls);
    };
    assert_eq!(path, Path::new("gc.png"));
    assert!(figure.title.contains("GOGC=100"), "{}", figure.title);
    assert!(figure.title.contains("Globals=1.0 MiB"), "{}", figure.title);
}

#[test]
fn no_argument_opens_the_viewer() {
    let mut backend = RecordingBackend::default();
    run(Vec::<String>::new(), three_cycles().as_bytes(), &mut backend).unwrap();

    let [Call::Show(figure)] = backend.calls.as_slice() else {
        panic!("expected one show, got {:?}", backend.calls);
    };
    assert_eq!(figure.x_caption, "GC cycle");
    for panel in &figure.panels {
        assert_eq!((panel.x_bounds.min, panel.x_bounds.max), (1.0, 3.0));
        for series in &panel.series {
            assert_eq!(series.values.len(), 3);
        }
    }
}

#[test]
fn two_arguments_render_nothing() {
    let mut backend = RecordingBackend::default();
    let err = run(["a.png", "b.png"], three_cycles().as_bytes(), &mut backend).unwrap_err();
    assert!(matches!(err, PlotError::Usage));
    assert_eq!(err.exit_code(), 1);
    assert!(backend.calls.is_empty());
}

#[test]
fn usage_error_does_not_read_input() {
    struct Unreadable;
    impl std::io::Read for Unreadable {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            panic!("input must not be read on a usage error");
        }
    }

    let mut backend = RecordingBackend::default();
    let err = run(["a.png", "b.png"], Unreadable, &mut backend).unwrap_err();
    assert!(matches!(err, PlotError::Usage));
}

#[test]
fn short_row_aborts_before_rendering() {
    let input = format!(
        "{HEADER}\n\
         8388608,7340032,8912896,65536,4194304,100.0,400.0,0.25,0.27,2.0,1048576,1.1\n\
         9437184,8388608,9437184,65536\n"
    );
    let mut backend = RecordingBackend::default();
    let err = run(["gc.png"], input.as_bytes(), &mut backend).unwrap_err();
    assert!(matches!(err, PlotError::DataFormat(_)), "{err:?}");
    assert_ne!(err.exit_code(), 0);
    assert!(backend.calls.is_empty());
}

#[test]
fn gamma_sets_gogc_and_pacing_ceiling() {
    let input = three_cycles().replace(",2.0,1048576,", ",1.5,1048576,");
    let mut backend = RecordingBackend::default();
    run(["gc.png"], input.as_bytes(), &mut backend).unwrap();

    let [Call::Save(figure, _)] = backend.calls.as_slice() else {
        panic!("expected one save, got {:?}", backend.calls);
    };
    assert!(figure.title.starts_with("GOGC=50,"), "{}", figure.title);
    let pacing = &figure.panels[3];
    assert_eq!(pacing.y_bounds.map(|b| b.max), Some(1.5));
    let utilization = &figure.panels[2];
    assert_eq!(utilization.y_bounds.map(|b| (b.min, b.max)), Some((0.0, 1.0)));
}

#[test]
fn jpeg_path_saves_the_figure() {
    let mut backend = RecordingBackend::default();
    run(["plots/gc.jpg"], three_cycles().as_bytes(), &mut backend).unwrap();

    let [Call::Save(_, path)] = backend.calls.as_slice() else {
        panic!("expected one save, got {:?}", backend.calls);
    };
    assert_eq!(path, Path::new("plots/gc.jpg"));
}

#[test]
fn padded_fields_and_blank_lines_render_like_tidy_input() {
    let messy = format!(
        "{}\n\n",
        three_cycles()
            .replace(',', " , ")
            .replacen("1.1\n", "1.1\n   \n", 1)
            .trim_end()
    );
    let mut tidy = RecordingBackend::default();
    run(["gc.png"], three_cycles().as_bytes(), &mut tidy).unwrap();
    let mut padded = RecordingBackend::default();
    run(["gc.png"], messy.as_bytes(), &mut padded).unwrap();

    assert_eq!(padded.calls, tidy.calls);
}

#[test]
fn ragged_row_in_an_extra_column_aborts() {
    let input = three_cycles()
        .replacen(",R\n", ",R,Survival_Rate\n", 1)
        .replacen(",1.1\n", ",1.1,0.5\n", 1);
    let mut backend = RecordingBackend::default();
    let err = run(["gc.png"], input.as_bytes(), &mut backend).unwrap_err();
    assert!(matches!(err, PlotError::DataFormat(_)), "{err:?}");
    assert!(err.to_string().contains("cycle 2 has 12 fields"), "{err}");
    assert!(backend.calls.is_empty());
}
