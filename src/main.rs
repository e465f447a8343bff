use std::process::ExitCode;

use pacer_plot::{cli, NativeBackend, PlotError};

fn main() -> ExitCode {
    // `log` records from eframe and wgpu are bridged into the same subscriber.
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .try_init();

    let mut args = std::env::args_os();
    let program = args
        .next()
        .and_then(|arg| {
            std::path::Path::new(&arg)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "pacer-plot".to_owned());

    let stdin = std::io::stdin().lock();
    match pacer_plot::run(args, stdin, &mut NativeBackend) {
        Ok(()) => ExitCode::SUCCESS,
        Err(PlotError::Usage) => {
            println!("{}", cli::usage(&program));
            ExitCode::from(PlotError::Usage.exit_code())
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
