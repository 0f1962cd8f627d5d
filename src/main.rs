//! xininfo binary entry point.

use std::io;
use std::process::ExitCode;

use xininfo::{cli, x11};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Help never needs a display connection.
    if cli::wants_help(&args) {
        return match cli::print_usage(&mut io::stdout()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> xininfo::Result<()> {
    // The snapshot copies everything out of the server; the connection is
    // already closed again by the time queries run.
    let snapshot = x11::snapshot()?;
    let mut out = io::stdout().lock();
    cli::run(args, &snapshot, &mut out)
}
