use std::process::ExitCode;

use anyhow::Context;

use prior::args::{prepare, Prepared, ProcessStdin};
use prior::commands::general_usage;
use prior::config::Config;
use prior::dispatch::execute;
use prior::error::CliError;
use prior::logging::init_tracing;

fn main() -> ExitCode {
    init_tracing();

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    match run(&tokens) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(tokens: &[String]) -> anyhow::Result<ExitCode> {
    let dispatch = match prepare(tokens, &mut ProcessStdin) {
        Ok(Prepared::Help(text)) => {
            print!("{text}");
            return Ok(ExitCode::SUCCESS);
        }
        Ok(Prepared::Version(version)) => {
            println!("{version}");
            return Ok(ExitCode::SUCCESS);
        }
        Ok(Prepared::Dispatch(dispatch)) => dispatch,
        Err(err) => return Ok(report(&err)),
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => return Ok(report(&err.into())),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    match runtime.block_on(execute(&dispatch, &config)) {
        Ok(text) => {
            println!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report(&err)),
    }
}

fn report(err: &CliError) -> ExitCode {
    tracing::error!(kind = err.kind(), "{err}");
    eprintln!("Error: {err}");
    if let CliError::UnknownCommand(_) = err {
        print!("{}", general_usage());
    }
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}
