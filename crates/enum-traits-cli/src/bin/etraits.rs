#![allow(clippy::print_stderr)]

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;

use enum_traits_cli::args::CliArgs;
use enum_traits_cli::report::format_error;
use enum_traits_cli::{driver, tracing_config};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    tracing_config::init_tracing(&args.log);
    let color = !args.no_color && std::io::stderr().is_terminal();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            driver::run(&args, &cwd, color && std::io::stdout().is_terminal(), &mut out)
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format_error(&err, color));
            ExitCode::FAILURE
        }
    }
}
