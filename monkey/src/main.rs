mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::{io::IsTerminal, path::PathBuf, process::ExitCode};

use clap::Parser;
use cli::{print_finished, print_running};
use monkey_core::{
    environment::prelude::{Environment, Value},
    pipeline::{evaluate, load},
    utils::prelude::Error
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
enum Command {
    /// Parses and evaluates a source file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print the parsed program's ast before evaluating it
        #[arg(long, default_value_t = false)]
        print_ast: bool,
        /// Do not print the resulting value
        #[arg(short, long, default_value_t = false)]
        no_output: bool,
    },
    /// Runs Read Eval Print Loop
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() -> ExitCode {
    install_tracing();

    let result = match Command::parse() {
        Command::Run { path, print_ast, no_output } => return run(path, print_ast, no_output),
        Command::Repl => repl::start(),
        Command::Rlpl => rlpl::start(),
        Command::Rppl => rppl::start(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&Error::from(err));
            ExitCode::FAILURE
        }
    }
}

fn run(path: PathBuf, print_ast: bool, no_output: bool) -> ExitCode {
    print_running(&path.display().to_string());
    let start = std::time::Instant::now();

    let result = load(&path).and_then(|program| {
        if print_ast {
            println!("{program:#?}");
        }

        evaluate(&path, &program, &Environment::new_root())
    });

    let code = match result {
        Ok(value) => {
            if !no_output && value != Value::Null {
                println!("{}", value.inspect());
            }

            ExitCode::SUCCESS
        },
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    };

    print_finished(std::time::Instant::now() - start);

    code
}

fn print_error(err: &Error) {
    let buf_writer = cli::stderr_buffer_writer();
    let mut buf = buf_writer.buffer();

    err.pretty(&mut buf);
    buf_writer
        .print(&buf)
        .expect("Writing error to stderr");
}

fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = installed {
        eprintln!("failed to install log subscriber: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::install_tracing;

    #[test]
    fn test_second_subscriber_install_is_reported_not_fatal() {
        install_tracing();
        install_tracing();
    }
}
