//! `scoop-pipe` CLI entrypoint.
//!
//! Loads `.scoop-pipe.toml`, builds the release context from the tag and
//! process environment, and runs the requested phase against the system
//! `git`. Skips exit with status 0.

use clap::Parser;
use scoop_pipe::cli::{Cli, CliError, execute, git_client, release_context};
use scoop_pipe::config::ProjectConfig;
use scoop_pipe::logging;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    if let Err(err) = logging::init(cli.verbosity) {
        write_stderr_line(&mut stderr, format!("logging disabled: {err}"));
    }
    let exit_code = exit_code_for_run_result(run(&cli), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = ProjectConfig::load(&cli.config)?;
    let ctx = release_context(&config, &cli.command.args().tag, std::env::vars())?;
    let client = git_client(&config);
    execute(&cli.command, &config, &ctx, &client)
}

fn exit_code_for_run_result(result: Result<(), CliError>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {}", error_chain(&err)));
            1
        }
    }
}

/// Render an error and its sources on one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
