use std::io::{self, Write};
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;
use truernd::HwRng;

mod args;
mod config;
mod error;
mod probe;
mod selftest;
mod stream;

use args::Command;
use config::SelfTestConfig;
use error::CliError;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "truernd failed");
            eprintln!("truernd: {err}");
            if let CliError::Usage(_) = err {
                eprintln!();
                eprintln!("{}", args::USAGE);
            }
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run() -> Result<ExitCode, CliError> {
    let command = args::parse(std::env::args().skip(1))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Help => {
            writeln!(out, "{}", args::USAGE)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Probe { json } => {
            let report = probe::ProbeReport::current();
            report.render(&mut out, json)?;
            Ok(if report.supported {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::SelfTest { config } => {
            let config = match config {
                Some(path) => SelfTestConfig::load(&path)?,
                None => SelfTestConfig::default(),
            };
            let report = selftest::run(&config)?;
            report.render(&mut out)?;
            Ok(if report.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Stream { limit } => {
            let mut rng = HwRng::new()?;
            stream::run(&mut rng, &mut out, limit)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
