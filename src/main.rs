use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log_analyzer::{analyze_file, analyze_file_parallel, render};

/// Summarize a timetable-service access log into a traffic & usage report.
#[derive(Parser, Debug)]
#[command(name = "log-analyzer", version, about)]
struct Cli {
    /// Path to the access log; defaults to access.log next to the executable
    log: Option<PathBuf>,

    /// Worker threads for chunked analysis
    #[arg(long, default_value_t = 1)]
    threads: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let path = match cli.log {
        Some(path) => path,
        None => default_log_path().context("cannot locate the default log file")?,
    };
    log::debug!("analyzing {} with {} thread(s)", path.display(), cli.threads);

    let state = if cli.threads > 1 {
        analyze_file_parallel(&path, cli.threads)
    } else {
        analyze_file(&path)
    }
    .with_context(|| format!("cannot read log file {}", path.display()))?;

    println!("{}", render(&state));
    Ok(())
}

fn default_log_path() -> io::Result<PathBuf> {
    let mut path = env::current_exe()?;
    path.set_file_name("access.log");
    Ok(path)
}
