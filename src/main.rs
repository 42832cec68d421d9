//! Exprga CLI - evolve arithmetic expressions that hit a target number.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Exprga - genetic search for arithmetic expressions
#[derive(Parser, Debug)]
#[command(name = "exprga")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for an expression that evaluates to TARGET
    Solve {
        /// Target integer
        #[arg(allow_negative_numbers = true)]
        target: i64,

        #[command(flatten)]
        search: cli::SearchArgs,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show a generation spinner
        #[arg(long)]
        progress: bool,
    },

    /// Run many independent searches in parallel and aggregate statistics
    Batch {
        /// Target integers
        #[arg(required = true, allow_negative_numbers = true)]
        targets: Vec<i64>,

        /// Searches per target (default: 10)
        #[arg(short, long, default_value = "10")]
        runs: u64,

        #[command(flatten)]
        search: cli::SearchArgs,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show progress bar
        #[arg(long)]
        progress: bool,
    },

    /// Decode a bit string and evaluate it
    Decode {
        /// Bit string of 0s and 1s
        #[arg(required = true)]
        bits: String,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        search: cli::SearchArgs,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match args.command {
        Commands::Solve {
            target,
            search,
            format,
            progress,
        } => cli::solve::execute(target, &search, format, progress),

        Commands::Batch {
            targets,
            runs,
            search,
            threads,
            format,
            progress,
        } => cli::batch::execute(&targets, runs, &search, threads, format, progress),

        Commands::Decode { bits, format } => cli::decode::execute(&bits, format),

        Commands::Config { search, output } => cli::show_config::execute(&search, output.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
