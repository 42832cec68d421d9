//! Batch command implementation.

use super::output::{format_batch_csv, format_batch_text, BatchStats, JsonBatchRow};
use super::{BatchFormat, CliError, SearchArgs};
use exprga::find_solution_with;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

/// Execute the batch command.
///
/// Every (target, run) pair is an independent search with its own seed,
/// `base_seed + job index`, so a batch is reproducible from its base seed.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub(crate) fn execute(
    targets: &[i64],
    runs: u64,
    search: &SearchArgs,
    threads: Option<usize>,
    format: BatchFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = search.build_config()?;

    // Reject configurations that cannot start before spawning work
    for &target in targets {
        config.population_size_for(target)?;
    }

    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = config.seed.unwrap_or_else(rand::random);
    let jobs: Vec<(usize, i64)> = targets
        .iter()
        .flat_map(|&target| (0..runs).map(move |_| target))
        .enumerate()
        .collect();

    let pb = if progress {
        let pb = ProgressBar::new(jobs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} searches ({per_sec})")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    let mut stats: Vec<BatchStats> = jobs
        .par_iter()
        .fold(
            || empty_stats(targets),
            |mut local, &(index, target)| {
                let mut run_config = config;
                run_config.seed = Some(base_seed.wrapping_add(index as u64));
                let result = find_solution_with(target, &run_config);
                if let Some(row) = local.iter_mut().find(|row| row.target == target) {
                    row.add_result(&result);
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                local
            },
        )
        .reduce(
            || empty_stats(targets),
            |mut a, b| {
                for (row, other) in a.iter_mut().zip(&b) {
                    row.merge(other);
                }
                a
            },
        );

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    stats.sort_by_key(|row| row.target);
    let duration = start.elapsed();

    match format {
        BatchFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s (base seed {base_seed})",
                duration.as_secs_f64()
            );
        }
        BatchFormat::Json => {
            let rows: Vec<JsonBatchRow> = stats.iter().map(JsonBatchRow::from_stats).collect();
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        BatchFormat::Csv => print!("{}", format_batch_csv(&stats)),
    }

    Ok(())
}

/// One empty stats row per distinct target, in first-seen order.
fn empty_stats(targets: &[i64]) -> Vec<BatchStats> {
    let mut rows: Vec<BatchStats> = Vec::with_capacity(targets.len());
    for &target in targets {
        if !rows.iter().any(|row| row.target == target) {
            rows.push(BatchStats::new(target));
        }
    }
    rows
}
