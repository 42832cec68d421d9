//! Solve command implementation.

use super::output::{format_solution_text, JsonSolution};
use super::{CliError, OutputFormat, SearchArgs};
use exprga::ga::{SearchDriver, SearchState};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Execute the solve command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the search fails.
pub(crate) fn execute(
    target: i64,
    search: &SearchArgs,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    let mut config = search.build_config()?;

    // Pick a seed up front so the run can be reproduced
    let seed = config.seed.unwrap_or_else(rand::random);
    config.seed = Some(seed);

    let mut driver = SearchDriver::new(target, &config, SmallRng::seed_from_u64(seed))?;

    let pb = if progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?,
        );
        Some(pb)
    } else {
        None
    };

    loop {
        let state = match driver.step() {
            Ok(state) => state,
            Err(e) => {
                if let Some(pb) = &pb {
                    pb.abandon();
                }
                return Err(e.into());
            }
        };
        if state == SearchState::Done {
            break;
        }
        if let (Some(pb), SearchState::Check) = (&pb, state) {
            if let Some(latest) = driver.stats().last() {
                pb.set_message(format!(
                    "generation {} closest {}",
                    latest.generation, latest.closest_value
                ));
            }
            pb.tick();
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let solution = driver
        .into_solution()
        .ok_or_else(|| CliError::new("search ended without a solution"))?;

    match format {
        OutputFormat::Text => print!("{}", format_solution_text(&solution, seed)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonSolution::from_solution(&solution, seed))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
