#![no_main]

use arbitrary::Arbitrary;
use exprga::ga::{Population, SearchDriver, SearchState};
use exprga::SearchConfig;
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Structured input for search fuzzing.
#[derive(Arbitrary, Debug)]
struct SearchInput {
    /// Target value.
    target: i16,
    /// Population size.
    population: u8,
    /// Bits per candidate.
    bit_string_length: u8,
    /// Crossover rate in hundredths.
    crossover_percent: u8,
    /// Mutation rate in thousandths.
    mutation_permille: u16,
    /// RNG seed.
    seed: u64,
}

fuzz_target!(|input: SearchInput| {
    let mut config = SearchConfig {
        bit_string_length: usize::from(input.bit_string_length),
        population_size: Some(usize::from(input.population)),
        max_generations: Some(3),
        seed: Some(input.seed),
        ..SearchConfig::default()
    };
    config.crossover.crossover_rate = f64::from(input.crossover_percent) / 100.0;
    config.crossover.max_attempts_per_slot = 1_000;
    config.mutation.mutation_rate = f64::from(input.mutation_permille) / 1000.0;

    if config.validate().is_err() {
        return; // Rejected configurations are covered by unit tests
    }

    let target = i64::from(input.target);
    let mut rng = SmallRng::seed_from_u64(input.seed);
    let Ok(mut population) = Population::new(target, None, &config, &mut rng) else {
        return;
    };
    population.calculate_fitness_scores();
    let size = population.len();
    if population.reproduce(&mut rng).is_ok() {
        assert_eq!(population.len(), size);
        for member in population.members() {
            assert_eq!(member.bit_string.len(), config.bit_string_length);
            assert!(member.fitness.is_none());
        }
    }

    // Driver must end in Done or a bounded error within the cap
    let Ok(mut driver) = SearchDriver::new(target, &config, SmallRng::seed_from_u64(input.seed))
    else {
        return;
    };
    for _ in 0..16 {
        match driver.step() {
            Ok(SearchState::Done) | Err(_) => return,
            Ok(_) => {}
        }
    }
    panic!("driver did not stop within the generation cap");
});
