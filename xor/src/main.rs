use morphneat::genomics::{
    InnovationRegistry, MutationRates, Network, NetworkConfig, SharedInnovationRegistry,
};
use morphneat::rng::{RandomSource, RngSource};

use std::num::NonZeroUsize;
use std::{env, fs, process};

use rayon::prelude::*;

const ERROR_MARGIN: f32 = 0.3;
const PERFECT_FITNESS: f32 = 16.0;
const POPULATION_SIZE: usize = 150;
const SURVIVAL_THRESHOLD: f32 = 0.2;
const MAX_GENERATIONS: usize = 300;

fn evaluate_xor(network: &mut Network) -> f32 {
    let values = [
        ([1.0, 0.0, 0.0], 0.0),
        ([1.0, 0.0, 1.0], 1.0),
        ([1.0, 1.0, 0.0], 1.0),
        ([1.0, 1.0, 1.0], 0.0),
    ];

    let mut errors = [0.0, 0.0, 0.0, 0.0];
    for (i, (input, output)) in values.iter().enumerate() {
        network.set_inputs(input);
        errors[i] = (network.output(0) - output).abs();
        if errors[i] < ERROR_MARGIN {
            errors[i] = 0.0;
        }
    }

    (4.0 - errors.iter().copied().sum::<f32>()).powf(2.0)
}

fn default_config() -> NetworkConfig {
    NetworkConfig {
        input_count: NonZeroUsize::new(3).unwrap(),
        output_count: NonZeroUsize::new(1).unwrap(),
        max_size: 12,
        mutation_rates: MutationRates {
            node_addition: 0.1,
            node_function_change: 0.2,
            weight_change: 0.8,
            connection_addition: 0.3,
        },
        weight_bound: 5.0,
    }
}

/// Reads a RON-encoded configuration from the path given
/// as the first argument, if any.
fn load_config() -> Result<NetworkConfig, String> {
    let path = match env::args().nth(1) {
        Some(path) => path,
        None => return Ok(default_config()),
    };
    let text = fs::read_to_string(&path).map_err(|e| format!("unable to read {}: {}", path, e))?;
    let config: NetworkConfig =
        ron::from_str(&text).map_err(|e| format!("unable to parse {}: {}", path, e))?;
    config
        .validate()
        .map_err(|e| format!("invalid configuration in {}: {}", path, e))?;
    if config.input_count.get() != 3 || config.output_count.get() != 1 {
        return Err(format!("{} must describe 3 inputs and 1 output", path));
    }
    Ok(config)
}

fn main() {
    env_logger::init();

    let config = load_config().unwrap_or_else(|e| {
        log::error!("{}", e);
        process::exit(1);
    });
    let registry = SharedInnovationRegistry::new(InnovationRegistry::for_config(&config));

    let mut rng = RngSource::from_entropy();
    let mut population: Vec<Network> = (0..POPULATION_SIZE)
        .map(|_| Network::new(&config, &mut rng))
        .collect();

    for generation in 0..MAX_GENERATIONS {
        let mut scored: Vec<(f32, Network)> = population
            .into_par_iter()
            .map(|mut network| (evaluate_xor(&mut network), network))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let (best_fitness, champion) = &scored[0];
        log::info!(
            "generation {}: best fitness {:.3}, {} hidden nodes, {} connections, {} innovations",
            generation,
            best_fitness,
            champion.hidden_count(),
            champion.connection_count(),
            registry.with(|r| r.next_innovation()),
        );
        if (best_fitness - PERFECT_FITNESS).abs() < f32::EPSILON {
            println!("Solved XOR in {} generations:\n{}", generation, champion);
            return;
        }

        let survivor_count =
            ((POPULATION_SIZE as f32 * SURVIVAL_THRESHOLD).ceil() as usize).max(1);
        let survivors: Vec<Network> = scored
            .into_iter()
            .take(survivor_count)
            .map(|(_, network)| network)
            .collect();

        let children: Vec<Network> = (1..POPULATION_SIZE)
            .into_par_iter()
            .map_init(
                || (registry.clone(), RngSource::from_entropy()),
                |(registry, rng), _| {
                    // Survivors are sorted, so the lower index is the fitter parent.
                    let a = rng.index(survivors.len());
                    let b = rng.index(survivors.len());
                    let (fitter, weaker) = (a.min(b), a.max(b));
                    let mut child = survivors[weaker].cross_with(&survivors[fitter], rng);
                    child.mutate(registry, rng);
                    child
                },
            )
            .collect();

        population = Vec::with_capacity(POPULATION_SIZE);
        population.push(survivors[0].clone());
        population.extend(children);
    }

    println!("XOR unsolved after {} generations", MAX_GENERATIONS);
}
