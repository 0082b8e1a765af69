//! A genetic algorithm that searches a box for the minimum of a fitness
//! function, with elite selection, a single tournament, one point
//! crossover and bounded mutation.

use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use tracing::debug;

pub type Individual = Vec<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneticConfig {
    pub population: usize,
    pub dimensions: usize,
    /// share of the sorted population carried over as elites
    pub elite_proportion: f64,
    /// share of the remaining population entering the tournament
    pub tournament_proportion: f64,
    pub epochs: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub search_min: f64,
    pub search_max: f64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        GeneticConfig {
            population: 200,
            dimensions: 2,
            elite_proportion: 0.01,
            tournament_proportion: 0.02,
            epochs: 10,
            crossover_rate: 0.95,
            mutation_rate: 0.05,
            search_min: -5.0,
            search_max: 5.0,
        }
    }
}

impl GeneticConfig {
    fn elites(&self, len: usize) -> usize {
        (len as f64 * self.elite_proportion).ceil() as usize
    }

    fn entrants(&self, len: usize) -> usize {
        ((len as f64 * self.tournament_proportion).ceil() as usize).min(len)
    }

    pub fn validate(&self) -> Result<()> {
        let proportion = |name: &str, p: f64| {
            if p > 0.0 && p <= 1.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!("{name} must lie in (0, 1], got {p}")))
            }
        };
        proportion("elite proportion", self.elite_proportion)?;
        proportion("tournament proportion", self.tournament_proportion)?;
        if !(0.0..=1.0).contains(&self.crossover_rate) || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::InvalidConfig("operator rates must lie in [0, 1]".to_string()));
        }
        if !(self.search_min.is_finite() && self.search_max.is_finite() && self.search_min < self.search_max) {
            return Err(Error::InvalidConfig(format!(
                "search space [{}, {}] must be finite and non-empty",
                self.search_min, self.search_max
            )));
        }
        if self.dimensions == 0 {
            return Err(Error::InvalidConfig("need at least one dimension".to_string()));
        }
        let elites = self.elites(self.population);
        if elites >= self.population {
            return Err(Error::InvalidConfig(format!(
                "population of {} leaves no room for a mating pool of at least two",
                self.population
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub best: Individual,
    pub fitness: f64,
}

fn by_fitness<F>(fitness: &F) -> impl Fn(&Individual, &Individual) -> Ordering + '_
where
    F: Fn(&[f64]) -> f64,
{
    move |a, b| fitness(a.as_slice()).total_cmp(&fitness(b.as_slice()))
}

pub struct GeneticAlgorithm<F> {
    config: GeneticConfig,
    fitness: F,
}

impl<F> GeneticAlgorithm<F>
where
    F: Fn(&[f64]) -> f64,
{
    pub fn new(config: GeneticConfig, fitness: F) -> Result<Self> {
        config.validate()?;
        Ok(GeneticAlgorithm { config, fitness })
    }

    /// Evolve a random population for the configured number of epochs
    /// and return the fittest individual found.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
        let mut population = self.initialize(rng);
        for epoch in 1..=self.config.epochs {
            population.sort_by(by_fitness(&self.fitness));
            let n_elites = self.config.elites(population.len());
            let elites: Vec<Individual> = population.drain(..n_elites).collect();
            let winner = self.tournament(&mut population, rng);

            let mut mating_pool = elites.clone();
            mating_pool.extend(winner);
            population = self.evolve(&mating_pool, elites, rng);
            debug!(epoch, best = (self.fitness)(population[0].as_slice()), "epoch done");
        }
        population.sort_by(by_fitness(&self.fitness));
        let best = population.swap_remove(0);
        let fitness = (self.fitness)(best.as_slice());
        Outcome { best, fitness }
    }

    pub fn initialize<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Individual> {
        let GeneticConfig { population, dimensions, search_min, search_max, .. } = self.config;
        (0..population)
            .map(|_| {
                (0..dimensions)
                    .map(|_| rng.gen_range(search_min..=search_max))
                    .collect::<Individual>()
            })
            .collect()
    }

    /// Remove random entrants from `population` and return the fittest.
    pub fn tournament<R: Rng + ?Sized>(
        &self,
        population: &mut Vec<Individual>,
        rng: &mut R,
    ) -> Option<Individual> {
        let count = self.config.entrants(population.len());
        let mut entrants = Vec::with_capacity(count);
        for _ in 0..count {
            let idx = rng.gen_range(0..population.len());
            entrants.push(population.swap_remove(idx));
        }
        entrants.into_iter().min_by(by_fitness(&self.fitness))
    }

    /// Build the next generation: elites verbatim, then children of two
    /// distinct mating pool members until the population is full.
    pub fn evolve<R: Rng + ?Sized>(
        &self,
        mating_pool: &[Individual],
        elites: Vec<Individual>,
        rng: &mut R,
    ) -> Vec<Individual> {
        let size = self.config.population;
        let mut next = elites;
        if mating_pool.len() < 2 {
            // nothing to breed from, refill with the pool itself
            while next.len() < size {
                match mating_pool.choose(rng) {
                    Some(parent) => next.push(parent.clone()),
                    None => break,
                }
            }
            return next;
        }
        while next.len() < size {
            let a = rng.gen_range(0..mating_pool.len());
            let b = rng.gen_range(0..mating_pool.len());
            if a == b {
                continue;
            }
            let (mut child_a, mut child_b) = self.crossover(&mating_pool[a], &mating_pool[b], rng);
            self.mutate(&mut child_a, rng);
            self.mutate(&mut child_b, rng);
            next.push(child_a);
            next.push(child_b);
        }
        next.truncate(size);
        next
    }

    /// One point crossover, applied with the configured probability.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        a: &[f64],
        b: &[f64],
        rng: &mut R,
    ) -> (Individual, Individual) {
        if a.len() < 2 || rng.gen::<f64>() >= self.config.crossover_rate {
            return (a.to_vec(), b.to_vec());
        }
        let pivot = rng.gen_range(1..a.len());
        let mut child_a = a[..pivot].to_vec();
        child_a.extend_from_slice(&b[pivot..]);
        let mut child_b = b[..pivot].to_vec();
        child_b.extend_from_slice(&a[pivot..]);
        (child_a, child_b)
    }

    /// Nudge each gene, with the configured probability, by a random
    /// step of up to half the search bounds, clamped back into the box.
    pub fn mutate<R: Rng + ?Sized>(&self, child: &mut [f64], rng: &mut R) {
        let (lo, hi) = (self.config.search_min, self.config.search_max);
        for gene in child.iter_mut() {
            if rng.gen::<f64>() <= self.config.mutation_rate {
                let step = rng.gen_range(lo * 0.5..=hi * 0.5);
                *gene = (*gene + step).clamp(lo, hi);
            }
        }
    }
}
