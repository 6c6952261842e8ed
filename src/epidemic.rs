//! Infection seeding and spread inside a single enclosure.

use serde::Serialize;

use crate::components::{Animal, Health};
use crate::rng::RandomSource;

pub const SEED_CHANCE_PERCENT: u32 = 30;
pub const SPREAD_CHANCE_PERCENT: u32 = 30;
pub const MAX_INFECTIONS_PER_SOURCE: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EpidemicOutcome {
    pub seeded: Option<String>,
    pub newly_infected: Vec<String>,
    pub deaths: Vec<Animal>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpreadOutcome {
    /// Majority infected: infected animals died until they no longer outnumbered half the pen.
    Culled(Vec<Animal>),
    /// Minority infected: names of animals that caught the disease.
    Spread(Vec<String>),
}

pub fn infected_count(animals: &[Animal]) -> usize {
    animals.iter().filter(|animal| animal.is_infected()).count()
}

/// Walks healthy animals in order; the first one whose roll hits gets sick
/// and the pass ends there. Returns that animal's name.
pub fn seed_infection<R: RandomSource + ?Sized>(
    animals: &mut [Animal],
    rng: &mut R,
) -> Option<String> {
    for animal in animals.iter_mut() {
        if animal.is_infected() {
            continue;
        }
        if rng.percent(SEED_CHANCE_PERCENT) {
            animal.health = Health::Infected;
            return Some(animal.name.clone());
        }
    }
    None
}

pub fn spread<R: RandomSource + ?Sized>(animals: &mut Vec<Animal>, rng: &mut R) -> SpreadOutcome {
    let infected = infected_count(animals);
    if infected > animals.len() / 2 {
        SpreadOutcome::Culled(cull(animals, infected, rng))
    } else {
        SpreadOutcome::Spread(infect_neighbours(animals, rng))
    }
}

/// Rescans until infected animals are at most half the pen. Each infected
/// animal met during a scan dies on a coin flip.
fn cull<R: RandomSource + ?Sized>(
    animals: &mut Vec<Animal>,
    mut infected: usize,
    rng: &mut R,
) -> Vec<Animal> {
    let mut dead = Vec::new();
    while infected > animals.len() / 2 {
        let mut index = 0;
        while index < animals.len() && infected > animals.len() / 2 {
            if animals[index].is_infected() && rng.coin() {
                dead.push(animals.remove(index));
                infected -= 1;
            } else {
                index += 1;
            }
        }
    }
    dead
}

/// Sources are fixed before the pass starts, so an animal infected here does
/// not spread further until tomorrow.
fn infect_neighbours<R: RandomSource + ?Sized>(animals: &mut [Animal], rng: &mut R) -> Vec<String> {
    let sources = infected_count(animals);

    let mut newly_infected = Vec::new();
    for _ in 0..sources {
        let mut infections = 0;
        for target in animals.iter_mut() {
            if infections == MAX_INFECTIONS_PER_SOURCE {
                break;
            }
            if !target.is_infected() && rng.percent(SPREAD_CHANCE_PERCENT) {
                target.health = Health::Infected;
                newly_infected.push(target.name.clone());
                infections += 1;
            }
        }
    }
    newly_infected
}

/// One day of disease: seeding, then the spread pass.
pub fn run_day<R: RandomSource + ?Sized>(animals: &mut Vec<Animal>, rng: &mut R) -> EpidemicOutcome {
    let seeded = seed_infection(animals, rng);
    match spread(animals, rng) {
        SpreadOutcome::Culled(deaths) => EpidemicOutcome {
            seeded,
            newly_infected: Vec::new(),
            deaths,
        },
        SpreadOutcome::Spread(newly_infected) => EpidemicOutcome {
            seeded,
            newly_infected,
            deaths: Vec::new(),
        },
    }
}
