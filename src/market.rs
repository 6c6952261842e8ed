//! Pool of animals on sale.

use serde::Serialize;

use crate::components::{Animal, Climate, Diet, Gender};
use crate::rng::RandomSource;
use crate::valuation;

pub const MARKET_SIZE: usize = 10;

const DESERT_SPECIES: [&str; 5] = [
    "Sand Dragon",
    "Stone Scorpion",
    "Sun Lizard",
    "Desert Wolf",
    "Giant Scorpion",
];
const FOREST_SPECIES: [&str; 5] = [
    "Forest Phoenix",
    "Shadow Deer",
    "Crystal Bear",
    "Sparkling Fox",
    "Mechanical Unicorn",
];
const ARCTIC_SPECIES: [&str; 5] = [
    "Ice Bear",
    "Snow Dragon",
    "Arctic Wolf",
    "Crystal Fish",
    "Ice Eagle",
];
const OCEAN_SPECIES: [&str; 5] = [
    "Deep Kraken",
    "Electric Shark",
    "Sea Dragon",
    "Water Spirit",
    "Ocean Giant",
];

pub fn species_for(climate: Climate) -> &'static [&'static str; 5] {
    match climate {
        Climate::Desert => &DESERT_SPECIES,
        Climate::Forest => &FOREST_SPECIES,
        Climate::Arctic => &ARCTIC_SPECIES,
        Climate::Ocean => &OCEAN_SPECIES,
    }
}

/// Age 1..=20, weight 5..=100, everything else uniform.
pub fn spawn_animal<R: RandomSource + ?Sized>(rng: &mut R) -> Animal {
    let age_days = rng.below(20) + 1;
    let weight = rng.below(96) + 5;
    let climate = Climate::ALL[rng.below(Climate::ALL.len() as u32) as usize];
    let diet = if rng.coin() {
        Diet::Carnivore
    } else {
        Diet::Herbivore
    };
    let gender = if rng.coin() {
        Gender::Male
    } else {
        Gender::Female
    };
    let table = species_for(climate);
    let species = table[rng.below(table.len() as u32) as usize];
    Animal::wild(species, age_days, weight, climate, diet, gender)
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketOffer {
    pub index: usize,
    pub price: i64,
    pub animal: Animal,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Market {
    pool: Vec<Animal>,
}

impl Market {
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut market = Self::default();
        market.regenerate(rng);
        market
    }

    /// A pool with exactly these animals, in this order.
    pub fn from_animals(animals: Vec<Animal>) -> Self {
        Self { pool: animals }
    }

    /// Replaces the whole pool with fresh animals.
    pub fn regenerate<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.pool.clear();
        for _ in 0..MARKET_SIZE {
            self.pool.push(spawn_animal(rng));
        }
    }

    pub fn animals(&self) -> &[Animal] {
        &self.pool
    }

    pub fn get(&self, index: usize) -> Option<&Animal> {
        self.pool.get(index)
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn take(&mut self, index: usize) -> Option<Animal> {
        if index < self.pool.len() {
            Some(self.pool.remove(index))
        } else {
            None
        }
    }

    pub fn offers(&self) -> Vec<MarketOffer> {
        self.pool
            .iter()
            .enumerate()
            .map(|(index, animal)| MarketOffer {
                index,
                price: valuation::price(animal),
                animal: animal.clone(),
            })
            .collect()
    }
}
