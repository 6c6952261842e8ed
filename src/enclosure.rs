use serde::Serialize;
use thiserror::Error;

use crate::components::{Animal, Climate, Diet, Habitat};
use crate::epidemic;
use crate::genetics::{self, MatingError};
use crate::rng::RandomSource;
use crate::valuation;

pub const MAX_LEVEL: u8 = 3;
/// Parents must be strictly older than this.
pub const BREEDING_MIN_AGE_DAYS: u32 = 5;
pub const TWIN_CHANCE_PERCENT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("enclosure is at capacity ({capacity})")]
    Full { capacity: u32 },
    #[error("a {animal} animal cannot live in a {enclosure} enclosure")]
    ClimateMismatch { animal: Climate, enclosure: Climate },
    #[error("only aquatic animals may live in an ocean enclosure, and only there")]
    HabitatMismatch { habitat: Habitat },
    #[error("carnivores and herbivores cannot share an enclosure")]
    DietMismatch { resident: Diet },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BreedingError {
    #[error("at least two animals are needed to breed")]
    TooFewAnimals,
    #[error("no male and female pair older than 5 days")]
    NoEligiblePair,
    #[error("enclosure is full")]
    EnclosureFull,
    #[error(transparent)]
    Mating(#[from] MatingError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UpgradeError {
    #[error("enclosure is already at the maximum level")]
    MaxLevel,
    #[error("capacity {capacity} cannot be doubled")]
    CapacityOverflow { capacity: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enclosure {
    climate: Climate,
    capacity: u32,
    level: u8,
    daily_cost: i64,
    pub(crate) animals: Vec<Animal>,
}

impl Enclosure {
    pub fn new(climate: Climate, capacity: u32) -> Self {
        Self {
            climate,
            capacity,
            level: 1,
            daily_cost: valuation::enclosure_daily_cost(climate, capacity, &[]),
            animals: Vec::new(),
        }
    }

    pub fn climate(&self) -> Climate {
        self.climate
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Fixed at construction and adjusted on upgrade; never recomputed by the day cycle.
    pub fn daily_cost(&self) -> i64 {
        self.daily_cost
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn animal(&self, index: usize) -> Option<&Animal> {
        self.animals.get(index)
    }

    pub fn animal_mut(&mut self, index: usize) -> Option<&mut Animal> {
        self.animals.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    pub fn remaining_capacity(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.animals.len())
    }

    pub fn infected_count(&self) -> usize {
        epidemic::infected_count(&self.animals)
    }

    pub fn check_placement(&self, animal: &Animal) -> Result<(), PlacementError> {
        if self.remaining_capacity() == 0 {
            return Err(PlacementError::Full {
                capacity: self.capacity,
            });
        }
        if animal.climate != self.climate {
            return Err(PlacementError::ClimateMismatch {
                animal: animal.climate,
                enclosure: self.climate,
            });
        }
        if animal.habitat != self.climate.native_habitat() {
            return Err(PlacementError::HabitatMismatch {
                habitat: animal.habitat,
            });
        }
        if let Some(resident) = self.animals.first() {
            if resident.diet != animal.diet {
                return Err(PlacementError::DietMismatch {
                    resident: resident.diet,
                });
            }
        }
        Ok(())
    }

    pub fn add_animal(&mut self, animal: Animal) -> Result<(), PlacementError> {
        self.check_placement(&animal)?;
        self.animals.push(animal);
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Animal> {
        if index < self.animals.len() {
            Some(self.animals.remove(index))
        } else {
            None
        }
    }

    pub fn upgrade_cost(&self) -> i64 {
        valuation::enclosure_upgrade_cost(self.capacity, self.level)
    }

    /// Doubles capacity and raises upkeep by half the daily cost at the new size.
    /// Returns the new level. Nothing changes on error.
    pub fn upgrade(&mut self) -> Result<u8, UpgradeError> {
        if self.level >= MAX_LEVEL {
            return Err(UpgradeError::MaxLevel);
        }
        self.capacity = self
            .capacity
            .checked_mul(2)
            .ok_or(UpgradeError::CapacityOverflow {
                capacity: self.capacity,
            })?;
        self.daily_cost +=
            valuation::enclosure_daily_cost(self.climate, self.capacity, &self.animals) / 2;
        self.level += 1;
        Ok(self.level)
    }

    /// First pair in insertion order with differing genders and both parents past
    /// the minimum age. Not the best pair, the first one.
    pub fn breeding_pair(&self) -> Option<(usize, usize)> {
        let adult = |animal: &Animal| animal.age_days > BREEDING_MIN_AGE_DAYS;
        for (i, first) in self.animals.iter().enumerate() {
            for (offset, second) in self.animals[i + 1..].iter().enumerate() {
                if first.gender != second.gender && adult(first) && adult(second) {
                    return Some((i, i + 1 + offset));
                }
            }
        }
        None
    }

    /// Breeds the first eligible pair: one newborn, or twins on a 10% roll, capped by
    /// free space. Newborns take names from `names` in order and fall back to their
    /// species label.
    pub fn breed_animals<R: RandomSource + ?Sized>(
        &mut self,
        names: &[String],
        rng: &mut R,
    ) -> Result<Vec<Animal>, BreedingError> {
        if self.animals.len() < 2 {
            return Err(BreedingError::TooFewAnimals);
        }
        let (first, second) = self.breeding_pair().ok_or(BreedingError::NoEligiblePair)?;
        genetics::check_compatible(&self.animals[first], &self.animals[second])?;

        let litter = if rng.percent(TWIN_CHANCE_PERCENT) { 2 } else { 1 };
        let litter = litter.min(self.remaining_capacity());
        if litter == 0 {
            return Err(BreedingError::EnclosureFull);
        }

        let mut born = Vec::with_capacity(litter);
        for slot in 0..litter {
            let mut child = genetics::breed(&self.animals[first], &self.animals[second], rng)?;
            child.name = match names.get(slot).map(|name| name.trim()) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => child.species.clone(),
            };
            born.push(child);
        }
        self.animals.extend(born.iter().cloned());
        Ok(born)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Gender, Health};
    use crate::rng::ScriptedRandom;

    fn deer(name: &str, gender: Gender, age: u32) -> Animal {
        Animal::wild("Shadow Deer", age, 30, Climate::Forest, Diet::Herbivore, gender).named(name)
    }

    fn bear(name: &str, gender: Gender, age: u32) -> Animal {
        Animal::wild("Crystal Bear", age, 50, Climate::Forest, Diet::Herbivore, gender).named(name)
    }

    #[test]
    fn placement_rules() {
        let mut forest = Enclosure::new(Climate::Forest, 2);
        let shark = Animal::wild("Electric Shark", 3, 40, Climate::Ocean, Diet::Carnivore, Gender::Male);
        assert!(matches!(
            forest.check_placement(&shark),
            Err(PlacementError::ClimateMismatch { .. })
        ));

        let mut swimmer = deer("Odd", Gender::Male, 3);
        swimmer.habitat = Habitat::Aquatic;
        assert!(matches!(
            forest.check_placement(&swimmer),
            Err(PlacementError::HabitatMismatch { .. })
        ));

        forest.add_animal(deer("Doe", Gender::Female, 8)).unwrap();
        let wolf = Animal::wild("Shadow Wolf", 3, 40, Climate::Forest, Diet::Carnivore, Gender::Male);
        assert_eq!(
            forest.check_placement(&wolf),
            Err(PlacementError::DietMismatch {
                resident: Diet::Herbivore
            })
        );

        forest.add_animal(deer("Buck", Gender::Male, 8)).unwrap();
        assert_eq!(
            forest.add_animal(deer("Fawn", Gender::Male, 1)),
            Err(PlacementError::Full { capacity: 2 })
        );
    }

    #[test]
    fn empty_pen_accepts_either_diet_again() {
        let mut forest = Enclosure::new(Climate::Forest, 3);
        forest.add_animal(deer("Doe", Gender::Female, 8)).unwrap();
        forest.remove_at(0).unwrap();
        let wolf = Animal::wild("Shadow Wolf", 3, 40, Climate::Forest, Diet::Carnivore, Gender::Male);
        assert!(forest.add_animal(wolf).is_ok());
    }

    #[test]
    fn ocean_pen_only_takes_aquatic() {
        let mut ocean = Enclosure::new(Climate::Ocean, 4);
        let shark = Animal::wild("Electric Shark", 3, 40, Climate::Ocean, Diet::Carnivore, Gender::Male);
        assert!(ocean.add_animal(shark).is_ok());
        assert!(ocean.animals().iter().all(Animal::is_aquatic));
    }

    #[test]
    fn upgrade_doubles_capacity_until_max_level() {
        let mut pen = Enclosure::new(Climate::Arctic, 10);
        assert_eq!(pen.daily_cost(), 10 + 1 + 10);
        assert_eq!(pen.upgrade_cost(), 100);
        assert_eq!(pen.upgrade(), Ok(2));
        assert_eq!(pen.capacity(), 20);
        assert_eq!(pen.daily_cost(), 21 + (10 + 2 + 10) / 2);
        assert_eq!(pen.upgrade(), Ok(3));
        assert_eq!(pen.capacity(), 40);
        assert_eq!(pen.upgrade(), Err(UpgradeError::MaxLevel));
        assert_eq!(pen.capacity(), 40);
    }

    #[test]
    fn upgrade_refuses_to_overflow_capacity() {
        let huge = u32::MAX / 2 + 1;
        let mut pen = Enclosure::new(Climate::Forest, huge);
        let daily_cost = pen.daily_cost();
        assert_eq!(
            pen.upgrade(),
            Err(UpgradeError::CapacityOverflow { capacity: huge })
        );
        assert_eq!(pen.capacity(), huge);
        assert_eq!(pen.level(), 1);
        assert_eq!(pen.daily_cost(), daily_cost);
    }

    #[test]
    fn first_eligible_pair_wins() {
        let mut pen = Enclosure::new(Climate::Forest, 10);
        pen.add_animal(deer("Kid", Gender::Male, 2)).unwrap();
        pen.add_animal(deer("Buck", Gender::Male, 9)).unwrap();
        pen.add_animal(bear("Ursa", Gender::Female, 9)).unwrap();
        pen.add_animal(bear("Elder", Gender::Female, 40)).unwrap();
        assert_eq!(pen.breeding_pair(), Some((1, 2)));
    }

    #[test]
    fn breeding_requires_two_animals_and_a_pair() {
        let mut pen = Enclosure::new(Climate::Forest, 10);
        let mut rng = ScriptedRandom::default();
        pen.add_animal(deer("Buck", Gender::Male, 9)).unwrap();
        assert_eq!(pen.breed_animals(&[], &mut rng), Err(BreedingError::TooFewAnimals));
        pen.add_animal(bear("Cub", Gender::Female, 3)).unwrap();
        assert_eq!(pen.breed_animals(&[], &mut rng), Err(BreedingError::NoEligiblePair));
        assert_eq!(pen.len(), 2);
    }

    #[test]
    fn same_species_pair_is_incompatible() {
        let mut pen = Enclosure::new(Climate::Forest, 10);
        pen.add_animal(deer("Buck", Gender::Male, 9)).unwrap();
        pen.add_animal(deer("Doe", Gender::Female, 9)).unwrap();
        let result = pen.breed_animals(&[], &mut ScriptedRandom::default());
        assert!(matches!(result, Err(BreedingError::Mating(_))));
        assert_eq!(pen.len(), 2);
    }

    #[test]
    fn twins_are_clamped_to_free_space() {
        let mut pen = Enclosure::new(Climate::Forest, 3);
        pen.add_animal(deer("Buck", Gender::Male, 9)).unwrap();
        pen.add_animal(bear("Ursa", Gender::Female, 9)).unwrap();
        // twin roll hits, then species tokens and gender for the single newborn
        let mut rng = ScriptedRandom::new([5, 0, 1, 0]);
        let born = pen
            .breed_animals(&["Hazel".to_string(), "Birch".to_string()], &mut rng)
            .unwrap();
        assert_eq!(born.len(), 1);
        assert_eq!(born[0].name, "Hazel");
        assert_eq!(born[0].species, "Shadow Bear");
        assert_eq!(born[0].health, Health::Healthy);
        assert_eq!(pen.len(), 3);

        assert_eq!(
            pen.breed_animals(&[], &mut ScriptedRandom::default()),
            Err(BreedingError::EnclosureFull)
        );
    }

    #[test]
    fn unnamed_newborns_take_their_species() {
        let mut pen = Enclosure::new(Climate::Forest, 5);
        pen.add_animal(deer("Buck", Gender::Male, 9)).unwrap();
        pen.add_animal(bear("Ursa", Gender::Female, 9)).unwrap();
        let mut rng = ScriptedRandom::new([50, 1, 0, 0]);
        let born = pen.breed_animals(&[], &mut rng).unwrap();
        assert_eq!(born.len(), 1);
        assert_eq!(born[0].name, "Deer Crystal");
        assert_eq!(born[0].age_days, 1);
    }
}
