//! Offspring synthesis from two parents.

use std::fmt;

use thiserror::Error;

use crate::components::{Animal, Diet, Gender, Habitat, Health, Lineage};
use crate::rng::RandomSource;

/// Age of every newborn, in days.
pub const NEWBORN_AGE_DAYS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatingConflict {
    SameGender,
    SameSpecies,
}

impl fmt::Display for MatingConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatingConflict::SameGender => f.write_str("parents share the same gender"),
            MatingConflict::SameSpecies => f.write_str("parents belong to the same species"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatingError {
    #[error("incompatible mating: {reason}")]
    IncompatibleMating { reason: MatingConflict },
}

pub fn check_compatible(first: &Animal, second: &Animal) -> Result<(), MatingError> {
    if first.gender == second.gender {
        return Err(MatingError::IncompatibleMating {
            reason: MatingConflict::SameGender,
        });
    }
    if first.species == second.species {
        return Err(MatingError::IncompatibleMating {
            reason: MatingConflict::SameSpecies,
        });
    }
    Ok(())
}

/// Picks one whitespace token from each label and joins them with a single space.
pub fn combine_species<R: RandomSource + ?Sized>(first: &str, second: &str, rng: &mut R) -> String {
    format!("{} {}", pick_token(first, rng), pick_token(second, rng))
}

fn pick_token<'a, R: RandomSource + ?Sized>(label: &'a str, rng: &mut R) -> &'a str {
    let tokens: Vec<&str> = label.split_whitespace().collect();
    if tokens.is_empty() {
        return label.trim();
    }
    tokens[rng.below(tokens.len() as u32) as usize]
}

/// Produces an unnamed newborn. Climate follows `first`; carnivory and aquatic
/// habitat are inherited if either parent carries them.
pub fn breed<R: RandomSource + ?Sized>(
    first: &Animal,
    second: &Animal,
    rng: &mut R,
) -> Result<Animal, MatingError> {
    check_compatible(first, second)?;

    let species = combine_species(&first.species, &second.species, rng);
    let gender = if rng.coin() {
        Gender::Male
    } else {
        Gender::Female
    };
    let diet = if first.is_carnivore() || second.is_carnivore() {
        Diet::Carnivore
    } else {
        Diet::Herbivore
    };
    let habitat = if first.is_aquatic() || second.is_aquatic() {
        Habitat::Aquatic
    } else {
        Habitat::Land
    };

    Ok(Animal {
        name: String::new(),
        species,
        age_days: NEWBORN_AGE_DAYS,
        weight: ((first.weight + second.weight) / 2).max(1),
        climate: first.climate,
        diet,
        habitat,
        gender,
        health: Health::Healthy,
        parents: Some(Lineage {
            first: first.name.clone(),
            second: second.name.clone(),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Climate;
    use crate::rng::{RngManager, ScriptedRandom};

    fn parent(name: &str, species: &str, gender: Gender, climate: Climate, diet: Diet) -> Animal {
        Animal::wild(species, 12, 40, climate, diet, gender).named(name)
    }

    #[test]
    fn combine_picks_one_token_from_each_label() {
        let allowed = ["Ice Fire", "Ice Bear", "Wolf Fire", "Wolf Bear"];
        let mut rng = RngManager::new(11);
        let mut stream = rng.stream("genetics");
        let mut seen = std::collections::HashSet::new();
        for _ in 0..400 {
            let hybrid = combine_species("Ice Wolf", "Fire Bear", &mut stream);
            assert!(allowed.contains(&hybrid.as_str()), "unexpected hybrid {hybrid}");
            seen.insert(hybrid);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn combine_is_repeatable_for_fixed_draws() {
        let a = combine_species("Ice Wolf", "Fire Bear", &mut ScriptedRandom::new([1, 0]));
        let b = combine_species("Ice Wolf", "Fire Bear", &mut ScriptedRandom::new([1, 0]));
        assert_eq!(a, "Wolf Fire");
        assert_eq!(a, b);
    }

    #[test]
    fn same_gender_is_rejected() {
        let a = parent("A", "Ice Bear", Gender::Male, Climate::Arctic, Diet::Carnivore);
        let b = parent("B", "Snow Dragon", Gender::Male, Climate::Arctic, Diet::Carnivore);
        assert_eq!(
            breed(&a, &b, &mut ScriptedRandom::default()),
            Err(MatingError::IncompatibleMating {
                reason: MatingConflict::SameGender
            })
        );
    }

    #[test]
    fn same_species_is_rejected() {
        let a = parent("A", "Ice Bear", Gender::Male, Climate::Arctic, Diet::Carnivore);
        let b = parent("B", "Ice Bear", Gender::Female, Climate::Arctic, Diet::Carnivore);
        assert_eq!(
            breed(&a, &b, &mut ScriptedRandom::default()),
            Err(MatingError::IncompatibleMating {
                reason: MatingConflict::SameSpecies
            })
        );
    }

    #[test]
    fn offspring_inherits_traits() {
        let seal = parent("Moss", "Sea Dragon", Gender::Female, Climate::Ocean, Diet::Herbivore);
        let mut wolf = parent("Fang", "Arctic Wolf", Gender::Male, Climate::Arctic, Diet::Carnivore);
        wolf.weight = 21;

        let child = breed(&wolf, &seal, &mut ScriptedRandom::new([0, 1, 1])).unwrap();
        assert_eq!(child.species, "Arctic Dragon");
        assert_eq!(child.gender, Gender::Female);
        assert_eq!(child.age_days, NEWBORN_AGE_DAYS);
        assert_eq!(child.weight, 30);
        assert_eq!(child.climate, Climate::Arctic);
        assert_eq!(child.diet, Diet::Carnivore);
        assert_eq!(child.habitat, Habitat::Aquatic);
        assert!(child.name.is_empty());
        assert_eq!(
            child.parents,
            Some(Lineage {
                first: "Fang".into(),
                second: "Moss".into()
            })
        );
    }

    #[test]
    fn land_parents_produce_land_offspring() {
        let a = parent("A", "Shadow Deer", Gender::Male, Climate::Forest, Diet::Herbivore);
        let b = parent("B", "Crystal Bear", Gender::Female, Climate::Forest, Diet::Herbivore);
        let child = breed(&a, &b, &mut ScriptedRandom::default()).unwrap();
        assert_eq!(child.habitat, Habitat::Land);
        assert_eq!(child.diet, Diet::Herbivore);
    }
}
