//! Price and cost formulas. Pure functions of entity attributes.

use crate::components::{Animal, Climate};

pub const MIN_ANIMAL_PRICE: i64 = 10;
pub const MIN_CONSTRUCTION_COST: i64 = 150;
pub const MIN_DAILY_COST: i64 = 10;

pub fn price(animal: &Animal) -> i64 {
    let mut price = 60 + animal.weight as i64 * 2 - (animal.age_days as i64 / 30) * 5;
    if animal.is_carnivore() {
        price += 100;
    }
    price += animal.climate.ordinal() * 50;
    if animal.is_aquatic() {
        price += 200;
    }
    price.max(MIN_ANIMAL_PRICE)
}

/// 80% of the purchase price, rounded down.
pub fn sell_value(animal: &Animal) -> i64 {
    price(animal) * 4 / 5
}

/// Informational only; the day cycle never charges it.
pub fn maintenance_cost(animal: &Animal) -> i64 {
    let weight = animal.weight as i64;
    if animal.is_aquatic() {
        weight * 2
    } else {
        weight
    }
}

pub fn enclosure_construction_cost(climate: Climate, capacity: u32) -> i64 {
    (100 + capacity as i64 * 10 + climate.ordinal() * 50).max(MIN_CONSTRUCTION_COST)
}

pub fn enclosure_daily_cost(climate: Climate, capacity: u32, animals: &[Animal]) -> i64 {
    let aquatic = animals.iter().filter(|animal| animal.is_aquatic()).count() as i64;
    (10 + capacity as i64 / 10 + climate.ordinal() * 5 + 10 * aquatic).max(MIN_DAILY_COST)
}

pub fn enclosure_upgrade_cost(capacity: u32, level: u8) -> i64 {
    capacity as i64 * 5 * (level as i64 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Diet, Gender};

    fn animal(age: u32, weight: u32, climate: Climate, diet: Diet) -> Animal {
        Animal::wild("Probe", age, weight, climate, diet, Gender::Male)
    }

    #[test]
    fn price_combines_every_modifier() {
        // 60 + 40*2 - (65/30)*5 + 100 + 3*50 + 200
        let shark = animal(65, 40, Climate::Ocean, Diet::Carnivore);
        assert_eq!(price(&shark), 60 + 80 - 10 + 100 + 150 + 200);
    }

    #[test]
    fn price_never_drops_below_floor() {
        let ancient = animal(3_000, 1, Climate::Desert, Diet::Herbivore);
        assert_eq!(price(&ancient), MIN_ANIMAL_PRICE);
        for age in (0..600).step_by(7) {
            for weight in [1, 5, 50, 100] {
                for climate in Climate::ALL {
                    for diet in [Diet::Carnivore, Diet::Herbivore] {
                        assert!(price(&animal(age, weight, climate, diet)) >= MIN_ANIMAL_PRICE);
                    }
                }
            }
        }
    }

    #[test]
    fn sell_value_truncates() {
        let fox = animal(10, 13, Climate::Forest, Diet::Herbivore);
        // price = 60 + 26 + 50 = 136, 136 * 0.8 = 108.8
        assert_eq!(price(&fox), 136);
        assert_eq!(sell_value(&fox), 108);
    }

    #[test]
    fn aquatic_upkeep_doubles() {
        assert_eq!(maintenance_cost(&animal(1, 30, Climate::Ocean, Diet::Herbivore)), 60);
        assert_eq!(maintenance_cost(&animal(1, 30, Climate::Arctic, Diet::Herbivore)), 30);
    }

    #[test]
    fn enclosure_costs() {
        assert_eq!(enclosure_construction_cost(Climate::Forest, 10), 250);
        assert_eq!(enclosure_construction_cost(Climate::Desert, 2), MIN_CONSTRUCTION_COST);
        assert_eq!(enclosure_daily_cost(Climate::Arctic, 25, &[]), 10 + 2 + 10);
        let seals = vec![
            animal(1, 10, Climate::Ocean, Diet::Carnivore),
            animal(1, 10, Climate::Ocean, Diet::Carnivore),
        ];
        assert_eq!(enclosure_daily_cost(Climate::Ocean, 10, &seals), 10 + 1 + 15 + 20);
        assert_eq!(enclosure_upgrade_cost(10, 1), 100);
        assert_eq!(enclosure_upgrade_cost(20, 2), 300);
    }
}
