use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Climate {
    Desert,
    Forest,
    Arctic,
    Ocean,
}

impl Climate {
    pub const ALL: [Climate; 4] = [
        Climate::Desert,
        Climate::Forest,
        Climate::Arctic,
        Climate::Ocean,
    ];

    /// Position in [`Climate::ALL`]; every price and cost modifier scales with it.
    pub fn ordinal(self) -> i64 {
        match self {
            Climate::Desert => 0,
            Climate::Forest => 1,
            Climate::Arctic => 2,
            Climate::Ocean => 3,
        }
    }

    /// Ocean is the only climate that houses aquatic animals.
    pub fn native_habitat(self) -> Habitat {
        match self {
            Climate::Ocean => Habitat::Aquatic,
            _ => Habitat::Land,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Climate::Desert => "Desert",
            Climate::Forest => "Forest",
            Climate::Arctic => "Arctic",
            Climate::Ocean => "Ocean",
        }
    }
}

impl fmt::Display for Climate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diet {
    Carnivore,
    Herbivore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Habitat {
    Land,
    Aquatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Health {
    #[default]
    Healthy,
    Infected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub name: String,
    pub species: String,
    pub age_days: u32,
    pub weight: u32,
    pub climate: Climate,
    pub diet: Diet,
    pub habitat: Habitat,
    pub gender: Gender,
    pub health: Health,
    pub parents: Option<Lineage>,
}

impl Animal {
    /// A market-born animal: no lineage, habitat dictated by its climate.
    pub fn wild(
        species: impl Into<String>,
        age_days: u32,
        weight: u32,
        climate: Climate,
        diet: Diet,
        gender: Gender,
    ) -> Self {
        Self {
            name: String::new(),
            species: species.into(),
            age_days,
            weight: weight.max(1),
            climate,
            diet,
            habitat: climate.native_habitat(),
            gender,
            health: Health::Healthy,
            parents: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_aquatic(&self) -> bool {
        self.habitat == Habitat::Aquatic
    }

    pub fn is_carnivore(&self) -> bool {
        self.diet == Diet::Carnivore
    }

    pub fn is_infected(&self) -> bool {
        self.health == Health::Infected
    }

    pub fn grow_older(&mut self) {
        self.age_days += 1;
    }

    pub fn parents_label(&self) -> String {
        match &self.parents {
            Some(lineage) => format!("Parents: {} and {}", lineage.first, lineage.second),
            None => "Parents unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Director,
    Cleaner,
    Veterinarian,
    Feeder,
}

impl Role {
    pub fn salary(self) -> i64 {
        match self {
            Role::Director => 50,
            Role::Cleaner => 80,
            Role::Veterinarian => 150,
            Role::Feeder => 100,
        }
    }

    pub fn max_animals(self) -> u32 {
        match self {
            Role::Director => 50,
            Role::Cleaner => 20,
            Role::Veterinarian => 10,
            Role::Feeder => 30,
        }
    }

    pub fn is_protected(self) -> bool {
        self == Role::Director
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Director => "Director",
            Role::Cleaner => "Cleaner",
            Role::Veterinarian => "Veterinarian",
            Role::Feeder => "Feeder",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "director" => Ok(Role::Director),
            "cleaner" => Ok(Role::Cleaner),
            "veterinarian" | "vet" => Ok(Role::Veterinarian),
            "feeder" => Ok(Role::Feeder),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub role: Role,
    pub salary: i64,
    pub max_animals: u32,
    /// Capacity tally rebuilt by the payroll step every day.
    pub current_animals: u32,
}

impl Employee {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            salary: role.salary(),
            max_animals: role.max_animals(),
            current_animals: 0,
        }
    }

    pub fn spare_capacity(&self) -> u32 {
        self.max_animals.saturating_sub(self.current_animals)
    }
}
