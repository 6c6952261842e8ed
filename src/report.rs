use std::fmt;

use serde::Serialize;

use crate::components::Animal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    OldAge,
    Epidemic,
    Starvation,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeathCause::OldAge => "old age",
            DeathCause::Epidemic => "disease",
            DeathCause::Starvation => "starvation",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeathNotice {
    pub name: String,
    pub species: String,
    pub cause: DeathCause,
}

impl DeathNotice {
    pub fn new(animal: &Animal, cause: DeathCause) -> Self {
        Self {
            name: animal.name.clone(),
            species: animal.species.clone(),
            cause,
        }
    }
}

impl fmt::Display for DeathNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) died of {}", self.name, self.species, self.cause)
    }
}

/// Everything that happened while one day resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayReport {
    /// The day that was resolved, not the one that follows.
    pub day: u32,
    pub events: Vec<String>,
    pub deaths: Vec<DeathNotice>,
    /// Names of animals that fell ill today, seeded or through spread.
    pub infections: Vec<String>,
    pub infected_total: usize,
    pub visitors: i64,
    pub income: i64,
    pub payroll: i64,
    pub upkeep: i64,
    pub feeding_cost: i64,
    pub food_eaten: i64,
    /// Random drift applied at the end of the day.
    pub popularity_change: i64,
    pub money_before: i64,
    pub money_after: i64,
    pub popularity: i64,
    pub bankrupt: bool,
}

impl DayReport {
    pub fn new(day: u32) -> Self {
        Self {
            day,
            ..Self::default()
        }
    }

    pub fn deaths_by(&self, cause: DeathCause) -> impl Iterator<Item = &DeathNotice> {
        self.deaths.iter().filter(move |notice| notice.cause == cause)
    }
}
