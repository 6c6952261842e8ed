use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    components::Climate,
    config::Rules,
    engine::EngineSettings,
    error::ZooError,
    report::DayReport,
    session::{Session, DEFAULT_SESSION_DAYS},
    world::EnclosureId,
};

fn default_director() -> String {
    "Director".to_string()
}

fn default_snapshot_interval_days() -> u32 {
    10
}

fn default_second_parent() -> usize {
    1
}

/// One session described in YAML: the zoo to open and what the player does each day.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_director")]
    pub director: String,
    pub starting_money: i64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default = "default_snapshot_interval_days")]
    pub snapshot_interval_days: u32,
    #[serde(default)]
    pub rules: Rules,
    /// Run before the planned actions of every day.
    #[serde(default)]
    pub every_day: Vec<PlayerAction>,
    #[serde(default)]
    pub plan: Vec<PlannedDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlannedDay {
    pub day: u32,
    pub actions: Vec<PlayerAction>,
}

/// A scripted player decision. Enclosures are addressed by build order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerAction {
    BuildEnclosure {
        climate: Climate,
        capacity: u32,
    },
    UpgradeEnclosure {
        enclosure: usize,
    },
    BuyAnimal {
        market_index: usize,
        name: String,
        enclosure: usize,
    },
    /// Buys the first market animal the enclosure accepts.
    BuyCompatible {
        name: String,
        enclosure: usize,
    },
    SellAnimal {
        enclosure: usize,
        animal: usize,
    },
    Cure {
        name: String,
    },
    CureAll,
    Breed {
        enclosure: usize,
        #[serde(default)]
        first: usize,
        #[serde(default = "default_second_parent")]
        second: usize,
        #[serde(default)]
        names: Vec<String>,
    },
    Rename {
        enclosure: usize,
        animal: usize,
        name: String,
    },
    Hire {
        name: String,
        role: String,
    },
    Fire {
        index: usize,
    },
    BuyFood {
        kg: i64,
    },
    /// Tops the stock up to feed every current animal for this many days.
    StockFood {
        days: i64,
    },
    Advertise {
        spend: i64,
    },
    RefreshMarket,
}

impl PlayerAction {
    /// Applies the action and describes what happened.
    pub fn apply(&self, session: &mut Session) -> Result<String, ZooError> {
        match self {
            PlayerAction::BuildEnclosure { climate, capacity } => {
                let id = session.build_enclosure(*climate, *capacity)?;
                Ok(format!("built {climate} enclosure {id} for {capacity} animals"))
            }
            PlayerAction::UpgradeEnclosure { enclosure } => {
                let level = session.upgrade_enclosure(EnclosureId(*enclosure))?;
                Ok(format!("enclosure #{enclosure} upgraded to level {level}"))
            }
            PlayerAction::BuyAnimal {
                market_index,
                name,
                enclosure,
            } => {
                let animal = session.buy_animal(*market_index, name, EnclosureId(*enclosure))?;
                Ok(format!("bought {} the {}", animal.name, animal.species))
            }
            PlayerAction::BuyCompatible { name, enclosure } => {
                let id = EnclosureId(*enclosure);
                if session.zoo().enclosure(id).is_none() {
                    return Err(ZooError::NoSuchEnclosure(id));
                }
                let index = session
                    .zoo()
                    .first_compatible_offer(id)
                    .ok_or(ZooError::NotFound)?;
                let animal = session.buy_animal(index, name, id)?;
                Ok(format!("bought {} the {}", animal.name, animal.species))
            }
            PlayerAction::SellAnimal { enclosure, animal } => {
                let value = session.sell_animal(EnclosureId(*enclosure), *animal)?;
                Ok(format!("sold an animal for {value}"))
            }
            PlayerAction::Cure { name } => {
                session.cure_animal(name)?;
                Ok(format!("cured {name}"))
            }
            PlayerAction::CureAll => {
                let sick: Vec<String> = session
                    .zoo()
                    .animals()
                    .filter(|animal| animal.is_infected())
                    .map(|animal| animal.name.clone())
                    .collect();
                let mut cured = 0;
                for name in &sick {
                    match session.cure_animal(name) {
                        Ok(()) => cured += 1,
                        // a namesake earlier in the zoo was cured instead
                        Err(ZooError::NotInfected(_)) => {}
                        Err(err) => return Err(err),
                    }
                }
                Ok(format!("cured {cured} animals"))
            }
            PlayerAction::Breed {
                enclosure,
                first,
                second,
                names,
            } => {
                let born = session.breed_in_enclosure(EnclosureId(*enclosure), *first, *second, names)?;
                let names: Vec<&str> = born.iter().map(|child| child.name.as_str()).collect();
                Ok(format!("born: {}", names.join(", ")))
            }
            PlayerAction::Rename {
                enclosure,
                animal,
                name,
            } => {
                session.rename_animal(EnclosureId(*enclosure), *animal, name)?;
                Ok(format!("renamed to {name}"))
            }
            PlayerAction::Hire { name, role } => {
                let employee = session.hire_employee(name, role)?;
                Ok(format!("hired {} as {}", employee.name, employee.role))
            }
            PlayerAction::Fire { index } => {
                let employee = session.fire_employee(*index)?;
                Ok(format!("fired {}", employee.name))
            }
            PlayerAction::BuyFood { kg } => {
                session.buy_food(*kg)?;
                Ok(format!("bought {kg} kg of food"))
            }
            PlayerAction::StockFood { days } => {
                let target = session.zoo().total_animals() as i64 * days;
                let missing = target - session.zoo().food();
                if missing <= 0 {
                    return Ok("food stock sufficient".to_string());
                }
                session.buy_food(missing)?;
                Ok(format!("bought {missing} kg of food"))
            }
            PlayerAction::Advertise { spend } => {
                let gained = session.run_advertising(*spend)?;
                Ok(format!("advertising gained {gained} popularity"))
            }
            PlayerAction::RefreshMarket => {
                session.refresh_market()?;
                Ok("market refreshed".to_string())
            }
        }
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn days(&self, override_days: Option<u32>) -> u32 {
        override_days.or(self.days).unwrap_or(DEFAULT_SESSION_DAYS)
    }

    /// Settings for the engine; the scenario's seed and interval unless overridden.
    pub fn engine_settings(
        &self,
        seed: Option<u64>,
        snapshot_interval_days: Option<u32>,
        snapshot_dir: PathBuf,
    ) -> EngineSettings {
        EngineSettings {
            seed: seed.or(self.seed),
            snapshot_interval_days: snapshot_interval_days.unwrap_or(self.snapshot_interval_days),
            snapshot_dir,
        }
    }

    pub fn start_session(&self, settings: EngineSettings, days: u32) -> Result<Session> {
        let session = Session::start(
            &self.name,
            self.starting_money,
            &self.director,
            self.rules.clone(),
            settings,
            days,
        )
        .with_context(|| format!("Failed to open zoo '{}'", self.name))?;
        Ok(session)
    }

    /// Standing orders first, then whatever is planned for `day`.
    pub fn actions_for(&self, day: u32) -> impl Iterator<Item = &PlayerAction> {
        self.every_day.iter().chain(
            self.plan
                .iter()
                .filter(move |planned| planned.day == day)
                .flat_map(|planned| planned.actions.iter()),
        )
    }

    /// Plays the session to its end. Rejected actions are logged and skipped.
    pub fn play<F>(&self, session: &mut Session, mut hook: F) -> Result<()>
    where
        F: FnMut(&DayReport),
    {
        while !session.is_over() {
            let day = session.zoo().day();
            for action in self.actions_for(day) {
                match action.apply(session) {
                    Ok(outcome) => info!(target: "scenario", day, "{outcome}"),
                    Err(err) => warn!(
                        target: "scenario",
                        day,
                        category = ?err.category(),
                        "action rejected: {err}"
                    ),
                }
            }
            let report = session.advance_day()?;
            hook(&report);
        }
        Ok(())
    }
}
