//! A zoo plus the engine that drives it, with the session's end conditions.

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    components::{Animal, Climate, Employee},
    config::Rules,
    engine::{Engine, EngineBuilder, EngineSettings},
    error::ZooError,
    report::DayReport,
    rng::RandomSource,
    world::{EnclosureId, Zoo},
};

pub const DEFAULT_SESSION_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum SessionStatus {
    Active,
    /// Money was negative when this day closed.
    Bankrupt { day: u32 },
    Completed,
}

pub struct Session {
    zoo: Zoo,
    engine: Engine,
    status: SessionStatus,
    length_days: u32,
}

impl Session {
    pub fn new(zoo: Zoo, engine: Engine, length_days: u32) -> Self {
        Self {
            zoo,
            engine,
            status: SessionStatus::Active,
            length_days,
        }
    }

    /// Builds the standard day cycle and a fresh zoo seeded from its market stream.
    pub fn start(
        name: &str,
        initial_money: i64,
        director_name: &str,
        rules: Rules,
        settings: EngineSettings,
        length_days: u32,
    ) -> Result<Self, ZooError> {
        let mut engine = EngineBuilder::standard(settings).build();
        let zoo = Zoo::new(
            name,
            initial_money,
            director_name,
            rules,
            &mut engine.rng_stream("market"),
        )?;
        info!(target: "session", zoo = name, seed = engine.seed(), length_days, "session started");
        Ok(Self::new(zoo, engine, length_days))
    }

    pub fn zoo(&self) -> &Zoo {
        &self.zoo
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != SessionStatus::Active
    }

    pub fn length_days(&self) -> u32 {
        self.length_days
    }

    fn ensure_active(&self) -> Result<(), ZooError> {
        if self.is_over() {
            Err(ZooError::SessionOver)
        } else {
            Ok(())
        }
    }

    pub fn buy_animal(
        &mut self,
        market_index: usize,
        name: &str,
        enclosure: EnclosureId,
    ) -> Result<Animal, ZooError> {
        self.ensure_active()?;
        self.zoo.buy_animal(market_index, name, enclosure)
    }

    pub fn sell_animal(&mut self, enclosure: EnclosureId, animal_index: usize) -> Result<i64, ZooError> {
        self.ensure_active()?;
        self.zoo.sell_animal(enclosure, animal_index)
    }

    pub fn cure_animal(&mut self, name: &str) -> Result<(), ZooError> {
        self.ensure_active()?;
        self.zoo.cure_animal(name)
    }

    pub fn breed_in_enclosure(
        &mut self,
        enclosure: EnclosureId,
        first: usize,
        second: usize,
        offspring_names: &[String],
    ) -> Result<Vec<Animal>, ZooError> {
        self.ensure_active()?;
        let mut rng = self.engine.rng_stream("breeding");
        self.zoo
            .breed_in_enclosure(enclosure, first, second, offspring_names, &mut rng)
    }

    pub fn rename_animal(
        &mut self,
        enclosure: EnclosureId,
        animal_index: usize,
        new_name: &str,
    ) -> Result<(), ZooError> {
        self.ensure_active()?;
        self.zoo.rename_animal(enclosure, animal_index, new_name)
    }

    pub fn build_enclosure(&mut self, climate: Climate, capacity: u32) -> Result<EnclosureId, ZooError> {
        self.ensure_active()?;
        self.zoo.build_enclosure(climate, capacity)
    }

    pub fn upgrade_enclosure(&mut self, enclosure: EnclosureId) -> Result<u8, ZooError> {
        self.ensure_active()?;
        self.zoo.upgrade_enclosure(enclosure)
    }

    pub fn hire_employee(&mut self, name: &str, role: &str) -> Result<Employee, ZooError> {
        self.ensure_active()?;
        self.zoo.hire_employee(name, role)
    }

    pub fn fire_employee(&mut self, index: usize) -> Result<Employee, ZooError> {
        self.ensure_active()?;
        self.zoo.fire_employee(index)
    }

    pub fn buy_food(&mut self, kg: i64) -> Result<(), ZooError> {
        self.ensure_active()?;
        self.zoo.buy_food(kg)
    }

    pub fn run_advertising(&mut self, spend: i64) -> Result<i64, ZooError> {
        self.ensure_active()?;
        self.zoo.run_advertising(spend)
    }

    pub fn refresh_market(&mut self) -> Result<(), ZooError> {
        self.ensure_active()?;
        let mut rng = self.engine.rng_stream("market");
        self.zoo.refresh_market(&mut rng)
    }

    pub fn advance_day(&mut self) -> Result<DayReport> {
        self.ensure_active()?;
        let report = self.engine.advance_day(&mut self.zoo)?;
        self.settle(&report);
        Ok(report)
    }

    /// Same as [`Session::advance_day`] with every draw taken from `rng`.
    pub fn advance_day_with(&mut self, rng: &mut dyn RandomSource) -> Result<DayReport> {
        self.ensure_active()?;
        let report = self.engine.advance_day_with(&mut self.zoo, rng)?;
        self.settle(&report);
        Ok(report)
    }

    fn settle(&mut self, report: &DayReport) {
        if report.bankrupt {
            self.status = SessionStatus::Bankrupt { day: report.day };
            warn!(target: "session", day = report.day, money = report.money_after, "session lost");
        } else if self.zoo.day() > self.length_days {
            self.status = SessionStatus::Completed;
            info!(target: "session", money = self.zoo.money(), "session completed");
        }
    }
}
