use anyhow::Result;

use crate::{engine::System, report::DayReport, rng::RandomSource, world::Zoo};

pub struct UpkeepSystem;

impl UpkeepSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UpkeepSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for UpkeepSystem {
    fn name(&self) -> &str {
        "upkeep"
    }

    fn run(&mut self, report: &mut DayReport, zoo: &mut Zoo, _rng: &mut dyn RandomSource) -> Result<()> {
        let upkeep: i64 = zoo.enclosures.iter().map(|enclosure| enclosure.daily_cost()).sum();
        zoo.money -= upkeep;
        report.upkeep = upkeep;
        Ok(())
    }
}
