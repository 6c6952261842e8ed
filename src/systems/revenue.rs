use anyhow::Result;

use crate::{engine::System, report::DayReport, rng::RandomSource, world::Zoo};

/// Visitors are twice the popularity and each pays once per animal on show.
pub struct RevenueSystem;

impl RevenueSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RevenueSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RevenueSystem {
    fn name(&self) -> &str {
        "revenue"
    }

    fn run(&mut self, report: &mut DayReport, zoo: &mut Zoo, _rng: &mut dyn RandomSource) -> Result<()> {
        let visitors = zoo.visitors();
        let income = visitors * zoo.total_animals() as i64;
        zoo.money += income;
        report.visitors = visitors;
        report.income = income;
        Ok(())
    }
}
