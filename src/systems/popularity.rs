use anyhow::Result;
use tracing::debug;

use crate::{engine::System, report::DayReport, rng::RandomSource, world::Zoo};

/// Every infected animal costs one point of popularity.
pub struct OutbreakPenaltySystem;

impl OutbreakPenaltySystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OutbreakPenaltySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for OutbreakPenaltySystem {
    fn name(&self) -> &str {
        "outbreak_penalty"
    }

    fn run(&mut self, report: &mut DayReport, zoo: &mut Zoo, _rng: &mut dyn RandomSource) -> Result<()> {
        let infected = zoo.total_infected() as i64;
        report.infected_total = infected as usize;
        zoo.adjust_popularity(-infected);
        Ok(())
    }
}

/// Random walk of up to a tenth of current popularity in either direction.
pub struct PopularityDriftSystem;

impl PopularityDriftSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PopularityDriftSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PopularityDriftSystem {
    fn name(&self) -> &str {
        "popularity_drift"
    }

    fn run(&mut self, report: &mut DayReport, zoo: &mut Zoo, rng: &mut dyn RandomSource) -> Result<()> {
        let fluctuation = zoo.popularity() / 10;
        let change = rng.between(-fluctuation, fluctuation);
        zoo.adjust_popularity(change);
        report.popularity_change = change;
        debug!(target: "popularity", change, popularity = zoo.popularity(), "drift");
        Ok(())
    }
}
