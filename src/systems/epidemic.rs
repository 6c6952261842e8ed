use anyhow::Result;
use tracing::debug;

use crate::{
    engine::System,
    epidemic,
    report::{DayReport, DeathCause, DeathNotice},
    rng::RandomSource,
    world::Zoo,
};

/// Seeding then spread, one enclosure at a time.
pub struct EpidemicSystem;

impl EpidemicSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EpidemicSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for EpidemicSystem {
    fn name(&self) -> &str {
        "epidemic"
    }

    fn run(&mut self, report: &mut DayReport, zoo: &mut Zoo, rng: &mut dyn RandomSource) -> Result<()> {
        for enclosure in &mut zoo.enclosures {
            let outcome = epidemic::run_day(&mut enclosure.animals, rng);
            for name in outcome.seeded.into_iter().chain(outcome.newly_infected) {
                debug!(target: "epidemic", %name, "infected");
                report.infections.push(name);
            }
            for dead in &outcome.deaths {
                debug!(target: "epidemic", name = %dead.name, "died of disease");
                report.deaths.push(DeathNotice::new(dead, DeathCause::Epidemic));
            }
        }
        Ok(())
    }
}
