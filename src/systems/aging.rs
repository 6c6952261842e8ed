use anyhow::Result;
use tracing::debug;

use crate::{
    engine::System,
    report::{DayReport, DeathCause, DeathNotice},
    rng::RandomSource,
    world::Zoo,
};

/// Every animal gets a day older; past the old-age threshold each day is a
/// `(age - threshold)`% death roll.
pub struct AgingSystem;

impl AgingSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AgingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for AgingSystem {
    fn name(&self) -> &str {
        "aging"
    }

    fn run(&mut self, report: &mut DayReport, zoo: &mut Zoo, rng: &mut dyn RandomSource) -> Result<()> {
        let threshold = zoo.rules().old_age_days;
        for enclosure in &mut zoo.enclosures {
            let mut index = 0;
            while index < enclosure.animals.len() {
                let animal = &mut enclosure.animals[index];
                animal.grow_older();
                if animal.age_days > threshold && rng.percent(animal.age_days - threshold) {
                    let dead = enclosure.animals.remove(index);
                    debug!(target: "aging", name = %dead.name, age = dead.age_days, "died of old age");
                    report.deaths.push(DeathNotice::new(&dead, DeathCause::OldAge));
                } else {
                    index += 1;
                }
            }
        }
        Ok(())
    }
}
