use anyhow::Result;
use tracing::{debug, info};

use crate::{
    engine::System,
    report::{DayReport, DeathCause, DeathNotice},
    rng::RandomSource,
    world::Zoo,
};

/// Each animal eats one kg. A shortfall puts that many animals at a coin-flip
/// risk of starving, scanned in enclosure order; the stock is emptied either way.
pub struct FeedingSystem;

impl FeedingSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FeedingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for FeedingSystem {
    fn name(&self) -> &str {
        "feeding"
    }

    fn run(&mut self, report: &mut DayReport, zoo: &mut Zoo, rng: &mut dyn RandomSource) -> Result<()> {
        let required = zoo.total_animals() as i64;
        if zoo.food >= required {
            let cost = required * zoo.rules.food_price_per_kg;
            zoo.food -= required;
            zoo.money -= cost;
            report.food_eaten = required;
            report.feeding_cost = cost;
            return Ok(());
        }

        let mut deficit = required - zoo.food;
        info!(target: "feeding", deficit, "not enough food");
        report.food_eaten = zoo.food;
        for enclosure in &mut zoo.enclosures {
            let mut index = 0;
            while index < enclosure.animals.len() && deficit > 0 {
                if rng.coin() {
                    let dead = enclosure.animals.remove(index);
                    debug!(target: "feeding", name = %dead.name, "starved");
                    report.deaths.push(DeathNotice::new(&dead, DeathCause::Starvation));
                    deficit -= 1;
                } else {
                    index += 1;
                }
            }
        }
        zoo.food = 0;
        Ok(())
    }
}
