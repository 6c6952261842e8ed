use anyhow::Result;
use tracing::info;

use crate::{engine::System, report::DayReport, rng::RandomSource, world::Zoo};

/// A scripted occurrence with a fixed effect on the zoo's aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZooEvent {
    pub description: &'static str,
    pub popularity: i64,
    pub money: i64,
}

impl ZooEvent {
    const fn new(description: &'static str, popularity: i64, money: i64) -> Self {
        Self {
            description,
            popularity,
            money,
        }
    }

    pub fn apply(&self, zoo: &mut Zoo) {
        zoo.adjust_popularity(self.popularity);
        zoo.money += self.money;
        zoo.record_event(self.description);
    }
}

pub static POSITIVE_EVENTS: [ZooEvent; 5] = [
    ZooEvent::new("Celebrity visit: popularity +10.", 10, 0),
    ZooEvent::new("Sponsor donation: received 500 coins.", 0, 500),
    ZooEvent::new("Rare guest: popularity +5.", 5, 0),
    ZooEvent::new("Animal Protection Day: popularity +15.", 15, 0),
    ZooEvent::new("Charity fund: received 1000 coins.", 0, 1000),
];

pub static NEGATIVE_EVENTS: [ZooEvent; 5] = [
    ZooEvent::new("Animal escape: popularity -10.", -10, 0),
    ZooEvent::new("Water main leak: lost 300 coins.", 0, -300),
    ZooEvent::new("Staff conflict: popularity -5.", -5, 0),
    ZooEvent::new("Fire at the zoo: popularity -15, lost 500 coins.", -15, -500),
    ZooEvent::new("Fine from ecologists: lost 200 coins.", 0, -200),
];

/// At most one event: a `chance`% roll, a coin for the table (heads is positive),
/// then a uniform pick within it.
pub fn roll_event<R: RandomSource + ?Sized>(chance: u32, rng: &mut R) -> Option<&'static ZooEvent> {
    if !rng.percent(chance) {
        return None;
    }
    let table = if rng.coin() {
        &POSITIVE_EVENTS
    } else {
        &NEGATIVE_EVENTS
    };
    Some(&table[rng.below(table.len() as u32) as usize])
}

pub struct EventSystem;

impl EventSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for EventSystem {
    fn name(&self) -> &str {
        "events"
    }

    fn run(&mut self, report: &mut DayReport, zoo: &mut Zoo, rng: &mut dyn RandomSource) -> Result<()> {
        if let Some(event) = roll_event(zoo.rules().event_chance_percent, rng) {
            info!(target: "events", day = report.day, event = event.description, "event fired");
            event.apply(zoo);
        }
        Ok(())
    }
}
