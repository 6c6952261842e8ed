use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    report::DayReport,
    rng::{RandomSource, RngManager, SystemRng},
    snapshot::SnapshotWriter,
    systems::{
        AgingSystem, EpidemicSystem, EventSystem, FeedingSystem, OutbreakPenaltySystem,
        PayrollSystem, PopularityDriftSystem, RevenueSystem, UpkeepSystem,
    },
    world::Zoo,
};

pub struct EngineSettings {
    /// Entropy-seeded when absent.
    pub seed: Option<u64>,
    pub snapshot_interval_days: u32,
    pub snapshot_dir: PathBuf,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            seed: None,
            snapshot_interval_days: 0,
            snapshot_dir: PathBuf::from("snapshots"),
        }
    }
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    /// The day cycle in its fixed order.
    pub fn standard(settings: EngineSettings) -> Self {
        Self::new(settings)
            .with_system(EventSystem::new())
            .with_system(AgingSystem::new())
            .with_system(EpidemicSystem::new())
            .with_system(OutbreakPenaltySystem::new())
            .with_system(RevenueSystem::new())
            .with_system(PayrollSystem::new())
            .with_system(UpkeepSystem::new())
            .with_system(FeedingSystem::new())
            .with_system(PopularityDriftSystem::new())
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        let rng = match self.settings.seed {
            Some(seed) => RngManager::new(seed),
            None => RngManager::from_entropy(),
        };
        Engine {
            rng,
            systems: self.systems,
            snapshot_writer: SnapshotWriter::new(
                &self.settings.snapshot_dir,
                self.settings.snapshot_interval_days,
            ),
        }
    }
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    snapshot_writer: SnapshotWriter,
}

impl Engine {
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Random stream for player operations that draw (breeding, market refresh).
    pub fn rng_stream(&mut self, name: &str) -> SystemRng<'_> {
        self.rng.stream(name)
    }

    /// Resolves one day with each system drawing from its own named stream.
    pub fn advance_day(&mut self, zoo: &mut Zoo) -> Result<DayReport> {
        let mut report = open_day(zoo);
        for system in &mut self.systems {
            let mut stream = self.rng.stream(system.name());
            system.run(&mut report, zoo, &mut stream)?;
        }
        close_day(zoo, &mut report);
        self.write_snapshot(zoo, &report);
        Ok(report)
    }

    /// Resolves one day with every system drawing from `rng` in turn.
    pub fn advance_day_with(
        &mut self,
        zoo: &mut Zoo,
        rng: &mut dyn RandomSource,
    ) -> Result<DayReport> {
        let mut report = open_day(zoo);
        for system in &mut self.systems {
            system.run(&mut report, zoo, &mut *rng)?;
        }
        close_day(zoo, &mut report);
        self.write_snapshot(zoo, &report);
        Ok(report)
    }

    /// Snapshots are for inspection only, so a failed write never fails the day.
    fn write_snapshot(&self, zoo: &Zoo, report: &DayReport) {
        if let Err(err) = self.snapshot_writer.maybe_write(zoo, report) {
            warn!(target: "engine", day = report.day, error = %format!("{err:#}"), "snapshot not written");
        }
    }

    /// Advances up to `days` days, stopping after the first bankrupt one.
    pub fn run(&mut self, zoo: &mut Zoo, days: u32) -> Result<Vec<DayReport>> {
        let mut reports = Vec::new();
        self.run_with_hook(zoo, days, |report| reports.push(report.clone()))?;
        Ok(reports)
    }

    pub fn run_with_hook<F>(&mut self, zoo: &mut Zoo, days: u32, mut hook: F) -> Result<()>
    where
        F: FnMut(&DayReport),
    {
        for _ in 0..days {
            let report = self.advance_day(zoo)?;
            hook(&report);
            if report.bankrupt {
                break;
            }
        }
        Ok(())
    }
}

fn open_day(zoo: &mut Zoo) -> DayReport {
    zoo.begin_day();
    let mut report = DayReport::new(zoo.day());
    report.money_before = zoo.money();
    report
}

fn close_day(zoo: &mut Zoo, report: &mut DayReport) {
    report.events = zoo.daily_events().to_vec();
    report.money_after = zoo.money();
    report.popularity = zoo.popularity();
    report.bankrupt = zoo.money() < 0;
    info!(
        target: "engine",
        day = report.day,
        money = report.money_after,
        income = report.income,
        popularity = report.popularity,
        animals = zoo.total_animals(),
        deaths = report.deaths.len(),
        "day resolved"
    );
    if report.bankrupt {
        warn!(target: "engine", day = report.day, money = report.money_after, "zoo is bankrupt");
    }
    zoo.advance_calendar();
}

/// One step of the day cycle. Systems run in registration order and record
/// what they did on the shared report.
pub trait System {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        report: &mut DayReport,
        zoo: &mut Zoo,
        rng: &mut dyn RandomSource,
    ) -> Result<()>;
}
