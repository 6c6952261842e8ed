mod aging;
mod epidemic;
mod events;
mod feeding;
mod payroll;
mod popularity;
mod revenue;
mod upkeep;

pub use aging::AgingSystem;
pub use epidemic::EpidemicSystem;
pub use events::{roll_event, EventSystem, ZooEvent, NEGATIVE_EVENTS, POSITIVE_EVENTS};
pub use feeding::FeedingSystem;
pub use payroll::{tally_assignments, PayrollSystem};
pub use popularity::{OutbreakPenaltySystem, PopularityDriftSystem};
pub use revenue::RevenueSystem;
pub use upkeep::UpkeepSystem;
