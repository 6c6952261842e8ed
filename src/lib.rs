pub mod components;
pub mod config;
pub mod enclosure;
pub mod engine;
pub mod epidemic;
pub mod error;
pub mod genetics;
pub mod market;
pub mod report;
pub mod rng;
pub mod scenario;
pub mod session;
pub mod snapshot;
pub mod systems;
pub mod valuation;
pub mod world;

pub use config::Rules;
pub use engine::{Engine, EngineBuilder, EngineSettings};
pub use error::{ErrorCategory, ZooError};
pub use report::DayReport;
pub use session::{Session, SessionStatus};
pub use world::{EnclosureId, Zoo};
