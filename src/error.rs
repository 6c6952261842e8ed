use thiserror::Error;

use crate::enclosure::{BreedingError, PlacementError, UpgradeError};
use crate::genetics::{MatingConflict, MatingError};
use crate::world::EnclosureId;

/// Coarse grouping used by callers to decide how to present a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed request: bad index, amount or role.
    Validation,
    /// The zoo lacks money, space or today's allowance.
    Resource,
    /// The request breaks a rule about animals or enclosures.
    Domain,
    /// The session has already ended.
    Session,
}

/// Rejection from a player operation. No state has changed when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZooError {
    #[error("enclosure {0} does not exist")]
    NoSuchEnclosure(EnclosureId),
    #[error("animal does not fit the enclosure: {0}")]
    IncompatibleEnclosure(PlacementError),
    #[error("not enough money: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },
    #[error("the daily purchase limit has been reached")]
    DailyLimitReached,
    #[error("no such animal")]
    NotFound,
    #[error("animal '{0}' is not infected")]
    NotInfected(String),
    #[error("at least two animals are needed to breed")]
    TooFewAnimals,
    #[error("no eligible breeding pair in the enclosure")]
    NoEligiblePair,
    #[error("enclosure is full")]
    EnclosureFull,
    #[error("incompatible mating: {0}")]
    IncompatibleMating(MatingConflict),
    #[error("enclosure is already at the maximum level")]
    MaxLevelReached,
    #[error("unknown role '{0}'")]
    UnknownRole(String),
    #[error("the director cannot be fired")]
    ProtectedRole,
    #[error("index {0} is out of range")]
    InvalidIndex(usize),
    #[error("amount {0} is not valid")]
    InvalidAmount(i64),
    #[error("the session is over")]
    SessionOver,
}

impl ZooError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ZooError::NoSuchEnclosure(_)
            | ZooError::NotFound
            | ZooError::NotInfected(_)
            | ZooError::UnknownRole(_)
            | ZooError::InvalidIndex(_)
            | ZooError::InvalidAmount(_) => ErrorCategory::Validation,
            ZooError::InsufficientFunds { .. }
            | ZooError::DailyLimitReached
            | ZooError::EnclosureFull
            | ZooError::TooFewAnimals
            | ZooError::MaxLevelReached => ErrorCategory::Resource,
            ZooError::IncompatibleEnclosure(_)
            | ZooError::NoEligiblePair
            | ZooError::IncompatibleMating(_)
            | ZooError::ProtectedRole => ErrorCategory::Domain,
            ZooError::SessionOver => ErrorCategory::Session,
        }
    }

    pub(crate) fn funds(needed: i64, available: i64) -> Result<(), ZooError> {
        if available < needed {
            Err(ZooError::InsufficientFunds { needed, available })
        } else {
            Ok(())
        }
    }
}

impl From<PlacementError> for ZooError {
    fn from(value: PlacementError) -> Self {
        match value {
            PlacementError::Full { .. } => ZooError::EnclosureFull,
            other => ZooError::IncompatibleEnclosure(other),
        }
    }
}

impl From<UpgradeError> for ZooError {
    fn from(value: UpgradeError) -> Self {
        match value {
            UpgradeError::MaxLevel => ZooError::MaxLevelReached,
            UpgradeError::CapacityOverflow { capacity } => ZooError::InvalidAmount(capacity.into()),
        }
    }
}

impl From<MatingError> for ZooError {
    fn from(value: MatingError) -> Self {
        match value {
            MatingError::IncompatibleMating { reason } => ZooError::IncompatibleMating(reason),
        }
    }
}

impl From<BreedingError> for ZooError {
    fn from(value: BreedingError) -> Self {
        match value {
            BreedingError::TooFewAnimals => ZooError::TooFewAnimals,
            BreedingError::NoEligiblePair => ZooError::NoEligiblePair,
            BreedingError::EnclosureFull => ZooError::EnclosureFull,
            BreedingError::Mating(err) => err.into(),
        }
    }
}
