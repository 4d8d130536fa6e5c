use thiserror::Error;

use crate::domain::item::ItemId;
use crate::domain::trip::TripStatus;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid trip transition from {from:?} to {to:?}")]
    InvalidTripTransition { from: TripStatus, to: TripStatus },
    #[error("item `{0}` is not on this trip")]
    UnknownItem(ItemId),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable machine-readable class used by operator surfaces.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain_validation",
            Self::Persistence(_) => "persistence",
            Self::NotFound(_) => "not_found",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) => 2,
            Self::Persistence(_) => 4,
            Self::NotFound(_) => 5,
            Self::Domain(_) => 6,
        }
    }
}
