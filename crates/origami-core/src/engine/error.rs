use thiserror::Error;

use super::config::ConfigError;
use crate::core::lattice::LatticeVector;
use crate::core::models::ids::DomainRef;
use crate::core::thermo::ThermoError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrigamiError {
    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("Chain {0} not found in system")]
    ChainNotFound(usize),

    #[error("Domain {0} not found in system")]
    DomainNotFound(DomainRef),

    #[error("Unknown chain identity {0}")]
    UnknownIdentity(usize),

    #[error("Chain index {0} is already in use")]
    ChainIndexInUse(usize),

    #[error("The scaffold chain cannot be added or removed")]
    ScaffoldImmutable,

    #[error("Domain {0} is not assigned")]
    DomainUnassigned(DomainRef),

    #[error("Chain {0} still has assigned domains")]
    ChainAssigned(usize),

    #[error("Orientation {0} is not a lattice unit vector")]
    InvalidOrientation(LatticeVector),

    #[error("Lattice site {0} is already fully occupied")]
    PositionFull(LatticeVector),

    #[error("Configuration violates constraints at domain {domain}")]
    ConstraintViolation { domain: DomainRef },

    #[error("Move was evaluated against generation {evaluated}, system is at {current}")]
    StaleMove { evaluated: u64, current: u64 },

    #[error("No provisional staple reduction to undo")]
    NoPendingReduction,

    #[error("No staples left to remove")]
    NoStaples,

    #[error("Invalid configuration snapshot: {0}")]
    Snapshot(String),

    #[error(
        "Incremental {quantity} ({incremental}) disagrees with recomputed value ({recomputed})"
    )]
    Inconsistent {
        quantity: &'static str,
        incremental: String,
        recomputed: String,
    },

    #[error("Invalid system parameter: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Thermodynamics failed: {source}")]
    Thermo {
        #[from]
        source: ThermoError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
