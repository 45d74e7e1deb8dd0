//! # Thermodynamics Module
//!
//! Nearest-neighbour model of DNA duplex stability used to score domain bindings.
//!
//! - [`tables`] - Frozen dinucleotide-step enthalpy, entropy and stacking tables
//! - [`sequence`] - Complements, palindromes and longest complementary subsequences
//! - [`nearest_neighbour`] - Hybridization and stacking energies in reduced units
//! - [`units`] - Conversions between molarities, chemical potentials and lattice volumes
//!
//! All energies leaving this module are in reduced units (energy over the Boltzmann
//! constant, i.e. kelvin); entropies are dimensionless.

pub mod nearest_neighbour;
pub mod sequence;
pub mod tables;
pub mod units;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThermoError {
    #[error("Sequence is empty")]
    EmptySequence,
    #[error("Invalid base '{base}' in sequence '{sequence}'")]
    InvalidBase { sequence: String, base: char },
    #[error("No nearest-neighbour parameters for step '{0}'")]
    UnknownStep(String),
}
