//! # Core Module
//!
//! Stateless building blocks of the lattice model.
//!
//! - [`lattice`] - Integer 3-vectors for lattice positions and orientations
//! - [`thermo`] - Nearest-neighbour hybridization and stacking thermodynamics
//! - [`models`] - Domains, chains, occupancy states and configuration snapshots
//! - [`io`] - Loading of origami system descriptions from TOML files

pub mod io;
pub mod lattice;
pub mod models;
pub mod thermo;
