//! # Engine Module
//!
//! The configuration state machine and everything it needs to stay self-consistent.
//!
//! ## Components
//!
//! - [`system`] - `OrigamiSystem`: chains, occupancy maps, running totals, chain lifecycle
//!   and ensemble control
//! - [`moves`] - Domain moves: non-mutating evaluation into a `DeltaConfig`, then commit
//! - [`snapshot`] - Whole-configuration extraction and replacement
//! - [`consistency`] - Full recomputation compared against incremental bookkeeping
//! - [`tally`] - Energy components and structural counts
//! - [`cache`] - Memoised nearest-neighbour results per identity pair
//! - [`config`] - Thermodynamic conditions and their builder
//! - [`error`] - `OrigamiError`
//!
//! ## Move protocol
//!
//! Every domain move is scored locally: the pair, segment, triple and quad terms around
//! each domain whose placement or partner changes are tallied in the current and in the
//! hypothetical configuration, and the difference is the move's delta. Evaluation never
//! mutates; rejecting a move is simply not committing it.

pub mod cache;
pub mod config;
pub mod consistency;
pub mod error;
pub mod moves;
pub mod snapshot;
pub mod system;
pub mod tally;
mod terms;

#[cfg(test)]
mod fixtures;
