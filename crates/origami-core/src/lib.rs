//! # Lattice Origami Core Library
//!
//! The state engine of a cubic-lattice, domain-resolution Monte Carlo model of DNA origami
//! self-assembly: one scaffold strand and many staple strands that bind it through sequence
//! complementarity.
//!
//! ## Architectural Philosophy
//!
//! The library follows a two-layer architecture that keeps pure data and pure physics apart
//! from mutable simulation state.
//!
//! - **[`core`]: The Foundation.** Stateless lattice geometry (`LatticeVector`), the
//!   nearest-neighbour thermodynamics tables and functions, domain and chain models, and
//!   input-file loading.
//!
//! - **[`engine`]: The Logic Core.** The configuration state machine (`OrigamiSystem`) that
//!   tracks occupancy, bound pairs and energy under incremental, possibly rejected moves,
//!   together with its configuration and error types.
//!
//! A Monte Carlo driver evaluates a proposed move with
//! [`engine::system::OrigamiSystem::check_domain_constraints`], applies its own acceptance
//! test to the returned [`engine::moves::DeltaConfig`], and either commits it or simply drops it.

pub mod core;
pub mod engine;
