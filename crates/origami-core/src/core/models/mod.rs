//! # Core Models Module
//!
//! Data structures describing the strands of an origami system.
//!
//! - [`ids`] - Chain keys and `(chain, domain)` references
//! - [`domain`] - Domains, their lattice placement and occupancy classification
//! - [`chain`] - Ordered domain lists and the `ChainConfig` snapshot used for bulk I/O
//!
//! Domains are owned by their chain. Everything else refers to a domain through a
//! [`ids::DomainRef`], never through a pointer.

pub mod chain;
pub mod domain;
pub mod ids;
