use super::domain::Domain;
use super::ids::{DomainRef, SCAFFOLD_INDEX};
use crate::core::lattice::LatticeVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    index: usize,    // Unique running index, never reused while the chain lives
    identity: usize, // Species; 0 is the scaffold
    cyclic: bool,
    pub(crate) domains: Vec<Domain>,
}

impl Chain {
    /// Builds a chain of unassigned domains from per-domain identities and sequences.
    pub(crate) fn new(
        index: usize,
        identity: usize,
        domain_identities: &[i32],
        sequences: &[String],
        cyclic: bool,
    ) -> Self {
        let domains = domain_identities
            .iter()
            .zip(sequences)
            .enumerate()
            .map(|(d, (&domain_identity, seq))| {
                Domain::new(
                    DomainRef::new(index, d),
                    domain_identity,
                    identity,
                    seq.clone(),
                )
            })
            .collect();
        Self {
            index,
            identity,
            cyclic,
            domains,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn identity(&self) -> usize {
        self.identity
    }

    pub fn is_scaffold(&self) -> bool {
        self.index == SCAFFOLD_INDEX
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn domain(&self, index: usize) -> Option<&Domain> {
        self.domains.get(index)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Index of the domain following `index`, wrapping for cyclic chains.
    ///
    /// A cyclic chain needs at least three domains to wrap; shorter rings would revisit
    /// the same pair of domains from both ends.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let n = self.domains.len();
        if index + 1 < n {
            Some(index + 1)
        } else if self.cyclic && n > 2 && index + 1 == n {
            Some(0)
        } else {
            None
        }
    }

    /// Index of the domain preceding `index`, wrapping for cyclic chains.
    pub fn prev_index(&self, index: usize) -> Option<usize> {
        let n = self.domains.len();
        if index >= n {
            None
        } else if index > 0 {
            Some(index - 1)
        } else if self.cyclic && n > 2 {
            Some(n - 1)
        } else {
            None
        }
    }

    pub fn positions(&self) -> Vec<Option<LatticeVector>> {
        self.domains.iter().map(Domain::position).collect()
    }

    pub fn orientations(&self) -> Vec<Option<LatticeVector>> {
        self.domains.iter().map(Domain::orientation).collect()
    }

    pub fn has_assigned_domains(&self) -> bool {
        self.domains.iter().any(Domain::is_assigned)
    }

    pub fn to_config(&self) -> ChainConfig {
        ChainConfig {
            index: self.index,
            identity: self.identity,
            positions: self.positions(),
            orientations: self.orientations(),
        }
    }
}

/// Positions and orientations of one chain, as read from or written to a snapshot.
///
/// `None` entries are unassigned domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub index: usize,
    pub identity: usize,
    pub positions: Vec<Option<LatticeVector>>,
    pub orientations: Vec<Option<LatticeVector>>,
}

impl ChainConfig {
    pub fn unassigned(index: usize, identity: usize, num_domains: usize) -> Self {
        Self {
            index,
            identity,
            positions: vec![None; num_domains],
            orientations: vec![None; num_domains],
        }
    }
}

/// A full configuration snapshot, scaffold first.
pub type Chains = Vec<ChainConfig>;
