use super::ids::DomainRef;
use crate::core::lattice::LatticeVector;
use std::fmt;

/// Binding state of a domain, and of the lattice site it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupancy {
    /// No position. Never stored for a lattice site.
    Unassigned,
    Unbound,
    /// Bound to another domain of the same chain.
    BoundSelf,
    /// Bound to a domain with the complementary identity.
    BoundFully,
    Misbound,
}

impl Occupancy {
    #[inline]
    pub fn is_bound(self) -> bool {
        matches!(
            self,
            Occupancy::BoundSelf | Occupancy::BoundFully | Occupancy::Misbound
        )
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Occupancy::Unassigned => "unassigned",
                Occupancy::Unbound => "unbound",
                Occupancy::BoundSelf => "bound-self",
                Occupancy::BoundFully => "bound-fully-complementary",
                Occupancy::Misbound => "bound-misbound",
            }
        )
    }
}

/// Lattice position plus orientation vector of a placed domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub pos: LatticeVector,
    pub ore: LatticeVector,
}

impl Placement {
    pub fn new(pos: LatticeVector, ore: LatticeVector) -> Self {
        Self { pos, ore }
    }
}

/// One lattice-resolution segment of a strand.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    reference: DomainRef,
    identity: i32,
    chain_identity: usize,
    sequence: String,
    pub(crate) placement: Option<Placement>,
    pub(crate) partner: Option<DomainRef>,
    pub(crate) state: Occupancy,
}

impl Domain {
    pub(crate) fn new(
        reference: DomainRef,
        identity: i32,
        chain_identity: usize,
        sequence: String,
    ) -> Self {
        Self {
            reference,
            identity,
            chain_identity,
            sequence,
            placement: None,
            partner: None,
            state: Occupancy::Unassigned,
        }
    }

    pub fn reference(&self) -> DomainRef {
        self.reference
    }

    pub fn chain_index(&self) -> usize {
        self.reference.chain
    }

    pub fn index(&self) -> usize {
        self.reference.domain
    }

    /// Domain identity; `k` is fully complementary to `-k`.
    pub fn identity(&self) -> i32 {
        self.identity
    }

    pub fn chain_identity(&self) -> usize {
        self.chain_identity
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn position(&self) -> Option<LatticeVector> {
        self.placement.map(|p| p.pos)
    }

    pub fn orientation(&self) -> Option<LatticeVector> {
        self.placement.map(|p| p.ore)
    }

    pub fn partner(&self) -> Option<DomainRef> {
        self.partner
    }

    pub fn state(&self) -> Occupancy {
        self.state
    }

    pub fn is_assigned(&self) -> bool {
        self.placement.is_some()
    }

    /// True if `other` carries the Watson-Crick complementary identity.
    pub fn is_complementary_to(&self, other: &Domain) -> bool {
        self.identity == -other.identity
    }
}

/// Classification of the pair formed if `a` and `b` share a lattice site.
///
/// Same-chain pairs are self-bound before complementarity is considered, so a scaffold
/// crossover between complementary scaffold domains still counts as self-binding.
pub fn classify_binding(a: &Domain, b: &Domain) -> Occupancy {
    if a.chain_index() == b.chain_index() {
        Occupancy::BoundSelf
    } else if a.is_complementary_to(b) {
        Occupancy::BoundFully
    } else {
        Occupancy::Misbound
    }
}
