use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    pub struct ChainKey;
}

/// Unique chain index of the scaffold.
pub const SCAFFOLD_INDEX: usize = 0;
/// Chain identity of the scaffold.
pub const SCAFFOLD_IDENTITY: usize = 0;

/// Back-reference to a domain: the owning chain's unique index plus the domain's position
/// within that chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DomainRef {
    pub chain: usize,
    pub domain: usize,
}

impl DomainRef {
    pub fn new(chain: usize, domain: usize) -> Self {
        Self { chain, domain }
    }
}

impl fmt::Display for DomainRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.domain)
    }
}
