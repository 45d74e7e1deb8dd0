use super::error::OrigamiError;
use super::system::OrigamiSystem;
use super::tally::ConfigTally;
use crate::core::lattice::LatticeVector;
use crate::core::models::domain::{Occupancy, Placement, classify_binding};
use crate::core::models::ids::DomainRef;
use std::collections::BTreeSet;

/// Read access to a configuration, real or hypothetical.
///
/// Chain topology, sequences and conditions always come from the underlying system; only
/// placements and partners may differ.
pub(crate) trait ConfigView {
    fn system(&self) -> &OrigamiSystem;
    fn placement(&self, r: DomainRef) -> Option<Placement>;
    fn partner(&self, r: DomainRef) -> Option<DomainRef>;
}

/// One local contribution to the energy and counts, anchored at a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Term {
    /// The bound pair of the anchor, scored only from its lower-referenced member.
    Pair(DomainRef),
    /// The anchor and the domain after it.
    Segment(DomainRef),
    /// The domains before and after the anchor.
    Triple(DomainRef),
    /// The anchor and the three domains after it.
    Quad(DomainRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentKind {
    /// Neighbours with at least one unbound domain.
    Loose,
    Stacked,
    /// Crossover between two antiparallel helices.
    Junction,
    Invalid,
}

/// Every term that can change when the placement or partner of one of `affected` changes.
pub(crate) fn neighbourhood(system: &OrigamiSystem, affected: &[DomainRef]) -> BTreeSet<Term> {
    let mut terms = BTreeSet::new();
    for &r in affected {
        terms.insert(Term::Pair(r));
        terms.insert(Term::Segment(r));
        terms.insert(Term::Triple(r));
        terms.insert(Term::Quad(r));
        if let Some(next) = system.next_domain(r) {
            terms.insert(Term::Triple(next));
        }
        let mut before = r;
        for depth in 0..3 {
            let Some(prev) = system.prev_domain(before) else {
                break;
            };
            if depth == 0 {
                terms.insert(Term::Segment(prev));
                terms.insert(Term::Triple(prev));
            }
            terms.insert(Term::Quad(prev));
            before = prev;
        }
    }
    terms
}

/// Every term of the system, each exactly once.
pub(crate) fn all_terms(system: &OrigamiSystem) -> Vec<Term> {
    system
        .domain_refs()
        .flat_map(|r| {
            [
                Term::Pair(r),
                Term::Segment(r),
                Term::Triple(r),
                Term::Quad(r),
            ]
        })
        .collect()
}

/// Scores terms against a configuration view.
pub(crate) struct TermScorer<'a, V: ConfigView> {
    view: &'a V,
}

impl<'a, V: ConfigView> TermScorer<'a, V> {
    pub fn new(view: &'a V) -> Self {
        Self { view }
    }

    pub fn tally<I>(&self, terms: I) -> Result<ConfigTally, OrigamiError>
    where
        I: IntoIterator<Item = Term>,
    {
        let mut tally = ConfigTally::default();
        for term in terms {
            match term {
                Term::Pair(r) => self.score_pair(r, &mut tally)?,
                Term::Segment(r) => self.score_segment(r, &mut tally)?,
                Term::Triple(r) => self.score_triple(r, &mut tally),
                Term::Quad(r) => self.score_quad(r, &mut tally),
            }
        }
        Ok(tally)
    }

    fn score_pair(&self, r: DomainRef, tally: &mut ConfigTally) -> Result<(), OrigamiError> {
        let Some(p) = self.view.partner(r) else {
            return Ok(());
        };
        if p <= r {
            return Ok(());
        }
        let system = self.view.system();
        let (a, b) = (system.domain_or_err(r)?, system.domain_or_err(p)?);
        let (Some(pa), Some(pb)) = (self.view.placement(r), self.view.placement(p)) else {
            return Err(OrigamiError::Internal(format!(
                "bound pair {r}-{p} has an unplaced member"
            )));
        };

        let occupancy = classify_binding(a, b);
        tally.bound_pairs += 1;
        match occupancy {
            Occupancy::BoundFully => tally.fully_bound_pairs += 1,
            Occupancy::BoundSelf => tally.self_bound_pairs += 1,
            _ => tally.misbound_pairs += 1,
        }
        if pa.pos != pb.pos || pa.ore != -pb.ore {
            tally.violations += 1;
        }

        let config = system.config();
        let thermo = system.cache.borrow_mut().pair_thermo(
            a,
            b,
            occupancy,
            config.temp,
            config.cation_molarity,
        )?;
        tally.enthalpy += thermo.enthalpy;
        tally.entropy += thermo.entropy;
        Ok(())
    }

    fn score_segment(&self, r: DomainRef, tally: &mut ConfigTally) -> Result<(), OrigamiError> {
        let Some((kind, _)) = self.segment(r) else {
            return Ok(());
        };
        match kind {
            SegmentKind::Invalid => tally.violations += 1,
            SegmentKind::Stacked => {
                let system = self.view.system();
                let next = system
                    .next_domain(r)
                    .ok_or_else(|| OrigamiError::Internal(format!("{r} has no next domain")))?;
                let config = system.config();
                let energy = system.cache.borrow_mut().stacking_energy(
                    system.domain_or_err(r)?,
                    system.domain_or_err(next)?,
                    config.temp,
                    config.cation_molarity,
                )?;
                tally.stacked_pairs += 1;
                tally.stacking += config.stacking_mult * energy;
            }
            SegmentKind::Loose | SegmentKind::Junction => {}
        }
        Ok(())
    }

    fn score_triple(&self, r: DomainRef, tally: &mut ConfigTally) {
        let Some(prev) = self.view.system().prev_domain(r) else {
            return;
        };
        if let (Some((SegmentKind::Stacked, ndr_hi)), Some((SegmentKind::Stacked, ndr_ij))) =
            (self.segment(prev), self.segment(r))
        {
            if ndr_hi == ndr_ij {
                tally.linear_helix_trips += 1;
            } else {
                tally.violations += 1;
            }
        }
    }

    fn score_quad(&self, r: DomainRef, tally: &mut ConfigTally) {
        let system = self.view.system();
        let Some(i) = system.next_domain(r) else {
            return;
        };
        let Some(j) = system.next_domain(i) else {
            return;
        };
        if let (
            Some((SegmentKind::Stacked, ndr_hi)),
            Some((SegmentKind::Junction, _)),
            Some((SegmentKind::Stacked, ndr_jk)),
        ) = (self.segment(r), self.segment(i), self.segment(j))
        {
            if ndr_jk == -ndr_hi {
                tally.stacked_junct_quads += 1;
            } else {
                tally.violations += 1;
            }
        }
    }

    /// Classifies the segment from `r` to the domain after it, with its direction.
    ///
    /// `None` when there is no next domain or either end is unplaced.
    fn segment(&self, r: DomainRef) -> Option<(SegmentKind, LatticeVector)> {
        let next = self.view.system().next_domain(r)?;
        let (pi, pj) = (self.view.placement(r)?, self.view.placement(next)?);
        let ndr = pj.pos - pi.pos;
        if !ndr.is_unit() {
            return Some((SegmentKind::Invalid, ndr));
        }
        if self.view.partner(r).is_none() || self.view.partner(next).is_none() {
            return Some((SegmentKind::Loose, ndr));
        }
        let kind = if ndr.dot(&pi.ore) == 0 {
            if pj.ore == pi.ore.rotate_half(ndr) {
                SegmentKind::Stacked
            } else {
                SegmentKind::Invalid
            }
        } else if ndr == pi.ore && pj.ore == -pi.ore {
            SegmentKind::Junction
        } else {
            SegmentKind::Invalid
        };
        Some((kind, ndr))
    }
}
