use super::error::OrigamiError;
use super::system::OrigamiSystem;
use super::tally::ConfigTally;
use super::terms::{ConfigView, TermScorer, neighbourhood};
use crate::core::lattice::LatticeVector;
use crate::core::models::domain::{Domain, Occupancy, Placement, classify_binding};
use crate::core::models::ids::DomainRef;
use tracing::{trace, warn};

/// The evaluated outcome of moving one domain, not yet applied.
///
/// Produced by [`OrigamiSystem::check_domain_constraints`]. Dropping it is the rollback;
/// [`OrigamiSystem::commit_move`] applies it as long as the system has not changed since.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaConfig {
    domain: DomainRef,
    placement: Option<Placement>,
    partner: Option<DomainRef>,
    occupancy: Occupancy,
    tally: ConfigTally,
    delta_energy: f64,
    violated: bool,
    blocked: bool,
    generation: u64,
}

impl DeltaConfig {
    fn blocked(domain: DomainRef, placement: Placement, generation: u64) -> Self {
        Self {
            domain,
            placement: Some(placement),
            partner: None,
            occupancy: Occupancy::Unassigned,
            tally: ConfigTally::default(),
            delta_energy: 0.0,
            violated: true,
            blocked: true,
            generation,
        }
    }

    pub fn domain(&self) -> DomainRef {
        self.domain
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn partner(&self) -> Option<DomainRef> {
        self.partner
    }

    /// Occupancy the moved domain would end up in.
    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    /// Change in energy components and counts.
    pub fn tally(&self) -> &ConfigTally {
        &self.tally
    }

    pub fn delta_energy(&self) -> f64 {
        self.delta_energy
    }

    pub fn is_legal(&self) -> bool {
        !self.violated
    }

    /// True when the target site is held by a pair the domain does not belong to.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiteResolution {
    Free,
    Partner(DomainRef),
    Blocked,
}

/// The system as it would be after one domain moves.
struct Hypothetical<'a> {
    base: &'a OrigamiSystem,
    moved: DomainRef,
    placement: Option<Placement>,
    old_partner: Option<DomainRef>,
    new_partner: Option<DomainRef>,
}

impl ConfigView for Hypothetical<'_> {
    fn system(&self) -> &OrigamiSystem {
        self.base
    }

    fn placement(&self, r: DomainRef) -> Option<Placement> {
        if r == self.moved {
            self.placement
        } else {
            self.base.placement(r)
        }
    }

    fn partner(&self, r: DomainRef) -> Option<DomainRef> {
        if r == self.moved {
            self.new_partner
        } else if Some(r) == self.new_partner {
            Some(self.moved)
        } else if Some(r) == self.old_partner {
            None
        } else {
            self.base.partner(r)
        }
    }
}

impl OrigamiSystem {
    /// Evaluates placing a domain at `pos` with orientation `ore` without changing the system.
    ///
    /// An occupied target site binds the domain to its unbound occupant, or keeps its
    /// current partner if the domain already sits there. A site held by any other pair is
    /// blocked. Constraint violations are reported through [`DeltaConfig::is_legal`];
    /// only contract violations are errors.
    pub fn check_domain_constraints(
        &self,
        r: DomainRef,
        pos: LatticeVector,
        ore: LatticeVector,
    ) -> Result<DeltaConfig, OrigamiError> {
        let domain = self.domain_or_err(r)?;
        if !ore.is_unit() {
            return Err(OrigamiError::InvalidOrientation(ore));
        }
        let placement = Placement::new(pos, ore);
        let partner = match self.resolve_site(domain, pos) {
            SiteResolution::Free => None,
            SiteResolution::Partner(p) => Some(p),
            SiteResolution::Blocked => {
                trace!(domain = %r, %pos, "Target site is blocked.");
                return Ok(DeltaConfig::blocked(r, placement, self.generation));
            }
        };
        self.evaluate(r, Some(placement), partner)
    }

    /// Applies an evaluated legal move.
    pub fn commit_move(&mut self, delta: &DeltaConfig) -> Result<f64, OrigamiError> {
        if delta.generation != self.generation {
            return Err(OrigamiError::StaleMove {
                evaluated: delta.generation,
                current: self.generation,
            });
        }
        if let (true, Some(placement)) = (delta.blocked, delta.placement) {
            return Err(OrigamiError::PositionFull(placement.pos));
        }
        if delta.violated {
            return Err(OrigamiError::ConstraintViolation {
                domain: delta.domain,
            });
        }
        self.apply(delta)?;
        Ok(delta.delta_energy)
    }

    /// Checks a domain move and commits it only if it is legal.
    ///
    /// Returns the energy change on commit and `None` on a violation, in which case the
    /// system is untouched apart from the violation flag.
    pub fn set_checked_domain_config(
        &mut self,
        r: DomainRef,
        pos: LatticeVector,
        ore: LatticeVector,
    ) -> Result<Option<f64>, OrigamiError> {
        let delta = self.check_domain_constraints(r, pos, ore)?;
        if !delta.is_legal() {
            self.constraints_violated = true;
            return Ok(None);
        }
        self.constraints_violated = false;
        self.apply(&delta)?;
        Ok(Some(delta.delta_energy))
    }

    /// Commits a domain move even if it breaks constraints.
    ///
    /// Only a blocked site is refused, since it would put three domains on one site.
    pub fn set_domain_config(
        &mut self,
        r: DomainRef,
        pos: LatticeVector,
        ore: LatticeVector,
    ) -> Result<f64, OrigamiError> {
        let delta = self.check_domain_constraints(r, pos, ore)?;
        if delta.blocked {
            return Err(OrigamiError::PositionFull(pos));
        }
        self.constraints_violated = delta.violated;
        if delta.violated {
            warn!(domain = %r, %pos, %ore, "Committed a configuration that violates constraints.");
        }
        self.apply(&delta)?;
        Ok(delta.delta_energy)
    }

    /// Removes a domain from the lattice, freeing its partner.
    pub fn unassign_domain(&mut self, r: DomainRef) -> Result<f64, OrigamiError> {
        if !self.domain_or_err(r)?.is_assigned() {
            return Err(OrigamiError::DomainUnassigned(r));
        }
        let delta = self.evaluate(r, None, None)?;
        self.apply(&delta)?;
        Ok(delta.delta_energy)
    }

    /// Reorients a placed domain in place, committing unconditionally.
    pub fn set_domain_orientation(
        &mut self,
        r: DomainRef,
        ore: LatticeVector,
    ) -> Result<f64, OrigamiError> {
        let pos = self
            .domain_or_err(r)?
            .position()
            .ok_or(OrigamiError::DomainUnassigned(r))?;
        self.set_domain_config(r, pos, ore)
    }

    fn resolve_site(&self, domain: &Domain, pos: LatticeVector) -> SiteResolution {
        match self.position_occupancies.get(&pos) {
            None => SiteResolution::Free,
            Some(Occupancy::Unbound) => match self.pos_to_unbound.get(&pos) {
                Some(&occupant) if occupant != domain.reference() => {
                    SiteResolution::Partner(occupant)
                }
                _ => SiteResolution::Free,
            },
            Some(_) => match (domain.position() == Some(pos), domain.partner()) {
                (true, Some(partner)) => SiteResolution::Partner(partner),
                _ => SiteResolution::Blocked,
            },
        }
    }

    /// Tallies the neighbourhood of every domain whose placement or partner changes, before
    /// and after the move.
    fn evaluate(
        &self,
        moved: DomainRef,
        placement: Option<Placement>,
        new_partner: Option<DomainRef>,
    ) -> Result<DeltaConfig, OrigamiError> {
        let domain = self.domain_or_err(moved)?;
        let old_partner = domain.partner();
        let occupancy = match (placement, new_partner) {
            (None, _) => Occupancy::Unassigned,
            (Some(_), None) => Occupancy::Unbound,
            (Some(_), Some(p)) => classify_binding(domain, self.domain_or_err(p)?),
        };

        let mut affected = vec![moved];
        for r in [old_partner, new_partner].into_iter().flatten() {
            if !affected.contains(&r) {
                affected.push(r);
            }
        }
        let terms = neighbourhood(self, &affected);

        let before = TermScorer::new(self).tally(terms.iter().copied())?;
        let hypothetical = Hypothetical {
            base: self,
            moved,
            placement,
            old_partner,
            new_partner,
        };
        let after = TermScorer::new(&hypothetical).tally(terms.iter().copied())?;

        let tally = after - before;
        let delta_energy = tally.energy(self.config.temp);
        let violated = after.violations > 0;
        trace!(
            domain = %moved,
            occupancy = %occupancy,
            delta_energy,
            violated,
            "Evaluated domain move."
        );
        Ok(DeltaConfig {
            domain: moved,
            placement,
            partner: new_partner,
            occupancy,
            tally,
            delta_energy,
            violated,
            blocked: false,
            generation: self.generation,
        })
    }

    /// Writes a move into the domains, the occupancy maps and the totals.
    pub(crate) fn apply(&mut self, delta: &DeltaConfig) -> Result<(), OrigamiError> {
        let r = delta.domain;
        let (old_placement, old_partner) = {
            let domain = self.domain_or_err(r)?;
            (domain.placement(), domain.partner())
        };

        if let Some(old) = old_placement {
            match old_partner {
                Some(p) => {
                    let partner = self.domain_mut(p)?;
                    partner.partner = None;
                    partner.state = Occupancy::Unbound;
                    self.pos_to_unbound.insert(old.pos, p);
                    self.position_occupancies
                        .insert(old.pos, Occupancy::Unbound);
                }
                None => {
                    self.pos_to_unbound.remove(&old.pos);
                    self.position_occupancies.remove(&old.pos);
                }
            }
        }

        if let Some(new) = delta.placement {
            match delta.partner {
                Some(q) => {
                    let partner = self.domain_mut(q)?;
                    partner.partner = Some(r);
                    partner.state = delta.occupancy;
                    self.pos_to_unbound.remove(&new.pos);
                    self.position_occupancies.insert(new.pos, delta.occupancy);
                }
                None => {
                    self.pos_to_unbound.insert(new.pos, r);
                    self.position_occupancies
                        .insert(new.pos, Occupancy::Unbound);
                }
            }
        }

        let domain = self.domain_mut(r)?;
        domain.placement = delta.placement;
        domain.partner = delta.partner;
        domain.state = delta.occupancy;

        match (old_placement.is_some(), delta.placement.is_some()) {
            (true, false) => self.num_unassigned += 1,
            (false, true) => self.num_unassigned -= 1,
            _ => {}
        }
        self.totals += delta.tally;
        self.generation += 1;
        Ok(())
    }
}
