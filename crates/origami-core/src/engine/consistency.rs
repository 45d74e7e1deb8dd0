use super::error::OrigamiError;
use super::system::OrigamiSystem;
use crate::core::lattice::LatticeVector;
use crate::core::models::domain::{Domain, Occupancy, classify_binding};
use crate::core::models::ids::DomainRef;
use std::collections::HashMap;
use std::fmt::Debug;
use tracing::error;

const ENERGY_TOLERANCE: f64 = 1e-6;

fn inconsistent(
    quantity: &'static str,
    incremental: impl Debug,
    recomputed: impl Debug,
) -> OrigamiError {
    let (incremental, recomputed) = (format!("{incremental:?}"), format!("{recomputed:?}"));
    error!(
        quantity,
        incremental = %incremental,
        recomputed = %recomputed,
        "Incremental bookkeeping disagrees with a full recomputation."
    );
    OrigamiError::Inconsistent {
        quantity,
        incremental,
        recomputed,
    }
}

fn energies_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= ENERGY_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

impl OrigamiSystem {
    /// Re-derives occupancy, counts and energy from the domains alone and compares them with
    /// the incrementally maintained state.
    ///
    /// Any disagreement is a bookkeeping bug; it is logged and returned, never repaired.
    pub fn check_all_constraints(&self) -> Result<(), OrigamiError> {
        let recomputed = self.recompute_tally()?;
        for ((quantity, incremental), (_, fresh)) in
            self.totals.counts().into_iter().zip(recomputed.counts())
        {
            if incremental != fresh {
                return Err(inconsistent(quantity, incremental, fresh));
            }
        }
        let t = &self.totals;
        if t.bound_pairs != t.fully_bound_pairs + t.self_bound_pairs + t.misbound_pairs {
            return Err(inconsistent(
                "bound pair decomposition",
                t.bound_pairs,
                t.fully_bound_pairs + t.self_bound_pairs + t.misbound_pairs,
            ));
        }
        for (quantity, incremental, fresh) in [
            ("enthalpy", t.enthalpy, recomputed.enthalpy),
            ("entropy", t.entropy, recomputed.entropy),
            ("stacking energy", t.stacking, recomputed.stacking),
            ("energy", self.energy(), recomputed.energy(self.config.temp)),
        ] {
            if !energies_match(incremental, fresh) {
                return Err(inconsistent(quantity, incremental, fresh));
            }
        }

        self.check_occupancy()
    }

    fn check_occupancy(&self) -> Result<(), OrigamiError> {
        let mut sites: HashMap<LatticeVector, Vec<&Domain>> = HashMap::new();
        let mut num_unassigned = 0;
        for chain in self.chains.values() {
            for domain in chain.domains() {
                match domain.position() {
                    Some(pos) => sites.entry(pos).or_default().push(domain),
                    None => {
                        num_unassigned += 1;
                        if domain.state() != Occupancy::Unassigned || domain.partner().is_some() {
                            return Err(inconsistent(
                                "unassigned domain state",
                                (domain.reference(), domain.state(), domain.partner()),
                                (domain.reference(), Occupancy::Unassigned, None::<DomainRef>),
                            ));
                        }
                    }
                }
            }
        }
        if num_unassigned != self.num_unassigned {
            return Err(inconsistent(
                "unassigned domains",
                self.num_unassigned,
                num_unassigned,
            ));
        }

        let mut pos_to_unbound = HashMap::new();
        let mut position_occupancies = HashMap::new();
        for (pos, occupants) in sites {
            let occupancy = match occupants.as_slice() {
                [single] => {
                    if single.partner().is_some() {
                        return Err(inconsistent(
                            "lone domain partner",
                            (single.reference(), single.partner()),
                            (single.reference(), None::<DomainRef>),
                        ));
                    }
                    pos_to_unbound.insert(pos, single.reference());
                    Occupancy::Unbound
                }
                [a, b] => {
                    if a.partner() != Some(b.reference()) || b.partner() != Some(a.reference()) {
                        return Err(inconsistent(
                            "pair partners",
                            (a.partner(), b.partner()),
                            (Some(b.reference()), Some(a.reference())),
                        ));
                    }
                    classify_binding(a, b)
                }
                _ => {
                    let refs: Vec<DomainRef> = occupants.iter().map(|d| d.reference()).collect();
                    return Err(inconsistent("site occupants", refs, pos));
                }
            };
            for domain in &occupants {
                if domain.state() != occupancy {
                    return Err(inconsistent(
                        "domain occupancy",
                        (domain.reference(), domain.state()),
                        (domain.reference(), occupancy),
                    ));
                }
            }
            position_occupancies.insert(pos, occupancy);
        }

        if pos_to_unbound != self.pos_to_unbound {
            return Err(inconsistent(
                "unbound position map",
                self.pos_to_unbound.len(),
                pos_to_unbound.len(),
            ));
        }
        if position_occupancies != self.position_occupancies {
            return Err(inconsistent(
                "position occupancy map",
                self.position_occupancies.len(),
                position_occupancies.len(),
            ));
        }
        Ok(())
    }
}
