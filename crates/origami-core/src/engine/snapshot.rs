use super::error::OrigamiError;
use super::system::OrigamiSystem;
use crate::core::models::chain::{ChainConfig, Chains};
use crate::core::models::ids::{DomainRef, SCAFFOLD_IDENTITY, SCAFFOLD_INDEX};
use tracing::{info, instrument, warn};

impl OrigamiSystem {
    /// Snapshot of every live chain, scaffold first, staples by ascending index.
    pub fn chains(&self) -> Chains {
        self.chain_indices()
            .into_iter()
            .filter_map(|index| self.chain(index).map(|chain| chain.to_config()))
            .collect()
    }

    /// Replaces the whole configuration, checking every domain as it is placed.
    ///
    /// The staple set is rebuilt from the snapshot, then the scaffold is placed followed by
    /// the staples in snapshot order. The first violation restores the previous
    /// configuration and is reported as [`OrigamiError::ConstraintViolation`].
    pub fn set_config(&mut self, chains: &Chains) -> Result<(), OrigamiError> {
        self.replace_configuration(chains, true)
    }

    /// Replaces the whole configuration without constraint checks, e.g. on restart from a
    /// trajectory written by this engine.
    pub fn set_all_domains(&mut self, chains: &Chains) -> Result<(), OrigamiError> {
        self.replace_configuration(chains, false)
    }

    fn replace_configuration(&mut self, chains: &Chains, checked: bool) -> Result<(), OrigamiError> {
        self.validate_snapshot(chains)?;
        let previous = self.chains();
        match self.load_snapshot(chains, checked) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(error = %err, "Snapshot load failed; restoring previous configuration.");
                self.load_snapshot(&previous, false).map_err(|restore| {
                    OrigamiError::Internal(format!(
                        "failed to restore configuration after '{err}': {restore}"
                    ))
                })?;
                Err(err)
            }
        }
    }

    fn validate_snapshot(&self, chains: &Chains) -> Result<(), OrigamiError> {
        let Some(scaffold) = chains.first() else {
            return Err(OrigamiError::Snapshot("no scaffold entry".to_string()));
        };
        if scaffold.index != SCAFFOLD_INDEX || scaffold.identity != SCAFFOLD_IDENTITY {
            return Err(OrigamiError::Snapshot(format!(
                "first entry must be the scaffold (index {SCAFFOLD_INDEX}, identity {SCAFFOLD_IDENTITY}), got index {} identity {}",
                scaffold.index, scaffold.identity
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for chain in chains {
            if !seen.insert(chain.index) {
                return Err(OrigamiError::ChainIndexInUse(chain.index));
            }
            if chain.index != SCAFFOLD_INDEX && chain.identity == SCAFFOLD_IDENTITY {
                return Err(OrigamiError::ScaffoldImmutable);
            }
            let num_domains = self
                .identities
                .get(chain.identity)
                .ok_or(OrigamiError::UnknownIdentity(chain.identity))?
                .len();
            if chain.positions.len() != num_domains || chain.orientations.len() != num_domains {
                return Err(OrigamiError::Snapshot(format!(
                    "chain {} lists {} positions and {} orientations for {num_domains} domains",
                    chain.index,
                    chain.positions.len(),
                    chain.orientations.len()
                )));
            }
            for (d, (pos, ore)) in chain.positions.iter().zip(&chain.orientations).enumerate() {
                match (pos, ore) {
                    (Some(_), Some(ore)) if !ore.is_unit() => {
                        return Err(OrigamiError::InvalidOrientation(*ore));
                    }
                    (Some(_), None) | (None, Some(_)) => {
                        return Err(OrigamiError::Snapshot(format!(
                            "domain {} has only one of position and orientation",
                            DomainRef::new(chain.index, d)
                        )));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    #[instrument(skip_all, fields(chains = chains.len(), checked = checked))]
    fn load_snapshot(&mut self, chains: &Chains, checked: bool) -> Result<(), OrigamiError> {
        self.reset_to_bare_scaffold()?;
        for chain in chains.iter().skip(1) {
            self.add_chain_with_index(chain.identity, chain.index)?;
        }

        for chain in chains {
            self.assign_chain(chain, checked)?;
        }

        info!(
            staples = self.num_staples(),
            unassigned = self.num_unassigned_domains(),
            energy = self.energy(),
            "Loaded configuration snapshot."
        );
        Ok(())
    }

    fn assign_chain(&mut self, chain: &ChainConfig, checked: bool) -> Result<(), OrigamiError> {
        for (d, (pos, ore)) in chain.positions.iter().zip(&chain.orientations).enumerate() {
            let (Some(pos), Some(ore)) = (*pos, *ore) else {
                continue;
            };
            let r = DomainRef::new(chain.index, d);
            if checked {
                if self.set_checked_domain_config(r, pos, ore)?.is_none() {
                    return Err(OrigamiError::ConstraintViolation { domain: r });
                }
            } else {
                self.set_domain_config(r, pos, ore)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::*;

    #[test]
    fn chains_lists_scaffold_then_staples_by_index() {
        let system = junction_system();
        let chains = system.chains();
        let indices: Vec<usize> = chains.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(chains[0].positions[3], Some(v(0, 1, 0)));
        assert_eq!(chains[0].positions[4], None);
        assert_eq!(chains[2].orientations[1], Some(y()));
    }

    #[test]
    fn set_config_reproduces_a_snapshot_in_a_fresh_system() {
        let original = junction_system();
        let mut copy = empty_system();
        copy.set_config(&original.chains()).unwrap();

        assert_eq!(copy.chains(), original.chains());
        assert_eq!(copy.tally().counts(), original.tally().counts());
        assert!(f64_approx_equal(copy.energy(), original.energy()));
        assert_eq!(copy.staple_counts(), original.staple_counts());
        copy.check_all_constraints().unwrap();
    }

    #[test]
    fn set_config_keeps_snapshot_chain_indices() {
        let mut system = empty_system();
        let mut chains = vec![ChainConfig::unassigned(0, 0, 5)];
        chains.push(ChainConfig::unassigned(7, 3, 1));
        system.set_config(&chains).unwrap();
        assert_eq!(system.staples_of_ident(3), &[7]);
        assert_eq!(system.add_chain(1).unwrap(), 8);
    }

    #[test]
    fn set_config_replaces_existing_staples() {
        let mut system = junction_system();
        let chains = vec![ChainConfig::unassigned(0, 0, 5)];
        system.set_config(&chains).unwrap();
        assert_eq!(system.num_staples(), 0);
        assert_eq!(system.num_chains(), 1);
        assert_eq!(system.num_unassigned_domains(), 5);
        assert_eq!(system.energy(), 0.0);
        assert_eq!(system.position_occupancy(v(0, 0, 0)), None);
    }

    #[test]
    fn set_config_violation_restores_previous_configuration() {
        let mut system = junction_system();
        let before = system.chains();
        let energy = system.energy();

        let mut bad = before.clone();
        bad[1].orientations[0] = Some(y());
        let result = system.set_config(&bad);

        assert_eq!(
            result,
            Err(OrigamiError::ConstraintViolation {
                domain: DomainRef::new(1, 0)
            })
        );
        assert_eq!(system.chains(), before);
        assert!(f64_approx_equal(system.energy(), energy));
        system.check_all_constraints().unwrap();
    }

    #[test]
    fn set_all_domains_accepts_violating_configurations() {
        let mut system = junction_system();
        let mut bad = system.chains();
        bad[1].orientations[0] = Some(y());
        system.set_all_domains(&bad).unwrap();
        assert!(system.tally().violations > 0);
        assert_eq!(system.chains(), bad);
        system.check_all_constraints().unwrap();
    }

    #[test]
    fn snapshot_must_start_with_the_scaffold() {
        let mut system = empty_system();
        let chains = vec![ChainConfig::unassigned(1, 1, 2)];
        assert!(matches!(
            system.set_config(&chains),
            Err(OrigamiError::Snapshot(_))
        ));
        assert!(matches!(
            system.set_config(&Vec::new()),
            Err(OrigamiError::Snapshot(_))
        ));
    }

    #[test]
    fn snapshot_rejects_mismatched_lengths_and_half_set_domains() {
        let mut system = empty_system();
        let short = vec![ChainConfig::unassigned(0, 0, 3)];
        assert!(matches!(
            system.set_config(&short),
            Err(OrigamiError::Snapshot(_))
        ));

        let mut half = vec![ChainConfig::unassigned(0, 0, 5)];
        half[0].positions[0] = Some(v(0, 0, 0));
        assert!(matches!(
            system.set_config(&half),
            Err(OrigamiError::Snapshot(_))
        ));
    }

    #[test]
    fn snapshot_rejects_unknown_identities_and_duplicate_indices() {
        let mut system = empty_system();
        let unknown = vec![
            ChainConfig::unassigned(0, 0, 5),
            ChainConfig::unassigned(1, 9, 1),
        ];
        assert_eq!(
            system.set_config(&unknown),
            Err(OrigamiError::UnknownIdentity(9))
        );

        let duplicate = vec![
            ChainConfig::unassigned(0, 0, 5),
            ChainConfig::unassigned(2, 3, 1),
            ChainConfig::unassigned(2, 3, 1),
        ];
        assert_eq!(
            system.set_config(&duplicate),
            Err(OrigamiError::ChainIndexInUse(2))
        );
    }

    #[test]
    fn new_loads_chains_through_the_checked_path() {
        let snapshot = junction_system().chains();
        let (identities, sequences) = fixture_identities();
        let system = OrigamiSystem::new(identities, sequences, &snapshot, fixture_config()).unwrap();
        assert_eq!(system.chains(), snapshot);
        assert_eq!(system.num_stacked_junct_quads(), 1);
    }
}
