use super::cache::HybridizationCache;
use super::config::{ConfigError, SystemConfig, validate_stacking_mult, validate_temp};
use super::error::OrigamiError;
use super::tally::ConfigTally;
use super::terms::{ConfigView, TermScorer, all_terms};
use crate::core::io::input::OrigamiInput;
use crate::core::lattice::LatticeVector;
use crate::core::models::chain::{Chain, Chains};
use crate::core::models::domain::{Domain, Occupancy, Placement};
use crate::core::models::ids::{ChainKey, DomainRef, SCAFFOLD_IDENTITY, SCAFFOLD_INDEX};
use crate::core::thermo::sequence::validate_sequence;
use slotmap::SlotMap;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Upper bound on the Manhattan distance between two scaffold domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceRestraint {
    pub first: usize,
    pub second: usize,
    pub max_distance: i32,
}

/// The configuration state machine of one origami system.
///
/// Owns every chain and domain, the lattice occupancy maps, the running energy and count
/// totals, and the grand canonical staple bookkeeping. All mutation goes through the move
/// primitives, which keep the maps and totals consistent with the domains after every
/// committed change.
#[derive(Debug, Clone)]
pub struct OrigamiSystem {
    pub(crate) config: SystemConfig,
    /// Domain identities per chain identity; entry 0 is the scaffold.
    pub(crate) identities: Vec<Vec<i32>>,
    pub(crate) sequences: Vec<Vec<String>>,
    /// Per staple identity, the scaffold domain each staple domain is complementary to.
    complementary_scaffold_domains: Vec<Vec<usize>>,
    pub(crate) chains: SlotMap<ChainKey, Chain>,
    pub(crate) chain_keys: HashMap<usize, ChainKey>,
    staples_by_identity: Vec<Vec<usize>>,
    current_chain_index: usize,
    /// Live staples minus pending provisional reductions.
    num_staples: usize,
    pending_staple_reductions: usize,
    pub(crate) num_unassigned: usize,
    pub(crate) pos_to_unbound: HashMap<LatticeVector, DomainRef>,
    pub(crate) position_occupancies: HashMap<LatticeVector, Occupancy>,
    pub(crate) totals: ConfigTally,
    pub(crate) constraints_violated: bool,
    bias_mult: f64,
    distance_restraints: Vec<DistanceRestraint>,
    /// Bumped by every mutation that can invalidate an evaluated move.
    pub(crate) generation: u64,
    pub(crate) cache: RefCell<HybridizationCache>,
}

impl OrigamiSystem {
    /// Builds a system from per-identity domain identities and sequences.
    ///
    /// The scaffold (identity 0) is built first. `chains` may be empty, which leaves only
    /// an unassigned scaffold; otherwise it must list the scaffold first and is loaded
    /// through the checked path.
    #[instrument(skip_all, name = "origami_system_init")]
    pub fn new(
        identities: Vec<Vec<i32>>,
        sequences: Vec<Vec<String>>,
        chains: &Chains,
        config: SystemConfig,
    ) -> Result<Self, OrigamiError> {
        config.validate()?;
        validate_identities(&identities, &sequences)?;
        let complementary_scaffold_domains = find_complementary_scaffold_domains(&identities)?;

        let scaffold = Chain::new(
            SCAFFOLD_INDEX,
            SCAFFOLD_IDENTITY,
            &identities[SCAFFOLD_IDENTITY],
            &sequences[SCAFFOLD_IDENTITY],
            config.cyclic,
        );
        let num_unassigned = scaffold.len();
        let mut chain_store = SlotMap::with_key();
        let scaffold_key = chain_store.insert(scaffold);

        let mut system = Self {
            staples_by_identity: vec![Vec::new(); identities.len()],
            config,
            identities,
            sequences,
            complementary_scaffold_domains,
            chains: chain_store,
            chain_keys: HashMap::from([(SCAFFOLD_INDEX, scaffold_key)]),
            current_chain_index: SCAFFOLD_INDEX + 1,
            num_staples: 0,
            pending_staple_reductions: 0,
            num_unassigned,
            pos_to_unbound: HashMap::new(),
            position_occupancies: HashMap::new(),
            totals: ConfigTally::default(),
            constraints_violated: false,
            bias_mult: 1.0,
            distance_restraints: Vec::new(),
            generation: 0,
            cache: RefCell::new(HybridizationCache::new()),
        };

        if !chains.is_empty() {
            system.set_config(chains)?;
        }

        info!(
            scaffold_domains = system.num_scaffold_domains(),
            staple_identities = system.identities.len() - 1,
            staples = system.num_staples,
            energy = system.energy(),
            "Origami system initialized."
        );
        Ok(system)
    }

    /// Builds a system from a loaded input description.
    pub fn from_input(input: &OrigamiInput, config: SystemConfig) -> Result<Self, OrigamiError> {
        Self::new(
            input.identities.clone(),
            input.sequences.clone(),
            &input.chains(),
            config,
        )
    }

    // ---------------------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------------------

    pub fn chain(&self, index: usize) -> Option<&Chain> {
        self.chain_keys
            .get(&index)
            .and_then(|key| self.chains.get(*key))
    }

    pub fn domain(&self, r: DomainRef) -> Option<&Domain> {
        self.chain(r.chain).and_then(|chain| chain.domain(r.domain))
    }

    pub(crate) fn domain_or_err(&self, r: DomainRef) -> Result<&Domain, OrigamiError> {
        self.domain(r).ok_or(OrigamiError::DomainNotFound(r))
    }

    pub(crate) fn domain_mut(&mut self, r: DomainRef) -> Result<&mut Domain, OrigamiError> {
        let key = *self
            .chain_keys
            .get(&r.chain)
            .ok_or(OrigamiError::DomainNotFound(r))?;
        self.chains
            .get_mut(key)
            .and_then(|chain| chain.domains.get_mut(r.domain))
            .ok_or(OrigamiError::DomainNotFound(r))
    }

    pub fn next_domain(&self, r: DomainRef) -> Option<DomainRef> {
        let next = self.chain(r.chain)?.next_index(r.domain)?;
        Some(DomainRef::new(r.chain, next))
    }

    pub fn prev_domain(&self, r: DomainRef) -> Option<DomainRef> {
        let prev = self.chain(r.chain)?.prev_index(r.domain)?;
        Some(DomainRef::new(r.chain, prev))
    }

    pub(crate) fn domain_refs(&self) -> impl Iterator<Item = DomainRef> + '_ {
        self.chains
            .values()
            .flat_map(|chain| chain.domains().iter().map(Domain::reference))
    }

    /// Live chain indices in ascending order, scaffold first.
    pub fn chain_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.chain_keys.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    /// Highest live chain index, normally the most recently added staple.
    pub fn last_chain(&self) -> Option<&Chain> {
        self.chain_keys
            .keys()
            .max()
            .and_then(|index| self.chain(*index))
    }

    pub fn scaffold(&self) -> Option<&Chain> {
        self.chain(SCAFFOLD_INDEX)
    }

    /// Site classification at `pos`; `None` for an empty site.
    pub fn position_occupancy(&self, pos: LatticeVector) -> Option<Occupancy> {
        self.position_occupancies.get(&pos).copied()
    }

    pub fn unbound_domain_at(&self, pos: LatticeVector) -> Option<DomainRef> {
        self.pos_to_unbound.get(&pos).copied()
    }

    pub fn check_domains_complementary(
        &self,
        a: DomainRef,
        b: DomainRef,
    ) -> Result<bool, OrigamiError> {
        Ok(self.domain_or_err(a)?.is_complementary_to(self.domain_or_err(b)?))
    }

    /// Scaffold domain indices complementary to each domain of a staple identity.
    pub fn complementary_scaffold_domains(&self, identity: usize) -> Option<&[usize]> {
        if identity == SCAFFOLD_IDENTITY {
            return None;
        }
        self.complementary_scaffold_domains
            .get(identity)
            .map(Vec::as_slice)
    }

    // ---------------------------------------------------------------------------------
    // Aggregate state
    // ---------------------------------------------------------------------------------

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn temp(&self) -> f64 {
        self.config.temp
    }

    pub fn cation_molarity(&self) -> f64 {
        self.config.cation_molarity
    }

    pub fn staple_u(&self) -> f64 {
        self.config.staple_u
    }

    pub fn volume(&self) -> f64 {
        self.config.volume
    }

    pub fn is_cyclic(&self) -> bool {
        self.config.cyclic
    }

    pub fn bias_mult(&self) -> f64 {
        self.bias_mult
    }

    /// Total energy in kelvin.
    pub fn energy(&self) -> f64 {
        self.totals.energy(self.config.temp)
    }

    pub fn tally(&self) -> &ConfigTally {
        &self.totals
    }

    pub fn hybridization_enthalpy(&self) -> f64 {
        self.totals.enthalpy
    }

    pub fn hybridization_entropy(&self) -> f64 {
        self.totals.entropy
    }

    pub fn stacking_energy(&self) -> f64 {
        self.totals.stacking
    }

    pub fn num_bound_domain_pairs(&self) -> usize {
        count(self.totals.bound_pairs)
    }

    pub fn num_fully_bound_domain_pairs(&self) -> usize {
        count(self.totals.fully_bound_pairs)
    }

    pub fn num_self_bound_domain_pairs(&self) -> usize {
        count(self.totals.self_bound_pairs)
    }

    pub fn num_misbound_domain_pairs(&self) -> usize {
        count(self.totals.misbound_pairs)
    }

    pub fn num_stacked_domain_pairs(&self) -> usize {
        count(self.totals.stacked_pairs)
    }

    pub fn num_linear_helix_trips(&self) -> usize {
        count(self.totals.linear_helix_trips)
    }

    pub fn num_stacked_junct_quads(&self) -> usize {
        count(self.totals.stacked_junct_quads)
    }

    pub fn num_unassigned_domains(&self) -> usize {
        self.num_unassigned
    }

    pub fn num_domains(&self) -> usize {
        self.chains.values().map(Chain::len).sum()
    }

    pub fn num_scaffold_domains(&self) -> usize {
        self.scaffold().map_or(0, Chain::len)
    }

    pub fn num_chains(&self) -> usize {
        self.chains.len()
    }

    /// Staple count, net of pending provisional reductions.
    pub fn num_staples(&self) -> usize {
        self.num_staples
    }

    pub fn num_staple_identities(&self) -> usize {
        self.identities.len() - 1
    }

    /// Live staple count per chain identity; entry 0 is always zero.
    pub fn staple_counts(&self) -> Vec<usize> {
        self.staples_by_identity.iter().map(Vec::len).collect()
    }

    pub fn staples_of_ident(&self, identity: usize) -> &[usize] {
        self.staples_by_identity
            .get(identity)
            .map_or(&[][..], Vec::as_slice)
    }

    pub fn num_staples_of_ident(&self, identity: usize) -> usize {
        self.staples_of_ident(identity).len()
    }

    /// Number of staple identities with at least one live chain.
    pub fn num_unique_staples(&self) -> usize {
        self.staples_by_identity
            .iter()
            .filter(|indices| !indices.is_empty())
            .count()
    }

    pub fn configuration_fully_set(&self) -> bool {
        self.num_unassigned == 0
    }

    /// Set by the last checked or unconditional domain move that broke a constraint.
    pub fn constraints_violated(&self) -> bool {
        self.constraints_violated
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ---------------------------------------------------------------------------------
    // Chain lifecycle
    // ---------------------------------------------------------------------------------

    /// Adds a staple of the given identity under the next unused chain index.
    pub fn add_chain(&mut self, identity: usize) -> Result<usize, OrigamiError> {
        self.add_chain_with_index(identity, self.current_chain_index)
    }

    /// Adds a staple under an explicit chain index, e.g. when restoring a snapshot.
    pub fn add_chain_with_index(
        &mut self,
        identity: usize,
        index: usize,
    ) -> Result<usize, OrigamiError> {
        if identity == SCAFFOLD_IDENTITY || index == SCAFFOLD_INDEX {
            return Err(OrigamiError::ScaffoldImmutable);
        }
        let (Some(domain_identities), Some(sequences)) =
            (self.identities.get(identity), self.sequences.get(identity))
        else {
            return Err(OrigamiError::UnknownIdentity(identity));
        };
        if self.chain_keys.contains_key(&index) {
            return Err(OrigamiError::ChainIndexInUse(index));
        }

        let chain = Chain::new(index, identity, domain_identities, sequences, false);
        self.num_unassigned += chain.len();
        let key = self.chains.insert(chain);
        self.chain_keys.insert(index, key);
        self.staples_by_identity[identity].push(index);
        self.num_staples += 1;
        self.current_chain_index = self.current_chain_index.max(index + 1);
        self.generation += 1;
        debug!(index, identity, "Added staple chain.");
        Ok(index)
    }

    /// Removes a staple whose domains are all unassigned.
    ///
    /// A pending provisional reduction is consumed instead of lowering the staple count a
    /// second time.
    pub fn delete_chain(&mut self, index: usize) -> Result<(), OrigamiError> {
        if index == SCAFFOLD_INDEX {
            return Err(OrigamiError::ScaffoldImmutable);
        }
        let chain = self.chain(index).ok_or(OrigamiError::ChainNotFound(index))?;
        if chain.has_assigned_domains() {
            return Err(OrigamiError::ChainAssigned(index));
        }

        self.detach_chain(index)?;
        if self.pending_staple_reductions > 0 {
            self.pending_staple_reductions -= 1;
        } else {
            self.num_staples -= 1;
        }
        debug!(index, "Deleted staple chain.");
        Ok(())
    }

    /// Drops an unassigned chain and its identity bookkeeping, leaving staple counts alone.
    pub(crate) fn detach_chain(&mut self, index: usize) -> Result<Chain, OrigamiError> {
        let key = self
            .chain_keys
            .remove(&index)
            .ok_or(OrigamiError::ChainNotFound(index))?;
        let chain = self.chains.remove(key).ok_or_else(|| {
            OrigamiError::Internal(format!("chain {index} has a key but no storage"))
        })?;
        if let Some(indices) = self.staples_by_identity.get_mut(chain.identity()) {
            indices.retain(|&i| i != index);
        }
        self.num_unassigned -= chain.len();
        self.generation += 1;
        Ok(chain)
    }

    /// Removes every staple and clears all placements, leaving an unassigned scaffold.
    pub(crate) fn reset_to_bare_scaffold(&mut self) -> Result<(), OrigamiError> {
        for chain in self.chains.values_mut() {
            for domain in &mut chain.domains {
                domain.placement = None;
                domain.partner = None;
                domain.state = Occupancy::Unassigned;
            }
        }
        self.pos_to_unbound.clear();
        self.position_occupancies.clear();
        self.totals = ConfigTally::default();
        self.num_unassigned = self.num_domains();

        for index in self.chain_indices() {
            if index != SCAFFOLD_INDEX {
                self.detach_chain(index)?;
            }
        }
        self.num_staples = 0;
        self.pending_staple_reductions = 0;
        self.current_chain_index = SCAFFOLD_INDEX + 1;
        self.generation += 1;
        Ok(())
    }

    /// Provisionally lowers the staple count while a removal is being evaluated.
    pub fn temp_reduce_staples_by_one(&mut self) -> Result<(), OrigamiError> {
        if self.num_staples == 0 {
            return Err(OrigamiError::NoStaples);
        }
        self.num_staples -= 1;
        self.pending_staple_reductions += 1;
        Ok(())
    }

    /// Restores a provisional reduction after the removal was rejected.
    pub fn undo_reduce_staples_by_one(&mut self) -> Result<(), OrigamiError> {
        if self.pending_staple_reductions == 0 {
            return Err(OrigamiError::NoPendingReduction);
        }
        self.pending_staple_reductions -= 1;
        self.num_staples += 1;
        Ok(())
    }

    // ---------------------------------------------------------------------------------
    // Ensemble control
    // ---------------------------------------------------------------------------------

    /// Changes temperature and stacking multiplier and recomputes every energy term.
    pub fn update_temp(&mut self, temp: f64, stacking_mult: f64) -> Result<(), OrigamiError> {
        validate_temp(temp)?;
        validate_stacking_mult(stacking_mult)?;
        self.config.temp = temp;
        self.config.stacking_mult = stacking_mult;
        self.totals = self.recompute_tally()?;
        self.generation += 1;
        debug!(temp, stacking_mult, energy = self.energy(), "Updated temperature.");
        Ok(())
    }

    pub fn update_staple_u(&mut self, staple_u: f64) -> Result<(), OrigamiError> {
        if !staple_u.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "staple_u",
                value: staple_u,
            }
            .into());
        }
        self.config.staple_u = staple_u;
        debug!(staple_u, "Updated staple chemical potential.");
        Ok(())
    }

    /// Stores a bias multiplier computed by an external bias function.
    pub fn update_bias_mult(&mut self, bias_mult: f64) {
        self.bias_mult = bias_mult;
    }

    // ---------------------------------------------------------------------------------
    // Distance restraints
    // ---------------------------------------------------------------------------------

    pub fn add_distance_restraint(
        &mut self,
        first: usize,
        second: usize,
        max_distance: i32,
    ) -> Result<(), OrigamiError> {
        for d in [first, second] {
            self.domain_or_err(DomainRef::new(SCAFFOLD_INDEX, d))?;
        }
        if max_distance < 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_distance",
                value: f64::from(max_distance),
            }
            .into());
        }
        self.distance_restraints.push(DistanceRestraint {
            first,
            second,
            max_distance,
        });
        Ok(())
    }

    pub fn distance_restraints(&self) -> &[DistanceRestraint] {
        &self.distance_restraints
    }

    pub fn clear_distance_restraints(&mut self) {
        self.distance_restraints.clear();
    }

    /// True if every restraint between two placed scaffold domains is satisfied.
    pub fn check_distance_constraints(&self) -> bool {
        self.distance_restraints.iter().all(|restraint| {
            let position = |d| {
                self.domain(DomainRef::new(SCAFFOLD_INDEX, d))
                    .and_then(Domain::position)
            };
            match (position(restraint.first), position(restraint.second)) {
                (Some(a), Some(b)) => (a - b).abssum() <= restraint.max_distance,
                _ => true,
            }
        })
    }

    // ---------------------------------------------------------------------------------
    // Whole-system geometry
    // ---------------------------------------------------------------------------------

    /// Translates the configuration so the given scaffold domain sits at the origin.
    pub fn center(&mut self, scaffold_domain: usize) -> Result<(), OrigamiError> {
        let r = DomainRef::new(SCAFFOLD_INDEX, scaffold_domain);
        let origin = self
            .domain_or_err(r)?
            .position()
            .ok_or(OrigamiError::DomainUnassigned(r))?;

        for chain in self.chains.values_mut() {
            for domain in &mut chain.domains {
                if let Some(placement) = &mut domain.placement {
                    placement.pos = placement.pos - origin;
                }
            }
        }
        self.pos_to_unbound = self
            .pos_to_unbound
            .drain()
            .map(|(pos, r)| (pos - origin, r))
            .collect();
        self.position_occupancies = self
            .position_occupancies
            .drain()
            .map(|(pos, occupancy)| (pos - origin, occupancy))
            .collect();
        self.generation += 1;
        debug!(%origin, "Centered configuration.");
        Ok(())
    }

    pub(crate) fn recompute_tally(&self) -> Result<ConfigTally, OrigamiError> {
        TermScorer::new(self).tally(all_terms(self))
    }
}

impl ConfigView for OrigamiSystem {
    fn system(&self) -> &OrigamiSystem {
        self
    }

    fn placement(&self, r: DomainRef) -> Option<Placement> {
        self.domain(r).and_then(Domain::placement)
    }

    fn partner(&self, r: DomainRef) -> Option<DomainRef> {
        self.domain(r).and_then(Domain::partner)
    }
}

fn count(value: isize) -> usize {
    usize::try_from(value).unwrap_or(0)
}

fn validate_identities(
    identities: &[Vec<i32>],
    sequences: &[Vec<String>],
) -> Result<(), OrigamiError> {
    if identities.is_empty() {
        return Err(OrigamiError::Initialization(
            "no scaffold identity given".to_string(),
        ));
    }
    if identities.len() != sequences.len() {
        return Err(OrigamiError::Initialization(format!(
            "{} identity lists but {} sequence lists",
            identities.len(),
            sequences.len()
        )));
    }

    let mut sequence_of: HashMap<i32, &str> = HashMap::new();
    for (chain_identity, (idents, seqs)) in identities.iter().zip(sequences).enumerate() {
        if idents.is_empty() || idents.len() != seqs.len() {
            return Err(OrigamiError::Initialization(format!(
                "chain identity {chain_identity} has {} domain identities and {} sequences",
                idents.len(),
                seqs.len()
            )));
        }
        for (&ident, seq) in idents.iter().zip(seqs) {
            if ident == 0 {
                return Err(OrigamiError::Initialization(format!(
                    "chain identity {chain_identity} uses reserved domain identity 0"
                )));
            }
            validate_sequence(seq)?;
            if let Some(existing) = sequence_of.insert(ident, seq) {
                if existing != seq.as_str() {
                    return Err(OrigamiError::Initialization(format!(
                        "domain identity {ident} has conflicting sequences '{existing}' and '{seq}'"
                    )));
                }
            }
        }
    }
    Ok(())
}

fn find_complementary_scaffold_domains(
    identities: &[Vec<i32>],
) -> Result<Vec<Vec<usize>>, OrigamiError> {
    let scaffold = &identities[SCAFFOLD_IDENTITY];
    let mut complements = vec![Vec::new()];
    for (staple_identity, idents) in identities.iter().enumerate().skip(1) {
        let mut domains = Vec::with_capacity(idents.len());
        for &ident in idents {
            let d = scaffold.iter().position(|&s| s == -ident).ok_or_else(|| {
                OrigamiError::Initialization(format!(
                    "staple identity {staple_identity} domain identity {ident} has no complementary scaffold domain"
                ))
            })?;
            domains.push(d);
        }
        complements.push(domains);
    }
    Ok(complements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::*;

    #[test]
    fn new_builds_an_unassigned_scaffold() {
        let system = empty_system();
        assert_eq!(system.num_scaffold_domains(), 5);
        assert_eq!(system.num_chains(), 1);
        assert_eq!(system.num_staples(), 0);
        assert_eq!(system.num_unassigned_domains(), 5);
        assert_eq!(system.energy(), 0.0);
        assert!(!system.configuration_fully_set());
    }

    #[test]
    fn new_precomputes_complementary_scaffold_domains() {
        let system = empty_system();
        assert_eq!(system.complementary_scaffold_domains(1), Some(&[1, 0][..]));
        assert_eq!(system.complementary_scaffold_domains(2), Some(&[3, 2][..]));
        assert_eq!(system.complementary_scaffold_domains(3), Some(&[4][..]));
        assert_eq!(system.complementary_scaffold_domains(0), None);
        assert_eq!(system.complementary_scaffold_domains(9), None);
    }

    #[test]
    fn new_rejects_staple_without_scaffold_complement() {
        let (mut identities, mut sequences) = fixture_identities();
        identities.push(vec![-42]);
        sequences.push(vec!["ACGTACGT".to_string()]);
        let result = OrigamiSystem::new(identities, sequences, &Vec::new(), fixture_config());
        assert!(matches!(result, Err(OrigamiError::Initialization(_))));
    }

    #[test]
    fn new_rejects_invalid_sequences() {
        let (identities, mut sequences) = fixture_identities();
        sequences[1][0] = "ACGU".to_string();
        let result = OrigamiSystem::new(identities, sequences, &Vec::new(), fixture_config());
        assert!(matches!(result, Err(OrigamiError::Thermo { .. })));
    }

    #[test]
    fn new_rejects_conflicting_sequences_for_one_identity() {
        let (identities, mut sequences) = fixture_identities();
        sequences[3][0] = "AAAAAAAA".to_string();
        let result = OrigamiSystem::new(identities, sequences, &Vec::new(), fixture_config());
        assert!(matches!(result, Err(OrigamiError::Initialization(_))));
    }

    #[test]
    fn add_chain_assigns_running_indices_and_tracks_identity() {
        let mut system = empty_system();
        let a = system.add_chain(1).unwrap();
        let b = system.add_chain(1).unwrap();
        let c = system.add_chain(2).unwrap();
        assert_eq!((a, b, c), (1, 2, 3));
        assert_eq!(system.staples_of_ident(1), &[1, 2]);
        assert_eq!(system.num_staples_of_ident(2), 1);
        assert_eq!(system.staple_counts(), vec![0, 2, 1, 0]);
        assert_eq!(system.num_unique_staples(), 2);
        assert_eq!(system.num_unassigned_domains(), 5 + 2 + 2 + 2);
        assert_eq!(system.last_chain().map(Chain::index), Some(3));
    }

    #[test]
    fn add_chain_rejects_scaffold_and_unknown_identities() {
        let mut system = empty_system();
        assert_eq!(system.add_chain(0), Err(OrigamiError::ScaffoldImmutable));
        assert_eq!(system.add_chain(7), Err(OrigamiError::UnknownIdentity(7)));
    }

    #[test]
    fn add_chain_with_index_rejects_indices_in_use() {
        let mut system = empty_system();
        system.add_chain_with_index(1, 10).unwrap();
        assert_eq!(
            system.add_chain_with_index(2, 10),
            Err(OrigamiError::ChainIndexInUse(10))
        );
        assert_eq!(system.add_chain(2).unwrap(), 11);
    }

    #[test]
    fn add_then_delete_chain_restores_staple_bookkeeping() {
        let mut system = empty_system();
        system.add_chain(2).unwrap();
        let counts_before = system.staple_counts();
        let unassigned_before = system.num_unassigned_domains();
        let staples_before = system.num_staples();

        let index = system.add_chain(1).unwrap();
        place_staple_one(&mut system, index);
        system.unassign_domain(DomainRef::new(index, 0)).unwrap();
        system.unassign_domain(DomainRef::new(index, 1)).unwrap();
        system.delete_chain(index).unwrap();

        assert_eq!(system.staple_counts(), counts_before);
        assert_eq!(system.num_unassigned_domains(), unassigned_before);
        assert_eq!(system.num_staples(), staples_before);
        assert!(system.staples_of_ident(1).is_empty());
        assert!(system.chain(index).is_none());
    }

    #[test]
    fn deleted_chain_indices_are_not_reused() {
        let mut system = empty_system();
        let first = system.add_chain(1).unwrap();
        system.delete_chain(first).unwrap();
        assert_eq!(system.add_chain(1).unwrap(), first + 1);
    }

    #[test]
    fn delete_chain_requires_unassigned_domains() {
        let mut system = empty_system();
        let index = system.add_chain(1).unwrap();
        system
            .set_domain_config(
                DomainRef::new(index, 0),
                LatticeVector::new(9, 9, 9),
                LatticeVector::yhat(),
            )
            .unwrap();
        assert_eq!(
            system.delete_chain(index),
            Err(OrigamiError::ChainAssigned(index))
        );
        assert_eq!(system.num_staples(), 1);
    }

    #[test]
    fn delete_chain_rejects_scaffold_and_unknown_chains() {
        let mut system = empty_system();
        assert_eq!(system.delete_chain(0), Err(OrigamiError::ScaffoldImmutable));
        assert_eq!(system.delete_chain(5), Err(OrigamiError::ChainNotFound(5)));
    }

    #[test]
    fn provisional_staple_reduction_can_be_undone() {
        let mut system = empty_system();
        system.add_chain(1).unwrap();
        system.temp_reduce_staples_by_one().unwrap();
        assert_eq!(system.num_staples(), 0);
        system.undo_reduce_staples_by_one().unwrap();
        assert_eq!(system.num_staples(), 1);
        assert_eq!(
            system.undo_reduce_staples_by_one(),
            Err(OrigamiError::NoPendingReduction)
        );
    }

    #[test]
    fn provisional_reduction_is_consumed_by_delete_chain() {
        let mut system = empty_system();
        let index = system.add_chain(1).unwrap();
        system.add_chain(1).unwrap();
        system.temp_reduce_staples_by_one().unwrap();
        system.delete_chain(index).unwrap();
        assert_eq!(system.num_staples(), 1);
        assert_eq!(system.num_staples_of_ident(1), 1);
        assert_eq!(
            system.undo_reduce_staples_by_one(),
            Err(OrigamiError::NoPendingReduction)
        );
    }

    #[test]
    fn temp_reduce_fails_without_staples() {
        let mut system = empty_system();
        assert_eq!(
            system.temp_reduce_staples_by_one(),
            Err(OrigamiError::NoStaples)
        );
    }

    #[test]
    fn update_temp_rescales_free_energy() {
        let mut system = junction_system();
        let tally = *system.tally();
        system.update_temp(350.0, 1.0).unwrap();
        assert!(f64_approx_equal(system.energy(), tally.energy(350.0)));
        assert_eq!(system.temp(), 350.0);
        system.check_all_constraints().unwrap();
    }

    #[test]
    fn update_temp_applies_stacking_multiplier() {
        let mut system = junction_system();
        let stacking = system.stacking_energy();
        assert!(stacking < 0.0);
        system.update_temp(system.temp(), 2.0).unwrap();
        assert!(f64_approx_equal(system.stacking_energy(), 2.0 * stacking));
        system.update_temp(system.temp(), 0.0).unwrap();
        assert_eq!(system.stacking_energy(), 0.0);
    }

    #[test]
    fn update_temp_rejects_invalid_parameters() {
        let mut system = empty_system();
        assert!(matches!(
            system.update_temp(-1.0, 1.0),
            Err(OrigamiError::Config { .. })
        ));
        assert_eq!(system.temp(), TEMP);
    }

    #[test]
    fn update_staple_u_and_bias_mult_are_stored() {
        let mut system = empty_system();
        system.update_staple_u(-12.5).unwrap();
        system.update_bias_mult(0.25);
        assert_eq!(system.staple_u(), -12.5);
        assert_eq!(system.bias_mult(), 0.25);
        assert!(system.update_staple_u(f64::NAN).is_err());
    }

    #[test]
    fn distance_restraints_use_manhattan_distance() {
        let mut system = junction_system();
        system.add_distance_restraint(0, 2, 2).unwrap();
        assert!(system.check_distance_constraints());
        system.add_distance_restraint(0, 2, 1).unwrap();
        assert!(!system.check_distance_constraints());
        system.clear_distance_restraints();
        assert!(system.check_distance_constraints());
    }

    #[test]
    fn distance_restraints_ignore_unassigned_domains() {
        let mut system = empty_system();
        system.add_distance_restraint(0, 4, 0).unwrap();
        assert!(system.check_distance_constraints());
        assert!(matches!(
            system.add_distance_restraint(0, 40, 1),
            Err(OrigamiError::DomainNotFound(_))
        ));
    }

    #[test]
    fn center_moves_scaffold_domain_to_origin_without_changing_energy() {
        let mut system = junction_system();
        let energy = system.energy();
        system.center(3).unwrap();
        assert_eq!(
            system
                .domain(DomainRef::new(0, 3))
                .and_then(Domain::position),
            Some(LatticeVector::zero())
        );
        assert_eq!(
            system.position_occupancy(LatticeVector::new(0, -1, 0)),
            Some(Occupancy::BoundFully)
        );
        assert_eq!(system.position_occupancy(LatticeVector::new(0, 1, 0)), None);
        assert!(f64_approx_equal(system.energy(), energy));
        system.check_all_constraints().unwrap();
    }

    #[test]
    fn center_requires_an_assigned_domain() {
        let mut system = empty_system();
        assert_eq!(
            system.center(0),
            Err(OrigamiError::DomainUnassigned(DomainRef::new(0, 0)))
        );
    }
}
