use crate::core::models::domain::{Domain, Occupancy};
use crate::core::thermo::ThermoError;
use crate::core::thermo::nearest_neighbour::{
    ThermoOfHybrid, calc_seq_spec_stacking_energy, calc_unitless_hybridization_thermo,
    calc_unitless_misbinding_thermo,
};
use std::collections::HashMap;

/// Memoised nearest-neighbour results keyed by ordered domain identity pairs.
///
/// Pair entries are additionally keyed by whether the pair is fully complementary, since a
/// complementary identity pair on one chain scores as a self-bound pair.
///
/// Duplex thermo and the stacking table are temperature independent, so entries stay valid
/// across temperature updates. Only the cation concentration enters, and it is fixed for
/// the lifetime of a system.
#[derive(Debug, Default, Clone)]
pub struct HybridizationCache {
    pairs: HashMap<(i32, i32, bool), ThermoOfHybrid>,
    stacking: HashMap<(i32, i32), f64>,
}

impl HybridizationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hybridization thermo of `a` bound to `b` under the given classification.
    ///
    /// Fully complementary pairs score the duplex of `a`'s sequence; every other pairing
    /// scores the longest contiguous complement.
    pub fn pair_thermo(
        &mut self,
        a: &Domain,
        b: &Domain,
        occupancy: Occupancy,
        temp: f64,
        cation_m: f64,
    ) -> Result<ThermoOfHybrid, ThermoError> {
        let fully = occupancy == Occupancy::BoundFully;
        let key = (a.identity(), b.identity(), fully);
        if let Some(thermo) = self.pairs.get(&key) {
            return Ok(*thermo);
        }
        let thermo = if fully {
            calc_unitless_hybridization_thermo(a.sequence(), temp, cation_m)?
        } else {
            calc_unitless_misbinding_thermo(a.sequence(), b.sequence(), temp, cation_m)?
        };
        self.pairs.insert(key, thermo);
        Ok(thermo)
    }

    /// Unscaled stacking energy of `a` followed by `b` along a helix.
    pub fn stacking_energy(
        &mut self,
        a: &Domain,
        b: &Domain,
        temp: f64,
        cation_m: f64,
    ) -> Result<f64, ThermoError> {
        let key = (a.identity(), b.identity());
        if let Some(energy) = self.stacking.get(&key) {
            return Ok(*energy);
        }
        let energy = calc_seq_spec_stacking_energy(a.sequence(), b.sequence(), temp, cation_m)?;
        self.stacking.insert(key, energy);
        Ok(energy)
    }

    pub fn len(&self) -> usize {
        self.pairs.len() + self.stacking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
