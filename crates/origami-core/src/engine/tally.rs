use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Energy components and structural counts of a configuration, or of a change to one.
///
/// Counts are signed so that the same type carries both totals and move deltas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConfigTally {
    /// Hybridization enthalpy, kelvin.
    pub enthalpy: f64,
    /// Hybridization entropy, dimensionless.
    pub entropy: f64,
    /// Stacking energy with the stacking multiplier applied, kelvin.
    pub stacking: f64,
    pub bound_pairs: isize,
    pub fully_bound_pairs: isize,
    pub self_bound_pairs: isize,
    pub misbound_pairs: isize,
    pub stacked_pairs: isize,
    pub linear_helix_trips: isize,
    pub stacked_junct_quads: isize,
    /// Local constraints that the configuration breaks.
    pub violations: isize,
}

impl ConfigTally {
    /// `H - T S + stacking`.
    #[inline]
    pub fn energy(&self, temp: f64) -> f64 {
        self.enthalpy - temp * self.entropy + self.stacking
    }

    /// Counts only, for exact comparison against a recomputed tally.
    pub(crate) fn counts(&self) -> [(&'static str, isize); 8] {
        [
            ("bound pairs", self.bound_pairs),
            ("fully bound pairs", self.fully_bound_pairs),
            ("self bound pairs", self.self_bound_pairs),
            ("misbound pairs", self.misbound_pairs),
            ("stacked pairs", self.stacked_pairs),
            ("linear helix triples", self.linear_helix_trips),
            ("stacked junction quads", self.stacked_junct_quads),
            ("violations", self.violations),
        ]
    }
}

impl Add for ConfigTally {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for ConfigTally {
    fn add_assign(&mut self, rhs: Self) {
        self.enthalpy += rhs.enthalpy;
        self.entropy += rhs.entropy;
        self.stacking += rhs.stacking;
        self.bound_pairs += rhs.bound_pairs;
        self.fully_bound_pairs += rhs.fully_bound_pairs;
        self.self_bound_pairs += rhs.self_bound_pairs;
        self.misbound_pairs += rhs.misbound_pairs;
        self.stacked_pairs += rhs.stacked_pairs;
        self.linear_helix_trips += rhs.linear_helix_trips;
        self.stacked_junct_quads += rhs.stacked_junct_quads;
        self.violations += rhs.violations;
    }
}

impl Neg for ConfigTally {
    type Output = Self;

    fn neg(self) -> Self::Output {
        ConfigTally::default() - self
    }
}

impl Sub for ConfigTally {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl SubAssign for ConfigTally {
    fn sub_assign(&mut self, rhs: Self) {
        self.enthalpy -= rhs.enthalpy;
        self.entropy -= rhs.entropy;
        self.stacking -= rhs.stacking;
        self.bound_pairs -= rhs.bound_pairs;
        self.fully_bound_pairs -= rhs.fully_bound_pairs;
        self.self_bound_pairs -= rhs.self_bound_pairs;
        self.misbound_pairs -= rhs.misbound_pairs;
        self.stacked_pairs -= rhs.stacked_pairs;
        self.linear_helix_trips -= rhs.linear_helix_trips;
        self.stacked_junct_quads -= rhs.stacked_junct_quads;
        self.violations -= rhs.violations;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigTally {
        ConfigTally {
            enthalpy: -100.0,
            entropy: -0.25,
            stacking: -5.0,
            bound_pairs: 2,
            fully_bound_pairs: 1,
            misbound_pairs: 1,
            stacked_pairs: 1,
            ..ConfigTally::default()
        }
    }

    #[test]
    fn energy_combines_free_energy_and_stacking() {
        assert_eq!(sample().energy(200.0), -100.0 + 50.0 - 5.0);
    }

    #[test]
    fn add_then_sub_restores_the_original() {
        let a = sample();
        let b = ConfigTally {
            enthalpy: 3.0,
            bound_pairs: 1,
            violations: 2,
            ..ConfigTally::default()
        };
        assert_eq!((a + b) - b, a);
    }

    #[test]
    fn neg_flips_every_field() {
        let n = -sample();
        assert_eq!(n.enthalpy, 100.0);
        assert_eq!(n.bound_pairs, -2);
        assert_eq!(n + sample(), ConfigTally::default());
    }

    #[test]
    fn default_tally_has_zero_energy() {
        assert_eq!(ConfigTally::default().energy(330.0), 0.0);
    }
}
