use super::ThermoError;
use super::sequence::{
    complementary_base, find_longest_contig_complement, seq_is_palindromic, validate_sequence,
};
use super::tables;
use std::ops::{Add, AddAssign, Sub};

/// Molar gas constant, J/(K mol).
pub const R: f64 = 8.3144598;

/// J/cal
pub const J_PER_CAL: f64 = 4.184;

/// Salt correction to duplex entropy per nearest-neighbour step, kcal/(mol K).
const SALT_ENTROPY_PER_STEP: f64 = 0.368e-3;

/// Enthalpy and entropy of a hybridization (or a sum of them).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThermoOfHybrid {
    pub enthalpy: f64,
    pub entropy: f64,
}

impl ThermoOfHybrid {
    pub fn new(enthalpy: f64, entropy: f64) -> Self {
        Self { enthalpy, entropy }
    }

    /// `H - T S`.
    #[inline]
    pub fn free_energy(&self, temp: f64) -> f64 {
        self.enthalpy - temp * self.entropy
    }

    fn to_reduced(self) -> Self {
        Self::new(kcal_to_reduced(self.enthalpy), kcal_to_reduced(self.entropy))
    }
}

impl Add for ThermoOfHybrid {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.enthalpy + rhs.enthalpy, self.entropy + rhs.entropy)
    }
}

impl AddAssign for ThermoOfHybrid {
    fn add_assign(&mut self, rhs: Self) {
        self.enthalpy += rhs.enthalpy;
        self.entropy += rhs.entropy;
    }
}

impl Sub for ThermoOfHybrid {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.enthalpy - rhs.enthalpy, self.entropy - rhs.entropy)
    }
}

/// Converts kcal/mol (or kcal/(mol K)) to units of the Boltzmann constant.
#[inline]
pub fn kcal_to_reduced(value: f64) -> f64 {
    value * 1000.0 * J_PER_CAL / R
}

/// Table key of the step `first second` paired with its complement, e.g. `"AG/TC"`.
fn step_key(first: char, second: char) -> Result<String, ThermoError> {
    let invalid = |base| ThermoError::InvalidBase {
        sequence: format!("{first}{second}"),
        base,
    };
    let first_comp = complementary_base(first).ok_or_else(|| invalid(first))?;
    let second_comp = complementary_base(second).ok_or_else(|| invalid(second))?;
    Ok(format!("{first}{second}/{first_comp}{second_comp}"))
}

/// Initiation terms in reduced units.
pub fn calc_unitless_init_thermo() -> ThermoOfHybrid {
    ThermoOfHybrid::new(tables::INITIATION_ENTHALPY, tables::INITIATION_ENTROPY).to_reduced()
}

/// Duplex enthalpy and entropy of `seq` with its exact complement, in kcal/mol and
/// kcal/(mol K), excluding initiation.
///
/// Sums the dinucleotide steps, adds a terminal A-T penalty per A/T end and the symmetry
/// correction for palindromes, then applies the salt correction to the entropy.
pub fn calc_hybridization_h_and_s(
    seq: &str,
    cation_m: f64,
) -> Result<ThermoOfHybrid, ThermoError> {
    validate_sequence(seq)?;
    let bases: Vec<char> = seq.chars().collect();

    let mut thermo = ThermoOfHybrid::default();
    for step in bases.windows(2) {
        let key = step_key(step[0], step[1])?;
        let enthalpy =
            tables::nn_enthalpy(&key).ok_or_else(|| ThermoError::UnknownStep(key.clone()))?;
        let entropy = tables::nn_entropy(&key).ok_or(ThermoError::UnknownStep(key))?;
        thermo += ThermoOfHybrid::new(enthalpy, entropy);
    }

    let terminal_ats = [bases[0], bases[bases.len() - 1]]
        .iter()
        .filter(|&&b| b == 'A' || b == 'T')
        .count();
    for _ in 0..terminal_ats {
        thermo += ThermoOfHybrid::new(
            tables::TERMINAL_AT_PENALTY_ENTHALPY,
            tables::TERMINAL_AT_PENALTY_ENTROPY,
        );
    }

    if seq_is_palindromic(seq)? {
        thermo += ThermoOfHybrid::new(
            tables::SYMMETRY_CORRECTION_ENTHALPY,
            tables::SYMMETRY_CORRECTION_ENTROPY,
        );
    }

    let steps = (bases.len() - 1) as f64;
    thermo.entropy += SALT_ENTROPY_PER_STEP * steps * cation_m.ln();

    Ok(thermo)
}

/// Hybridization enthalpy and entropy of `seq` with its complement in reduced units.
///
/// Duplex enthalpy and entropy are treated as temperature independent, so `_temp` does not
/// enter the result; it is kept so every scoring function shares one signature.
pub fn calc_unitless_hybridization_thermo(
    seq: &str,
    _temp: f64,
    cation_m: f64,
) -> Result<ThermoOfHybrid, ThermoError> {
    let duplex = calc_hybridization_h_and_s(seq, cation_m)?.to_reduced();
    Ok(calc_unitless_init_thermo() + duplex)
}

/// Hybridization free energy of `seq` with its complement, in kelvin.
pub fn calc_unitless_hybridization_energy(
    seq: &str,
    temp: f64,
    cation_m: f64,
) -> Result<f64, ThermoError> {
    Ok(calc_unitless_hybridization_thermo(seq, temp, cation_m)?.free_energy(temp))
}

/// Thermo of two sequences that are not full complements.
///
/// Averages enthalpy and entropy over every longest contiguous complement. Complements
/// shorter than one dinucleotide step cannot form a duplex and score zero.
pub fn calc_unitless_misbinding_thermo(
    seq_i: &str,
    seq_j: &str,
    temp: f64,
    cation_m: f64,
) -> Result<ThermoOfHybrid, ThermoError> {
    let contigs = find_longest_contig_complement(seq_i, seq_j)?;
    let Some(first) = contigs.first() else {
        return Ok(ThermoOfHybrid::default());
    };
    if first.len() < 2 {
        return Ok(ThermoOfHybrid::default());
    }

    let mut total = ThermoOfHybrid::default();
    for contig in &contigs {
        total += calc_unitless_hybridization_thermo(contig, temp, cation_m)?;
    }
    let n = contigs.len() as f64;
    Ok(ThermoOfHybrid::new(total.enthalpy / n, total.entropy / n))
}

/// Sequence-specific stacking energy between two helix segments, in kelvin.
///
/// The stacked step is formed by the last base of `seq_i` and the first base of `seq_j`.
/// The table is temperature and salt independent.
pub fn calc_seq_spec_stacking_energy(
    seq_i: &str,
    seq_j: &str,
    _temp: f64,
    _cation_m: f64,
) -> Result<f64, ThermoError> {
    validate_sequence(seq_i)?;
    validate_sequence(seq_j)?;
    let last = seq_i.chars().last().ok_or(ThermoError::EmptySequence)?;
    let first = seq_j.chars().next().ok_or(ThermoError::EmptySequence)?;
    let key = step_key(last, first)?;
    let energy = tables::stacking_energy(&key).ok_or(ThermoError::UnknownStep(key))?;
    Ok(kcal_to_reduced(energy))
}
