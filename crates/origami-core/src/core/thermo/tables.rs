use phf::{Map, phf_map};

/// Duplex initiation, kcal/mol and kcal/(mol K).
pub const INITIATION_ENTHALPY: f64 = 0.2;
pub const INITIATION_ENTROPY: f64 = -0.0057;

/// Applied once per terminal A-T pair.
pub const TERMINAL_AT_PENALTY_ENTHALPY: f64 = 2.2;
pub const TERMINAL_AT_PENALTY_ENTROPY: f64 = 0.0069;

/// Applied to self-complementary duplexes.
pub const SYMMETRY_CORRECTION_ENTHALPY: f64 = 0.0;
pub const SYMMETRY_CORRECTION_ENTROPY: f64 = -0.0014;

// SantaLucia & Hicks (2004), kcal/mol
static NN_ENTHALPY: Map<&'static str, f64> = phf_map! {
    "AA/TT" => -7.6, "TT/AA" => -7.6,
    "AT/TA" => -7.2,
    "TA/AT" => -7.2,
    "CA/GT" => -8.5, "TG/AC" => -8.5,
    "GT/CA" => -8.4, "AC/TG" => -8.4,
    "CT/GA" => -7.8, "AG/TC" => -7.8,
    "GA/CT" => -8.2, "TC/AG" => -8.2,
    "CG/GC" => -10.6,
    "GC/CG" => -9.8,
    "GG/CC" => -8.0, "CC/GG" => -8.0,
};

// SantaLucia & Hicks (2004), kcal/(mol K)
static NN_ENTROPY: Map<&'static str, f64> = phf_map! {
    "AA/TT" => -0.0213, "TT/AA" => -0.0213,
    "AT/TA" => -0.0204,
    "TA/AT" => -0.0213,
    "CA/GT" => -0.0227, "TG/AC" => -0.0227,
    "GT/CA" => -0.0224, "AC/TG" => -0.0224,
    "CT/GA" => -0.0210, "AG/TC" => -0.0210,
    "GA/CT" => -0.0222, "TC/AG" => -0.0222,
    "CG/GC" => -0.0272,
    "GC/CG" => -0.0244,
    "GG/CC" => -0.0199, "CC/GG" => -0.0199,
};

// Kilchherr et al. (2016), kcal/mol
static STACKING_ENERGY: Map<&'static str, f64> = phf_map! {
    "AA/TT" => -1.36, "TT/AA" => -1.36,
    "AT/TA" => -2.35,
    "TA/AT" => -1.01,
    "CA/GT" => -0.81, "GT/CA" => -0.81,
    "TG/AC" => -2.03, "AC/TG" => -2.03,
    "CT/GA" => -1.39, "GA/CT" => -1.39,
    "AG/TC" => -1.60, "TC/AG" => -1.60,
    "CG/GC" => -2.06,
    "GC/CG" => -3.42,
    "GG/CC" => -1.64, "CC/GG" => -1.64,
};

pub fn nn_enthalpy(step: &str) -> Option<f64> {
    NN_ENTHALPY.get(step).copied()
}

pub fn nn_entropy(step: &str) -> Option<f64> {
    NN_ENTROPY.get(step).copied()
}

pub fn stacking_energy(step: &str) -> Option<f64> {
    STACKING_ENERGY.get(step).copied()
}
