//! Small origami systems shared by the engine tests.

use super::config::{SystemConfig, SystemConfigBuilder};
use super::system::OrigamiSystem;
use crate::core::lattice::LatticeVector;
use crate::core::models::ids::DomainRef;

pub const TEMP: f64 = 330.0;

pub fn f64_approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6 * a.abs().max(1.0)
}

pub fn v(x: i32, y: i32, z: i32) -> LatticeVector {
    LatticeVector::new(x, y, z)
}

pub fn y() -> LatticeVector {
    LatticeVector::yhat()
}

/// Five-domain scaffold; staple 1 binds scaffold domains 1 and 0, staple 2 binds 3 and 2,
/// staple 3 binds 4.
pub fn fixture_identities() -> (Vec<Vec<i32>>, Vec<Vec<String>>) {
    let identities = vec![vec![1, 2, 3, 4, 5], vec![-2, -1], vec![-4, -3], vec![-5]];
    let sequences = [
        vec!["TCCTCATA", "GGTTGTAA", "CATCAGCA", "AGTCCTTG", "CGATGGAC"],
        vec!["TTACAACC", "TATGAGGA"],
        vec!["CAAGGACT", "TGCTGATG"],
        vec!["GTCCATCG"],
    ]
    .iter()
    .map(|seqs| seqs.iter().map(|s| s.to_string()).collect())
    .collect();
    (identities, sequences)
}

pub fn fixture_config() -> SystemConfig {
    SystemConfigBuilder::new()
        .temp(TEMP)
        .cation_molarity(0.5)
        .staple_u(-10.0)
        .volume(1e6)
        .build()
        .unwrap()
}

pub fn empty_system() -> OrigamiSystem {
    let (identities, sequences) = fixture_identities();
    OrigamiSystem::new(identities, sequences, &Vec::new(), fixture_config()).unwrap()
}

pub fn place(system: &mut OrigamiSystem, r: DomainRef, pos: LatticeVector, ore: LatticeVector) {
    let delta = system.set_checked_domain_config(r, pos, ore).unwrap();
    assert!(delta.is_some(), "placing {r} at {pos} with {ore} was rejected");
}

pub fn place_scaffold(system: &mut OrigamiSystem, placements: &[(LatticeVector, LatticeVector)]) {
    for (d, &(pos, ore)) in placements.iter().enumerate() {
        place(system, DomainRef::new(0, d), pos, ore);
    }
}

/// Binds a staple of identity 1 onto scaffold domains 1 and 0 as laid out by
/// [`junction_system`].
pub fn place_staple_one(system: &mut OrigamiSystem, index: usize) {
    place(system, DomainRef::new(index, 0), v(1, 0, 0), -y());
    place(system, DomainRef::new(index, 1), v(0, 0, 0), y());
}

/// Scaffold domains 0..4 on a square with a crossover between domains 1 and 2, all four
/// bound by staples 1 and 2 (chain indices 1 and 2).
pub fn junction_system() -> OrigamiSystem {
    let mut system = empty_system();
    place_scaffold(
        &mut system,
        &[
            (v(0, 0, 0), -y()),
            (v(1, 0, 0), y()),
            (v(1, 1, 0), -y()),
            (v(0, 1, 0), y()),
        ],
    );
    let one = system.add_chain(1).unwrap();
    place_staple_one(&mut system, one);
    let two = system.add_chain(2).unwrap();
    place(&mut system, DomainRef::new(two, 0), v(0, 1, 0), -y());
    place(&mut system, DomainRef::new(two, 1), v(1, 1, 0), y());
    system
}

/// Scaffold domains 0..3 on a straight line, bound by staple 1 and half of staple 2.
pub fn linear_system() -> OrigamiSystem {
    let mut system = empty_system();
    place_scaffold(
        &mut system,
        &[(v(0, 0, 0), -y()), (v(1, 0, 0), y()), (v(2, 0, 0), -y())],
    );
    let one = system.add_chain(1).unwrap();
    place_staple_one(&mut system, one);
    let two = system.add_chain(2).unwrap();
    place(&mut system, DomainRef::new(two, 1), v(2, 0, 0), y());
    system
}
