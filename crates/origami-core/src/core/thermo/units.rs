/// Avogadro constant, 1/mol.
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Lattice sites per litre for sites of `lattice_site_volume` cubic metres.
fn sites_per_litre(lattice_site_volume: f64) -> f64 {
    1e-3 / lattice_site_volume
}

/// Number of molecules per lattice site at the given molarity.
fn particles_per_site(molarity: f64, lattice_site_volume: f64) -> f64 {
    molarity * AVOGADRO / sites_per_litre(lattice_site_volume)
}

/// Volume, in lattice sites, that holds exactly one molecule at `molarity`.
///
/// This is the volume that cancels the fugacity in the grand canonical acceptance test.
pub fn molarity_to_lattice_volume(molarity: f64, lattice_site_volume: f64) -> f64 {
    1.0 / particles_per_site(molarity, lattice_site_volume)
}

/// Reduced chemical potential (`u / k_B`, in kelvin) of an ideal solute at `molarity`.
pub fn molarity_to_chempot(molarity: f64, temp: f64, lattice_site_volume: f64) -> f64 {
    temp * particles_per_site(molarity, lattice_site_volume).ln()
}

/// Volume, in lattice sites, equivalent to a reduced chemical potential at `temp`.
pub fn chempot_to_volume(chempot: f64, temp: f64) -> f64 {
    (-chempot / temp).exp()
}
