use crate::cli::ThermoArgs;
use crate::error::{CliError, Result};
use lattice_origami::core::thermo::nearest_neighbour::{
    calc_seq_spec_stacking_energy, calc_unitless_hybridization_thermo,
    calc_unitless_misbinding_thermo,
};
use lattice_origami::core::thermo::sequence::{calc_rev_comp_seq, seq_is_palindromic};
use std::fmt::Write;
use tracing::debug;

pub fn run(args: ThermoArgs) -> Result<()> {
    if !(args.temp.is_finite() && args.temp > 0.0) {
        return Err(CliError::Argument(format!(
            "Temperature must be positive, got {}",
            args.temp
        )));
    }
    if !(args.cation_molarity.is_finite() && args.cation_molarity > 0.0) {
        return Err(CliError::Argument(format!(
            "Cation molarity must be positive, got {}",
            args.cation_molarity
        )));
    }

    print!("{}", report(&args)?);
    Ok(())
}

fn report(args: &ThermoArgs) -> Result<String> {
    let sequence = args.sequence.to_ascii_uppercase();
    let (temp, cation) = (args.temp, args.cation_molarity);
    debug!(%sequence, temp, cation, "Computing nearest-neighbour thermodynamics.");

    let duplex = calc_unitless_hybridization_thermo(&sequence, temp, cation)?;
    let mut out = String::new();
    let _ = writeln!(out, "{:<28}{}", "Sequence", sequence);
    let _ = writeln!(out, "{:<28}{}", "Complement", calc_rev_comp_seq(&sequence)?);
    let _ = writeln!(out, "{:<28}{}", "Palindromic", seq_is_palindromic(&sequence)?);
    let _ = writeln!(out, "{:<28}{:.4}", "Enthalpy (K)", duplex.enthalpy);
    let _ = writeln!(out, "{:<28}{:.4}", "Entropy", duplex.entropy);
    let _ = writeln!(out, "{:<28}{:.4}", "Free energy (K)", duplex.free_energy(temp));

    if let Some(partner) = &args.partner {
        let partner = partner.to_ascii_uppercase();
        let misbinding = calc_unitless_misbinding_thermo(&sequence, &partner, temp, cation)?;
        let stacking = calc_seq_spec_stacking_energy(&sequence, &partner, temp, cation)?;
        let _ = writeln!(
            out,
            "{:<28}{:.4}",
            "Misbinding free energy (K)",
            misbinding.free_energy(temp)
        );
        let _ = writeln!(out, "{:<28}{:.4}", "Stacking energy (K)", stacking);
    }
    Ok(out)
}
