use crate::cli::CheckArgs;
use crate::config::PartialSimulationConfig;
use crate::error::Result;
use lattice_origami::core::io::input::OrigamiInput;
use lattice_origami::engine::system::OrigamiSystem;
use std::fmt::Write;
use tracing::info;

pub fn run(args: CheckArgs) -> Result<()> {
    let partial_config = PartialSimulationConfig::from_file(&args.params)?;
    info!("Merging parameters from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    info!("Loading origami input from {:?}", &args.input);
    let input = OrigamiInput::load(&args.input)?;
    let system = OrigamiSystem::from_input(&input, config)?;

    info!("Recomputing occupancy, counts and energy from scratch...");
    system.check_all_constraints()?;

    print!("{}", summarize(&system));
    Ok(())
}

/// Human-readable report of the current configuration.
fn summarize(system: &OrigamiSystem) -> String {
    let mut out = String::new();
    let temp = system.temp();
    let rows: [(&str, String); 14] = [
        ("Temperature (K)", format!("{:.2}", temp)),
        ("Staple chemical potential (K)", format!("{:.4}", system.staple_u())),
        ("Volume (lattice sites)", format!("{:.4e}", system.volume())),
        ("Energy (K)", format!("{:.4}", system.energy())),
        (
            "  Hybridization free energy (K)",
            format!(
                "{:.4}",
                system.hybridization_enthalpy() - temp * system.hybridization_entropy()
            ),
        ),
        ("  Stacking energy (K)", format!("{:.4}", system.stacking_energy())),
        ("Staples", system.num_staples().to_string()),
        ("Unassigned domains", system.num_unassigned_domains().to_string()),
        ("Bound pairs", system.num_bound_domain_pairs().to_string()),
        ("  Fully bound", system.num_fully_bound_domain_pairs().to_string()),
        ("  Self bound", system.num_self_bound_domain_pairs().to_string()),
        ("  Misbound", system.num_misbound_domain_pairs().to_string()),
        ("Stacked pairs", system.num_stacked_domain_pairs().to_string()),
        (
            "Helix triples / junction quads",
            format!(
                "{} / {}",
                system.num_linear_helix_trips(),
                system.num_stacked_junct_quads()
            ),
        ),
    ];
    for (label, value) in rows {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{:<32}{}", label, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::path::Path;

    const INPUT: &str = r#"
identities = [[1, 2], [-2, -1]]
sequences = [["TCCTCATA", "GGTTGTAA"], ["TTACAACC", "TATGAGGA"]]

[[chains]]
index = 0
identity = 0
positions = [[0, 0, 0], [1, 0, 0]]
orientations = [[0, -1, 0], [0, 1, 0]]

[[chains]]
index = 1
identity = 1
positions = [[1, 0, 0], [0, 0, 0]]
orientations = [[0, -1, 0], [0, 1, 0]]
"#;

    const PARAMS: &str = r#"
temp = 330.0
cation-molarity = 0.5
staple-molarity = 1e-6
"#;

    fn check_args(input: &Path, params: &Path) -> CheckArgs {
        let cli = Cli::parse_from([
            "origami",
            "check",
            "-i",
            input.to_str().unwrap(),
            "-c",
            params.to_str().unwrap(),
        ]);
        match cli.command {
            Commands::Check(args) => args,
            _ => panic!("Expected 'check' subcommand"),
        }
    }

    #[test]
    fn run_succeeds_for_a_consistent_bound_system() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("system.toml");
        let params = dir.path().join("params.toml");
        fs::write(&input, INPUT).unwrap();
        fs::write(&params, PARAMS).unwrap();

        assert!(run(check_args(&input, &params)).is_ok());
    }

    #[test]
    fn summary_reports_counts_of_the_loaded_system() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("system.toml");
        let params = dir.path().join("params.toml");
        fs::write(&input, INPUT).unwrap();
        fs::write(&params, PARAMS).unwrap();

        let args = check_args(&input, &params);
        let config = PartialSimulationConfig::from_file(&args.params)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();
        let system =
            OrigamiSystem::from_input(&OrigamiInput::load(&args.input).unwrap(), config).unwrap();

        let summary = summarize(&system);
        assert!(summary.contains("Staples"));
        let line = |label: &str| {
            summary
                .lines()
                .find(|l| l.starts_with(label))
                .map(|l| l[label.len()..].trim().to_string())
                .unwrap()
        };
        assert_eq!(line("Bound pairs"), "2");
        assert_eq!(line("  Fully bound"), "2");
        assert_eq!(line("Stacked pairs"), "2");
        assert_eq!(line("Unassigned domains"), "0");
    }

    #[test]
    fn run_reports_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let params = dir.path().join("params.toml");
        fs::write(&params, PARAMS).unwrap();

        let result = run(check_args(&dir.path().join("missing.toml"), &params));
        assert!(matches!(result, Err(crate::error::CliError::Input(_))));
    }
}
