use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Origami CLI - inspect lattice DNA origami configurations and their nearest-neighbour thermodynamics.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a system, verify its bookkeeping from scratch and print its energy and counts.
    Check(CheckArgs),
    /// Print nearest-neighbour hybridization quantities for a DNA sequence.
    Thermo(ThermoArgs),
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the origami input file (identities, sequences and chains) in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the simulation parameter file in TOML format.
    #[arg(short = 'c', long = "params", required = true, value_name = "PATH")]
    pub params: PathBuf,

    /// Override the temperature (K) from the parameter file.
    #[arg(short, long, value_name = "FLOAT")]
    pub temp: Option<f64>,

    /// Treat the scaffold as cyclic, overriding the parameter file.
    #[arg(long)]
    pub cyclic: bool,

    /// Set a specific parameter value, overriding the parameter file.
    /// Can be used multiple times. Example: -S cation-molarity=0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `thermo` subcommand.
#[derive(Args, Debug)]
pub struct ThermoArgs {
    /// DNA sequence, 5' to 3', using only A, C, G and T.
    #[arg(value_name = "SEQUENCE")]
    pub sequence: String,

    /// Temperature (K) at which the free energy is evaluated.
    #[arg(short, long, default_value_t = 300.0, value_name = "FLOAT")]
    pub temp: f64,

    /// Cation concentration (mol/L) used for the salt correction.
    #[arg(long = "cation", default_value_t = 0.5, value_name = "FLOAT")]
    pub cation_molarity: f64,

    /// Second sequence; prints its misbinding and stacking energies against the first.
    #[arg(long, value_name = "SEQUENCE")]
    pub partner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_command_parses_required_and_repeated_arguments() {
        let cli = Cli::parse_from([
            "origami", "-vv", "check", "-i", "system.toml", "-c", "params.toml", "--temp",
            "340", "-S", "cation-molarity=0.2", "-S", "cyclic=true",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.input, PathBuf::from("system.toml"));
                assert_eq!(args.params, PathBuf::from("params.toml"));
                assert_eq!(args.temp, Some(340.0));
                assert!(!args.cyclic);
                assert_eq!(args.set_values.len(), 2);
            }
            _ => panic!("Expected 'check' subcommand"),
        }
    }

    #[test]
    fn thermo_command_uses_defaults() {
        let cli = Cli::parse_from(["origami", "thermo", "GATTACA"]);
        match cli.command {
            Commands::Thermo(args) => {
                assert_eq!(args.sequence, "GATTACA");
                assert_eq!(args.temp, 300.0);
                assert_eq!(args.cation_molarity, 0.5);
                assert!(args.partner.is_none());
            }
            _ => panic!("Expected 'thermo' subcommand"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["origami", "-q", "-v", "thermo", "ACGT"]);
        assert!(result.is_err());
    }
}
