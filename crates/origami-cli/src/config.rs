use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use lattice_origami::engine::config::{SystemConfig, SystemConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Volume of one lattice site in litres, used when the parameter file gives none.
const DEFAULT_LATTICE_SITE_VOLUME: f64 = 4e-25;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialSimulationConfig {
    temp: Option<f64>,
    cation_molarity: Option<f64>,
    staple_molarity: Option<f64>,
    temp_for_staple_u: Option<f64>,
    staple_u_mult: Option<f64>,
    lattice_site_volume: Option<f64>,
    cyclic: Option<bool>,
    stacking_mult: Option<f64>,
}

impl PartialSimulationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading parameters from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn merge_with_cli(mut self, args: &CheckArgs) -> Result<SystemConfig> {
        self.apply_set_values(&args.set_values)?;

        let temp = args
            .temp
            .or(self.temp)
            .ok_or_else(|| required("temp"))?;
        let cation_molarity = self
            .cation_molarity
            .ok_or_else(|| required("cation-molarity"))?;
        let staple_molarity = self
            .staple_molarity
            .ok_or_else(|| required("staple-molarity"))?;

        SystemConfigBuilder::new()
            .temp(temp)
            .cation_molarity(cation_molarity)
            .staple_conditions(
                staple_molarity,
                self.temp_for_staple_u.unwrap_or(temp),
                self.lattice_site_volume
                    .unwrap_or(DEFAULT_LATTICE_SITE_VOLUME),
                self.staple_u_mult.unwrap_or(1.0),
            )
            .cyclic(args.cyclic || self.cyclic.unwrap_or(false))
            .stacking_mult(self.stacking_mult.unwrap_or(1.0))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "temp" => self.temp = Some(parse_value(key, value_str)?),
                "cation-molarity" => self.cation_molarity = Some(parse_value(key, value_str)?),
                "staple-molarity" => self.staple_molarity = Some(parse_value(key, value_str)?),
                "temp-for-staple-u" => {
                    self.temp_for_staple_u = Some(parse_value(key, value_str)?)
                }
                "staple-u-mult" => self.staple_u_mult = Some(parse_value(key, value_str)?),
                "lattice-site-volume" => {
                    self.lattice_site_volume = Some(parse_value(key, value_str)?)
                }
                "cyclic" => self.cyclic = Some(parse_value(key, value_str)?),
                "stacking-mult" => self.stacking_mult = Some(parse_value(key, value_str)?),
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn required(key: &str) -> CliError {
    CliError::Config(format!(
        "A value for '{}' is required either in the parameter file or via CLI argument.",
        key
    ))
}

fn parse_value<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value_str)))
}
