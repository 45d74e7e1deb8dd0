use crate::core::thermo::units::{molarity_to_chempot, molarity_to_lattice_volume};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value {value} for parameter '{name}'")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Thermodynamic conditions of one simulated system.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    /// Temperature in kelvin.
    pub temp: f64,
    /// Cation concentration in mol/L, used for the salt correction.
    pub cation_molarity: f64,
    /// Reduced staple chemical potential, in kelvin.
    pub staple_u: f64,
    /// System volume in lattice sites.
    pub volume: f64,
    pub cyclic: bool,
    pub stacking_mult: f64,
}

impl SystemConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        validate_temp(self.temp)?;
        positive("cation_molarity", self.cation_molarity)?;
        positive("volume", self.volume)?;
        validate_stacking_mult(self.stacking_mult)?;
        if !self.staple_u.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "staple_u",
                value: self.staple_u,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

pub(crate) fn validate_temp(temp: f64) -> Result<(), ConfigError> {
    positive("temp", temp)
}

pub(crate) fn validate_stacking_mult(stacking_mult: f64) -> Result<(), ConfigError> {
    if stacking_mult.is_finite() && stacking_mult >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name: "stacking_mult",
            value: stacking_mult,
        })
    }
}

#[derive(Default)]
pub struct SystemConfigBuilder {
    temp: Option<f64>,
    cation_molarity: Option<f64>,
    staple_u: Option<f64>,
    volume: Option<f64>,
    cyclic: Option<bool>,
    stacking_mult: Option<f64>,
}

impl SystemConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temp(mut self, temp: f64) -> Self {
        self.temp = Some(temp);
        self
    }
    pub fn cation_molarity(mut self, molarity: f64) -> Self {
        self.cation_molarity = Some(molarity);
        self
    }
    pub fn staple_u(mut self, staple_u: f64) -> Self {
        self.staple_u = Some(staple_u);
        self
    }
    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
    pub fn cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = Some(cyclic);
        self
    }
    pub fn stacking_mult(mut self, mult: f64) -> Self {
        self.stacking_mult = Some(mult);
        self
    }

    /// Derives the staple chemical potential and the system volume from the staple
    /// concentration.
    ///
    /// The volume holds exactly one staple at `staple_molarity`. The chemical potential is
    /// taken at `temp_for_staple_u` and scaled by `staple_u_mult`.
    pub fn staple_conditions(
        mut self,
        staple_molarity: f64,
        temp_for_staple_u: f64,
        lattice_site_volume: f64,
        staple_u_mult: f64,
    ) -> Self {
        self.staple_u = Some(
            staple_u_mult
                * molarity_to_chempot(staple_molarity, temp_for_staple_u, lattice_site_volume),
        );
        self.volume = Some(molarity_to_lattice_volume(
            staple_molarity,
            lattice_site_volume,
        ));
        self
    }

    pub fn build(self) -> Result<SystemConfig, ConfigError> {
        let config = SystemConfig {
            temp: self.temp.ok_or(ConfigError::MissingParameter("temp"))?,
            cation_molarity: self
                .cation_molarity
                .ok_or(ConfigError::MissingParameter("cation_molarity"))?,
            staple_u: self
                .staple_u
                .ok_or(ConfigError::MissingParameter("staple_u"))?,
            volume: self.volume.ok_or(ConfigError::MissingParameter("volume"))?,
            cyclic: self.cyclic.unwrap_or(false),
            stacking_mult: self.stacking_mult.unwrap_or(1.0),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> SystemConfigBuilder {
        SystemConfigBuilder::new()
            .temp(330.0)
            .cation_molarity(0.5)
            .staple_u(-10.0)
            .volume(1e6)
    }

    #[test]
    fn build_succeeds_with_all_required_parameters() {
        let config = complete_builder().build().unwrap();
        assert_eq!(config.temp, 330.0);
        assert_eq!(config.cation_molarity, 0.5);
        assert_eq!(config.staple_u, -10.0);
        assert_eq!(config.volume, 1e6);
    }

    #[test]
    fn build_defaults_optional_parameters() {
        let config = complete_builder().build().unwrap();
        assert!(!config.cyclic);
        assert_eq!(config.stacking_mult, 1.0);
    }

    #[test]
    fn build_fails_if_temp_is_missing() {
        let result = SystemConfigBuilder::new()
            .cation_molarity(0.5)
            .staple_u(0.0)
            .volume(1.0)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("temp")));
    }

    #[test]
    fn build_fails_if_volume_is_missing() {
        let result = SystemConfigBuilder::new()
            .temp(300.0)
            .cation_molarity(0.5)
            .staple_u(0.0)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("volume")));
    }

    #[test]
    fn build_rejects_non_positive_temperature() {
        let result = complete_builder().temp(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "temp", .. })
        ));
    }

    #[test]
    fn build_rejects_negative_stacking_multiplier() {
        let result = complete_builder().stacking_mult(-1.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "stacking_mult",
                ..
            })
        ));
    }

    #[test]
    fn staple_conditions_derive_chemical_potential_and_volume() {
        let config = SystemConfigBuilder::new()
            .temp(330.0)
            .cation_molarity(0.5)
            .staple_conditions(1e-6, 330.0, 4e-25, 2.0)
            .build()
            .unwrap();
        let expected_u = 2.0 * molarity_to_chempot(1e-6, 330.0, 4e-25);
        let expected_volume = molarity_to_lattice_volume(1e-6, 4e-25);
        assert!((config.staple_u - expected_u).abs() < 1e-9);
        assert!((config.volume - expected_volume).abs() < 1e-6 * expected_volume);
    }
}
