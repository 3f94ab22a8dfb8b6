use yaml_rust::Yaml;

use crate::errors::ConfigError;

/// Adiabatic index of an ideal gas together with the combinations of it that show up in the
/// exact Riemann solver.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AdiabaticIndex {
    gamma: f64,
    gamma_inv: f64,
    odgm1: f64,
    odgp1: f64,
}

impl From<f64> for AdiabaticIndex {
    fn from(value: f64) -> Self {
        AdiabaticIndex {
            gamma: value,
            gamma_inv: 1. / value,
            odgm1: 1. / (value - 1.),
            odgp1: 1. / (value + 1.),
        }
    }
}

impl From<AdiabaticIndex> for f64 {
    fn from(value: AdiabaticIndex) -> Self {
        value.gamma
    }
}

impl AdiabaticIndex {
    /// Checked constructor, the exact solver needs `gamma > 1`.
    pub fn new(gamma: f64) -> Result<Self, ConfigError> {
        if gamma.is_finite() && gamma > 1. {
            Ok(gamma.into())
        } else {
            Err(ConfigError::InvalidAdiabaticIndex(gamma))
        }
    }

    /// Reads `gamma` from a configuration section.
    pub fn init(cfg: &Yaml) -> Result<Self, ConfigError> {
        let gamma = cfg["gamma"]
            .as_f64()
            .or_else(|| cfg["gamma"].as_i64().map(|g| g as f64))
            .ok_or(ConfigError::MissingParameter("gamma".to_string()))?;
        Self::new(gamma)
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn gp1d2g(&self) -> f64 {
        0.5 * (self.gamma + 1.) * self.gamma_inv
    }

    pub fn gm1d2g(&self) -> f64 {
        0.5 * (self.gamma - 1.) * self.gamma_inv
    }

    pub fn gm1dgp1(&self) -> f64 {
        (self.gamma - 1.) * self.odgp1
    }

    pub fn gm1d2(&self) -> f64 {
        0.5 * (self.gamma - 1.)
    }

    pub fn odgm1(&self) -> f64 {
        self.odgm1
    }

    pub fn tdgm1(&self) -> f64 {
        2. * self.odgm1
    }

    pub fn tdgp1(&self) -> f64 {
        2. * self.odgp1
    }

    /// 2 gamma / (gamma - 1)
    pub fn tgdgm1(&self) -> f64 {
        2. * self.gamma * self.odgm1
    }

    pub fn sound_speed(&self, pressure: f64, density_inv: f64) -> f64 {
        (self.gamma * pressure * density_inv).sqrt()
    }

    /// Pressure from the thermal energy per unit volume.
    pub fn gas_pressure_from_thermal_energy(&self, thermal_energy: f64) -> f64 {
        (self.gamma - 1.) * thermal_energy
    }

    /// Thermal energy per unit volume from the pressure.
    pub fn gas_thermal_energy_from_pressure(&self, pressure: f64) -> f64 {
        pressure * self.odgm1
    }
}
