//! Exact Riemann solver for the Euler equations and the pieces it is built from.
use std::str::FromStr;

use glam::DVec3;
use yaml_rust::Yaml;

use crate::{
    errors::ConfigError,
    gas_law::AdiabaticIndex,
    physical_quantities::{Conserved, Primitive, State},
};

mod exact;
mod pvrs;
mod sample;
mod tsrs;
mod vacuum;

pub use exact::{
    ExactRiemannSolver, InterfaceSolution, NewtonRaphson, NewtonStep, PressureFunction,
};
pub use pvrs::PVRiemannSolver;
pub use sample::{SampledState, WavePattern};
pub use tsrs::TSRiemannSolver;
pub use vacuum::VacuumRiemannSolver;

/// Relative pressure change below which the Newton-Raphson iteration is considered converged.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-6;
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Pressure and velocity in the star region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiemannStarValues {
    pub p: f64,
    pub u: f64,
}

/// Outcome of the Newton-Raphson search for the star region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StarRegionSolution {
    /// The relative change of the pressure dropped below the tolerance at `iterations`
    /// (counted from 0).
    Converged { p: f64, u: f64, iterations: usize },
    /// The iteration cap was reached, or the iteration produced a non-finite pressure after
    /// `iterations` steps. `p` is the last (floored) iterate.
    NonConverged {
        p: f64,
        u: f64,
        last_change: f64,
        iterations: usize,
    },
}

impl StarRegionSolution {
    pub fn values(&self) -> RiemannStarValues {
        match *self {
            StarRegionSolution::Converged { p, u, .. } => RiemannStarValues { p, u },
            StarRegionSolution::NonConverged { p, u, .. } => RiemannStarValues { p, u },
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, StarRegionSolution::Converged { .. })
    }
}

/// What to do when the exact solution cannot be trusted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConvergencePolicy {
    /// Report non-convergence and vacuum as errors.
    #[default]
    Strict,
    /// Continue with the last Newton iterate or the exact vacuum solution and only flag it in
    /// the [`Diagnostics`].
    BestEffort,
}

impl FromStr for ConvergencePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" | "Strict" => Ok(ConvergencePolicy::Strict),
            "best_effort" | "BestEffort" => Ok(ConvergencePolicy::BestEffort),
            _ => Err(ConfigError::UnknownConvergencePolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub tolerance: f64,
    pub max_iterations: usize,
    pub policy: ConvergencePolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            policy: ConvergencePolicy::default(),
        }
    }
}

impl SolverConfig {
    /// Parse the (optional) `riemann_solver` configuration section. Missing values fall back
    /// to their defaults, values of the wrong type are rejected.
    pub fn init(cfg: &Yaml) -> Result<Self, ConfigError> {
        let invalid = |name: &str, value: &Yaml| ConfigError::InvalidParameter {
            name: format!("riemann_solver:{name}"),
            value: format!("{value:?}"),
        };

        let tolerance = match &cfg["tolerance"] {
            Yaml::BadValue => DEFAULT_TOLERANCE,
            Yaml::Integer(i) => *i as f64,
            value => value.as_f64().ok_or_else(|| invalid("tolerance", value))?,
        };
        if !(tolerance.is_finite() && tolerance > 0.) {
            return Err(ConfigError::InvalidParameter {
                name: "riemann_solver:tolerance".to_string(),
                value: tolerance.to_string(),
            });
        }
        let max_iterations = match &cfg["max_iterations"] {
            Yaml::BadValue => DEFAULT_MAX_ITERATIONS,
            Yaml::Integer(i) if *i >= 1 => *i as usize,
            value => return Err(invalid("max_iterations", value)),
        };
        let policy = match &cfg["convergence"] {
            Yaml::BadValue => ConvergencePolicy::default(),
            Yaml::String(policy) => policy.parse()?,
            value => return Err(invalid("convergence", value)),
        };
        Ok(Self {
            tolerance,
            max_iterations,
            policy,
        })
    }
}

/// Per interface record of everything that happened off the nominal path.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    pub left_pressure_floored: bool,
    pub right_pressure_floored: bool,
    /// The exact vacuum solution was used.
    pub vacuum: bool,
    /// The last Newton iterate was used without satisfying the tolerance.
    pub non_converged: bool,
    pub iterations: usize,
    /// Region of the wave pattern the interface lies in (`None` for vacuum solutions).
    pub pattern: Option<WavePattern>,
}

/// Euler flux through a surface with normal along the x axis, evaluated at the half state.
pub fn flux_from_half_state(
    half_state: &State<Primitive>,
    gamma: &AdiabaticIndex,
) -> State<Conserved> {
    let v = half_state.velocity().x;
    let rho_v = half_state.density() * v;
    let energy = gamma.gas_thermal_energy_from_pressure(half_state.pressure())
        + 0.5 * half_state.density() * half_state.velocity().length_squared();
    State::<Conserved>::new(
        rho_v,
        rho_v * half_state.velocity() + half_state.pressure() * DVec3::X,
        (energy + half_state.pressure()) * v,
    )
    .with_passive(rho_v * half_state.passive())
}
