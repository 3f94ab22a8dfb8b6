use thiserror::Error;

/// Conditions under which a single interface evaluation cannot produce a trustworthy flux.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RiemannError {
    #[error(
        "Divergence in Newton-Raphson iteration after {iterations} iterations: \
         p = {pressure:e}, u = {velocity:e}, last relative change = {last_change:e}"
    )]
    NonConvergence {
        pressure: f64,
        velocity: f64,
        last_change: f64,
        iterations: usize,
    },
    #[error(
        "Vacuum is generated by initial data: \
         2 / (gamma - 1) * (a_l + a_r) = {critical_velocity:e} \
         <= v_r - v_l = {velocity_difference:e}"
    )]
    VacuumGeneration {
        critical_velocity: f64,
        velocity_difference: f64,
    },
    #[error(
        "Vacuum state on input: left density = {left_density:e}, \
         right density = {right_density:e}"
    )]
    VacuumInput {
        left_density: f64,
        right_density: f64,
    },
    #[error("Expected {expected} values for an interface, but found {found}")]
    InvalidLayout { expected: usize, found: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required parameter in configuration: {0}")]
    MissingParameter(String),
    #[error("Adiabatic index must be a finite number > 1, but found: {0}")]
    InvalidAdiabaticIndex(f64),
    #[error("Invalid value for parameter {name}: {value}")]
    InvalidParameter { name: String, value: String },
    #[error("Unknown convergence policy configured: {0}")]
    UnknownConvergencePolicy(String),
}
