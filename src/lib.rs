//! Exact Riemann solver for the 1D Euler equations of an ideal gas.
//!
//! Given the conserved states on both sides of a cell interface, the solver finds the pressure
//! and velocity in the star region with a Newton-Raphson iteration, samples the self-similar
//! solution at the interface and returns the Euler flux through it (Toro (2009), chapter 4).
//! Whole sweeps of interfaces can be evaluated in parallel from flat buffers.

pub use errors::{ConfigError, RiemannError};
pub use gas_law::AdiabaticIndex;
pub use interface::{flux_to_array, InterfaceStates, NUM_FLUXES, NUM_INPUTS};
pub use physical_quantities::{Conserved, Primitive, State};
pub use riemann_solver::{
    ConvergencePolicy, Diagnostics, ExactRiemannSolver, InterfaceSolution, SolverConfig,
    StarRegionSolution, WavePattern,
};
pub use sweep::SweepDiagnostics;

mod errors;
pub mod gas_law;
mod interface;
pub mod physical_quantities;
pub mod riemann_solver;
mod sweep;
