use rayon::prelude::*;

use crate::{
    errors::RiemannError,
    interface::{flux_to_array, InterfaceStates, NUM_FLUXES, NUM_INPUTS},
    riemann_solver::{Diagnostics, ExactRiemannSolver, WavePattern},
};

/// Aggregated [`Diagnostics`] of a sweep over many interfaces.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepDiagnostics {
    pub interfaces: usize,
    /// Number of decoded states (not interfaces) whose pressure was floored.
    pub pressure_floors: usize,
    pub vacuum: usize,
    pub non_converged: usize,
    pub max_iterations: usize,
    /// Number of interfaces per [`WavePattern`], indexed by `usize::from(pattern)`.
    pub patterns: [usize; WavePattern::COUNT],
}

impl SweepDiagnostics {
    pub fn record(mut self, diagnostics: &Diagnostics) -> Self {
        self.interfaces += 1;
        self.pressure_floors += diagnostics.left_pressure_floored as usize
            + diagnostics.right_pressure_floored as usize;
        self.vacuum += diagnostics.vacuum as usize;
        self.non_converged += diagnostics.non_converged as usize;
        self.max_iterations = self.max_iterations.max(diagnostics.iterations);
        if let Some(pattern) = diagnostics.pattern {
            self.patterns[usize::from(pattern)] += 1;
        }
        self
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.interfaces += other.interfaces;
        self.pressure_floors += other.pressure_floors;
        self.vacuum += other.vacuum;
        self.non_converged += other.non_converged;
        self.max_iterations = self.max_iterations.max(other.max_iterations);
        for (count, other_count) in self.patterns.iter_mut().zip(other.patterns) {
            *count += other_count;
        }
        self
    }

    pub fn count(&self, pattern: WavePattern) -> usize {
        self.patterns[usize::from(pattern)]
    }
}

impl ExactRiemannSolver {
    /// Compute the flux through a single interface given in the flat input layout.
    pub fn solve_interface_slice(
        &self,
        values: &[f64],
    ) -> Result<[f64; NUM_FLUXES], RiemannError> {
        let states = InterfaceStates::from_slice(values)?;
        let solution = self.solve_for_flux(&states.left, &states.right)?;
        Ok(flux_to_array(&solution.flux))
    }

    /// Compute the fluxes of a whole sweep of interfaces in parallel.
    ///
    /// `inputs` holds `NUM_INPUTS` values per interface, `fluxes` receives `NUM_FLUXES` values
    /// per interface. In strict mode the first error encountered is returned and the content of
    /// `fluxes` is unspecified.
    pub fn solve_interfaces(
        &self,
        inputs: &[f64],
        fluxes: &mut [f64],
    ) -> Result<SweepDiagnostics, RiemannError> {
        if inputs.len() % NUM_INPUTS != 0 {
            return Err(RiemannError::InvalidLayout {
                expected: NUM_INPUTS * (inputs.len() / NUM_INPUTS + 1),
                found: inputs.len(),
            });
        }
        let num_interfaces = inputs.len() / NUM_INPUTS;
        if fluxes.len() != num_interfaces * NUM_FLUXES {
            return Err(RiemannError::InvalidLayout {
                expected: num_interfaces * NUM_FLUXES,
                found: fluxes.len(),
            });
        }

        inputs
            .par_chunks_exact(NUM_INPUTS)
            .zip(fluxes.par_chunks_exact_mut(NUM_FLUXES))
            .map(|(input, flux)| -> Result<SweepDiagnostics, RiemannError> {
                let states = InterfaceStates::from_slice(input)?;
                let solution = self.solve_for_flux(&states.left, &states.right)?;
                flux.copy_from_slice(&flux_to_array(&solution.flux));
                Ok(SweepDiagnostics::default().record(&solution.diagnostics))
            })
            .try_reduce(SweepDiagnostics::default, |a, b| Ok(a.merge(b)))
    }
}
