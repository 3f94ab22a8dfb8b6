//! Flat buffer layout used by finite volume codes to hand interfaces to the solver.
//!
//! Per interface the input is the interleaved conserved state of both sides,
//! `[d_l, d_r, mx_l, mx_r, my_l, my_r, mz_l, mz_r, E_l, E_r]`, followed by
//! `[scalar_l, scalar_r]` when the `dual_energy` feature is enabled. The output is
//! `[mass, mx, my, mz, energy]` (plus the scalar flux with `dual_energy`).
use glam::DVec3;

use crate::{
    errors::RiemannError,
    physical_quantities::{Conserved, State},
};

/// Number of flux components per interface.
pub const NUM_FLUXES: usize = if cfg!(feature = "dual_energy") { 6 } else { 5 };
/// Number of input values per interface.
pub const NUM_INPUTS: usize = 2 * NUM_FLUXES;

/// The conserved states on both sides of an interface whose normal is the x axis.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InterfaceStates {
    pub left: State<Conserved>,
    pub right: State<Conserved>,
}

impl InterfaceStates {
    pub fn new(left: State<Conserved>, right: State<Conserved>) -> Self {
        Self { left, right }
    }

    /// Read the interleaved layout of a single interface.
    pub fn from_slice(values: &[f64]) -> Result<Self, RiemannError> {
        if values.len() != NUM_INPUTS {
            return Err(RiemannError::InvalidLayout {
                expected: NUM_INPUTS,
                found: values.len(),
            });
        }

        let side = |offset: usize| {
            let mut state = State::<Conserved>::new(
                values[offset],
                DVec3::new(values[2 + offset], values[4 + offset], values[6 + offset]),
                values[8 + offset],
            );
            if NUM_FLUXES > 5 {
                state[5] = values[10 + offset];
            }
            state
        };

        Ok(Self::new(side(0), side(1)))
    }

    pub fn to_array(&self) -> [f64; NUM_INPUTS] {
        std::array::from_fn(|i| {
            if i % 2 == 0 {
                self.left[i / 2]
            } else {
                self.right[i / 2]
            }
        })
    }
}

/// Write a flux in the output layout. Without `dual_energy` the scalar flux is dropped.
pub fn flux_to_array(flux: &State<Conserved>) -> [f64; NUM_FLUXES] {
    std::array::from_fn(|i| flux[i])
}
