use crate::{
    gas_law::AdiabaticIndex,
    physical_quantities::{Primitive, State},
};

use super::PVRiemannSolver;

/// Two-shock Riemann solver.
///
/// Estimates the pressure in the star region by assuming both the left and right waves are
/// shock waves, evaluated at the pressure of the primitive variable Riemann solver (Toro
/// (2009), section 9.4.2). The estimate is used as initial guess for the exact solver.
pub struct TSRiemannSolver;

impl TSRiemannSolver {
    fn g(p: f64, rho_state: f64, p_state: f64, gamma: &AdiabaticIndex) -> f64 {
        let a = gamma.tdgp1() / rho_state;
        let b = gamma.gm1dgp1() * p_state;
        f64::sqrt(a / (p + b))
    }

    /// Initial guess for the Newton-Raphson iteration.
    ///
    /// Always strictly positive: a non-positive two-shock estimate is replaced by `p_min`.
    pub fn pressure_guess(
        left: &State<Primitive>,
        right: &State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
        p_min: f64,
        gamma: &AdiabaticIndex,
    ) -> f64 {
        let ppv = PVRiemannSolver::p_star(
            left.density(),
            right.density(),
            left.pressure(),
            right.pressure(),
            v_l,
            v_r,
            a_l,
            a_r,
        );

        let g_l = Self::g(ppv, left.density(), left.pressure(), gamma);
        let g_r = Self::g(ppv, right.density(), right.pressure(), gamma);
        let p_0 = (g_l * left.pressure() + g_r * right.pressure() - (v_r - v_l)) / (g_l + g_r);

        if p_0 > 0. {
            p_0
        } else {
            p_min
        }
    }
}
