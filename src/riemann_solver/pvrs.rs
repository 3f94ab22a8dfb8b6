/// Primitive variable Riemann solver (Toro (2009), section 9.3).
///
/// Only its linearised star pressure is used here, as the starting point of the two-shock
/// estimate that seeds the exact solver.
pub struct PVRiemannSolver;

impl PVRiemannSolver {
    pub(super) fn rho_bar(rho_l: f64, rho_r: f64) -> f64 {
        0.5 * (rho_l + rho_r)
    }

    pub(super) fn p_bar(p_l: f64, p_r: f64) -> f64 {
        0.5 * (p_l + p_r)
    }

    pub(super) fn a_bar(a_l: f64, a_r: f64) -> f64 {
        0.5 * (a_l + a_r)
    }

    /// Linearised estimate of the star pressure, clamped to be non-negative.
    pub fn p_star(
        rho_l: f64,
        rho_r: f64,
        p_l: f64,
        p_r: f64,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
    ) -> f64 {
        let rho_bar = Self::rho_bar(rho_l, rho_r);
        let p_bar = Self::p_bar(p_l, p_r);
        let a_bar = Self::a_bar(a_l, a_r);
        (p_bar + 0.5 * (v_l - v_r) * rho_bar * a_bar).max(0.)
    }
}
