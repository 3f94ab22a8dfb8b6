use glam::DVec3;

use crate::{
    errors::RiemannError,
    gas_law::AdiabaticIndex,
    physical_quantities::{Primitive, State},
};

/// Exact Vacuum Riemann solver (Toro (2009), section 4.6).
pub struct VacuumRiemannSolver;

impl VacuumRiemannSolver {
    /// Detect vacuum on input and vacuum generation by the initial data (pressure positivity
    /// condition, Toro (2009) (4.40)).
    pub fn check(
        left: &State<Primitive>,
        right: &State<Primitive>,
        a_l: f64,
        a_r: f64,
        v_r_m_v_l: f64,
        gamma: &AdiabaticIndex,
    ) -> Result<(), RiemannError> {
        /* vacuum */
        if left.density() == 0. || right.density() == 0. {
            return Err(RiemannError::VacuumInput {
                left_density: left.density(),
                right_density: right.density(),
            });
        }
        /* vacuum generation */
        let critical_velocity = gamma.tdgm1() * (a_l + a_r);
        if critical_velocity <= v_r_m_v_l {
            return Err(RiemannError::VacuumGeneration {
                critical_velocity,
                velocity_difference: v_r_m_v_l,
            });
        }
        Ok(())
    }

    pub fn is_vacuum(
        left: &State<Primitive>,
        right: &State<Primitive>,
        a_l: f64,
        a_r: f64,
        v_r_m_v_l: f64,
        gamma: &AdiabaticIndex,
    ) -> bool {
        Self::check(left, right, a_l, a_r, v_r_m_v_l, gamma).is_err()
    }

    /// State inside the rarefaction fan adjacent to vacuum. `a` is negative for a right facing
    /// fan.
    fn sample_half_vacuum(
        non_vacuum: &State<Primitive>,
        v: f64,
        a: f64,
        s: f64,
        gamma: &AdiabaticIndex,
    ) -> State<Primitive> {
        let base = gamma.tdgp1() + gamma.gm1dgp1() * (v - s) / a;
        let v_half = gamma.tdgp1() * (a + gamma.gm1d2() * v + s);
        State::<Primitive>::new(
            non_vacuum.density() * base.powf(gamma.tdgm1()),
            DVec3::new(v_half, non_vacuum.velocity().y, non_vacuum.velocity().z),
            non_vacuum.pressure() * base.powf(gamma.tgdgm1()),
        )
        .with_passive(non_vacuum.passive())
    }

    fn sample_right_vacuum(
        left: &State<Primitive>,
        v_l: f64,
        a_l: f64,
        s: f64,
        gamma: &AdiabaticIndex,
    ) -> State<Primitive> {
        if s > v_l - a_l {
            let s_l = v_l + gamma.tdgm1() * a_l;
            if s < s_l {
                Self::sample_half_vacuum(left, v_l, a_l, s, gamma)
            } else {
                State::vacuum()
            }
        } else {
            *left
        }
    }

    fn sample_left_vacuum(
        right: &State<Primitive>,
        v_r: f64,
        a_r: f64,
        s: f64,
        gamma: &AdiabaticIndex,
    ) -> State<Primitive> {
        if s < v_r + a_r {
            let s_r = v_r - gamma.tdgm1() * a_r;
            if s > s_r {
                Self::sample_half_vacuum(right, v_r, -a_r, s, gamma)
            } else {
                State::vacuum()
            }
        } else {
            *right
        }
    }

    fn sample_vacuum_creation(
        left: &State<Primitive>,
        right: &State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
        s: f64,
        gamma: &AdiabaticIndex,
    ) -> State<Primitive> {
        let s_l = v_l + gamma.tdgm1() * a_l;
        let s_r = v_r - gamma.tdgm1() * a_r;

        if s <= s_l {
            Self::sample_right_vacuum(left, v_l, a_l, s, gamma)
        } else if s >= s_r {
            Self::sample_left_vacuum(right, v_r, a_r, s, gamma)
        } else {
            State::vacuum()
        }
    }

    /// Sample the exact solution at `s = x / t` for a Riemann problem that has (or generates)
    /// vacuum.
    pub fn sample(
        left: &State<Primitive>,
        right: &State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
        s: f64,
        gamma: &AdiabaticIndex,
    ) -> State<Primitive> {
        debug_assert!(Self::is_vacuum(left, right, a_l, a_r, v_r - v_l, gamma));

        if left.density() == 0. && right.density() == 0. {
            State::vacuum()
        } else if right.density() == 0. {
            Self::sample_right_vacuum(left, v_l, a_l, s, gamma)
        } else if left.density() == 0. {
            Self::sample_left_vacuum(right, v_r, a_r, s, gamma)
        } else {
            Self::sample_vacuum_creation(left, right, v_l, v_r, a_l, a_r, s, gamma)
        }
    }
}
