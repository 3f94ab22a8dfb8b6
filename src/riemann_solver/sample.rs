use glam::DVec3;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    gas_law::AdiabaticIndex,
    physical_quantities::{Primitive, State},
};

use super::RiemannStarValues;

/// The region of the self-similar wave pattern a sampling point `s = x / t` falls in.
///
/// `Outside` means the unperturbed state of that side, `Star` the star region on that side of
/// the contact discontinuity and `Fan` the inside of a rarefaction wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(usize)]
pub enum WavePattern {
    LeftRarefactionOutside = 0,
    LeftRarefactionStar = 1,
    LeftRarefactionFan = 2,
    LeftShockOutside = 3,
    LeftShockStar = 4,
    RightRarefactionOutside = 5,
    RightRarefactionStar = 6,
    RightRarefactionFan = 7,
    RightShockOutside = 8,
    RightShockStar = 9,
}

/// Density, normal velocity and pressure at a sampling point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledState {
    pub density: f64,
    pub velocity: f64,
    pub pressure: f64,
}

impl SampledState {
    fn unperturbed(state: &State<Primitive>, v: f64) -> Self {
        Self {
            density: state.density(),
            velocity: v,
            pressure: state.pressure(),
        }
    }

    /// Complete the sampled state with the transverse velocity and passive scalar of the side
    /// the material at the sampling point originates from.
    pub fn upwind(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
        s: f64,
    ) -> State<Primitive> {
        let upwind = if self.velocity >= s { left } else { right };
        State::<Primitive>::new(
            self.density,
            DVec3::new(self.velocity, upwind.velocity().y, upwind.velocity().z),
            self.pressure,
        )
        .with_passive(upwind.passive())
    }
}

impl WavePattern {
    pub const COUNT: usize = 10;

    pub fn is_left(&self) -> bool {
        usize::from(*self) < 5
    }

    pub fn is_shock(&self) -> bool {
        matches!(
            self,
            WavePattern::LeftShockOutside
                | WavePattern::LeftShockStar
                | WavePattern::RightShockOutside
                | WavePattern::RightShockStar
        )
    }

    /// Determine in which region of the wave pattern the point `s = x / t` lies.
    ///
    /// See section 4.5 in Toro (2009).
    pub fn classify(
        star: &RiemannStarValues,
        left: &State<Primitive>,
        right: &State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
        s: f64,
        gamma: &AdiabaticIndex,
    ) -> Self {
        if star.u >= s {
            // left of the contact discontinuity
            if star.p <= left.pressure() {
                if v_l - a_l >= s {
                    WavePattern::LeftRarefactionOutside
                } else {
                    let a_star = a_l * (star.p / left.pressure()).powf(gamma.gm1d2g());
                    if star.u - a_star < s {
                        WavePattern::LeftRarefactionStar
                    } else {
                        WavePattern::LeftRarefactionFan
                    }
                }
            } else {
                let s_l = v_l - a_l * Self::shock_mach(star.p / left.pressure(), gamma);
                if s_l >= s {
                    WavePattern::LeftShockOutside
                } else {
                    WavePattern::LeftShockStar
                }
            }
        } else if star.p > right.pressure() {
            let s_r = v_r + a_r * Self::shock_mach(star.p / right.pressure(), gamma);
            if s_r <= s {
                WavePattern::RightShockOutside
            } else {
                WavePattern::RightShockStar
            }
        } else if v_r + a_r <= s {
            WavePattern::RightRarefactionOutside
        } else {
            let a_star = a_r * (star.p / right.pressure()).powf(gamma.gm1d2g());
            if star.u + a_star >= s {
                WavePattern::RightRarefactionStar
            } else {
                WavePattern::RightRarefactionFan
            }
        }
    }

    /// Evaluate the closed form solution of the region `self`.
    pub fn evaluate(
        &self,
        star: &RiemannStarValues,
        left: &State<Primitive>,
        right: &State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
        s: f64,
        gamma: &AdiabaticIndex,
    ) -> SampledState {
        match self {
            WavePattern::LeftRarefactionOutside | WavePattern::LeftShockOutside => {
                SampledState::unperturbed(left, v_l)
            }
            WavePattern::RightRarefactionOutside | WavePattern::RightShockOutside => {
                SampledState::unperturbed(right, v_r)
            }
            WavePattern::LeftRarefactionStar => SampledState {
                density: Self::rarefaction_star_density(star.p, left, gamma),
                velocity: star.u,
                pressure: star.p,
            },
            WavePattern::RightRarefactionStar => SampledState {
                density: Self::rarefaction_star_density(star.p, right, gamma),
                velocity: star.u,
                pressure: star.p,
            },
            WavePattern::LeftShockStar => SampledState {
                density: Self::shock_star_density(star.p, left, gamma),
                velocity: star.u,
                pressure: star.p,
            },
            WavePattern::RightShockStar => SampledState {
                density: Self::shock_star_density(star.p, right, gamma),
                velocity: star.u,
                pressure: star.p,
            },
            WavePattern::LeftRarefactionFan => {
                let velocity = gamma.tdgp1() * (a_l + gamma.gm1d2() * v_l + s);
                let a = gamma.tdgp1() * (a_l + gamma.gm1d2() * (v_l - s));
                Self::fan(left, velocity, a / a_l, gamma)
            }
            WavePattern::RightRarefactionFan => {
                let velocity = gamma.tdgp1() * (-a_r + gamma.gm1d2() * v_r + s);
                let a = gamma.tdgp1() * (a_r - gamma.gm1d2() * (v_r - s));
                Self::fan(right, velocity, a / a_r, gamma)
            }
        }
    }

    /// Shock speed relative to the unperturbed flow in units of its sound speed.
    fn shock_mach(pdps: f64, gamma: &AdiabaticIndex) -> f64 {
        (gamma.gp1d2g() * pdps + gamma.gm1d2g()).sqrt()
    }

    fn shock_star_density(p: f64, state: &State<Primitive>, gamma: &AdiabaticIndex) -> f64 {
        let pdps = p / state.pressure();
        state.density() * (pdps + gamma.gm1dgp1()) / (pdps * gamma.gm1dgp1() + 1.)
    }

    fn rarefaction_star_density(p: f64, state: &State<Primitive>, gamma: &AdiabaticIndex) -> f64 {
        state.density() * (p / state.pressure()).powf(1. / gamma.gamma())
    }

    /// State inside a rarefaction fan where the local sound speed is `ada * a_state`.
    fn fan(
        state: &State<Primitive>,
        velocity: f64,
        ada: f64,
        gamma: &AdiabaticIndex,
    ) -> SampledState {
        SampledState {
            density: state.density() * ada.powf(gamma.tdgm1()),
            velocity,
            pressure: state.pressure() * ada.powf(gamma.tgdgm1()),
        }
    }
}
