use log::{debug, trace, warn};
use yaml_rust::Yaml;

use crate::{
    errors::{ConfigError, RiemannError},
    gas_law::AdiabaticIndex,
    physical_quantities::{Conserved, Primitive, State, TINY_NUMBER},
};

use super::{
    flux_from_half_state, ConvergencePolicy, Diagnostics, RiemannStarValues, SolverConfig,
    StarRegionSolution, TSRiemannSolver, VacuumRiemannSolver, WavePattern,
};

/// Value and derivative of the pressure function of one side of the Riemann problem.
///
/// Functions (4.6), (4.7) and (4.37) in Toro (2009).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureFunction {
    pub value: f64,
    pub derivative: f64,
}

impl PressureFunction {
    pub fn evaluate(p: f64, state: &State<Primitive>, a: f64, gamma: &AdiabaticIndex) -> Self {
        if p <= state.pressure() {
            // rarefaction wave
            let p_ratio = p / state.pressure();
            Self {
                value: gamma.tdgm1() * a * (p_ratio.powf(gamma.gm1d2g()) - 1.),
                derivative: 1. / (state.density() * a) * p_ratio.powf(-gamma.gp1d2g()),
            }
        } else {
            // shock wave
            let cap_a = gamma.tdgp1() / state.density();
            let cap_b = gamma.gm1dgp1() * state.pressure();
            let qrt = (cap_a / (cap_b + p)).sqrt();
            Self {
                value: (p - state.pressure()) * qrt,
                derivative: (1. - 0.5 * (p - state.pressure()) / (cap_b + p)) * qrt,
            }
        }
    }
}

/// One Newton-Raphson update of the star pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonStep {
    /// The updated pressure, floored to the tolerance if the raw update was not positive.
    pub pressure: f64,
    /// `2 |p_new - p_old| / (p_new + p_old)`, computed before flooring.
    pub change: f64,
}

/// Newton-Raphson iteration on `f_l(p) + f_r(p) + (v_r - v_l) = 0`.
///
/// Yields one [`NewtonStep`] per update and stops after the first step that satisfies the
/// tolerance or produces a non-finite pressure. It is not capped: callers decide how many steps
/// they are willing to take.
pub struct NewtonRaphson<'a> {
    left: &'a State<Primitive>,
    right: &'a State<Primitive>,
    v_l: f64,
    v_r: f64,
    a_l: f64,
    a_r: f64,
    gamma: &'a AdiabaticIndex,
    tolerance: f64,
    p_old: f64,
    finished: bool,
}

impl Iterator for NewtonRaphson<'_> {
    type Item = NewtonStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let f_l = PressureFunction::evaluate(self.p_old, self.left, self.a_l, self.gamma);
        let f_r = PressureFunction::evaluate(self.p_old, self.right, self.a_r, self.gamma);
        let p = self.p_old
            - (f_l.value + f_r.value + (self.v_r - self.v_l)) / (f_l.derivative + f_r.derivative);
        let change = 2. * ((p - self.p_old) / (p + self.p_old)).abs();
        trace!("Newton-Raphson: p_old = {:e}, p = {:e}, change = {:e}", self.p_old, p, change);

        self.finished = change <= self.tolerance || !p.is_finite();
        let pressure = if p <= 0. { self.tolerance } else { p };
        self.p_old = pressure;

        Some(NewtonStep { pressure, change })
    }
}

/// Everything known about one interface after a successful solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceSolution {
    pub flux: State<Conserved>,
    /// Primitive state at x/t = 0.
    pub half_state: State<Primitive>,
    /// `None` when the exact vacuum solution was used.
    pub star: Option<StarRegionSolution>,
    pub diagnostics: Diagnostics,
}

/// Exact Riemann solver for an ideal gas (Toro (2009), chapter 4).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactRiemannSolver {
    gamma: AdiabaticIndex,
    config: SolverConfig,
}

impl ExactRiemannSolver {
    pub fn new(gamma: AdiabaticIndex) -> Self {
        Self::with_config(gamma, SolverConfig::default())
    }

    pub fn with_config(gamma: AdiabaticIndex, config: SolverConfig) -> Self {
        Self { gamma, config }
    }

    /// Read `gamma` and the optional `riemann_solver` section from a configuration section.
    pub fn init(cfg: &Yaml) -> Result<Self, ConfigError> {
        let gamma = AdiabaticIndex::init(cfg)?;
        let config = SolverConfig::init(&cfg["riemann_solver"])?;
        Ok(Self::with_config(gamma, config))
    }

    pub fn gamma(&self) -> &AdiabaticIndex {
        &self.gamma
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The Newton-Raphson iteration for this pair of states, started from the two-shock
    /// pressure estimate.
    pub fn newton_raphson<'a>(
        &'a self,
        left: &'a State<Primitive>,
        right: &'a State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
    ) -> NewtonRaphson<'a> {
        let p_guess = TSRiemannSolver::pressure_guess(
            left,
            right,
            v_l,
            v_r,
            a_l,
            a_r,
            self.config.tolerance,
            &self.gamma,
        );
        NewtonRaphson {
            left,
            right,
            v_l,
            v_r,
            a_l,
            a_r,
            gamma: &self.gamma,
            tolerance: self.config.tolerance,
            p_old: p_guess,
            finished: false,
        }
    }

    fn star_velocity(
        &self,
        p: f64,
        left: &State<Primitive>,
        right: &State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
    ) -> f64 {
        let f_l = PressureFunction::evaluate(p, left, a_l, &self.gamma);
        let f_r = PressureFunction::evaluate(p, right, a_r, &self.gamma);
        0.5 * (v_l + v_r) + 0.5 * (f_r.value - f_l.value)
    }

    /// Find the pressure and velocity in the star region.
    ///
    /// Both states must be non-vacuum and must not generate vacuum, see
    /// [`VacuumRiemannSolver::check`].
    pub fn solve_for_star_state(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
        v_l: f64,
        v_r: f64,
        a_l: f64,
        a_r: f64,
    ) -> StarRegionSolution {
        let newton = self.newton_raphson(left, right, v_l, v_r, a_l, a_r);
        let mut last = NewtonStep {
            pressure: newton.p_old,
            change: f64::INFINITY,
        };
        let mut iterations = 0;
        for (iteration, step) in newton.take(self.config.max_iterations).enumerate() {
            if step.change <= self.config.tolerance {
                return StarRegionSolution::Converged {
                    p: step.pressure,
                    u: self.star_velocity(step.pressure, left, right, v_l, v_r, a_l, a_r),
                    iterations: iteration,
                };
            }
            last = step;
            iterations = iteration + 1;
        }

        StarRegionSolution::NonConverged {
            p: last.pressure,
            u: self.star_velocity(last.pressure, left, right, v_l, v_r, a_l, a_r),
            last_change: last.change,
            iterations,
        }
    }

    /// Solve the Riemann problem between two primitive states and compute the flux through the
    /// interface at x/t = 0.
    pub fn solve_for_primitives(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
    ) -> Result<InterfaceSolution, RiemannError> {
        let v_l = left.velocity().x;
        let v_r = right.velocity().x;
        let a_l = left.sound_speed(&self.gamma);
        let a_r = right.sound_speed(&self.gamma);

        let vacuum = VacuumRiemannSolver::check(left, right, a_l, a_r, v_r - v_l, &self.gamma);
        if let Err(err) = vacuum {
            if self.config.policy == ConvergencePolicy::Strict {
                return Err(err);
            }
            warn!("{err}, using exact vacuum solution");
            let half_state =
                VacuumRiemannSolver::sample(left, right, v_l, v_r, a_l, a_r, 0., &self.gamma);
            return Ok(InterfaceSolution {
                flux: flux_from_half_state(&half_state, &self.gamma),
                half_state,
                star: None,
                diagnostics: Diagnostics {
                    vacuum: true,
                    ..Default::default()
                },
            });
        }

        let star = self.solve_for_star_state(left, right, v_l, v_r, a_l, a_r);
        let mut diagnostics = Diagnostics::default();
        match star {
            StarRegionSolution::Converged { iterations, .. } => {
                diagnostics.iterations = iterations;
            }
            StarRegionSolution::NonConverged {
                p,
                u,
                last_change,
                iterations,
            } => {
                let err = RiemannError::NonConvergence {
                    pressure: p,
                    velocity: u,
                    last_change,
                    iterations,
                };
                if self.config.policy == ConvergencePolicy::Strict {
                    return Err(err);
                }
                warn!("{err}, continuing with last iterate");
                diagnostics.non_converged = true;
                diagnostics.iterations = iterations;
            }
        }

        let values = star.values();
        let pattern =
            WavePattern::classify(&values, left, right, v_l, v_r, a_l, a_r, 0., &self.gamma);
        let half_state = pattern
            .evaluate(&values, left, right, v_l, v_r, a_l, a_r, 0., &self.gamma)
            .upwind(left, right, 0.);
        diagnostics.pattern = Some(pattern);

        Ok(InterfaceSolution {
            flux: flux_from_half_state(&half_state, &self.gamma),
            half_state,
            star: Some(star),
            diagnostics,
        })
    }

    /// Decode both conserved states and compute the flux through the interface.
    pub fn solve_for_flux(
        &self,
        left: &State<Conserved>,
        right: &State<Conserved>,
    ) -> Result<InterfaceSolution, RiemannError> {
        let left_pressure_floored = self.pressure_floored(left);
        let right_pressure_floored = self.pressure_floored(right);
        if left_pressure_floored || right_pressure_floored {
            debug!(
                "Pressure floor applied (left: {}, right: {})",
                left_pressure_floored, right_pressure_floored
            );
        }

        let left = State::<Primitive>::from_conserved(left, &self.gamma);
        let right = State::<Primitive>::from_conserved(right, &self.gamma);
        let mut solution = self.solve_for_primitives(&left, &right)?;
        solution.diagnostics.left_pressure_floored = left_pressure_floored;
        solution.diagnostics.right_pressure_floored = right_pressure_floored;
        Ok(solution)
    }

    /// Whether decoding `conserved` clamps its pressure (NaN pressures included).
    fn pressure_floored(&self, conserved: &State<Conserved>) -> bool {
        let pressure = conserved.pressure(&self.gamma);
        conserved.mass() > 0. && pressure.max(TINY_NUMBER) != pressure
    }

    /// Sample the self-similar solution at the given values of `s = x / t`.
    pub fn sample_profile(
        &self,
        left: &State<Primitive>,
        right: &State<Primitive>,
        s_values: &[f64],
    ) -> Result<Vec<State<Primitive>>, RiemannError> {
        let v_l = left.velocity().x;
        let v_r = right.velocity().x;
        let a_l = left.sound_speed(&self.gamma);
        let a_r = right.sound_speed(&self.gamma);

        let vacuum = VacuumRiemannSolver::check(left, right, a_l, a_r, v_r - v_l, &self.gamma);
        if let Err(err) = vacuum {
            if self.config.policy == ConvergencePolicy::Strict {
                return Err(err);
            }
            warn!("{err}, sampling exact vacuum solution");
            return Ok(s_values
                .iter()
                .map(|&s| {
                    VacuumRiemannSolver::sample(left, right, v_l, v_r, a_l, a_r, s, &self.gamma)
                })
                .collect());
        }

        let star = self.solve_for_star_state(left, right, v_l, v_r, a_l, a_r);
        if let StarRegionSolution::NonConverged {
            p,
            u,
            last_change,
            iterations,
        } = star
        {
            let err = RiemannError::NonConvergence {
                pressure: p,
                velocity: u,
                last_change,
                iterations,
            };
            if self.config.policy == ConvergencePolicy::Strict {
                return Err(err);
            }
            warn!("{err}, sampling last iterate");
        }

        let values = star.values();
        Ok(s_values
            .iter()
            .map(|&s| {
                WavePattern::classify(&values, left, right, v_l, v_r, a_l, a_r, s, &self.gamma)
                    .evaluate(&values, left, right, v_l, v_r, a_l, a_r, s, &self.gamma)
                    .upwind(left, right, s)
            })
            .collect())
    }
}
