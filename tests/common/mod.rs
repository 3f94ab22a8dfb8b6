#![allow(dead_code)]
use exact_riemann::{
    AdiabaticIndex, Conserved, ExactRiemannSolver, InterfaceSolution, Primitive, State,
};
use glam::DVec3;
use yaml_rust::YamlLoader;

pub const HYDRO_CONFIG: &'static str = r##"
gamma: 1.4
riemann_solver:
  tolerance: 1e-6
  max_iterations: 20
  convergence: "strict"
"##;

pub const HYDRO_CONFIG_MONATOMIC: &'static str = r##"
gamma: 1.66666666667
"##;

pub const HYDRO_CONFIG_BEST_EFFORT: &'static str = r##"
gamma: 1.4
riemann_solver:
  convergence: "best_effort"
"##;

pub fn get_solver(cfg: &str) -> ExactRiemannSolver {
    ExactRiemannSolver::init(&YamlLoader::load_from_str(cfg).expect("Error loading hydro cfg!")[0])
        .expect("Error creating ExactRiemannSolver!")
}

/// Primitive state moving along the interface normal.
pub fn primitive(density: f64, velocity: f64, pressure: f64) -> State<Primitive> {
    State::<Primitive>::new(density, velocity * DVec3::X, pressure)
}

pub fn solve(
    solver: &ExactRiemannSolver,
    left: (f64, f64, f64),
    right: (f64, f64, f64),
) -> InterfaceSolution {
    solver
        .solve_for_primitives(
            &primitive(left.0, left.1, left.2),
            &primitive(right.0, right.1, right.2),
        )
        .expect("Error solving Riemann problem!")
}

pub fn conserved(primitives: &State<Primitive>, gamma: &AdiabaticIndex) -> State<Conserved> {
    State::<Conserved>::from_primitives(primitives, gamma)
}
