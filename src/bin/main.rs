use clap::Parser;
use exact_riemann::{
    riemann_solver::VacuumRiemannSolver, AdiabaticIndex, ConfigError, Conserved,
    ExactRiemannSolver, Primitive, State,
};
use glam::DVec3;
use log::info;
use std::{error::Error, fs, path::PathBuf};
use yaml_rust::{Yaml, YamlLoader};

fn parse_f64(yaml: &Yaml) -> Option<f64> {
    match yaml {
        Yaml::Real(_) => yaml.as_f64(),
        Yaml::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

fn parse_dvec3(yaml: &Yaml) -> Option<DVec3> {
    let yaml_vec = yaml.as_vec()?;
    match &yaml_vec[..] {
        [x, y, z] => Some(DVec3 {
            x: parse_f64(x)?,
            y: parse_f64(y)?,
            z: parse_f64(z)?,
        }),
        _ => None,
    }
}

fn parse_state(yaml: &Yaml, name: &str) -> Result<State<Primitive>, ConfigError> {
    let density = parse_f64(&yaml["density"]).ok_or(ConfigError::MissingParameter(format!(
        "riemann_problem:{name}:density"
    )))?;
    let velocity = &yaml["velocity"];
    let velocity = match parse_f64(velocity) {
        Some(v) => v * DVec3::X,
        None if velocity.is_badvalue() => DVec3::ZERO,
        None => parse_dvec3(velocity).ok_or(ConfigError::InvalidParameter {
            name: format!("riemann_problem:{name}:velocity"),
            value: format!("{velocity:?}"),
        })?,
    };
    let pressure = parse_f64(&yaml["pressure"]).ok_or(ConfigError::MissingParameter(format!(
        "riemann_problem:{name}:pressure"
    )))?;
    if density < 0. || pressure < 0. {
        return Err(ConfigError::InvalidParameter {
            name: format!("riemann_problem:{name}"),
            value: format!("density = {density}, pressure = {pressure}"),
        });
    }
    let passive = parse_f64(&yaml["passive"]).unwrap_or(0.);
    Ok(State::<Primitive>::new(density, velocity, pressure).with_passive(passive))
}

struct ProfileCfg {
    num_points: usize,
    x_min: f64,
    x_max: f64,
    time: f64,
}

impl ProfileCfg {
    fn parse(yaml: &Yaml) -> Result<Option<Self>, ConfigError> {
        if yaml.is_badvalue() {
            return Ok(None);
        }
        let num_points = yaml["num_points"].as_i64().unwrap_or(100);
        if num_points < 1 {
            return Err(ConfigError::InvalidParameter {
                name: "riemann_problem:profile:num_points".to_string(),
                value: num_points.to_string(),
            });
        }
        let x_min = parse_f64(&yaml["x_min"]).unwrap_or(-0.5);
        let x_max = parse_f64(&yaml["x_max"]).unwrap_or(0.5);
        let time = parse_f64(&yaml["time"]).ok_or(ConfigError::MissingParameter(
            "riemann_problem:profile:time".to_string(),
        ))?;
        if !(time > 0.) || !(x_max > x_min) {
            return Err(ConfigError::InvalidParameter {
                name: "riemann_problem:profile".to_string(),
                value: format!("x_min = {x_min}, x_max = {x_max}, time = {time}"),
            });
        }
        Ok(Some(Self {
            num_points: num_points as usize,
            x_min,
            x_max,
            time,
        }))
    }

    /// Cell centers of a uniform grid between `x_min` and `x_max`.
    fn positions(&self) -> Vec<f64> {
        let dx = (self.x_max - self.x_min) / self.num_points as f64;
        (0..self.num_points)
            .map(|i| self.x_min + (i as f64 + 0.5) * dx)
            .collect()
    }
}

struct Config {
    solver: ExactRiemannSolver,
    left: State<Primitive>,
    right: State<Primitive>,
    profile: Option<ProfileCfg>,
}

impl Config {
    fn parse(file: PathBuf) -> Result<Self, Box<dyn Error>> {
        let docs = YamlLoader::load_from_str(&fs::read_to_string(file)?)?;
        let config_yml = &docs[0];
        let problem = &config_yml["riemann_problem"];

        Ok(Self {
            solver: ExactRiemannSolver::init(&config_yml["hydrodynamics"])?,
            left: parse_state(&problem["left"], "left")?,
            right: parse_state(&problem["right"], "right")?,
            profile: ProfileCfg::parse(&problem["profile"])?,
        })
    }
}

#[derive(Parser)]
pub struct Cli {
    /// The path to the config file to read
    #[clap(parse(from_os_str))]
    pub config: PathBuf,
}

fn print_state(name: &str, state: &State<Primitive>) {
    let v = state.velocity();
    println!(
        "{name:<12} density = {:.8e}, velocity = [{:.8e}, {:.8e}, {:.8e}], pressure = {:.8e}",
        state.density(),
        v.x,
        v.y,
        v.z,
        state.pressure()
    );
}

fn print_flux(flux: &State<Conserved>) {
    let m = flux.momentum();
    println!(
        "{:<12} mass = {:.8e}, momentum = [{:.8e}, {:.8e}, {:.8e}], energy = {:.8e}",
        "flux",
        flux.mass(),
        m.x,
        m.y,
        m.z,
        flux.energy()
    );
    if cfg!(feature = "dual_energy") {
        println!("{:<12} passive = {:.8e}", "", flux.passive());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // parse command line parameters
    let args = Cli::parse();

    // read configuration
    let config = Config::parse(args.config)?;
    let solver = config.solver;
    let gamma: &AdiabaticIndex = solver.gamma();
    info!(
        "Solving Riemann problem with gamma = {}, tolerance = {:e}, max_iterations = {}, {:?} mode",
        gamma.gamma(),
        solver.config().tolerance,
        solver.config().max_iterations,
        solver.config().policy
    );

    print_state("left", &config.left);
    print_state("right", &config.right);

    let solution = solver.solve_for_primitives(&config.left, &config.right)?;
    match solution.star {
        Some(star) => {
            let values = star.values();
            println!(
                "{:<12} p = {:.8e}, u = {:.8e} ({})",
                "star",
                values.p,
                values.u,
                if star.is_converged() {
                    format!("converged after {} iterations", solution.diagnostics.iterations + 1)
                } else {
                    "not converged".to_string()
                }
            );
        }
        None => println!("{:<12} vacuum", "star"),
    }
    if let Some(pattern) = solution.diagnostics.pattern {
        println!("{:<12} {:?}", "interface", pattern);
    }
    print_state("half state", &solution.half_state);
    print_flux(&solution.flux);

    if let Some(profile) = config.profile {
        let positions = profile.positions();
        let s_values: Vec<f64> = positions.iter().map(|x| x / profile.time).collect();
        let states = solver.sample_profile(&config.left, &config.right, &s_values)?;
        let a_l = config.left.sound_speed(gamma);
        let a_r = config.right.sound_speed(gamma);
        let vacuum = VacuumRiemannSolver::is_vacuum(
            &config.left,
            &config.right,
            a_l,
            a_r,
            config.right.velocity().x - config.left.velocity().x,
            gamma,
        );
        println!();
        println!("# t = {:e}{}", profile.time, if vacuum { " (vacuum)" } else { "" });
        println!("# x\tdensity\tvelocity\tpressure");
        for (x, state) in positions.iter().zip(states.iter()) {
            println!(
                "{:.8e}\t{:.8e}\t{:.8e}\t{:.8e}",
                x,
                state.density(),
                state.velocity().x,
                state.pressure()
            );
        }
    }

    Ok(())
}
