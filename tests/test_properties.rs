use common::{conserved, get_solver, primitive, solve, HYDRO_CONFIG, HYDRO_CONFIG_BEST_EFFORT};
use exact_riemann::{
    flux_to_array, riemann_solver::flux_from_half_state, InterfaceStates, Primitive,
    RiemannError, State, StarRegionSolution, NUM_FLUXES, NUM_INPUTS,
};
use float_cmp::assert_approx_eq;
use glam::DVec3;
use rand::prelude::*;

mod common;

/// Random pair of states that does not generate vacuum.
fn random_states(rng: &mut StdRng) -> (State<Primitive>, State<Primitive>) {
    let mut state = || {
        State::<Primitive>::new(
            rng.gen_range(0.1..2.),
            DVec3::new(
                rng.gen_range(-1.0..1.),
                rng.gen_range(-1.0..1.),
                rng.gen_range(-1.0..1.),
            ),
            rng.gen_range(0.1..2.),
        )
        .with_passive(rng.gen_range(0.0..1.))
    };
    (state(), state())
}

#[test]
fn test_mirror_symmetry() {
    let solver = get_solver(HYDRO_CONFIG);
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..1000 {
        let (left, right) = random_states(&mut rng);
        let solution = solver.solve_for_primitives(&left, &right).unwrap();
        let mirrored = solver
            .solve_for_primitives(&right.reflect(DVec3::X), &left.reflect(DVec3::X))
            .unwrap();

        let star = solution.star.unwrap().values();
        let star_mirrored = mirrored.star.unwrap().values();
        assert_approx_eq!(f64, star.p, star_mirrored.p, epsilon = 1e-12);
        assert_approx_eq!(f64, star.u, -star_mirrored.u, epsilon = 1e-12);

        let half = solution.half_state;
        let half_mirrored = mirrored.half_state.reflect(DVec3::X);
        assert_approx_eq!(f64, half.density(), half_mirrored.density(), epsilon = 1e-12);
        assert_approx_eq!(f64, half.velocity().x, half_mirrored.velocity().x, epsilon = 1e-12);
        assert_eq!(half.velocity().y, half_mirrored.velocity().y);
        assert_eq!(half.velocity().z, half_mirrored.velocity().z);
        assert_approx_eq!(f64, half.pressure(), half_mirrored.pressure(), epsilon = 1e-12);
        assert_eq!(half.passive(), half_mirrored.passive());

        let flux = solution.flux;
        let flux_mirrored = mirrored.flux;
        assert_approx_eq!(f64, flux.mass(), -flux_mirrored.mass(), epsilon = 1e-12);
        assert_approx_eq!(f64, flux.momentum().x, flux_mirrored.momentum().x, epsilon = 1e-12);
        assert_approx_eq!(f64, flux.momentum().y, -flux_mirrored.momentum().y, epsilon = 1e-12);
        assert_approx_eq!(f64, flux.momentum().z, -flux_mirrored.momentum().z, epsilon = 1e-12);
        assert_approx_eq!(f64, flux.energy(), -flux_mirrored.energy(), epsilon = 1e-12);
        assert_approx_eq!(f64, flux.passive(), -flux_mirrored.passive(), epsilon = 1e-12);
    }
}

#[test]
fn test_uniform_state() {
    let solver = get_solver(HYDRO_CONFIG);
    let gamma = solver.gamma();
    for velocity in [-0.5, 0., 0.3, 2.] {
        let state = State::<Primitive>::new(0.8, DVec3::new(velocity, 0.1, -0.2), 0.6);
        let solution = solver.solve_for_primitives(&state, &state).unwrap();
        match solution.star.unwrap() {
            StarRegionSolution::Converged { p, u, iterations } => {
                assert_eq!(iterations, 0);
                assert_approx_eq!(f64, p, 0.6, epsilon = 1e-14);
                assert_eq!(u, velocity);
            }
            star => panic!("Uniform state did not converge: {star:?}"),
        }
        let half = solution.half_state;
        assert_approx_eq!(f64, half.density(), state.density(), epsilon = 1e-14);
        assert_approx_eq!(f64, half.pressure(), state.pressure(), epsilon = 1e-14);
        assert_eq!(half.velocity(), state.velocity());

        // Analytic flux of a uniform state
        let energy = 0.6 / (gamma.gamma() - 1.) + 0.5 * 0.8 * state.velocity().length_squared();
        let flux = solution.flux;
        assert_approx_eq!(f64, flux.mass(), 0.8 * velocity, epsilon = 1e-14);
        let momentum_flux = 0.8 * velocity * velocity + 0.6;
        assert_approx_eq!(f64, flux.momentum().x, momentum_flux, epsilon = 1e-14);
        assert_approx_eq!(f64, flux.momentum().y, 0.8 * velocity * 0.1, epsilon = 1e-14);
        assert_approx_eq!(f64, flux.momentum().z, -0.8 * velocity * 0.2, epsilon = 1e-14);
        assert_approx_eq!(f64, flux.energy(), (energy + 0.6) * velocity, epsilon = 1e-14);
    }
}

#[test]
fn test_contact_continuity() {
    let solver = get_solver(HYDRO_CONFIG);

    // Pure contact discontinuity drifting slowly across the interface
    let left = State::<Primitive>::new(1., DVec3::new(1e-10, 0.5, 0.), 1.).with_passive(1.);
    let right = State::<Primitive>::new(0.125, DVec3::new(1e-10, -0.5, 0.), 1.).with_passive(2.);
    let forward = solver.solve_for_primitives(&left, &right).unwrap().half_state;
    let left = State::<Primitive>::new(1., DVec3::new(-1e-10, 0.5, 0.), 1.).with_passive(1.);
    let right = State::<Primitive>::new(0.125, DVec3::new(-1e-10, -0.5, 0.), 1.).with_passive(2.);
    let backward = solver.solve_for_primitives(&left, &right).unwrap().half_state;
    assert_eq!(forward.pressure(), 1.);
    assert_eq!(backward.pressure(), 1.);
    assert_approx_eq!(f64, forward.velocity().x, backward.velocity().x, epsilon = 1e-9);
    // Only the quantities advected by the contact jump
    assert_eq!(forward.density(), 1.);
    assert_eq!(backward.density(), 0.125);
    assert_eq!(forward.velocity().y, 0.5);
    assert_eq!(backward.velocity().y, -0.5);
    assert_eq!(forward.passive(), 1.);
    assert_eq!(backward.passive(), 2.);

    // Sod: continuity of p and u across the contact, continuity of everything across the
    // edges of the rarefaction fan
    let left = primitive(1., 0., 1.);
    let right = primitive(0.125, 0., 0.1);
    let star = solve(&solver, (1., 0., 1.), (0.125, 0., 0.1)).star.unwrap().values();
    let a_l = left.sound_speed(solver.gamma());
    let a_star = a_l * (star.p / left.pressure()).powf(0.4 / 2.8);
    let delta = 1e-9;
    for (s, jump) in [(star.u, true), (-a_l, false), (star.u - a_star, false)] {
        let profile = solver
            .sample_profile(&left, &right, &[s - delta, s + delta])
            .unwrap();
        assert_approx_eq!(f64, profile[0].pressure(), profile[1].pressure(), epsilon = 1e-8);
        assert_approx_eq!(f64, profile[0].velocity().x, profile[1].velocity().x, epsilon = 1e-8);
        if jump {
            assert_approx_eq!(f64, profile[0].density(), 0.4263194281784926, epsilon = 1e-9);
            assert_approx_eq!(f64, profile[1].density(), 0.2655737117053057, epsilon = 1e-9);
        } else {
            assert_approx_eq!(f64, profile[0].density(), profile[1].density(), epsilon = 1e-8);
        }
    }
}

#[test]
fn test_flux_recomputation() {
    let solver = get_solver(HYDRO_CONFIG);
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..1000 {
        let (left, right) = random_states(&mut rng);
        let solution = solver.solve_for_primitives(&left, &right).unwrap();
        let flux = flux_from_half_state(&solution.half_state, solver.gamma());
        assert_eq!(flux_to_array(&flux), flux_to_array(&solution.flux));
        assert_eq!(flux, solution.flux);
    }
}

#[test]
fn test_monotone_convergence() {
    let solver = get_solver(HYDRO_CONFIG);
    let mut rng = StdRng::seed_from_u64(3);
    let check = |left: &State<Primitive>, right: &State<Primitive>| {
        let a_l = left.sound_speed(solver.gamma());
        let a_r = right.sound_speed(solver.gamma());
        let changes: Vec<f64> = solver
            .newton_raphson(left, right, left.velocity().x, right.velocity().x, a_l, a_r)
            .take(20)
            .map(|step| step.change)
            .collect();
        assert!(*changes.last().unwrap() <= 1e-6);
        for window in changes[1..].windows(2) {
            assert!(window[1] <= window[0], "Non monotone convergence: {changes:?}");
        }
    };

    check(&primitive(1., 0., 1.), &primitive(0.125, 0., 0.1));
    check(&primitive(1., -2., 0.4), &primitive(1., 2., 0.4));
    check(&primitive(1., 0., 1000.), &primitive(1., 0., 0.01));
    check(&primitive(1., 0., 0.01), &primitive(1., 0., 100.));
    check(
        &primitive(5.99924, 19.5975, 460.894),
        &primitive(5.99242, -6.19633, 46.0950),
    );
    for _ in 0..1000 {
        let (left, right) = random_states(&mut rng);
        check(&left, &right);
    }
}

#[test]
fn test_best_effort_vacuum() {
    let strict = get_solver(HYDRO_CONFIG);
    let best_effort = get_solver(HYDRO_CONFIG_BEST_EFFORT);
    let left = primitive(1., -1., 1.);
    let right = State::<Primitive>::vacuum();

    assert!(matches!(
        strict.solve_for_primitives(&left, &right),
        Err(RiemannError::VacuumInput { .. })
    ));
    let solution = best_effort.solve_for_primitives(&left, &right).unwrap();
    assert!(solution.diagnostics.vacuum);
    assert_eq!(solution.star, None);
    // The interface lies inside the rarefaction fan expanding into the vacuum
    let half = solution.half_state;
    assert!(half.density() > 0. && half.density() < 1.);
    assert!(half.velocity().x > 0.);
    assert!(solution.flux.mass() > 0.);
}

#[test]
fn test_parallel_sweep() {
    let solver = get_solver(HYDRO_CONFIG);
    let gamma = solver.gamma();
    let mut rng = StdRng::seed_from_u64(4);
    let num_interfaces = 1000;
    let inputs: Vec<f64> = (0..num_interfaces)
        .flat_map(|_| {
            let (left, right) = random_states(&mut rng);
            InterfaceStates::new(conserved(&left, gamma), conserved(&right, gamma)).to_array()
        })
        .collect();
    assert_eq!(inputs.len(), num_interfaces * NUM_INPUTS);

    let mut fluxes = vec![0.; num_interfaces * NUM_FLUXES];
    let diagnostics = solver.solve_interfaces(&inputs, &mut fluxes).unwrap();
    assert_eq!(diagnostics.interfaces, num_interfaces);
    assert_eq!(diagnostics.patterns.iter().sum::<usize>(), num_interfaces);
    assert_eq!(diagnostics.vacuum, 0);
    assert_eq!(diagnostics.non_converged, 0);
    assert_eq!(diagnostics.pressure_floors, 0);
    assert!(diagnostics.max_iterations < 20);

    for (input, flux) in inputs
        .chunks_exact(NUM_INPUTS)
        .zip(fluxes.chunks_exact(NUM_FLUXES))
    {
        let serial = solver.solve_interface_slice(input).unwrap();
        assert_eq!(&serial[..], flux);
    }
}

#[cfg(feature = "dual_energy")]
#[test]
fn test_passive_flux() {
    let solver = get_solver(HYDRO_CONFIG);
    let gamma = solver.gamma();
    let left = primitive(1., 0., 1.).with_passive(2.5);
    let right = primitive(0.125, 0., 0.1).with_passive(0.5);
    let states = InterfaceStates::new(conserved(&left, gamma), conserved(&right, gamma));
    let flux = solver.solve_interface_slice(&states.to_array()).unwrap();
    // The contact moves to the right: the scalar is advected from the left
    assert_approx_eq!(f64, flux[5], 2.5 * flux[0], epsilon = 1e-12);
}
