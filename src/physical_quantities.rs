use std::{
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use glam::DVec3;

use crate::gas_law::AdiabaticIndex;

/// Lower bound applied to pressures decoded from conserved variables.
pub const TINY_NUMBER: f64 = 1.0e-20;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Primitive;
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Conserved;

/// A hydrodynamical state: a scalar, a vector, a second scalar and a passively advected
/// scalar. Interpretation depends on the marker type `T`.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct State<T>(f64, DVec3, f64, f64, PhantomData<T>);

impl<T> State<T> {
    pub fn vacuum() -> Self {
        Self(0., DVec3::ZERO, 0., 0., PhantomData)
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite() && self.2.is_finite() && self.3.is_finite()
    }
}

impl<T> Index<usize> for State<T> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.0,
            1 => &self.1.x,
            2 => &self.1.y,
            3 => &self.1.z,
            4 => &self.2,
            5 => &self.3,
            _ => panic!("Index out of bounds for StateVector!"),
        }
    }
}

impl<T> IndexMut<usize> for State<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.0,
            1 => &mut self.1.x,
            2 => &mut self.1.y,
            3 => &mut self.1.z,
            4 => &mut self.2,
            5 => &mut self.3,
            _ => panic!("Index out of bounds for StateVector!"),
        }
    }
}

impl State<Primitive> {
    pub fn new(density: f64, velocity: DVec3, pressure: f64) -> Self {
        Self(density, velocity, pressure, 0., PhantomData)
    }

    /// Attach a passive scalar, given per unit mass.
    pub fn with_passive(self, passive: f64) -> Self {
        Self(self.0, self.1, self.2, passive, PhantomData)
    }

    pub fn density(&self) -> f64 {
        self.0
    }

    pub fn velocity(&self) -> DVec3 {
        self.1
    }

    pub fn pressure(&self) -> f64 {
        self.2
    }

    /// Passive scalar per unit mass (e.g. the specific internal energy of the dual energy
    /// formalism).
    pub fn passive(&self) -> f64 {
        self.3
    }

    pub fn sound_speed(&self, gamma: &AdiabaticIndex) -> f64 {
        if self.density() > 0. {
            gamma.sound_speed(self.pressure(), 1. / self.density())
        } else {
            0.
        }
    }

    /// Decode primitive variables from a conserved state (per unit volume).
    ///
    /// States without mass decode to vacuum. Otherwise the pressure is clamped to
    /// [`TINY_NUMBER`], so round-off in the thermal energy never produces a zero or negative
    /// pressure. Use [`State::<Conserved>::pressure`] to inspect the unclamped value.
    pub fn from_conserved(conserved: &State<Conserved>, gamma: &AdiabaticIndex) -> Self {
        if conserved.mass() > 0. {
            let density_inv = 1. / conserved.mass();
            let velocity = conserved.momentum() * density_inv;
            let pressure = conserved.pressure(gamma).max(TINY_NUMBER);
            Self::new(conserved.mass(), velocity, pressure)
                .with_passive(conserved.passive() * density_inv)
        } else {
            Self::vacuum()
        }
    }

    /// Reflect velocity component along normal
    pub fn reflect(&self, normal: DVec3) -> Self {
        let v = self.velocity() - 2. * self.velocity().dot(normal) * normal;
        Self::new(self.density(), v, self.pressure()).with_passive(self.passive())
    }
}

impl State<Conserved> {
    pub fn new(mass: f64, momentum: DVec3, energy: f64) -> Self {
        Self(mass, momentum, energy, 0., PhantomData)
    }

    pub fn with_passive(self, passive: f64) -> Self {
        Self(self.0, self.1, self.2, passive, PhantomData)
    }

    pub fn mass(&self) -> f64 {
        self.0
    }

    pub fn momentum(&self) -> DVec3 {
        self.1
    }

    pub fn energy(&self) -> f64 {
        self.2
    }

    pub fn passive(&self) -> f64 {
        self.3
    }

    /// Unclamped gas pressure: `(gamma - 1) * (E - rho v^2 / 2)`.
    pub fn pressure(&self, gamma: &AdiabaticIndex) -> f64 {
        let velocity = self.momentum() / self.mass();
        let thermal_energy = self.energy() - 0.5 * self.mass() * velocity.length_squared();
        gamma.gas_pressure_from_thermal_energy(thermal_energy)
    }

    pub fn from_primitives(primitives: &State<Primitive>, gamma: &AdiabaticIndex) -> Self {
        let mass = primitives.density();
        let momentum = mass * primitives.velocity();
        let energy = 0.5 * momentum.dot(primitives.velocity())
            + gamma.gas_thermal_energy_from_pressure(primitives.pressure());
        Self::new(mass, momentum, energy).with_passive(mass * primitives.passive())
    }
}
