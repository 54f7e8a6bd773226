//! Core state types for the 2D point-mass simulation.
//!
//! - `Body` / `System` carry the named bodies of the initial condition
//! - `State` is the bare state vector handed to the integrator:
//!   one position and one velocity per body, in body order
//!
//! Units throughout: AU, AU/day, Earth masses, days.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies, order is identity
}

impl System {
    /// Masses in body order, fixed for the lifetime of a run
    pub fn masses(&self) -> Vec<f64> {
        self.bodies.iter().map(|b| b.m).collect()
    }

    /// Snapshot of positions and velocities in body order
    pub fn state(&self) -> State {
        State {
            x: self.bodies.iter().map(|b| b.x).collect(),
            v: self.bodies.iter().map(|b| b.v).collect(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.bodies.iter().map(|b| b.name.as_str()).collect()
    }
}

/// Positions and velocities of every body at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub x: Vec<NVec2>,
    pub v: Vec<NVec2>,
}

impl State {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// True when every component of every vector is finite
    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).all(|w| w.x.is_finite() && w.y.is_finite())
    }

    /// Total momentum `sum m_i v_i`
    pub fn momentum(&self, masses: &[f64]) -> NVec2 {
        masses.iter().zip(self.v.iter()).fold(NVec2::zeros(), |p, (m, v)| p + *m * *v)
    }

    /// Mass-weighted mean position
    pub fn center_of_mass(&self, masses: &[f64]) -> NVec2 {
        let total: f64 = masses.iter().sum();
        let weighted = masses.iter().zip(self.x.iter()).fold(NVec2::zeros(), |c, (m, x)| c + *m * *x);
        weighted / total
    }
}
