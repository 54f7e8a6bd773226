//! Fixed-step RK4 integrator for the N-body system
//!
//! Each body is advanced by its own four-stage Runge-Kutta update while
//! every other body is held at its step-start position ("frozen
//! neighbours"). Only body i is displaced when the force on body i is
//! re-evaluated at stages 2-4. This is not the coupled system-wide RK4
//! and must not be turned into it: trajectories are expected to match
//! the per-body scheme.
//!
//! Stepping is pure. The input state is read-only and a new state is
//! returned, so the driver can call it in a tight loop.

use rayon::prelude::*;

use super::forces::{Acceleration, NewtonianGravity};
use super::states::{NVec2, State};

/// RK4 stepper closed over an acceleration law
#[derive(Debug, Clone)]
pub struct Rk4<F> {
    pub forces: F,
    pub parallel: bool, // distribute the outer body loop over rayon's pool
}

impl<F> Rk4<F>
where
    F: Acceleration + Sync,
{
    pub fn new(forces: F) -> Self {
        Self { forces, parallel: false }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Advance every body by one step of size `dt`
    ///
    /// `masses`, `state.x` and `state.v` must share the same length and
    /// ordering and `dt` must be positive; neither is checked here.
    pub fn step(&self, dt: f64, masses: &[f64], state: &State) -> State {
        let n = state.x.len();
        let body = |i: usize| advance_body(&self.forces, i, dt, masses, &state.x, &state.v);

        // Each body reads only step-start data and writes only its own slot
        let (x, v): (Vec<NVec2>, Vec<NVec2>) = if self.parallel {
            (0..n).into_par_iter().map(body).unzip()
        } else {
            (0..n).map(body).unzip()
        };

        State { x, v }
    }
}

/// One RK4 step under plain Newtonian gravity with constant `g`
pub fn rk4_step(dt: f64, g: f64, masses: &[f64], positions: &[NVec2], velocities: &[NVec2]) -> (Vec<NVec2>, Vec<NVec2>) {
    let gravity = NewtonianGravity::new(g);
    (0..positions.len())
        .map(|i| advance_body(&gravity, i, dt, masses, positions, velocities))
        .unzip()
}

/// Four-stage update of body `i` with its neighbours frozen
fn advance_body<F: Acceleration>(forces: &F, i: usize, dt: f64, masses: &[f64], x: &[NVec2], v: &[NVec2]) -> (NVec2, NVec2) {
    let xi = x[i];
    let vi = v[i];
    let accel = |at: NVec2| forces.acceleration_on(i, at, masses, x);

    // l: position increments, k: velocity increments
    let l1 = dt * vi;
    let k1 = dt * accel(xi);

    let l2 = dt * (vi + k1 / 2.0);
    let k2 = dt * accel(xi + l1 / 2.0);

    let l3 = dt * (vi + k2 / 2.0);
    let k3 = dt * accel(xi + l2 / 2.0);

    let l4 = dt * (vi + k3);
    let k4 = dt * accel(xi + l3);

    let x_next = xi + (l1 + 2.0 * l2 + 2.0 * l3 + l4) / 6.0;
    let v_next = vi + (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0;

    (x_next, v_next)
}
