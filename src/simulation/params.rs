//! Numerical parameters for a run
//!
//! `Parameters` holds the resolved stepping settings:
//! - step size and step count (the duration follows from them),
//! - optional gravitational softening

/// Largest step count a scenario may ask for; the whole history is kept in memory
pub const MAX_STEPS: usize = 10_000_000;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // step size, days
    pub n_steps: usize, // number of steps after the initial state
    pub duration: f64, // dt * n_steps, days
    pub softening: f64, // eps2, AU^2
}
