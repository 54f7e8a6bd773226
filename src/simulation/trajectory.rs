//! Trajectory history and the step loop that produces it
//!
//! The integrator is stateless; this module owns the history. States are
//! materialised eagerly, index 0 being the initial condition, and can be
//! written out as a whitespace-separated steps file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use super::forces::Acceleration;
use super::integrator::Rk4;
use super::params::{Parameters, MAX_STEPS};
use super::states::{State, System};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("state became non-finite at step {step} (coincident bodies?)")]
    NonFinite { step: usize },

    #[error("failed to write trajectory")]
    Io(#[from] io::Error),
}

/// Every state of a run, in step order
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub names: Vec<String>,
    pub masses: Vec<f64>,
    pub dt: f64,
    pub states: Vec<State>,
}

impl Trajectory {
    /// Step `system` forward `params.n_steps` times
    ///
    /// Fails on the first step that produces a non-finite value; the
    /// integrator itself never checks.
    pub fn integrate<F>(system: &System, params: &Parameters, rk4: &Rk4<F>) -> Result<Self, SimulationError>
    where
        F: Acceleration + Sync,
    {
        let masses = system.masses();
        let mut states = Vec::with_capacity(params.n_steps.min(MAX_STEPS) + 1);
        states.push(system.state());

        info!("Beginning {} forward time steps of {} days", params.n_steps, params.dt);
        let report_every = (params.n_steps / 10).max(1);

        for step in 1..=params.n_steps {
            let next = rk4.step(params.dt, &masses, &states[step - 1]);
            if !next.is_finite() {
                return Err(SimulationError::NonFinite { step });
            }
            states.push(next);

            if step % report_every == 0 {
                debug!("step {step}/{}", params.n_steps);
            }
        }

        info!("Simulation complete");

        Ok(Self {
            names: system.names().into_iter().map(String::from).collect(),
            masses,
            dt: params.dt,
            states,
        })
    }

    /// Number of steps taken (states minus the initial one)
    pub fn n_steps(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn final_state(&self) -> Option<&State> {
        self.states.last()
    }

    /// Largest absolute coordinate reached by any body
    pub fn max_extent(&self) -> f64 {
        self.states
            .iter()
            .flat_map(|s| s.x.iter())
            .map(|x| x.x.abs().max(x.y.abs()))
            .fold(0.0, f64::max)
    }

    /// Body names on the first line, then one line per step after the
    /// initial state: `x  y  vx  vy` per body, bodies six spaces apart.
    pub fn write_steps<W: Write>(&self, mut out: W) -> Result<(), SimulationError> {
        writeln!(out, "{}", self.names.join(" "))?;

        for state in self.states.iter().skip(1) {
            let line: Vec<String> = state
                .x
                .iter()
                .zip(state.v.iter())
                .map(|(x, v)| format!("{:.8e}  {:.8e}  {:.8e}  {:.8e}", x.x, x.y, v.x, v.y))
                .collect();
            writeln!(out, "{}", line.join("      "))?;
        }

        out.flush()?;
        Ok(())
    }
}

/// `orbit.yaml` -> `orbit.steps`, next to the input
pub fn steps_path(input: &Path) -> PathBuf {
    input.with_extension("steps")
}
