//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario`
//! containing:
//! - numerical parameters (`Parameters`), with the missing timing value derived
//! - system state (`System` with absolute Cartesian bodies at t = 0)
//! - the RK4 stepper closed over gravity in AU / Earth-mass / day units
//! - replay settings, if any
//!
//! All input validation happens here so the integrator can assume its
//! preconditions.

use std::collections::{HashMap, HashSet};

use crate::configuration::config::{BodyConfig, ConfigError, ScenarioConfig, SimulationConfig, VisualConfig};
use crate::simulation::constants::G_AU_EARTH_DAY;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::Rk4;
use crate::simulation::params::{Parameters, MAX_STEPS};
use crate::simulation::states::{Body, NVec2, System};

/// A validated, ready-to-run simulation
#[derive(Debug, Clone)]
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
    pub rk4: Rk4<NewtonianGravity>,
    pub visual: Option<VisualConfig>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig, parallel: bool) -> Result<Self, ConfigError> {
        let parameters = resolve_parameters(&cfg.simulation)?;
        let bodies = resolve_bodies(&cfg.bodies)?;

        if let Some(visual) = &cfg.visual {
            ensure_positive("visual.duration", visual.duration)?;
            ensure_positive("visual.figure_size", visual.figure_size)?;
            if let Some(fps) = visual.fps {
                ensure_positive("visual.fps", fps)?;
            }
        }

        // Initial system state: bodies at t = 0
        let system = System { bodies };

        let gravity = NewtonianGravity::new(G_AU_EARTH_DAY).with_softening(parameters.softening);
        let rk4 = Rk4::new(gravity).parallel(parallel);

        Ok(Self {
            parameters,
            system,
            rk4,
            visual: cfg.visual,
        })
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Fill in whichever of dt / duration / n_steps was left out
pub fn resolve_parameters(sim: &SimulationConfig) -> Result<Parameters, ConfigError> {
    let given = [sim.dt.is_some(), sim.duration.is_some(), sim.n_steps.is_some()]
        .iter()
        .filter(|g| **g)
        .count();
    if given != 2 {
        return Err(ConfigError::StepParameters { given });
    }

    if sim.softening < 0.0 || !sim.softening.is_finite() {
        return Err(ConfigError::Negative { field: "softening", value: sim.softening });
    }

    let (dt, n_steps) = match (sim.dt, sim.duration, sim.n_steps) {
        (Some(dt), Some(duration), None) => {
            ensure_positive("dt", dt)?;
            ensure_positive("duration", duration)?;
            // halves go to even, like Python's round
            let steps = (duration / dt).round_ties_even();
            if !steps.is_finite() || steps > MAX_STEPS as f64 {
                return Err(ConfigError::TooManySteps { n_steps: steps, max: MAX_STEPS });
            }
            (dt, steps as usize)
        }
        (Some(dt), None, Some(n)) => {
            ensure_positive("dt", dt)?;
            (dt, n)
        }
        (None, Some(duration), Some(n)) => {
            ensure_positive("duration", duration)?;
            if n == 0 {
                return Err(ConfigError::NonPositive { field: "n_steps", value: 0.0 });
            }
            (duration / n as f64, n)
        }
        _ => return Err(ConfigError::StepParameters { given }),
    };

    if n_steps == 0 {
        return Err(ConfigError::NonPositive { field: "n_steps", value: 0.0 });
    }
    if n_steps > MAX_STEPS {
        return Err(ConfigError::TooManySteps { n_steps: n_steps as f64, max: MAX_STEPS });
    }

    Ok(Parameters {
        dt,
        n_steps,
        duration: dt * n_steps as f64,
        softening: sim.softening,
    })
}

/// Validate bodies, convert polar input and resolve relative coordinates
pub fn resolve_bodies(configs: &[BodyConfig]) -> Result<Vec<Body>, ConfigError> {
    if configs.is_empty() {
        return Err(ConfigError::NoBodies);
    }

    let mut seen = HashSet::new();
    let mut local = Vec::with_capacity(configs.len());
    for bc in configs {
        if !seen.insert(bc.name.as_str()) {
            return Err(ConfigError::DuplicateName(bc.name.clone()));
        }
        local.push(local_body(bc)?);
    }

    let index: HashMap<&str, usize> = configs.iter().enumerate().map(|(i, bc)| (bc.name.as_str(), i)).collect();

    // Walk each reference chain up to the origin, adding offsets on the way
    let mut bodies = Vec::with_capacity(local.len());
    for (i, bc) in configs.iter().enumerate() {
        let mut body = local[i].clone();
        let mut reference = bc.relative_to.as_deref();
        let mut hops = 0;

        while let Some(name) = reference {
            hops += 1;
            if hops > configs.len() {
                return Err(ConfigError::ReferenceCycle(bc.name.clone()));
            }
            let j = *index.get(name).ok_or_else(|| ConfigError::UnknownReference {
                name: bc.name.clone(),
                reference: name.to_string(),
            })?;
            body.x += local[j].x;
            body.v += local[j].v;
            reference = configs[j].relative_to.as_deref();
        }

        bodies.push(body);
    }

    Ok(bodies)
}

/// Cartesian body in the frame of its reference body
fn local_body(bc: &BodyConfig) -> Result<Body, ConfigError> {
    if !(bc.mass.is_finite() && bc.mass > 0.0) {
        return Err(ConfigError::BadMass { name: bc.name.clone(), mass: bc.mass });
    }
    let x = pair(bc, "position", &bc.position)?;
    let v = pair(bc, "velocity", &bc.velocity)?;

    let (x, v) = if bc.polar { polar_to_cartesian(x, v) } else { (x, v) };

    Ok(Body {
        name: bc.name.clone(),
        x,
        v,
        m: bc.mass,
    })
}

fn pair(bc: &BodyConfig, field: &'static str, values: &[f64]) -> Result<NVec2, ConfigError> {
    if values.len() != 2 {
        return Err(ConfigError::Dimension { name: bc.name.clone(), field, len: values.len() });
    }
    if !values.iter().all(|c| c.is_finite()) {
        return Err(ConfigError::NonFinite { name: bc.name.clone(), field });
    }
    Ok(NVec2::new(values[0], values[1]))
}

/// `(r, phi)`, `(v_r, v_phi)` to Cartesian position and velocity
pub fn polar_to_cartesian(pos: NVec2, vel: NVec2) -> (NVec2, NVec2) {
    let (r, phi) = (pos.x, pos.y);
    let (v_r, v_phi) = (vel.x, vel.y);
    let (sin, cos) = phi.sin_cos();

    (
        NVec2::new(r * cos, r * sin),
        NVec2::new(v_r * cos - v_phi * sin, v_r * sin + v_phi * cos),
    )
}
