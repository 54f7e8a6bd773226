//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`SimulationConfig`] – step size, duration, step count and softening
//! - [`BodyConfig`]       – initial state for each body
//! - [`VisualConfig`]     – optional replay settings
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Units are fixed: days, Earth masses, AU and AU/day.
//!
//! ```yaml
//! simulation:
//!   dt: 0.5                 # step size
//!   duration: 365.0         # total time
//!   # n_steps: 730          # give exactly two of dt / duration / n_steps
//!
//! bodies:
//!   - name: Sun
//!     mass: 332946.0
//!     position: [0.0, 0.0]
//!     velocity: [0.0, 0.0]
//!   - name: Earth
//!     mass: 1.0
//!     polar: true           # position = [r, phi], velocity = [v_r, v_phi]
//!     position: [1.0, 0.0]
//!     velocity: [0.0, 0.0172]
//!     relative_to: Sun
//!
//! visual:
//!   figure_size: 6.0
//!   duration: 10.0          # seconds of replay
//!   fps: 30.0               # omit to show every step
//! ```
//!
//! The scenario builder validates this and maps it into runtime types.

use serde::Deserialize;
use thiserror::Error;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Everything that can go wrong between the scenario file and a runnable system
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to open scenario file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("exactly two of dt, duration and n_steps must be given, found {given}")]
    StepParameters { given: usize },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("run needs {n_steps} steps, at most {max} are allowed")]
    TooManySteps { n_steps: f64, max: usize },

    #[error("scenario defines no bodies")]
    NoBodies,

    #[error("body {name}: mass must be finite and positive, got {mass}")]
    BadMass { name: String, mass: f64 },

    #[error("body {name}: {field} needs 2 components, got {len}")]
    Dimension { name: String, field: &'static str, len: usize },

    #[error("body {name}: {field} is not finite")]
    NonFinite { name: String, field: &'static str },

    #[error("body name {0} is used more than once")]
    DuplicateName(String),

    #[error("body {name} is relative to unknown body {reference}")]
    UnknownReference { name: String, reference: String },

    #[error("relative positions starting at body {0} form a cycle")]
    ReferenceCycle(String),
}

/// Step settings; exactly two of the three timing fields are given
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    pub dt: Option<f64>, // step size in days
    pub duration: Option<f64>, // total simulated time in days
    pub n_steps: Option<usize>, // number of steps
    #[serde(default)]
    pub softening: f64, // eps2 added to |r|^2, 0 keeps plain point masses
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    #[serde(default = "unnamed")]
    pub name: String,
    pub mass: f64, // Earth masses
    pub position: Vec<f64>, // [x, y] AU, or [r, phi] when polar
    pub velocity: Vec<f64>, // [vx, vy] AU/day, or [v_r, v_phi] when polar
    #[serde(default)]
    pub polar: bool,
    #[serde(default)]
    pub relative_to: Option<String>, // name of the body these coordinates are measured from
}

fn unnamed() -> String {
    "Unnamed".to_string()
}

/// Replay settings
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct VisualConfig {
    #[serde(default = "default_figure_size")]
    pub figure_size: f64, // window edge in inches, 100 px each
    pub duration: f64, // seconds of replay
    pub fps: Option<f64>, // None shows every step
    pub name: Option<String>, // window title
}

fn default_figure_size() -> f64 {
    6.0
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub simulation: SimulationConfig,
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub visual: Option<VisualConfig>,
}

impl ScenarioConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }
}
