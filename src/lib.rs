pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, System, State, NVec2};
pub use simulation::constants::{G_AU_EARTH_DAY, SOLAR_MASS_EARTH};
pub use simulation::forces::{Acceleration, NewtonianGravity};
pub use simulation::integrator::{rk4_step, Rk4};
pub use simulation::scenario::Scenario;
pub use simulation::trajectory::{steps_path, SimulationError, Trajectory};

pub use configuration::config::{BodyConfig, ConfigError, ScenarioConfig, SimulationConfig, VisualConfig};

pub use visualization::frames::FramePlan;
#[cfg(feature = "viewer")]
pub use visualization::viewer2d::run_2d;

pub use benchmark::benchmark::bench_rk4;
