pub mod states;
pub mod params;
pub mod constants;
pub mod forces;
pub mod integrator;
pub mod scenario;
pub mod trajectory;
