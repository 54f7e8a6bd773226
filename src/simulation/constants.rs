//! Physical constants and the unit system of the simulation
//!
//! Internal units are AU, Earth masses and days. Gravity is scaled into
//! those units once, here, and handed to the force law by value.

/// Newton's gravitational constant, m^3 kg^-1 s^-2 (CODATA 2018)
pub const G_SI: f64 = 6.67430e-11;

/// Metres per astronomical unit
pub const AU_M: f64 = 1.495978707e11;

/// Kilograms per Earth mass
pub const EARTH_MASS_KG: f64 = 5.972e24;

/// Seconds per day (24 h days)
pub const DAY_S: f64 = 86_400.0;

/// Earth masses per solar mass
pub const SOLAR_MASS_EARTH: f64 = 332_946.0;

/// G in AU^3 M_earth^-1 day^-2
///
/// `G_SI * (m -> AU)^3 / ((kg -> M_earth) * (s -> day)^2)`
pub const G_AU_EARTH_DAY: f64 = G_SI * EARTH_MASS_KG * DAY_S * DAY_S / (AU_M * AU_M * AU_M);
