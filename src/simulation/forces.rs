//! Acceleration sources for the RK4 engine
//!
//! The integrator asks for the acceleration on one body at a trial
//! position while every other body stays where it was at the start of
//! the step. [`Acceleration`] is that seam; [`NewtonianGravity`] is the
//! direct pairwise inverse-square law.

use crate::simulation::states::NVec2;

/// Acceleration on body `i` placed at `at`, with all other bodies frozen
/// at `positions`. Implementations must skip `j == i`.
pub trait Acceleration {
    fn acceleration_on(&self, i: usize, at: NVec2, masses: &[f64], positions: &[NVec2]) -> NVec2;
}

/// Direct-sum Newtonian gravity
///
/// `eps2` is added to the squared separation. It is zero by default, which
/// leaves coincident bodies as a true `0/0` singularity.
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant in simulation units
    pub eps2: f64, // softening
}

impl NewtonianGravity {
    pub fn new(g: f64) -> Self {
        Self { g, eps2: 0.0 }
    }

    pub fn with_softening(mut self, eps2: f64) -> Self {
        self.eps2 = eps2;
        self
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration_on(&self, i: usize, at: NVec2, masses: &[f64], positions: &[NVec2]) -> NVec2 {
        let mut a = NVec2::zeros();

        for (j, (xj, mj)) in positions.iter().zip(masses.iter()).enumerate() {
            if j == i {
                continue;
            }

            // r points from the trial position toward j
            let r = *xj - at;
            let d2 = r.dot(&r) + self.eps2;

            // G m_j r / |r|^3, with |r|^3 taken as (|r|^2)^1.5
            a += self.g * *mj * (r / d2.powf(1.5));
        }

        a
    }
}
