use std::time::Instant;

use crate::simulation::constants::G_AU_EARTH_DAY;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::Rk4;
use crate::simulation::states::{NVec2, State};

/// Helper to build deterministic masses and state for `n` bodies
pub fn make_state(n: usize) -> (Vec<f64>, State) {
    let mut masses = Vec::with_capacity(n);
    let mut x = Vec::with_capacity(n);
    let mut v = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        x.push(NVec2::new((i_f * 0.37).sin() * 5.0, (i_f * 0.13).cos() * 5.0));
        v.push(NVec2::new((i_f * 0.11).cos() * 0.01, (i_f * 0.29).sin() * 0.01));
        masses.push(1.0 + (i % 7) as f64);
    }

    (masses, State { x, v })
}

/// Time serial and rayon RK4 steps for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_rk4() {
    println!("N,serial_ms,parallel_ms");

    for n in [25, 50, 100, 200, 400, 800, 1600] {
        // Large n: fewer steps to avoid minutes of runtime
        let steps = if n <= 200 { 20 } else { 3 };
        let (masses, state) = make_state(n);
        let dt = 0.1;

        let serial = Rk4::new(NewtonianGravity::new(G_AU_EARTH_DAY));
        let parallel = serial.clone().parallel(true);

        // Warm-up
        let _ = parallel.step(dt, &masses, &state);

        let ms_serial = time_steps(&serial, dt, &masses, &state, steps);
        let ms_parallel = time_steps(&parallel, dt, &masses, &state, steps);

        println!("{},{:.6},{:.6}", n, ms_serial, ms_parallel);
    }
}

// Mean wall time per step in milliseconds
fn time_steps(rk4: &Rk4<NewtonianGravity>, dt: f64, masses: &[f64], state: &State, steps: usize) -> f64 {
    let mut current = state.clone();
    let t0 = Instant::now();
    for _ in 0..steps {
        current = rk4.step(dt, masses, &current);
    }
    t0.elapsed().as_secs_f64() * 1000.0 / steps as f64
}
