use rksim::simulation::states::{NVec2, State};
use rksim::simulation::forces::{Acceleration, NewtonianGravity};
use rksim::simulation::integrator::{rk4_step, Rk4};
use rksim::simulation::constants::{G_AU_EARTH_DAY, SOLAR_MASS_EARTH};
use rksim::{Scenario, ScenarioConfig, Trajectory};

use std::f64::consts::PI;

/// Build a simple 2-body state separated along the x-axis
pub fn two_body_state(dist: f64) -> State {
    State {
        x: vec![NVec2::new(-dist / 2.0, 0.0), NVec2::new(dist / 2.0, 0.0)],
        v: vec![NVec2::zeros(); 2],
    }
}

/// Stepper in simulation units
pub fn solar_rk4() -> Rk4<NewtonianGravity> {
    Rk4::new(NewtonianGravity::new(G_AU_EARTH_DAY))
}

/// Run `n` steps of size `dt` from `state`
pub fn run(rk4: &Rk4<NewtonianGravity>, dt: f64, n: usize, masses: &[f64], state: &State) -> State {
    let mut current = state.clone();
    for _ in 0..n {
        current = rk4.step(dt, masses, &current);
    }
    current
}

/// Light body on a circular orbit of radius 1 AU around a heavy one at rest
/// at the origin. Returns masses, initial state and the orbital period.
pub fn circular_orbit(m_light: f64, m_heavy: f64) -> (Vec<f64>, State, f64) {
    let gm = G_AU_EARTH_DAY * (m_light + m_heavy);
    let v_circ = gm.sqrt();
    let period = 2.0 * PI / v_circ;
    let state = State {
        x: vec![NVec2::new(1.0, 0.0), NVec2::zeros()],
        v: vec![NVec2::new(0.0, v_circ), NVec2::zeros()],
    };
    (vec![m_light, m_heavy], state, period)
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let state = two_body_state(1.0);
    let masses = [2.0, 3.0];
    let g = NewtonianGravity::new(0.1);

    let a1 = g.acceleration_on(0, state.x[0], &masses, &state.x);
    let a2 = g.acceleration_on(1, state.x[1], &masses, &state.x);

    let net = a1 * masses[0] + a2 * masses[1];
    assert!(net.norm() < 1e-12, "Net force not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let state = two_body_state(2.0);
    let g = NewtonianGravity::new(0.1);

    let a1 = g.acceleration_on(0, state.x[0], &[1.0, 1.0], &state.x);
    let dx = state.x[1] - state.x[0];

    assert!(a1.dot(&dx) > 0.0, "Acceleration is not toward second body");
}

#[test]
fn gravity_inverse_square_law() {
    let near = two_body_state(1.0);
    let far = two_body_state(2.0);
    let g = NewtonianGravity::new(0.1);

    let a_r = g.acceleration_on(0, near.x[0], &[1.0, 1.0], &near.x);
    let a_2r = g.acceleration_on(0, far.x[0], &[1.0, 1.0], &far.x);

    let ratio = a_r.norm() / a_2r.norm();
    assert!((ratio - 4.0).abs() < 1e-12, "Expected 4x, got {}", ratio);
}

#[test]
fn softening_keeps_coincident_bodies_finite() {
    let state = two_body_state(0.0);
    let rk4 = Rk4::new(NewtonianGravity::new(1.0).with_softening(0.1));

    let next = rk4.step(0.01, &[1.0, 1.0], &state);
    assert!(next.is_finite());
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn single_body_moves_in_a_straight_line() {
    let p = NVec2::new(0.3, -1.2);
    let v = NVec2::new(0.01, 0.02);
    let dt = 0.5;
    let masses = [SOLAR_MASS_EARTH];
    let rk4 = solar_rk4();

    let one = rk4.step(dt, &masses, &State { x: vec![p], v: vec![v] });
    assert!((one.x[0] - (p + dt * v)).norm() < 1e-15);
    assert_eq!(one.v[0], v);

    let many = run(&rk4, dt, 100, &masses, &State { x: vec![p], v: vec![v] });
    assert!((many.x[0] - (p + 100.0 * dt * v)).norm() < 1e-12);
    assert_eq!(many.v[0], v);
}

#[test]
fn symmetric_pair_keeps_center_of_mass_at_origin() {
    let masses = [10.0, 10.0];
    let p = NVec2::new(0.7, 0.2);
    let v = NVec2::new(-0.001, 0.002);
    let state = State { x: vec![p, -p], v: vec![v, -v] };

    let end = run(&solar_rk4(), 1.0, 500, &masses, &state);

    assert!(end.is_finite());
    assert!(end.center_of_mass(&masses).norm() < 1e-12);
}

#[test]
fn momentum_drift_shrinks_with_dt() {
    // Sun and a Jupiter-mass planet at 1 AU, centre-of-mass frame
    let masses = [SOLAR_MASS_EARTH, 317.8];
    let total = masses[0] + masses[1];
    let v_rel = (G_AU_EARTH_DAY * total).sqrt();
    let state = State {
        x: vec![NVec2::zeros(), NVec2::new(1.0, 0.0)],
        v: vec![NVec2::new(0.0, -v_rel * masses[1] / total), NVec2::new(0.0, v_rel * masses[0] / total)],
    };
    let p0 = state.momentum(&masses);
    let rk4 = solar_rk4();

    let drift = |dt: f64, n: usize| (run(&rk4, dt, n, &masses, &state).momentum(&masses) - p0).norm();
    let coarse = drift(1.0, 50);
    let fine = drift(0.5, 100);
    let finer = drift(0.25, 200);

    assert!(fine < 0.75 * coarse, "drift {fine} not below {coarse}");
    assert!(finer < 0.75 * fine, "drift {finer} not below {fine}");
}

#[test]
fn fourth_order_convergence_on_circular_orbit() {
    // Test particle around the Sun: the Sun barely moves, so the exact
    // answer after one period is the starting point.
    let (masses, state, period) = circular_orbit(1e-12, SOLAR_MASS_EARTH);
    let rk4 = solar_rk4();
    let start = state.x[0];

    let error = |n: usize| (run(&rk4, period / n as f64, n, &masses, &state).x[0] - start).norm();
    let coarse = error(200);
    let fine = error(400);

    let ratio = coarse / fine;
    assert!(ratio > 13.0 && ratio < 20.0, "error ratio {ratio}, expected ~16");
}

#[test]
fn earth_returns_after_one_year() {
    let (masses, state, period) = circular_orbit(1.0, SOLAR_MASS_EARTH);
    // ~365.25 days
    assert!((period - 365.25).abs() < 0.5, "period {period}");

    let n = 2000;
    let end = run(&solar_rk4(), period / n as f64, n, &masses, &state);
    assert!((end.x[0] - NVec2::new(1.0, 0.0)).norm() < 1e-3);
}

#[test]
fn stepping_is_deterministic() {
    let (masses, state, _) = circular_orbit(1.0, SOLAR_MASS_EARTH);
    let rk4 = solar_rk4();

    let a = rk4.step(0.7, &masses, &state);
    let b = rk4.step(0.7, &masses, &state);
    assert_eq!(a, b);
}

#[test]
fn parallel_matches_serial_bit_for_bit() {
    let masses: Vec<f64> = (0..40).map(|i| 1.0 + i as f64).collect();
    let state = State {
        x: (0..40).map(|i| NVec2::new((i as f64 * 0.37).sin() * 3.0, (i as f64 * 0.13).cos() * 3.0)).collect(),
        v: (0..40).map(|i| NVec2::new(0.001 * i as f64, -0.002)).collect(),
    };
    let serial = solar_rk4();
    let parallel = solar_rk4().parallel(true);

    let a = run(&serial, 0.5, 10, &masses, &state);
    let b = run(&parallel, 0.5, 10, &masses, &state);
    assert_eq!(a, b);
}

#[test]
fn shape_and_order_preserved() {
    let masses = [1.0, 2.0, 3.0];
    let x = vec![NVec2::new(0.0, 0.0), NVec2::new(1.0, 0.0), NVec2::new(0.0, 1.0)];
    let v = vec![NVec2::zeros(); 3];

    let (nx, nv) = rk4_step(0.1, 1.0, &masses, &x, &v);
    assert_eq!(nx.len(), 3);
    assert_eq!(nv.len(), 3);
    // body 1 is pulled toward the origin side, body 2 likewise
    assert!(nx[1].x < 1.0);
    assert!(nx[2].y < 1.0);
}

#[test]
fn coincident_bodies_give_non_finite_state() {
    let state = two_body_state(0.0);
    let next = solar_rk4().step(1.0, &[1.0, 1.0], &state);
    assert!(!next.is_finite());
}

// ==================================================================================
// Scenario tests
// ==================================================================================

const SOLAR_YAML: &str = "
simulation:
  duration: 365.25
  n_steps: 1461
bodies:
  - name: Sun
    mass: 332946.0
    position: [0.0, 0.0]
    velocity: [0.0, 0.0]
  - name: Earth
    mass: 1.0
    polar: true
    position: [1.0, 0.0]
    velocity: [0.0, 0.0172]
    relative_to: Sun
  - name: Moon
    mass: 0.0123
    polar: true
    position: [0.00257, 1.5707963267948966]
    velocity: [0.0, 0.000591]
    relative_to: Earth
visual:
  duration: 10.0
  fps: 30.0
";

#[test]
fn scenario_builds_and_runs() {
    let cfg = ScenarioConfig::from_reader(SOLAR_YAML.as_bytes()).unwrap();
    let scenario = Scenario::build_scenario(cfg, false).unwrap();

    assert_eq!(scenario.parameters.n_steps, 1461);
    assert!((scenario.parameters.dt - 0.25).abs() < 1e-12);

    // Moon sits above the Earth and shares its orbital velocity
    let moon = &scenario.system.bodies[2];
    assert!((moon.x - NVec2::new(1.0, 0.00257)).norm() < 1e-12);
    assert!((moon.v - NVec2::new(-0.000591, 0.0172)).norm() < 1e-12);

    let traj = Trajectory::integrate(&scenario.system, &scenario.parameters, &scenario.rk4).unwrap();
    assert_eq!(traj.states.len(), 1462);
    assert!(traj.final_state().unwrap().is_finite());
    assert!(traj.max_extent() > 0.9 && traj.max_extent() < 1.1);
}

#[test]
fn scenario_rejects_overdetermined_timing() {
    let yaml = SOLAR_YAML.replace("  n_steps: 1461", "  n_steps: 1461\n  dt: 0.25");
    let cfg = ScenarioConfig::from_reader(yaml.as_bytes()).unwrap();
    assert!(Scenario::build_scenario(cfg, false).is_err());
}

#[test]
fn scenario_rejects_step_count_that_cannot_be_stored() {
    let yaml = SOLAR_YAML.replace("  duration: 365.25\n  n_steps: 1461", "  dt: 1.0e-300\n  duration: 1.0");
    let cfg = ScenarioConfig::from_reader(yaml.as_bytes()).unwrap();
    let err = Scenario::build_scenario(cfg, false).unwrap_err();
    assert!(matches!(err, rksim::ConfigError::TooManySteps { .. }), "unexpected error: {err}");
}
