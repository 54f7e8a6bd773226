//! Which trajectory steps become replay frames, and at what rate

/// Frame schedule for replaying `n_steps` steps in `replay_seconds`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlan {
    pub frame_step: usize, // trajectory steps per frame
    pub n_frames: usize,
    pub fps: f64,
}

impl FramePlan {
    /// With no `fps` every step is shown and the rate stretches to fit
    /// `replay_seconds`. Otherwise steps are skipped so the replay lasts
    /// about `replay_seconds` at `fps`.
    pub fn new(n_steps: usize, fps: Option<f64>, replay_seconds: f64) -> Self {
        let (frame_step, fps) = match fps {
            None => (1, n_steps as f64 / replay_seconds),
            Some(fps) => {
                let step = (n_steps as f64 / (fps * replay_seconds)).round_ties_even() as usize;
                (step.max(1), fps)
            }
        };

        Self {
            frame_step,
            n_frames: n_steps / frame_step,
            fps,
        }
    }

    /// Trajectory index shown by frame `frame`
    pub fn step_of(&self, frame: usize) -> usize {
        frame * self.frame_step
    }
}

/// Half-width of a square window that keeps every body in view
pub fn window_half_width(max_extent: f64) -> f64 {
    let s = 1.1 * max_extent;
    if s > 0.0 { s } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_step_without_fps() {
        let plan = FramePlan::new(300, None, 10.0);
        assert_eq!(plan.frame_step, 1);
        assert_eq!(plan.n_frames, 300);
        assert!((plan.fps - 30.0).abs() < 1e-12);
    }

    #[test]
    fn skips_steps_to_fit_rate() {
        let plan = FramePlan::new(3000, Some(30.0), 10.0);
        assert_eq!(plan.frame_step, 10);
        assert_eq!(plan.n_frames, 300);
        assert_eq!(plan.step_of(7), 70);
    }

    #[test]
    fn frame_step_ties_round_to_even() {
        // 25 steps at 1 fps over 10 s: 2.5 steps per frame
        let plan = FramePlan::new(25, Some(1.0), 10.0);
        assert_eq!(plan.frame_step, 2);
        assert_eq!(plan.n_frames, 12);
    }

    #[test]
    fn never_zero_frame_step() {
        let plan = FramePlan::new(10, Some(60.0), 10.0);
        assert_eq!(plan.frame_step, 1);
        assert_eq!(plan.n_frames, 10);
    }

    #[test]
    fn window_has_margin() {
        assert!((window_half_width(2.0) - 2.2).abs() < 1e-12);
        assert_eq!(window_half_width(0.0), 1.0);
    }
}
