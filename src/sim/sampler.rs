//! Adaptive traversal sampler
//!
//! Advances progress along a curve by real elapsed time while keeping the
//! ball's on-screen speed under a fixed cap. Curves differ wildly in how fast
//! their position changes per unit of progress, so the increment is governed
//! by the local curve speed rather than by time alone:
//!
//! 1. The ideal increment would finish the pattern in the target duration.
//! 2. Local speed is probed just ahead of the current progress and projected
//!    to pixels; if the ideal step would exceed the cap it is scaled down.
//! 3. The interval is split into sub-steps so large steps leave no gaps.
//! 4. The sub-step polyline is measured; if the curve accelerated inside the
//!    interval (common after a stall) the step is shrunk again.
//! 5. Points closer than a small threshold to the last committed point are
//!    not redrawn.

use glam::DVec2;

use super::curves::Curve;
use super::state::TableGeometry;
use crate::clamp_to_unit_disk;
use crate::settings::Settings;

/// Passes allowed to shrink a step whose measured path overshoots the cap
const MAX_REFINE_PASSES: u32 = 24;
/// Passes that scale by the overshoot ratio before falling back to halving
const RATIO_PASSES: u32 = 4;
/// Relative slack before a refinement pass kicks in
const REFINE_TOLERANCE: f64 = 1e-3;

/// Outcome of the linear speed governor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GovernedStep {
    /// Increment that finishes the pattern in the target duration
    pub ideal_inc: f64,
    /// Increment after speed capping
    pub actual_inc: f64,
    /// Pixel speed the ideal increment would have produced (px/s)
    pub projected_speed: f64,
}

/// Everything one frame of sampling produced
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSample {
    pub t_start: f64,
    pub t_end: f64,
    pub step: GovernedStep,
    /// Ball position at the end of the interval (px), drawn or not
    pub ball: DVec2,
    /// Points committed to the groove this frame (px)
    pub committed: Vec<DVec2>,
}

/// Speed-governed curve walker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversalSampler {
    pub target_duration_ms: f64,
    pub max_speed_px_per_sec: f64,
    pub sub_steps: u32,
    pub min_draw_dist_sq: f64,
    pub probe_offset: f64,
}

impl Default for TraversalSampler {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl TraversalSampler {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            target_duration_ms: settings.target_duration_ms,
            max_speed_px_per_sec: settings.max_speed_px_per_sec,
            sub_steps: settings.sub_steps.max(1),
            min_draw_dist_sq: settings.min_draw_dist_sq,
            probe_offset: settings.probe_offset,
        }
    }

    /// Normalized distance per unit of progress around `t`
    pub fn local_speed(&self, curve: &dyn Curve, t: f64) -> f64 {
        let here = curve.eval(t);
        let ahead = curve.eval(t + self.probe_offset);
        here.distance(ahead) / self.probe_offset
    }

    /// Linear speed governor: cap the increment so the projected pixel speed
    /// does not exceed the limit
    pub fn governed_increment(
        &self,
        curve: &dyn Curve,
        t: f64,
        elapsed_ms: f64,
        draw_scale: f64,
    ) -> GovernedStep {
        let ideal_inc = elapsed_ms / self.target_duration_ms;
        if !ideal_inc.is_finite() || ideal_inc <= 0.0 {
            return GovernedStep {
                ideal_inc: 0.0,
                actual_inc: 0.0,
                projected_speed: 0.0,
            };
        }

        let projected_dist_px = self.local_speed(curve, t) * ideal_inc * draw_scale;
        let projected_speed = projected_dist_px / elapsed_ms * 1000.0;

        let actual_inc = if projected_speed > self.max_speed_px_per_sec {
            ideal_inc * (self.max_speed_px_per_sec / projected_speed)
        } else {
            ideal_inc
        };

        GovernedStep {
            ideal_inc,
            actual_inc,
            projected_speed,
        }
    }

    /// Pixel position of the curve at `t`, clamped to the drawing disk
    #[inline]
    pub fn pixel_at(&self, curve: &dyn Curve, t: f64, geometry: &TableGeometry) -> DVec2 {
        geometry.to_pixels(clamp_to_unit_disk(curve.eval(t)))
    }

    /// Sub-step pixel points over `(t_start, t_end]`
    fn sub_points(
        &self,
        curve: &dyn Curve,
        t_start: f64,
        t_end: f64,
        geometry: &TableGeometry,
    ) -> Vec<DVec2> {
        (1..=self.sub_steps)
            .map(|i| {
                let frac = i as f64 / self.sub_steps as f64;
                let t = t_start + (t_end - t_start) * frac;
                self.pixel_at(curve, t, geometry)
            })
            .collect()
    }

    /// Advance one frame from progress `t`.
    ///
    /// Committed points are returned in order; `last_draw` is updated to the
    /// last one. The caller stores `t_end` as the new progress.
    pub fn sample(
        &self,
        curve: &dyn Curve,
        t: f64,
        elapsed_ms: f64,
        geometry: &TableGeometry,
        last_draw: &mut Option<DVec2>,
    ) -> FrameSample {
        let t_start = t.clamp(0.0, 1.0);
        let step = self.governed_increment(curve, t_start, elapsed_ms, geometry.draw_scale);
        let start_px = self.pixel_at(curve, t_start, geometry);

        if step.actual_inc <= 0.0 {
            return FrameSample {
                t_start,
                t_end: t_start,
                step,
                ball: start_px,
                committed: Vec::new(),
            };
        }

        let budget_px = self.max_speed_px_per_sec * elapsed_ms / 1000.0;
        let mut span = (t_start + step.actual_inc).min(1.0) - t_start;
        let mut points = self.sub_points(curve, t_start, t_start + span, geometry);

        for pass in 0..MAX_REFINE_PASSES {
            let travelled = path_length(start_px, &points);
            if travelled <= budget_px * (1.0 + REFINE_TOLERANCE) {
                break;
            }
            log::trace!(
                "refining step: travelled {:.2}px, budget {:.2}px",
                travelled,
                budget_px
            );
            let ratio = budget_px / travelled;
            span *= if pass < RATIO_PASSES { ratio } else { ratio.min(0.5) };
            points = self.sub_points(curve, t_start, t_start + span, geometry);
        }

        let t_end = if span >= 1.0 - t_start {
            1.0
        } else {
            t_start + span
        };

        let mut committed = Vec::with_capacity(points.len());
        for &p in &points {
            let coincident = last_draw
                .map(|last| p.distance_squared(last) < self.min_draw_dist_sq)
                .unwrap_or(false);
            if !coincident {
                committed.push(p);
                *last_draw = Some(p);
            }
        }

        let ball = points.last().copied().unwrap_or(start_px);

        FrameSample {
            t_start,
            t_end,
            step: GovernedStep {
                actual_inc: span.min(step.actual_inc),
                ..step
            },
            ball,
            committed,
        }
    }
}

/// Length of the polyline from `start` through `points`
fn path_length(start: DVec2, points: &[DVec2]) -> f64 {
    let mut prev = start;
    let mut total = 0.0;
    for &p in points {
        total += prev.distance(p);
        prev = p;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::curves::PatternKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Stationary curve
    #[derive(Debug)]
    struct Still;

    impl Curve for Still {
        fn eval(&self, _t: f64) -> DVec2 {
            DVec2::new(0.1, 0.2)
        }
    }

    /// Straight line at constant normalized speed
    #[derive(Debug)]
    struct Line {
        start: DVec2,
        velocity: DVec2,
    }

    impl Curve for Line {
        fn eval(&self, t: f64) -> DVec2 {
            self.start + self.velocity * t
        }
    }

    fn geometry() -> TableGeometry {
        TableGeometry::new(800.0, 0.47)
    }

    #[test]
    fn test_negligible_speed_is_not_capped() {
        let sampler = TraversalSampler::default();
        let step = sampler.governed_increment(&Still, 0.5, 16.0, geometry().draw_scale);
        assert!((step.ideal_inc - 16.0 / 180_000.0).abs() < 1e-15);
        assert!((step.ideal_inc - 0.0000889).abs() < 1e-7);
        assert_eq!(step.actual_inc, step.ideal_inc);
        assert_eq!(step.projected_speed, 0.0);
    }

    #[test]
    fn test_fast_segment_is_capped_to_limit() {
        let sampler = TraversalSampler::default();
        let g = geometry();
        let curve = Line {
            start: DVec2::new(-0.9, 0.0),
            velocity: DVec2::new(50.0, 0.0),
        };
        let step = sampler.governed_increment(&curve, 0.001, 16.0, g.draw_scale);
        assert!(step.projected_speed > sampler.max_speed_px_per_sec);
        assert!(step.actual_inc < step.ideal_inc);

        // Re-project with the capped increment
        let speed = sampler.local_speed(&curve, 0.001) * step.actual_inc * g.draw_scale / 16.0 * 1000.0;
        assert!((speed - sampler.max_speed_px_per_sec).abs() < 1e-6);
    }

    #[test]
    fn test_zero_elapsed_does_not_advance() {
        let sampler = TraversalSampler::default();
        let mut last = None;
        let curve = PatternKind::Harmonograph.create(&mut Pcg32::seed_from_u64(1));
        for elapsed in [0.0, -5.0, f64::NAN] {
            let frame = sampler.sample(curve.as_ref(), 0.3, elapsed, &geometry(), &mut last);
            assert_eq!(frame.t_end, 0.3);
            assert!(frame.committed.is_empty());
        }
        assert!(last.is_none());
    }

    #[test]
    fn test_coincident_points_are_suppressed() {
        let sampler = TraversalSampler::default();
        let mut last = None;
        let frame = sampler.sample(&Still, 0.0, 16.0, &geometry(), &mut last);
        // First point commits, the rest sit on top of it
        assert_eq!(frame.committed.len(), 1);
        let frame = sampler.sample(&Still, frame.t_end, 16.0, &geometry(), &mut last);
        assert!(frame.committed.is_empty());
        assert_eq!(frame.ball, last.unwrap());
    }

    #[test]
    fn test_ball_tracks_last_sub_step_even_when_suppressed() {
        let sampler = TraversalSampler::default();
        let g = geometry();
        let curve = Line {
            start: DVec2::ZERO,
            velocity: DVec2::new(0.001, 0.0),
        };
        let mut last = Some(g.center);
        let frame = sampler.sample(&curve, 0.0, 16.0, &g, &mut last);
        assert!(frame.committed.is_empty());
        let expected = sampler.pixel_at(&curve, frame.t_end, &g);
        assert!(frame.ball.distance(expected) < 1e-9);
    }

    #[test]
    fn test_progress_clamps_at_one() {
        let sampler = TraversalSampler::default();
        let mut last = None;
        let frame = sampler.sample(&Still, 0.99999, 1000.0, &geometry(), &mut last);
        assert_eq!(frame.t_end, 1.0);
    }

    #[test]
    fn test_points_stay_inside_drawing_disk() {
        let sampler = TraversalSampler::default();
        let g = geometry();
        let curve = Line {
            start: DVec2::new(2.0, 2.0),
            velocity: DVec2::new(-0.1, 0.0),
        };
        let mut last = None;
        let frame = sampler.sample(&curve, 0.0, 16.0, &g, &mut last);
        for p in frame.committed.iter().chain(std::iter::once(&frame.ball)) {
            assert!(p.distance(g.center) <= g.draw_scale + 1e-9);
        }
    }

    #[test]
    fn test_speed_cap_holds_across_frame_times() {
        let sampler = TraversalSampler::default();
        let g = geometry();
        let deltas = [4.0, 16.0, 16.7, 33.0, 100.0, 500.0, 2500.0, 10_000.0];
        let mut rng = Pcg32::seed_from_u64(2024);
        for kind in PatternKind::ALL {
            let curve = kind.create(&mut rng);
            let mut t = 0.0;
            let mut last = None;
            let mut prev_ball = sampler.pixel_at(curve.as_ref(), t, &g);
            for i in 0..400 {
                let elapsed = deltas[i % deltas.len()];
                let frame = sampler.sample(curve.as_ref(), t, elapsed, &g, &mut last);
                assert!(frame.t_end >= t);

                let travelled = path_length(prev_ball, &frame_points(&sampler, curve.as_ref(), &frame, &g));
                let speed = travelled / elapsed * 1000.0;
                assert!(
                    speed <= sampler.max_speed_px_per_sec * 1.01,
                    "{} ran at {:.2}px/s with dt={}",
                    kind.name(),
                    speed,
                    elapsed
                );
                prev_ball = frame.ball;
                t = frame.t_end;
            }
        }
    }

    /// Sub-step points of a sampled frame, committed or not
    fn frame_points(
        sampler: &TraversalSampler,
        curve: &dyn Curve,
        frame: &FrameSample,
        g: &TableGeometry,
    ) -> Vec<DVec2> {
        sampler.sub_points(curve, frame.t_start, frame.t_end, g)
    }
}
