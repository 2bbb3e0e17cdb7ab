//! Per-frame table update
//!
//! Drives the draw/erase lifecycle. Each frame either traces the current
//! pattern through the sampler or waits out the erase, then starts a fresh
//! pattern. Presses on the table and resizes restart immediately.

use glam::DVec2;

use super::sampler::{FrameSample, TraversalSampler};
use super::state::{TableGeometry, TablePhase, TableState};
use crate::renderer::Compositor;

/// External events for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer press in canvas pixels. Handled before sampling, so a
    /// restarted pattern already advances by this frame's elapsed time.
    pub press: Option<DVec2>,
    /// New viewport size (width, height)
    pub resize: Option<DVec2>,
}

/// Clear the table and begin a new pattern
pub fn restart<C: Compositor + ?Sized>(state: &mut TableState, compositor: &mut C) {
    compositor.clear_marks();
    state.start_new_pattern();
}

/// Restart if the press lands on the table. Returns true if it did.
pub fn handle_press<C: Compositor + ?Sized>(
    state: &mut TableState,
    pos: DVec2,
    compositor: &mut C,
) -> bool {
    let Some(geometry) = state.geometry else {
        return false;
    };
    if !geometry.contains(pos) {
        return false;
    }
    log::info!("Restart requested at ({:.0}, {:.0})", pos.x, pos.y);
    restart(state, compositor);
    true
}

/// Refit the table to a new viewport. Small size changes are ignored; an
/// applied resize rebuilds the surfaces and starts a fresh pattern.
pub fn handle_resize<C: Compositor + ?Sized>(
    state: &mut TableState,
    width: f64,
    height: f64,
    compositor: &mut C,
) -> bool {
    let geometry = TableGeometry::from_viewport(width, height, &state.settings);
    if let Some(current) = state.geometry {
        if (geometry.size - current.size).abs() <= state.settings.resize_threshold {
            return false;
        }
    }
    log::info!("Table size: {}px (viewport {}x{})", geometry.size, width, height);
    state.geometry = Some(geometry);
    compositor.init_surface(&geometry);
    state.start_new_pattern();
    true
}

/// Advance the table by one frame of `elapsed_ms`.
///
/// Returns the frame's sample while tracing. Does nothing until the table
/// has been sized.
pub fn tick<C: Compositor + ?Sized>(
    state: &mut TableState,
    input: &TickInput,
    elapsed_ms: f64,
    compositor: &mut C,
) -> Option<FrameSample> {
    if let Some(viewport) = input.resize {
        handle_resize(state, viewport.x, viewport.y, compositor);
    }
    if let Some(pos) = input.press {
        handle_press(state, pos, compositor);
    }

    let geometry = state.geometry?;

    if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
        state.clock_ms += elapsed_ms;
    }

    match state.phase {
        TablePhase::Tracing => {
            let sampler = TraversalSampler::from_settings(&state.settings);
            let frame = sampler.sample(
                state.session.pattern.curve.as_ref(),
                state.session.progress,
                elapsed_ms,
                &geometry,
                &mut state.last_draw_pos,
            );
            log::trace!(
                "t={:.6} ideal={:.3e} actual={:.3e} projected={:.1}px/s",
                frame.t_end,
                frame.step.ideal_inc,
                frame.step.actual_inc,
                frame.step.projected_speed
            );

            for &p in &frame.committed {
                compositor.draw_mark(p);
            }
            state.ball_pos = frame.ball;
            state.session.progress = state.session.progress.max(frame.t_end);

            if state.session.is_complete() {
                log::debug!("{} complete, erasing", state.pattern_name());
                state.phase = TablePhase::Erasing;
                state.erase_started_ms = state.clock_ms;
            }
            Some(frame)
        }
        TablePhase::Erasing => {
            if state.clock_ms - state.erase_started_ms >= state.settings.erase_duration_ms {
                state.cycles_completed += 1;
                log::debug!("Erase finished after {} cycles", state.cycles_completed);
                restart(state, compositor);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NullCompositor;
    use crate::settings::Settings;
    use crate::sim::curves::{Curve, PatternKind};
    use crate::sim::selector::Pattern;
    use crate::sim::state::PatternSession;

    /// Constant-speed circle around the center
    #[derive(Debug)]
    struct Orbit {
        turns: f64,
    }

    impl Curve for Orbit {
        fn eval(&self, t: f64) -> DVec2 {
            crate::polar_to_cartesian(0.5, t * std::f64::consts::TAU * self.turns)
        }
    }

    fn sized_state(seed: u64) -> (TableState, NullCompositor) {
        let mut state = TableState::new(seed, Settings::default());
        let mut compositor = NullCompositor::default();
        assert!(handle_resize(&mut state, 960.0, 960.0, &mut compositor));
        (state, compositor)
    }

    fn run_until_erasing(state: &mut TableState, compositor: &mut NullCompositor, dt: f64) -> u64 {
        let mut frames = 0;
        while state.phase == TablePhase::Tracing {
            tick(state, &TickInput::default(), dt, compositor);
            frames += 1;
            assert!(frames < 200_000, "{} never finished", state.pattern_name());
        }
        frames
    }

    #[test]
    fn test_noop_before_sizing() {
        let mut state = TableState::new(1, Settings::default());
        let mut compositor = NullCompositor::default();
        assert!(tick(&mut state, &TickInput::default(), 16.0, &mut compositor).is_none());
        assert_eq!(state.progress(), 0.0);
        assert_eq!(state.clock_ms, 0.0);
        assert_eq!(compositor.marks, 0);
    }

    #[test]
    fn test_progress_monotonic_while_tracing() {
        let (mut state, mut compositor) = sized_state(8);
        let mut prev = state.progress();
        for i in 0..2000 {
            let dt = [16.0, 8.0, 40.0, 250.0][i % 4];
            tick(&mut state, &TickInput::default(), dt, &mut compositor);
            if state.phase != TablePhase::Tracing {
                break;
            }
            assert!(state.progress() >= prev);
            assert!(state.progress() <= 1.0);
            prev = state.progress();
        }
        assert!(compositor.marks > 0);
    }

    #[test]
    fn test_full_cycle_returns_to_tracing() {
        let (mut state, mut compositor) = sized_state(42);
        state.session = PatternSession::new(Pattern {
            kind: PatternKind::InfinityCycle,
            curve: Box::new(Orbit { turns: 1.0 }),
        });

        run_until_erasing(&mut state, &mut compositor, 250.0);
        assert_eq!(state.phase, TablePhase::Erasing);
        assert_eq!(state.progress(), 1.0);
        let clears_before = compositor.clears;

        // 8000ms of erasing at 250ms frames
        for _ in 0..31 {
            tick(&mut state, &TickInput::default(), 250.0, &mut compositor);
            assert_eq!(state.phase, TablePhase::Erasing);
        }
        tick(&mut state, &TickInput::default(), 250.0, &mut compositor);
        assert_eq!(state.phase, TablePhase::Tracing);
        assert_eq!(state.progress(), 0.0);
        assert!(state.last_draw_pos.is_none());
        assert_eq!(compositor.clears, clears_before + 1);
        assert_eq!(state.cycles_completed, 1);
    }

    #[test]
    fn test_real_patterns_complete_in_bounded_frames() {
        let (mut state, mut compositor) = sized_state(99);
        for _ in 0..3 {
            let frames = run_until_erasing(&mut state, &mut compositor, 500.0);
            // 180s target at 500ms frames is the fastest possible
            assert!(frames >= 360, "{} finished in {} frames", state.pattern_name(), frames);
            while state.phase == TablePhase::Erasing {
                tick(&mut state, &TickInput::default(), 500.0, &mut compositor);
            }
            assert_eq!(state.progress(), 0.0);
        }
        assert_eq!(state.cycles_completed, 3);
    }

    #[test]
    fn test_erase_progress_reported() {
        let (mut state, mut compositor) = sized_state(5);
        state.session.progress = 1.0;
        tick(&mut state, &TickInput::default(), 16.0, &mut compositor);
        assert_eq!(state.phase, TablePhase::Erasing);
        assert_eq!(state.erase_progress(), 0.0);
        tick(&mut state, &TickInput::default(), 4000.0, &mut compositor);
        assert!((state.erase_progress() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_press_restarts_from_any_phase() {
        let (mut state, mut compositor) = sized_state(17);
        let center = state.geometry.unwrap().center;

        for _ in 0..50 {
            tick(&mut state, &TickInput::default(), 16.0, &mut compositor);
        }
        assert!(state.progress() > 0.0);
        let clears = compositor.clears;
        let input = TickInput {
            press: Some(center),
            ..Default::default()
        };
        let frame = tick(&mut state, &input, 16.0, &mut compositor).unwrap();
        assert_eq!(frame.t_start, 0.0);
        assert_eq!(state.phase, TablePhase::Tracing);
        assert!(state.progress() > 0.0);
        assert!(state.progress() <= 16.0 / 180_000.0);
        assert_eq!(compositor.clears, clears + 1);

        // Again while erasing
        state.session.progress = 1.0;
        tick(&mut state, &TickInput::default(), 16.0, &mut compositor);
        assert_eq!(state.phase, TablePhase::Erasing);
        assert!(handle_press(&mut state, center, &mut compositor));
        assert_eq!(state.phase, TablePhase::Tracing);
        assert_eq!(state.progress(), 0.0);
        assert_eq!(compositor.clears, clears + 2);
    }

    #[test]
    fn test_press_resets_before_sampling() {
        let (mut state, mut compositor) = sized_state(23);
        for _ in 0..40 {
            tick(&mut state, &TickInput::default(), 16.0, &mut compositor);
        }
        let center = state.geometry.unwrap().center;
        assert!(handle_press(&mut state, center, &mut compositor));
        assert_eq!(state.progress(), 0.0);
        assert!(state.last_draw_pos.is_none());
        assert_eq!(compositor.marks_since_clear, 0);
    }

    #[test]
    fn test_press_outside_table_is_ignored() {
        let (mut state, mut compositor) = sized_state(3);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 16.0, &mut compositor);
        }
        let progress = state.progress();
        assert!(!handle_press(&mut state, DVec2::new(-5.0, -5.0), &mut compositor));
        assert_eq!(state.progress(), progress);
        assert_eq!(compositor.clears, 0);
    }

    #[test]
    fn test_small_resize_is_ignored() {
        let (mut state, mut compositor) = sized_state(4);
        assert_eq!(state.geometry.unwrap().size, 800.0);
        assert!(!handle_resize(&mut state, 955.0, 955.0, &mut compositor));
        assert!(handle_resize(&mut state, 700.0, 900.0, &mut compositor));
        assert_eq!(state.geometry.unwrap().size, 540.0);
        assert_eq!(compositor.size, Some(540.0));
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_applied_resize_discards_drawing() {
        let (mut state, mut compositor) = sized_state(6);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), 16.0, &mut compositor);
        }
        assert!(compositor.marks_since_clear > 0);
        assert!(state.progress() > 0.0);

        let input = TickInput {
            resize: Some(DVec2::new(1280.0, 720.0)),
            ..Default::default()
        };
        tick(&mut state, &input, 0.0, &mut compositor);
        assert_eq!(compositor.surfaces, 2);
        assert_eq!(compositor.size, Some(560.0));
        assert_eq!(compositor.marks_since_clear, 0);
        assert_eq!(state.progress(), 0.0);
        assert!(state.last_draw_pos.is_none());

        // A change within the threshold keeps the drawing
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), 16.0, &mut compositor);
        }
        let marks = compositor.marks_since_clear;
        assert!(marks > 0);
        assert!(!handle_resize(&mut state, 1275.0, 725.0, &mut compositor));
        assert_eq!(compositor.surfaces, 2);
        assert_eq!(compositor.marks_since_clear, marks);
    }
}
