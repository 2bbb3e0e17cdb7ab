//! Host-facing table engine
//!
//! Bundles the state and a compositor behind the three calls a host needs:
//! `advance` once per frame, `on_pointer_down` and `on_resize` as events
//! arrive. Any loop can drive it: a browser animation frame, a native game
//! loop or a headless test.

use glam::DVec2;

use super::sampler::FrameSample;
use super::state::{TablePhase, TableState};
use super::tick::{TickInput, handle_press, handle_resize, tick};
use crate::renderer::{Compositor, FrameView};
use crate::settings::Settings;

pub struct Table<C: Compositor> {
    state: TableState,
    compositor: C,
}

impl<C: Compositor> Table<C> {
    pub fn new(settings: Settings, seed: u64, compositor: C) -> Self {
        log::info!("Table created with seed {}", seed);
        Self {
            state: TableState::new(seed, settings),
            compositor,
        }
    }

    /// Run one frame of simulation
    pub fn advance(&mut self, elapsed_ms: f64) -> Option<FrameSample> {
        tick(
            &mut self.state,
            &TickInput::default(),
            elapsed_ms,
            &mut self.compositor,
        )
    }

    /// Pointer pressed at canvas coordinates; restarts if on the table
    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> bool {
        handle_press(&mut self.state, DVec2::new(x, y), &mut self.compositor)
    }

    /// Viewport resized; returns true if the table was rebuilt
    pub fn on_resize(&mut self, width: f64, height: f64) -> bool {
        handle_resize(&mut self.state, width, height, &mut self.compositor)
    }

    /// What the compositor needs to draw this frame's overlays
    pub fn frame_view(&self) -> FrameView {
        FrameView {
            phase: self.state.phase,
            ball: self.state.ball_pos,
            erase_progress: self.state.erase_progress(),
        }
    }

    /// Composite the current frame (no-op until sized)
    pub fn render(&mut self) {
        if self.state.geometry.is_none() {
            return;
        }
        let view = self.frame_view();
        self.compositor.compose(&view);
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn phase(&self) -> TablePhase {
        self.state.phase
    }

    pub fn pattern_name(&self) -> &'static str {
        self.state.pattern_name()
    }

    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut C {
        &mut self.compositor
    }
}
