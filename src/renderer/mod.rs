//! Rendering
//!
//! The engine only talks to a [`Compositor`]: it sizes the surface, presses
//! marks into the persistent buffers, clears them between patterns and asks
//! for a frame. In the browser `SandCanvas` draws with the canvas 2D API
//! following the plan in [`frame`]; [`NullCompositor`] just counts calls for
//! headless runs.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod frame;
pub mod pixel;
pub mod shapes;
pub mod texture;

#[cfg(target_arch = "wasm32")]
pub use canvas::SandCanvas;
pub use frame::{Blend, DrawOp, LayerId, frame_ops};
pub use pixel::Color;

use glam::DVec2;

use crate::sim::{TableGeometry, TablePhase};

/// Per-frame state the overlays depend on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub phase: TablePhase,
    /// Ball position (px)
    pub ball: DVec2,
    /// Fraction of the erase elapsed, 0 while tracing
    pub erase_progress: f64,
}

/// Drawing backend the engine calls into
pub trait Compositor {
    /// Allocate the surface and both persistent buffers (transparent) and
    /// regenerate the background texture
    fn init_surface(&mut self, geometry: &TableGeometry);
    /// Leave a permanent mark at a committed trace point (px)
    fn draw_mark(&mut self, pos: DVec2);
    /// Wipe the groove and highlight buffers
    fn clear_marks(&mut self);
    /// Composite background, marks and overlays for this frame
    fn compose(&mut self, view: &FrameView);
}

/// Compositor that records what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct NullCompositor {
    pub size: Option<f64>,
    pub surfaces: u64,
    pub marks: u64,
    pub marks_since_clear: u64,
    pub clears: u64,
    pub composed: u64,
    pub last_view: Option<FrameView>,
}

impl Compositor for NullCompositor {
    fn init_surface(&mut self, geometry: &TableGeometry) {
        self.size = Some(geometry.size);
        self.surfaces += 1;
        self.marks_since_clear = 0;
    }

    fn draw_mark(&mut self, _pos: DVec2) {
        self.marks += 1;
        self.marks_since_clear += 1;
    }

    fn clear_marks(&mut self) {
        self.clears += 1;
        self.marks_since_clear = 0;
    }

    fn compose(&mut self, view: &FrameView) {
        self.composed += 1;
        self.last_view = Some(*view);
    }
}
