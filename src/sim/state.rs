//! Table state and core engine types
//!
//! Everything the frame loop mutates lives in [`TableState`]; nothing else
//! holds engine state.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::selector::{Pattern, select_pattern};
use crate::consts::REFERENCE_TABLE_SIZE;
use crate::settings::Settings;

/// Current phase of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TablePhase {
    /// The ball is tracing the current pattern
    Tracing,
    /// The pattern is complete and the table is being wiped
    Erasing,
}

/// Table size and the mapping from normalized to pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableGeometry {
    /// Table diameter (px)
    pub size: f64,
    pub center: DVec2,
    /// Pixel radius of the unit disk
    pub draw_scale: f64,
}

impl TableGeometry {
    pub fn new(size: f64, draw_scale_ratio: f64) -> Self {
        Self {
            size,
            center: DVec2::splat(size / 2.0),
            draw_scale: size * draw_scale_ratio,
        }
    }

    /// Fit the table into a viewport, leaving the configured margin
    pub fn from_viewport(width: f64, height: f64, settings: &Settings) -> Self {
        let sanitize = |v: f64| if v.is_finite() { v } else { 0.0 };
        let max_dim = sanitize(width).min(sanitize(height));
        let size = (max_dim - settings.viewport_margin)
            .min(settings.max_table_size)
            .max(settings.min_table_size);
        Self::new(size, settings.draw_scale_ratio)
    }

    /// Map a normalized point into canvas pixels
    #[inline]
    pub fn to_pixels(&self, p: DVec2) -> DVec2 {
        self.center + p * self.draw_scale
    }

    /// Is a canvas point on the table surface
    pub fn contains(&self, p: DVec2) -> bool {
        p.distance(self.center) <= self.size / 2.0
    }

    /// Scale for decorative strokes relative to the reference table size
    pub fn stroke_scale(&self) -> f64 {
        self.size / REFERENCE_TABLE_SIZE
    }
}

/// The pattern being traced and how far along it is
#[derive(Debug)]
pub struct PatternSession {
    pub pattern: Pattern,
    /// Progress along the curve, in `[0, 1]`
    pub progress: f64,
}

impl PatternSession {
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            progress: 0.0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Complete engine state, owned by the frame loop
#[derive(Debug)]
pub struct TableState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub settings: Settings,
    pub phase: TablePhase,
    pub session: PatternSession,
    /// None until the host sizes the table
    pub geometry: Option<TableGeometry>,
    /// Sum of all frame deltas (ms)
    pub clock_ms: f64,
    /// Clock value when erasing began
    pub erase_started_ms: f64,
    /// Last committed trace point (px), for coincident-point suppression
    pub last_draw_pos: Option<DVec2>,
    /// Where the ball is drawn this frame (px)
    pub ball_pos: DVec2,
    /// Patterns traced to completion and erased
    pub cycles_completed: u64,
}

impl TableState {
    /// Create a table with the given seed; the first pattern is selected immediately
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let session = PatternSession::new(select_pattern(&mut rng));
        Self {
            seed,
            rng,
            settings,
            phase: TablePhase::Tracing,
            session,
            geometry: None,
            clock_ms: 0.0,
            erase_started_ms: 0.0,
            last_draw_pos: None,
            ball_pos: DVec2::ZERO,
            cycles_completed: 0,
        }
    }

    /// Replace the session with a freshly selected pattern and start tracing it
    pub fn start_new_pattern(&mut self) {
        self.session = PatternSession::new(select_pattern(&mut self.rng));
        self.last_draw_pos = None;
        self.phase = TablePhase::Tracing;
        if let Some(geometry) = self.geometry {
            self.ball_pos = geometry.to_pixels(crate::clamp_to_unit_disk(
                self.session.pattern.curve.eval(0.0),
            ));
        }
    }

    pub fn progress(&self) -> f64 {
        self.session.progress
    }

    pub fn pattern_name(&self) -> &'static str {
        self.session.pattern.name()
    }

    /// Fraction of the erase phase elapsed (0 while tracing)
    pub fn erase_progress(&self) -> f64 {
        match self.phase {
            TablePhase::Tracing => 0.0,
            TablePhase::Erasing => {
                ((self.clock_ms - self.erase_started_ms) / self.settings.erase_duration_ms)
                    .clamp(0.0, 1.0)
            }
        }
    }
}
