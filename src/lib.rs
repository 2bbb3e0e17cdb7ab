//! Kinetic Sand - an endless sand table that traces parametric patterns
//!
//! Core modules:
//! - `sim`: Deterministic pattern engine (curves, sampler, draw/erase lifecycle)
//! - `renderer`: Compositor boundary, frame plan and the browser sand canvas
//! - `settings`: Tunable engine constants
//! - `error`: Settings and canvas errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{RenderError, SettingsError};
pub use settings::Settings;
pub use sim::{PatternKind, Table, TablePhase};

use glam::DVec2;

/// Engine configuration defaults
pub mod consts {
    /// Wall-clock duration a pattern would take at uniform curve speed
    pub const TARGET_DURATION_MS: f64 = 180.0 * 1000.0;
    /// On-screen speed cap for the ball
    pub const MAX_SPEED_PX_PER_SEC: f64 = 60.0;
    /// How long the table erases before the next pattern
    pub const ERASE_DURATION_MS: f64 = 8000.0;
    /// Sub-samples evaluated per frame interval
    pub const SUB_STEPS: u32 = 6;
    /// Squared pixel distance below which a point is not redrawn
    pub const MIN_DRAW_DIST_SQ: f64 = 0.6;
    /// Forward offset used to estimate local curve speed
    pub const PROBE_OFFSET: f64 = 0.0001;

    /// Ball radius in pixels
    pub const BALL_RADIUS: f64 = 4.5;

    /// Table sizing policy
    pub const MIN_TABLE_SIZE: f64 = 300.0;
    pub const MAX_TABLE_SIZE: f64 = 800.0;
    pub const VIEWPORT_MARGIN: f64 = 160.0;
    /// Drawing radius as a fraction of the table diameter
    pub const DRAW_SCALE_RATIO: f64 = 0.47;
    /// Resizes smaller than this (px) are ignored
    pub const RESIZE_THRESHOLD: f64 = 10.0;
    /// Table size the rim/vignette strokes are designed for
    pub const REFERENCE_TABLE_SIZE: f64 = 800.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Rotate a point about the origin
#[inline]
pub fn rotate(p: DVec2, angle: f64) -> DVec2 {
    DVec2::from_angle(angle).rotate(p)
}

/// Project points outside the unit disk radially back onto the unit circle
#[inline]
pub fn clamp_to_unit_disk(p: DVec2) -> DVec2 {
    let dist_sq = p.length_squared();
    if dist_sq > 1.0 { p / dist_sq.sqrt() } else { p }
}
