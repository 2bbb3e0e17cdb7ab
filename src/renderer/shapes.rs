//! Shape definitions for marks, the ball and the table frame
//!
//! Sizes are relative to the ball radius or, for the rim and vignette, to
//! the table size over an 800px reference.

use glam::DVec2;

use super::pixel::Color;
use crate::sim::TableGeometry;

/// Filled circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub diameter: f64,
    pub color: Color,
}

/// Stroked circle outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub center: DVec2,
    pub diameter: f64,
    pub width: f64,
    pub color: Color,
}

/// Base sand color laid under the texture every frame
pub const SAND_BACKGROUND: Color = Color::rgba8(245, 240, 235, 255);

/// Per-frame sand-colored wash drawn over the table while erasing
pub const ERASE_OVERLAY: Color = Color::rgba8(245, 240, 235, 15);

const RIM_COLOR: Color = Color::rgba8(40, 30, 20, 255);
const VIGNETTE_COLOR: Color = Color::rgba8(20, 10, 0, 5);
const VIGNETTE_RINGS: usize = 25;

/// Shadow circles pressed into the groove layer at a trace point
pub fn groove_marks(pos: DVec2, ball_radius: f64) -> [Circle; 2] {
    [
        Circle {
            center: pos,
            diameter: ball_radius * 2.8,
            color: Color::rgba8(60, 50, 40, 6),
        },
        Circle {
            center: pos,
            diameter: ball_radius * 1.6,
            color: Color::rgba8(40, 30, 20, 8),
        },
    ]
}

/// Highlight left on the groove's upper-left lip
pub fn highlight_mark(pos: DVec2, ball_radius: f64) -> Circle {
    Circle {
        center: pos - DVec2::splat(ball_radius * 0.6),
        diameter: ball_radius * 1.4,
        color: Color::rgba8(255, 255, 255, 12),
    }
}

/// Ball drawn on top of everything: drop shadow, body, specular
pub fn ball_glyph(pos: DVec2, ball_radius: f64) -> [Circle; 3] {
    [
        Circle {
            center: pos + DVec2::splat(3.0),
            diameter: ball_radius * 2.2,
            color: Color::rgba8(0, 0, 0, 100),
        },
        Circle {
            center: pos,
            diameter: ball_radius * 2.0,
            color: Color::grey(180),
        },
        Circle {
            center: pos - DVec2::splat(1.5),
            diameter: ball_radius * 0.8,
            color: Color::grey(255),
        },
    ]
}

/// Wooden rim followed by the darkening vignette rings, in draw order
pub fn table_frame(geometry: &TableGeometry) -> Vec<Ring> {
    let scale = geometry.stroke_scale();
    let mut rings = Vec::with_capacity(VIGNETTE_RINGS + 1);
    rings.push(Ring {
        center: geometry.center,
        diameter: geometry.size + 8.0 * scale,
        width: 25.0 * scale,
        color: RIM_COLOR,
    });
    // Ring 0 has zero width and draws nothing
    rings.extend((1..VIGNETTE_RINGS).map(|i| Ring {
        center: geometry.center,
        diameter: geometry.size - i as f64 * scale,
        width: i as f64 * 1.5 * scale,
        color: VIGNETTE_COLOR,
    }));
    rings
}
