//! Frame composition plan
//!
//! A frame is a flat list of 2D canvas operations over three retained layers.
//! The sand texture is drawn first, the groove layer multiplies into it and
//! the highlight layer adds on top. The rim and vignette follow at normal
//! blending, then either the erase wash or the ball.

use super::pixel::Color;
use super::shapes::{Circle, ERASE_OVERLAY, Ring, SAND_BACKGROUND, ball_glyph, table_frame};
use super::FrameView;
use crate::sim::{TableGeometry, TablePhase};

/// Retained offscreen layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerId {
    /// Speckled sand, regenerated on resize
    Texture,
    /// Accumulated groove shadows, cleared between patterns
    Groove,
    /// Accumulated groove highlights, cleared between patterns
    Highlight,
}

/// Canvas composite operations the table uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    SourceOver,
    Multiply,
    Lighter,
}

impl Blend {
    /// Value for `globalCompositeOperation`
    pub fn as_css(self) -> &'static str {
        match self {
            Blend::SourceOver => "source-over",
            Blend::Multiply => "multiply",
            Blend::Lighter => "lighter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    /// Switch the composite operation for the following ops
    SetBlend(Blend),
    /// Cover the whole surface
    Fill(Color),
    /// Draw a retained layer over the whole surface
    Layer(LayerId),
    Ring(Ring),
    Circle(Circle),
}

/// Operations that composite one frame, in order. Leaves the blend mode at
/// source-over.
pub fn frame_ops(view: &FrameView, geometry: &TableGeometry, ball_radius: f64) -> Vec<DrawOp> {
    let rings = table_frame(geometry);
    let mut ops = Vec::with_capacity(rings.len() + 12);

    ops.push(DrawOp::SetBlend(Blend::SourceOver));
    ops.push(DrawOp::Fill(SAND_BACKGROUND));
    ops.push(DrawOp::Layer(LayerId::Texture));
    ops.push(DrawOp::SetBlend(Blend::Multiply));
    ops.push(DrawOp::Layer(LayerId::Groove));
    ops.push(DrawOp::SetBlend(Blend::Lighter));
    ops.push(DrawOp::Layer(LayerId::Highlight));
    ops.push(DrawOp::SetBlend(Blend::SourceOver));

    ops.extend(rings.into_iter().map(DrawOp::Ring));

    match view.phase {
        TablePhase::Erasing => ops.push(DrawOp::Fill(ERASE_OVERLAY)),
        TablePhase::Tracing => {
            ops.extend(ball_glyph(view.ball, ball_radius).into_iter().map(DrawOp::Circle))
        }
    }
    ops
}
