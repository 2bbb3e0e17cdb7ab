//! Parametric curve library
//!
//! Every pattern is a pure function of progress `t` in `[0, 1]` returning a
//! point in roughly unit-radius space. Shape parameters are drawn once from the
//! engine RNG when the curve is built and never change afterwards, so a curve
//! can be evaluated at any `t`, in any order (the sampler probes slightly ahead
//! of the current progress to measure local speed).

pub mod harmonic;
pub mod polar;
pub mod trochoid;

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use harmonic::{Harmonograph, LissajousLabyrinth};
pub use polar::{ButterflyCurve, InfinityCycle, RationalRose, SpiralGalaxy, Superformula, TorusKnot};
pub use trochoid::{RotoSpiro, Spirograph};

/// A parametric pattern curve
pub trait Curve: Send + Sync + std::fmt::Debug {
    /// Position at progress `t` (total for `t` in `[0, 1]` and slightly beyond)
    fn eval(&self, t: f64) -> DVec2;
}

/// Integer in `[min, max]` inclusive
#[inline]
pub fn random_int<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.random_range(min..=max)
}

/// Float in `[min, max)`
#[inline]
pub fn random_float<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.random_range(min..max)
}

#[inline]
pub fn coin_flip<R: Rng>(rng: &mut R) -> bool {
    rng.random_bool(0.5)
}

/// +1.0 or -1.0 with equal probability
#[inline]
pub fn random_sign<R: Rng>(rng: &mut R) -> f64 {
    if coin_flip(rng) { 1.0 } else { -1.0 }
}

/// The pattern families in the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    Harmonograph,
    RotoSpiro,
    Spirograph,
    RationalRose,
    LissajousLabyrinth,
    SpiralGalaxy,
    TorusKnot,
    Superformula,
    InfinityCycle,
    Butterfly,
}

impl PatternKind {
    pub const ALL: [PatternKind; 10] = [
        PatternKind::Harmonograph,
        PatternKind::RotoSpiro,
        PatternKind::Spirograph,
        PatternKind::RationalRose,
        PatternKind::LissajousLabyrinth,
        PatternKind::SpiralGalaxy,
        PatternKind::TorusKnot,
        PatternKind::Superformula,
        PatternKind::InfinityCycle,
        PatternKind::Butterfly,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Harmonograph => "Harmonograph",
            PatternKind::RotoSpiro => "Roto Spiro",
            PatternKind::Spirograph => "Spirograph Mandala",
            PatternKind::RationalRose => "Rational Rose",
            PatternKind::LissajousLabyrinth => "Lissajous Labyrinth",
            PatternKind::SpiralGalaxy => "Spiral Galaxy",
            PatternKind::TorusKnot => "Torus Knot",
            PatternKind::Superformula => "Superformula Star",
            PatternKind::InfinityCycle => "Infinity Cycle",
            PatternKind::Butterfly => "Butterfly Curve",
        }
    }

    /// Build a fresh curve of this family with randomized parameters
    pub fn create<R: Rng>(&self, rng: &mut R) -> Box<dyn Curve> {
        match self {
            PatternKind::Harmonograph => Box::new(Harmonograph::random(rng)),
            PatternKind::RotoSpiro => Box::new(RotoSpiro::random(rng)),
            PatternKind::Spirograph => Box::new(Spirograph::random(rng)),
            PatternKind::RationalRose => Box::new(RationalRose::random(rng)),
            PatternKind::LissajousLabyrinth => Box::new(LissajousLabyrinth::random(rng)),
            PatternKind::SpiralGalaxy => Box::new(SpiralGalaxy::random(rng)),
            PatternKind::TorusKnot => Box::new(TorusKnot::random(rng)),
            PatternKind::Superformula => Box::new(Superformula::random(rng)),
            PatternKind::InfinityCycle => Box::new(InfinityCycle::random(rng)),
            PatternKind::Butterfly => Box::new(ButterflyCurve::random(rng)),
        }
    }
}
