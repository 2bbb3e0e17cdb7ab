//! Harmonic patterns: sums of sines with close frequencies

use glam::DVec2;
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, TAU};

use super::{Curve, coin_flip, random_float, random_int};

/// Two close harmonic frequencies with slow amplitude modulation.
///
/// The high frequency multipliers already produce a dense weave, so only one
/// to two and a half base revolutions are needed.
#[derive(Debug, Clone, PartialEq)]
pub struct LissajousLabyrinth {
    pub f1: f64,
    pub f2: f64,
    /// Amplitude modulation rate
    pub f3: f64,
    pub phase1: f64,
    pub phase2: f64,
    pub drift: f64,
    pub revs: f64,
}

impl LissajousLabyrinth {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let f1 = random_int(rng, 7, 13);
        let f2 = f1 + if coin_flip(rng) { 2 } else { 4 };
        let f3 = random_int(rng, 2, 5);
        let phase1 = random_float(rng, 0.0, TAU);
        let phase2 = random_float(rng, 0.0, TAU);
        let drift = random_float(rng, 0.5, 2.0);
        let revs = random_float(rng, 1.0, 2.5);
        Self {
            f1: f1 as f64,
            f2: f2 as f64,
            f3: f3 as f64,
            phase1,
            phase2,
            drift,
            revs,
        }
    }
}

impl Curve for LissajousLabyrinth {
    fn eval(&self, t: f64) -> DVec2 {
        let angle = t * TAU * self.revs;
        let amp = 0.85 + 0.15 * (angle / self.f1 * self.f3).sin();
        DVec2::new(
            amp * (angle * self.f1 + self.phase1 + t * self.drift).sin(),
            amp * (angle * self.f2 + self.phase2).cos(),
        )
    }
}

/// Symmetric two-pendulum harmonograph without decay.
///
/// Each axis sums two sines whose frequencies are small integers nudged by a
/// slight detune, so the figure slowly precesses instead of closing.
#[derive(Debug, Clone, PartialEq)]
pub struct Harmonograph {
    /// First pendulum frequency (shared by both axes)
    pub f1: f64,
    /// Second pendulum frequency (shared by both axes)
    pub f2: f64,
    /// Phase of the second y term, a multiple of π/2
    pub p4: f64,
    pub revs: f64,
}

impl Harmonograph {
    const NORMALIZE: f64 = 2.1;

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let u = random_int(rng, 2, 4) as f64;
        let v = random_int(rng, 2, 5) as f64;
        let detune1 = random_float(rng, 0.002, 0.01);
        let detune2 = random_float(rng, 0.002, 0.01);
        let p4 = random_int(rng, 0, 3) as f64 * FRAC_PI_2;
        let revs = random_int(rng, 4, 10) as f64;
        Self {
            f1: u + detune1,
            f2: v + detune2,
            p4,
            revs,
        }
    }
}

impl Curve for Harmonograph {
    fn eval(&self, t: f64) -> DVec2 {
        let time = t * TAU * self.revs;
        let x = (time * self.f1).sin() + (time * self.f2).sin();
        let y = (time * self.f1 + FRAC_PI_2).sin() + (time * self.f2 + self.p4).sin();
        DVec2::new(x, y) / Self::NORMALIZE
    }
}
