//! Polar-form patterns: roses, spirals, knots, stars, lemniscates

use glam::DVec2;
use rand::Rng;
use std::f64::consts::{PI, TAU};

use super::{Curve, random_float, random_int, random_sign};
use crate::{polar_to_cartesian, rotate};

/// Rose `r = cos(kθ)` with rational `k = n/d` and slow precession
#[derive(Debug, Clone, PartialEq)]
pub struct RationalRose {
    pub n: f64,
    pub d: f64,
    pub precession: f64,
    pub revs: f64,
}

impl RationalRose {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let n = random_int(rng, 3, 11) as f64;
        let d = random_int(rng, 2, 7) as f64;
        let precession = random_float(rng, 0.1, 0.4) * random_sign(rng);
        let revs = random_int(rng, 6, 12) as f64;
        Self {
            n,
            d,
            precession,
            revs,
        }
    }
}

impl Curve for RationalRose {
    fn eval(&self, t: f64) -> DVec2 {
        let theta = t * TAU * self.revs;
        let k = self.n / self.d;
        let r = (k * theta + theta * 0.01 + t * PI * self.precession).cos();
        polar_to_cartesian(r, theta)
    }
}

/// Multi-arm spiral growing outward as `t^0.6`
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralGalaxy {
    pub arms: f64,
    pub curvature: f64,
    pub revs: f64,
    pub arm_phase: f64,
    pub drift: f64,
}

impl SpiralGalaxy {
    const NORMALIZE: f64 = 1.15;

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let arms = random_int(rng, 3, 9) as f64;
        let curvature = random_float(rng, 0.5, 1.5);
        let revs = random_int(rng, 4, 8) as f64;
        let arm_phase = random_float(rng, 0.0, PI);
        let drift = random_float(rng, 0.2, 0.8);
        Self {
            arms,
            curvature,
            revs,
            arm_phase,
            drift,
        }
    }
}

impl Curve for SpiralGalaxy {
    fn eval(&self, t: f64) -> DVec2 {
        let theta = t * TAU * self.revs;
        let r = t.max(0.0).powf(0.6) + 0.1 * (self.arms * theta + self.arm_phase).sin();
        let phi = theta * self.curvature + t * PI * self.drift;
        polar_to_cartesian(r, phi) / Self::NORMALIZE
    }
}

/// `(p, q)` torus knot seen from above
#[derive(Debug, Clone, PartialEq)]
pub struct TorusKnot {
    pub p: f64,
    pub q: f64,
    pub revs: f64,
    pub drift: f64,
}

impl TorusKnot {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let p = random_int(rng, 2, 7);
        let q = p + random_int(rng, 1, 3);
        let revs = random_int(rng, 3, 6) as f64;
        let drift = random_float(rng, 0.5, 1.5);
        Self {
            p: p as f64,
            q: q as f64,
            revs,
            drift,
        }
    }
}

impl Curve for TorusKnot {
    fn eval(&self, t: f64) -> DVec2 {
        let phi = t * TAU * self.revs;
        let radius = 0.6 + 0.25 * (self.q * phi + t * self.drift).cos();
        polar_to_cartesian(radius, self.p * phi)
    }
}

/// Gielis superformula star with a slow extra rotation
#[derive(Debug, Clone, PartialEq)]
pub struct Superformula {
    pub m: f64,
    pub n1: f64,
    pub n2: f64,
    pub n3: f64,
    pub revs: f64,
    pub rotation_speed: f64,
}

impl Superformula {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let m = random_int(rng, 3, 12) as f64;
        let n1 = random_float(rng, 0.5, 3.0);
        let n2 = random_float(rng, 0.5, 3.0);
        let n3 = random_float(rng, 0.5, 3.0);
        let revs = random_int(rng, 5, 10) as f64;
        let rotation_speed = random_float(rng, 0.1, 0.3) * random_sign(rng);
        Self {
            m,
            n1,
            n2,
            n3,
            revs,
            rotation_speed,
        }
    }

    /// Superformula radius at angle `phi`
    fn radius(&self, phi: f64) -> f64 {
        let term1 = (self.m * phi / 4.0).cos().abs().powf(self.n2);
        let term2 = (self.m * phi / 4.0).sin().abs().powf(self.n3);
        (term1 + term2).powf(-1.0 / self.n1)
    }
}

impl Curve for Superformula {
    fn eval(&self, t: f64) -> DVec2 {
        let phi = t * TAU * self.revs;
        let rot = phi * 0.05 + t * TAU * self.rotation_speed;
        polar_to_cartesian(self.radius(phi) * 0.5, phi + rot)
    }
}

/// Lemniscate of Bernoulli, slowly rotating
#[derive(Debug, Clone, PartialEq)]
pub struct InfinityCycle {
    pub revs: f64,
    pub rotation_speed: f64,
}

impl InfinityCycle {
    const SCALE: f64 = 0.8;

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let revs = random_int(rng, 4, 8) as f64;
        let rotation_speed = random_float(rng, 0.02, 0.1);
        Self {
            revs,
            rotation_speed,
        }
    }
}

impl Curve for InfinityCycle {
    fn eval(&self, t: f64) -> DVec2 {
        let theta = t * TAU * self.revs;
        let (sin, cos) = theta.sin_cos();
        let denom = 1.0 + sin * sin;
        let base = DVec2::new(Self::SCALE * cos / denom, Self::SCALE * sin * cos / denom);
        let rot = theta * 0.01 + t * PI * 4.0 * self.rotation_speed;
        rotate(base, rot)
    }
}

/// Temple Fay's butterfly curve with rotational drift
#[derive(Debug, Clone, PartialEq)]
pub struct ButterflyCurve {
    pub revs: f64,
    pub drift: f64,
}

impl ButterflyCurve {
    const SCALE: f64 = 0.18;

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let revs = random_int(rng, 4, 8) as f64;
        let drift = random_float(rng, 0.2, 0.6);
        Self { revs, drift }
    }
}

impl Curve for ButterflyCurve {
    fn eval(&self, t: f64) -> DVec2 {
        let theta = t * TAU * self.revs;
        let r_raw = theta.sin().exp() - 2.0 * (4.0 * theta).cos()
            + ((2.0 * theta - PI) / 24.0).sin().powi(5);
        let rot = t * PI * self.drift;
        polar_to_cartesian(r_raw * Self::SCALE, theta + rot)
    }
}
