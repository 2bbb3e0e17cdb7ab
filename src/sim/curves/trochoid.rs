//! Spirograph family: hypotrochoids and epitrochoids
//!
//! A wheel of radius `r` rolls inside (hypo) or outside (epi) a ring of
//! radius `R`, with the pen at distance `d` from the wheel center. Output is
//! divided by `R + r + d`, the largest extent either form can reach.

use glam::DVec2;
use rand::Rng;
use std::f64::consts::{PI, TAU};

use super::{Curve, coin_flip, random_float, random_int, random_sign};
use crate::rotate;

/// Hypotrochoid point before normalization
#[inline]
fn hypotrochoid(ring: f64, wheel: f64, pen: f64, theta: f64) -> DVec2 {
    let k = (ring - wheel) / wheel;
    DVec2::new(
        (ring - wheel) * theta.cos() + pen * (k * theta).cos(),
        (ring - wheel) * theta.sin() - pen * (k * theta).sin(),
    )
}

/// Epitrochoid point before normalization
#[inline]
fn epitrochoid(ring: f64, wheel: f64, pen: f64, theta: f64) -> DVec2 {
    let k = (ring + wheel) / wheel;
    DVec2::new(
        (ring + wheel) * theta.cos() - pen * (k * theta).cos(),
        (ring + wheel) * theta.sin() - pen * (k * theta).sin(),
    )
}

/// Classic spirograph mandala, slowly rotated as it draws
#[derive(Debug, Clone, PartialEq)]
pub struct Spirograph {
    pub epi: bool,
    pub ring: f64,
    pub wheel: f64,
    pub pen: f64,
    pub revs: f64,
    /// Half-turns of global rotation over the whole pattern
    pub global_rot: f64,
}

impl Spirograph {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let epi = coin_flip(rng);
        // Irrational-ish offsets keep the ratio from closing early
        let ring = random_float(rng, 0.5, 0.8) + 0.00123;
        let wheel = random_float(rng, 0.12, 0.45) + 0.00456;
        let pen = random_float(rng, 0.2, 0.9);
        let revs = random_int(rng, 5, 10) as f64;
        let global_rot = random_float(rng, 0.2, 1.0);
        Self {
            epi,
            ring,
            wheel,
            pen,
            revs,
            global_rot,
        }
    }
}

impl Curve for Spirograph {
    fn eval(&self, t: f64) -> DVec2 {
        let theta = t * TAU * self.revs;
        let raw = if self.epi {
            epitrochoid(self.ring, self.wheel, self.pen, theta)
        } else {
            hypotrochoid(self.ring, self.wheel, self.pen, theta)
        };
        let rotated = rotate(raw, t * PI * self.global_rot);
        rotated / (self.ring + self.wheel + self.pen)
    }
}

/// Hypotrochoid drawn in a frame that itself spins at a drifting rate
#[derive(Debug, Clone, PartialEq)]
pub struct RotoSpiro {
    pub ring: f64,
    pub wheel: f64,
    pub pen: f64,
    /// Frame turns over the pattern (signed)
    pub frame_speed: f64,
    pub drift: f64,
    pub revs: f64,
}

impl RotoSpiro {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let ring = random_float(rng, 0.4, 0.6);
        let wheel = random_float(rng, 0.1, 0.3);
        let pen = random_float(rng, 0.3, 0.8);
        let frame_speed = random_float(rng, 1.0, 4.0) * random_sign(rng);
        let drift = random_float(rng, 0.1, 0.5);
        let revs = random_int(rng, 4, 8) as f64;
        Self {
            ring,
            wheel,
            pen,
            frame_speed,
            drift,
            revs,
        }
    }
}

impl Curve for RotoSpiro {
    fn eval(&self, t: f64) -> DVec2 {
        let theta = t * TAU * self.revs;
        let frame_theta = t * TAU * (self.frame_speed + t * self.drift * 0.1);
        let raw = hypotrochoid(self.ring, self.wheel, self.pen, theta);
        rotate(raw, frame_theta) / (self.ring + self.wheel + self.pen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spirograph_never_leaves_unit_disk() {
        let mut rng = Pcg32::seed_from_u64(21);
        for _ in 0..100 {
            let c = Spirograph::random(&mut rng);
            for i in 0..=600 {
                let p = c.eval(i as f64 / 600.0);
                assert!(p.length() <= 1.0 + 1e-9, "{:?} escaped: {:?}", c, p);
            }
        }
    }

    #[test]
    fn test_spirograph_parameter_ranges() {
        let mut rng = Pcg32::seed_from_u64(22);
        let mut saw_epi = false;
        let mut saw_hypo = false;
        for _ in 0..200 {
            let c = Spirograph::random(&mut rng);
            assert!(c.ring >= 0.50123 && c.ring < 0.80123);
            assert!(c.wheel >= 0.12456 && c.wheel < 0.45456);
            assert!((0.2..0.9).contains(&c.pen));
            assert!((5.0..=10.0).contains(&c.revs));
            saw_epi |= c.epi;
            saw_hypo |= !c.epi;
        }
        assert!(saw_epi && saw_hypo);
    }

    #[test]
    fn test_hypotrochoid_start() {
        // At theta = 0 the pen sits at (R - r + d, 0)
        let p = hypotrochoid(0.5, 0.2, 0.4, 0.0);
        assert!((p.x - 0.7).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
    }

    #[test]
    fn test_roto_spiro_frame_sign_varies() {
        let mut rng = Pcg32::seed_from_u64(23);
        let speeds: Vec<f64> = (0..100).map(|_| RotoSpiro::random(&mut rng).frame_speed).collect();
        assert!(speeds.iter().any(|s| *s > 0.0));
        assert!(speeds.iter().any(|s| *s < 0.0));
        assert!(speeds.iter().all(|s| (1.0..4.0).contains(&s.abs())));
    }

    #[test]
    fn test_roto_spiro_bounded() {
        let mut rng = Pcg32::seed_from_u64(24);
        for _ in 0..50 {
            let c = RotoSpiro::random(&mut rng);
            for i in 0..=600 {
                assert!(c.eval(i as f64 / 600.0).length() <= 1.0 + 1e-9);
            }
        }
    }
}
