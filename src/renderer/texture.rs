//! Procedural sand texture
//!
//! Light speckle: every pixel gets an independent brightness, tinted slightly
//! warm by dropping green and blue a few steps below red.

use rand::Rng;

use super::pixel::Color;

/// Brightness range of a sand grain
const GRAIN_MIN: u8 = 200;
const GRAIN_MAX: u8 = 255;

/// Generate an opaque `size × size` sand texture in row-major order
pub fn generate_sand_texture<R: Rng>(size: u32, rng: &mut R) -> Vec<Color> {
    let len = (size as usize) * (size as usize);
    (0..len)
        .map(|_| {
            let val = rng.random_range(GRAIN_MIN..=GRAIN_MAX);
            Color::rgba8(val, val - 5, val - 10, 255)
        })
        .collect()
}
