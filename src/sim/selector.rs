//! Pattern selection
//!
//! Each cycle picks one family uniformly at random and builds a fresh curve.

use rand::Rng;

use super::curves::{Curve, PatternKind};

/// A freshly built pattern and its display name
#[derive(Debug)]
pub struct Pattern {
    pub kind: PatternKind,
    pub curve: Box<dyn Curve>,
}

impl Pattern {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Pick a pattern family uniformly and instantiate it
pub fn select_pattern<R: Rng>(rng: &mut R) -> Pattern {
    let kind = PatternKind::ALL[rng.random_range(0..PatternKind::ALL.len())];
    let curve = kind.create(rng);
    log::info!("Starting pattern: {}", kind.name());
    Pattern { kind, curve }
}
