//! Deterministic pattern engine
//!
//! All table logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Time enters only through the elapsed-ms argument of each frame
//! - No rendering or platform dependencies beyond the compositor trait

pub mod curves;
pub mod sampler;
pub mod selector;
pub mod state;
pub mod table;
pub mod tick;

pub use curves::{Curve, PatternKind};
pub use sampler::{FrameSample, GovernedStep, TraversalSampler};
pub use selector::{Pattern, select_pattern};
pub use state::{PatternSession, TableGeometry, TablePhase, TableState};
pub use table::Table;
pub use tick::{TickInput, handle_press, handle_resize, restart, tick};
