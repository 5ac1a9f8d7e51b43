//! Core types for Habit Coach

mod journal;
mod mood;
mod signals;

pub use journal::*;
pub use mood::*;
pub use signals::*;

pub(crate) use signals::clamp_unit;
