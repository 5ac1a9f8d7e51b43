//! Terminal rendering for Habit Coach
//!
//! Plain-text views of a submission report, the journal history and the
//! mood trend, written for a terminal.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod history;
pub mod summary;
pub mod trend;

pub use history::render_history;
pub use summary::render_summary;
pub use trend::{render_trend, DEFAULT_TREND_HEIGHT};

/// Score in [0, 1] as a percentage with one decimal
pub(crate) fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}
