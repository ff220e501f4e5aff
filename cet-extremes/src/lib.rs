//! Extreme event detection and analysis.
//!
//! The central operation is [`detect::identify_extremes`]: classify every
//! step of a series against a threshold rule, group consecutive extreme
//! steps into numbered events, and drop events shorter than a minimum
//! duration. Summaries, correlation, and clustering of the flagged steps
//! build on that output.

pub mod cluster;
pub mod correlation;
pub mod detect;
pub mod error;
pub mod runs;
pub mod statistics;
pub mod threshold;

pub use detect::{identify_extremes, ExtremeFlags, FlaggedTable};
pub use error::ExtremesError;
pub use statistics::{compute_extreme_statistics, ExtremeStatistics};
pub use threshold::ThresholdRule;
