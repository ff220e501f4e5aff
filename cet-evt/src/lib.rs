//! Extreme value statistics: distribution fitting and return periods.
//!
//! Two estimation routes, each refit from scratch on every call:
//! - block maxima: per-calendar-block maxima fitted with a Type-I
//!   (Gumbel) distribution;
//! - peaks over threshold: exceedances above a high percentile fitted
//!   with a Generalized Pareto distribution.

pub mod error;
pub mod gpd;
pub mod gumbel;
pub mod return_periods;

pub use error::EvtError;
pub use return_periods::{
    compute_return_periods, BlockSize, FitMethod, ReturnPeriodRow, RETURN_PERIOD_YEARS,
};
