//! Core time series types for the climate extremes toolkit.
//!
//! A [`table::ClimateTable`] is an ordered set of UTC timestamps with one or
//! more named numeric columns. All downstream analysis (extreme detection,
//! return periods, heatwave flagging) consumes and produces these tables;
//! no operation mutates its input in place.

pub mod csv_io;
pub mod error;
pub mod synthetic;
pub mod table;

/// Column name carrying the UTC timestamp in CSV files.
pub const COL_DATETIME: &str = "datetime_utc";

/// Canonical climate variable columns produced by the synthetic generator
/// and expected by the default clustering configuration.
pub const VAR_TEMPERATURE: &str = "temperature_c";
pub const VAR_PRECIPITATION: &str = "precipitation_mm";
pub const VAR_PRESSURE: &str = "pressure_hpa";

/// Hourly 2m mean temperature as delivered by the weather data loader.
pub const VAR_T2M_MEAN: &str = "t2m_mean_c";

/// Hourly day-ahead electricity price as delivered by the price loader.
pub const VAR_PRICE: &str = "price_eur_mwh";
