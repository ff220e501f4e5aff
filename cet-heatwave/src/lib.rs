//! Heatwave flagging and price/weather table preparation.
//!
//! Heatwaves follow the same threshold-then-run-length pattern as extreme
//! event detection, but always with an absolute threshold over daily
//! maxima: a day is hot iff its daily maximum is >= the threshold, and a
//! run of at least `min_duration` consecutive hot days is a heatwave.
//! The daily flag can be expanded back onto hourly data and merged with
//! hourly prices for downstream correlation analysis.

pub mod daily;
pub mod flags;
pub mod merge;

pub use daily::{compute_daily_max, DailyValue};
pub use flags::{expand_heatwave_flag_to_hourly, flag_heatwaves, HeatwaveDay};
pub use merge::{merge_price_and_weather, restrict_common_period};
