use crate::error::ExtremesError;
use cet_utils::stats;

/// How the extreme threshold is derived from a series.
///
/// A step is classified extreme iff its value is >= the resolved
/// threshold, with no tolerance band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdRule {
    /// Threshold at the given percentile (0-100) of the full series.
    Percentile(f64),
    /// Threshold used as a literal value.
    Absolute(f64),
    /// Threshold at mean + k standard deviations of the full series
    /// (sample std, ddof = 1).
    Anomaly(f64),
}

impl ThresholdRule {
    /// Bridge for string-valued configuration (CLI, config files).
    /// Unknown method names fail naming the bad value; they are never
    /// silently defaulted.
    pub fn parse(method: &str, threshold: f64) -> Result<Self, ExtremesError> {
        match method {
            "percentile" => Ok(ThresholdRule::Percentile(threshold)),
            "absolute" => Ok(ThresholdRule::Absolute(threshold)),
            "anomaly" => Ok(ThresholdRule::Anomaly(threshold)),
            other => Err(ExtremesError::InvalidMethod(other.to_string())),
        }
    }

    /// Resolve the rule against the full series.
    pub fn resolve(&self, values: &[f64]) -> f64 {
        match *self {
            ThresholdRule::Percentile(pct) => stats::percentile(values, pct),
            ThresholdRule::Absolute(value) => value,
            ThresholdRule::Anomaly(k) => stats::mean(values) + k * stats::sample_std(values),
        }
    }
}
