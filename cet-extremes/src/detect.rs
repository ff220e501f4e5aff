use crate::error::ExtremesError;
use crate::runs::label_runs;
use crate::threshold::ThresholdRule;
use cet_series::error::TableError;
use cet_series::table::ClimateTable;
use log::debug;

/// Column names for the annotated CSV form of a flagged table.
pub const COL_IS_EXTREME: &str = "is_extreme";
pub const COL_INTENSITY: &str = "extreme_intensity";
pub const COL_EVENT_ID: &str = "extreme_event_id";

/// Per-step extreme annotations, parallel to a table's rows.
///
/// Invariants: `is_extreme[i]` iff `event_id[i] != 0`; `intensity[i]` is
/// `value - threshold` on extreme steps (>= 0 by the >= comparison, and
/// exactly 0.0 for a step sitting on the threshold) and 0.0 otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremeFlags {
    pub is_extreme: Vec<bool>,
    pub intensity: Vec<f64>,
    pub event_id: Vec<u32>,
}

/// A series annotated by [`identify_extremes`]: the original table, the
/// analyzed variable, the resolved threshold, and the per-step flags.
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedTable {
    pub table: ClimateTable,
    pub variable: String,
    pub threshold_value: f64,
    pub flags: ExtremeFlags,
}

impl FlaggedTable {
    /// Values of the analyzed variable.
    pub fn values(&self) -> &[f64] {
        self.table.column(&self.variable).unwrap_or(&[])
    }

    /// Row indices of extreme steps, in order.
    pub fn extreme_indices(&self) -> Vec<usize> {
        self.flags
            .is_extreme
            .iter()
            .enumerate()
            .filter(|(_, &e)| e)
            .map(|(i, _)| i)
            .collect()
    }

    /// The annotated CSV form: the original columns plus `is_extreme`
    /// (0/1), `extreme_intensity`, and `extreme_event_id`. Fails if the
    /// underlying table already carries annotation columns.
    pub fn to_table(&self) -> Result<ClimateTable, TableError> {
        self.table
            .clone()
            .with_bool_column(COL_IS_EXTREME, &self.flags.is_extreme)?
            .with_column(COL_INTENSITY, self.flags.intensity.clone())?
            .with_column(
                COL_EVENT_ID,
                self.flags.event_id.iter().map(|&id| id as f64).collect(),
            )
    }
}

/// Flag extreme steps of `variable`, group consecutive extreme steps into
/// numbered events, and drop events shorter than `min_duration` steps.
///
/// Event ids are assigned chronologically starting at 1 and are not
/// renumbered after the duration filter, so surviving ids may have gaps.
/// Steps of a dropped event revert fully to the non-extreme state. The
/// input table is not mutated.
pub fn identify_extremes(
    table: &ClimateTable,
    variable: &str,
    rule: &ThresholdRule,
    min_duration: usize,
) -> Result<FlaggedTable, ExtremesError> {
    let values = table
        .column(variable)
        .ok_or_else(|| ExtremesError::UnknownColumn(variable.to_string()))?;

    let threshold_value = rule.resolve(values);
    let above: Vec<bool> = values.iter().map(|&v| v >= threshold_value).collect();
    let spans = label_runs(&above);

    let mut is_extreme = vec![false; values.len()];
    let mut intensity = vec![0.0; values.len()];
    let mut event_id = vec![0u32; values.len()];
    let mut kept = 0usize;
    for span in &spans {
        if span.len < min_duration {
            continue;
        }
        kept += 1;
        for i in span.start..span.end() {
            is_extreme[i] = true;
            intensity[i] = values[i] - threshold_value;
            event_id[i] = span.id;
        }
    }

    debug!(
        "identify_extremes: variable={} threshold={:.4} runs={} kept={}",
        variable,
        threshold_value,
        spans.len(),
        kept
    );

    Ok(FlaggedTable {
        table: table.clone(),
        variable: variable.to_string(),
        threshold_value,
        flags: ExtremeFlags {
            is_extreme,
            intensity,
            event_id,
        },
    })
}
