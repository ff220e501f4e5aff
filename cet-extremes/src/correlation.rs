use crate::error::ExtremesError;
use cet_series::table::ClimateTable;
use cet_utils::stats;
use serde::Serialize;

/// Pearson correlation matrix over a set of table columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub variables: Vec<String>,
    /// values[i][j] = correlation(variables[i], variables[j])
    pub values: Vec<Vec<f64>>,
}

/// Pearson correlation between two equally long columns. A constant
/// column has no defined correlation; 0.0 is returned for it.
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len();
    if n == 0 {
        return 0.0;
    }
    let mean_a = stats::mean(a);
    let mean_b = stats::mean(b);
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        cov += (x - mean_a) * (y - mean_b);
        var_a += (x - mean_a) * (x - mean_a);
        var_b += (y - mean_b) * (y - mean_b);
    }
    if var_a == 0.0 || var_b == 0.0 {
        return 0.0;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}

/// Correlation matrix for the named variables, or for every column of
/// the table when `variables` is None.
pub fn correlation_matrix(
    table: &ClimateTable,
    variables: Option<&[&str]>,
) -> Result<CorrelationMatrix, ExtremesError> {
    let names: Vec<String> = match variables {
        Some(names) => {
            for name in names {
                if !table.has_column(name) {
                    return Err(ExtremesError::UnknownColumn(name.to_string()));
                }
            }
            names.iter().map(|n| n.to_string()).collect()
        }
        None => table.column_names().iter().map(|n| n.to_string()).collect(),
    };

    let columns: Vec<&[f64]> = names
        .iter()
        .filter_map(|name| table.column(name))
        .collect();
    let mut values = vec![vec![0.0; names.len()]; names.len()];
    for i in 0..columns.len() {
        for j in i..columns.len() {
            let r = if i == j {
                1.0
            } else {
                pearson(columns[i], columns[j])
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        variables: names,
        values,
    })
}
