//! Agglomerative (Ward-linkage) clustering of extreme steps.
//!
//! Extreme steps are standardized feature-wise and merged bottom-up with
//! the Lance-Williams update for Ward's criterion until exactly
//! `n_clusters` clusters remain. Labels are deterministic for identical
//! input, but their numbering is an artifact of merge order, not a
//! semantic ordering.

use crate::detect::FlaggedTable;
use crate::error::ExtremesError;
use cet_series::{VAR_PRECIPITATION, VAR_PRESSURE, VAR_TEMPERATURE};
use cet_utils::stats;
use log::debug;

/// Variables used when the caller does not name any: the canonical
/// climate columns, restricted to those present in the table.
pub const DEFAULT_CLUSTER_VARIABLES: [&str; 3] =
    [VAR_TEMPERATURE, VAR_PRECIPITATION, VAR_PRESSURE];

/// Cluster the extreme steps of a flagged series into `n_clusters` groups.
///
/// Returns one label per row of the underlying table: non-extreme steps
/// get 0, extreme steps get a label in 1..=n_clusters. When there are
/// fewer extreme steps than requested clusters every step gets 0 — an
/// explicit fallback, not an error.
pub fn cluster_extreme_events(
    flagged: &FlaggedTable,
    n_clusters: usize,
    variables: Option<&[&str]>,
) -> Result<Vec<u32>, ExtremesError> {
    let names: Vec<&str> = match variables {
        Some(names) => {
            for name in names {
                if !flagged.table.has_column(name) {
                    return Err(ExtremesError::UnknownColumn(name.to_string()));
                }
            }
            names.to_vec()
        }
        None => DEFAULT_CLUSTER_VARIABLES
            .iter()
            .copied()
            .filter(|name| flagged.table.has_column(name))
            .collect(),
    };
    if names.is_empty() {
        return Err(ExtremesError::NoClusterVariables);
    }

    let indices = flagged.extreme_indices();
    let mut labels = vec![0u32; flagged.table.len()];
    if n_clusters == 0 || indices.len() < n_clusters {
        debug!(
            "cluster_extreme_events: {} extreme steps < {} clusters, single-cluster fallback",
            indices.len(),
            n_clusters
        );
        return Ok(labels);
    }

    // Standardize each feature over the extreme steps (z-score with
    // population std; a constant feature contributes zeros).
    let mut points: Vec<Vec<f64>> = vec![Vec::with_capacity(names.len()); indices.len()];
    for name in &names {
        let column = flagged.table.column(name).unwrap_or(&[]);
        let selected: Vec<f64> = indices.iter().map(|&i| column[i]).collect();
        let mean = stats::mean(&selected);
        let std = stats::population_std(&selected);
        for (point, value) in points.iter_mut().zip(&selected) {
            point.push(if std > 0.0 { (value - mean) / std } else { 0.0 });
        }
    }

    let assignment = ward_labels(&points, n_clusters);
    for (slot, cluster) in indices.iter().zip(&assignment) {
        labels[*slot] = *cluster;
    }
    Ok(labels)
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Ward-linkage agglomeration: merge the closest pair of clusters until
/// `n_clusters` remain, updating inter-cluster distances with the
/// Lance-Williams recurrence over squared Euclidean distances. Returns a
/// 1-based cluster label per point, numbered by each cluster's earliest
/// point.
fn ward_labels(points: &[Vec<f64>], n_clusters: usize) -> Vec<u32> {
    let n = points.len();
    let mut active: Vec<bool> = vec![true; n];
    let mut size: Vec<f64> = vec![1.0; n];
    let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();

    let mut dist = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = squared_distance(&points[i], &points[j]);
            dist[i][j] = d;
            dist[j][i] = d;
        }
    }

    let mut remaining = n;
    while remaining > n_clusters {
        // closest active pair; ties resolved by lowest indices
        let mut best = (0usize, 0usize);
        let mut best_dist = f64::INFINITY;
        for i in 0..n {
            if !active[i] {
                continue;
            }
            for j in (i + 1)..n {
                if active[j] && dist[i][j] < best_dist {
                    best_dist = dist[i][j];
                    best = (i, j);
                }
            }
        }

        let (i, j) = best;
        let (ni, nj) = (size[i], size[j]);
        let dij = dist[i][j];
        for k in 0..n {
            if !active[k] || k == i || k == j {
                continue;
            }
            let nk = size[k];
            let updated = ((ni + nk) * dist[i][k] + (nj + nk) * dist[j][k] - nk * dij)
                / (ni + nj + nk);
            dist[i][k] = updated;
            dist[k][i] = updated;
        }

        let moved = std::mem::take(&mut members[j]);
        members[i].extend(moved);
        size[i] += size[j];
        active[j] = false;
        remaining -= 1;
    }

    // Number surviving clusters by their earliest point index.
    let mut order: Vec<usize> = (0..n).filter(|&i| active[i]).collect();
    order.sort_by_key(|&i| members[i].iter().copied().min().unwrap_or(usize::MAX));

    let mut labels = vec![0u32; n];
    for (rank, &cluster) in order.iter().enumerate() {
        for &point in &members[cluster] {
            labels[point] = rank as u32 + 1;
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::identify_extremes;
    use crate::threshold::ThresholdRule;
    use cet_series::table::ClimateTable;
    use chrono::{DateTime, TimeZone, Utc};

    fn flagged_with_features(x: &[f64], y: &[f64]) -> FlaggedTable {
        let timestamps: Vec<DateTime<Utc>> = (0..x.len())
            .map(|i| {
                Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
                    + chrono::TimeDelta::try_days(i as i64).unwrap()
            })
            .collect();
        let table = ClimateTable::from_columns(
            timestamps,
            vec![("x".to_string(), x.to_vec()), ("y".to_string(), y.to_vec())],
        )
        .unwrap();
        // threshold below every value: every step is extreme, one event
        identify_extremes(&table, "x", &ThresholdRule::Absolute(f64::MIN), 1).unwrap()
    }

    #[test]
    fn test_two_separated_blobs() {
        let x = [0.0, 0.1, 0.2, 10.0, 10.1, 10.2];
        let y = [0.0, 0.2, 0.1, 10.0, 10.2, 10.1];
        let flagged = flagged_with_features(&x, &y);
        let labels = cluster_extreme_events(&flagged, 2, Some(&["x", "y"])).unwrap();

        // partition consistency, not specific numbering
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_ne!(labels[0], labels[3]);
        assert!(labels.iter().all(|&l| l == 1 || l == 2));
    }

    #[test]
    fn test_non_extreme_steps_get_zero() {
        let x = [0.0, 100.0, 100.1, 0.1, 100.2, 0.2];
        let y = [0.0; 6];
        let timestamps: Vec<DateTime<Utc>> = (0..6)
            .map(|i| {
                Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
                    + chrono::TimeDelta::try_days(i as i64).unwrap()
            })
            .collect();
        let table = ClimateTable::from_columns(
            timestamps,
            vec![("x".to_string(), x.to_vec()), ("y".to_string(), y.to_vec())],
        )
        .unwrap();
        let flagged =
            identify_extremes(&table, "x", &ThresholdRule::Absolute(50.0), 1).unwrap();
        let labels = cluster_extreme_events(&flagged, 2, Some(&["x", "y"])).unwrap();
        assert_eq!(labels[0], 0);
        assert_eq!(labels[3], 0);
        assert_eq!(labels[5], 0);
        assert!(labels[1] > 0 && labels[2] > 0 && labels[4] > 0);
    }

    #[test]
    fn test_degenerate_fallback() {
        let flagged = flagged_with_features(&[1.0, 2.0], &[1.0, 2.0]);
        let labels = cluster_extreme_events(&flagged, 5, Some(&["x", "y"])).unwrap();
        assert_eq!(labels, vec![0, 0]);
    }

    #[test]
    fn test_deterministic() {
        let x = [0.0, 0.3, 5.0, 5.2, 9.9, 10.0];
        let y = [1.0, 1.1, 4.0, 4.2, 8.0, 8.1];
        let flagged = flagged_with_features(&x, &y);
        let a = cluster_extreme_events(&flagged, 3, Some(&["x", "y"])).unwrap();
        let b = cluster_extreme_events(&flagged, 3, Some(&["x", "y"])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_explicit_variable() {
        let flagged = flagged_with_features(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        let err = cluster_extreme_events(&flagged, 2, Some(&["z"])).unwrap_err();
        assert_eq!(err, ExtremesError::UnknownColumn("z".to_string()));
    }

    #[test]
    fn test_no_default_variables_present() {
        let flagged = flagged_with_features(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        let err = cluster_extreme_events(&flagged, 2, None).unwrap_err();
        assert_eq!(err, ExtremesError::NoClusterVariables);
    }
}
