//! Extreme event flagging command.

use crate::{load_table, save_table};
use cet_extremes::cluster::cluster_extreme_events;
use cet_extremes::{compute_extreme_statistics, identify_extremes, ThresholdRule};
use log::info;

#[allow(clippy::too_many_arguments)]
pub fn run_extremes(
    input: &str,
    output: &str,
    variable: &str,
    method: &str,
    threshold: f64,
    min_duration: usize,
    n_clusters: Option<usize>,
) -> anyhow::Result<()> {
    let table = load_table(input)?;
    info!("Loaded {} rows from {}", table.len(), input);

    let rule = ThresholdRule::parse(method, threshold)?;
    let flagged = identify_extremes(&table, variable, &rule, min_duration)?;

    let stats = compute_extreme_statistics(&flagged);
    info!(
        "{}: {} events over {} steps (threshold {:.3})",
        variable, stats.n_events, stats.total_steps, flagged.threshold_value
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);

    let mut annotated = flagged.to_table()?;
    if let Some(n_clusters) = n_clusters {
        let labels = cluster_extreme_events(&flagged, n_clusters, None)?;
        annotated = annotated.with_column(
            "extreme_cluster",
            labels.iter().map(|&l| l as f64).collect(),
        )?;
    }

    save_table(&annotated, output)?;
    info!("Annotated series written to {}", output);
    Ok(())
}
