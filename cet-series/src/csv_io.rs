//! CSV load/store for climate tables.
//!
//! This is the data-loader contract: one `datetime_utc` column in RFC 3339,
//! every other column numeric. Order of rows is preserved; timestamps must
//! already be sorted.

use crate::error::TableError;
use crate::table::ClimateTable;
use crate::COL_DATETIME;
use chrono::{DateTime, Utc};
use log::debug;
use std::io;

/// Read a climate table from CSV. The header must contain a
/// `datetime_utc` column; every other header becomes a numeric column.
pub fn read_climate_csv<R: io::Read>(reader: R) -> Result<ClimateTable, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let dt_index = headers
        .iter()
        .position(|h| h == COL_DATETIME)
        .ok_or_else(|| TableError::UnknownColumn(COL_DATETIME.to_string()))?;

    let value_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != dt_index)
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    let mut timestamps: Vec<DateTime<Utc>> = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); value_columns.len()];

    for record in csv_reader.records() {
        let record = record?;
        let raw = record.get(dt_index).unwrap_or("");
        let ts = DateTime::parse_from_rfc3339(raw)
            .map_err(|_| TableError::Timestamp(raw.to_string()))?
            .with_timezone(&Utc);
        timestamps.push(ts);

        for (slot, (index, name)) in value_columns.iter().enumerate() {
            let cell = record.get(*index).unwrap_or("");
            let value = cell.trim().parse::<f64>().map_err(|_| TableError::Value {
                column: name.clone(),
                value: cell.to_string(),
            })?;
            columns[slot].push(value);
        }
    }

    debug!(
        "read_climate_csv: {} rows, {} value columns",
        timestamps.len(),
        value_columns.len()
    );
    ClimateTable::from_columns(
        timestamps,
        value_columns
            .into_iter()
            .map(|(_, name)| name)
            .zip(columns)
            .collect(),
    )
}

/// Write a climate table as CSV, `datetime_utc` first, then the columns
/// in table order.
pub fn write_climate_csv<W: io::Write>(table: &ClimateTable, writer: W) -> Result<(), TableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![COL_DATETIME.to_string()];
    header.extend(table.column_names().iter().map(|n| n.to_string()));
    csv_writer.write_record(&header)?;

    let columns: Vec<&[f64]> = table
        .column_names()
        .iter()
        .filter_map(|n| table.column(n))
        .collect();

    for (i, ts) in table.timestamps().iter().enumerate() {
        let mut row = vec![ts.to_rfc3339()];
        for col in &columns {
            row.push(col[i].to_string());
        }
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush().map_err(|e| TableError::Csv(e.to_string()))?;
    Ok(())
}
