use crate::models::table::CsvTable;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// `data-YYYYMMDDHHmm.csv` for the given local time.
pub fn output_file_name(now: NaiveDateTime) -> String {
    now.format("data-%Y%m%d%H%M.csv").to_string()
}

/// `date` followed by every series key, in order of first appearance.
pub fn header(table: &CsvTable) -> Vec<String> {
    let mut columns = vec!["date".to_string()];
    for row in table {
        for column in row.columns() {
            if !columns.iter().any(|c| c == column) {
                columns.push(column.to_string());
            }
        }
    }
    columns
}

pub fn to_csv(table: &CsvTable) -> Result<Vec<u8>> {
    let columns = header(table);
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(&columns)?;
    for row in table {
        let record = columns.iter().map(|column| {
            if column == "date" {
                row.date.format("%Y-%m-%d").to_string()
            } else {
                row.counts
                    .get(column)
                    .map(|count| count.to_string())
                    .unwrap_or_default()
            }
        });
        writer.write_record(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))
}

/// Serializes `table` into a timestamp-named file under `dir`.
pub fn write_csv(table: &CsvTable, dir: &Path, now: NaiveDateTime) -> Result<PathBuf> {
    let csv = to_csv(table).context("Failed to serialize CSV")?;
    let path = dir.join(output_file_name(now));

    fs::write(&path, csv).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(path)
}
