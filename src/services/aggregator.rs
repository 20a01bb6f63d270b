use crate::models::table::{CsvTable, Row, StatsTable};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Pivots the fetched series into one row per date.
///
/// Rows come out in chronological order. A row carries a column for a series
/// only if that series reported the date; missing series are not zero-filled.
pub fn to_csv_table(stats: &StatsTable) -> CsvTable {
    let mut rows: BTreeMap<NaiveDate, Row> = BTreeMap::new();

    for (key, samples) in stats {
        for sample in samples {
            rows.entry(sample.date)
                .or_insert_with(|| Row::new(sample.date))
                .counts
                .insert(key.clone(), sample.count);
        }
    }

    rows.into_values().collect()
}
