use crate::models::traffic::Sample;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Series key to its samples, in the order the API returned them.
pub type StatsTable = BTreeMap<String, Vec<Sample>>;

/// One output line. `counts` iterates in alphabetical key order and only
/// holds series that reported a sample for `date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub date: NaiveDate,
    pub counts: BTreeMap<String, u64>,
}

impl Row {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            counts: BTreeMap::new(),
        }
    }

    /// Column names in output order: `date` then the series keys.
    pub fn columns(&self) -> Vec<&str> {
        std::iter::once("date")
            .chain(self.counts.keys().map(String::as_str))
            .collect()
    }
}

pub type CsvTable = Vec<Row>;
