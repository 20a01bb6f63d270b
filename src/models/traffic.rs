use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, de};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: &'static str,
    pub name: &'static str,
}

impl RepoRef {
    pub const fn new(owner: &'static str, name: &'static str) -> Self {
        Self { owner, name }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Clones,
    Views,
}

impl MetricKind {
    /// Name of the traffic endpoint and of the array in its response body.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Clones => "clones",
            MetricKind::Views => "views",
        }
    }

    pub fn endpoint_template(&self) -> &'static str {
        match self {
            MetricKind::Clones => "/repos/##owner##/##name##/traffic/clones?per=day",
            MetricKind::Views => "/repos/##owner##/##name##/traffic/views?per=day",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{repoName}-{metric}`, e.g. `recipes-clones`.
pub fn series_key(repo: &RepoRef, metric: MetricKind) -> String {
    format!("{}-{}", repo.name, metric)
}

/// One day of traffic. Only the calendar date of `timestamp` is kept.
#[derive(Debug, Deserialize, Clone)]
pub struct TrafficEntry {
    #[serde(rename = "timestamp", deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct TrafficResponse {
    pub clones: Option<Vec<TrafficEntry>>,
    pub views: Option<Vec<TrafficEntry>>,
}

impl TrafficResponse {
    /// The per-day array for `metric`, if the body carried one.
    pub fn into_entries(self, metric: MetricKind) -> Option<Vec<TrafficEntry>> {
        match metric {
            MetricKind::Clones => self.clones,
            MetricKind::Views => self.views,
        }
    }
}

/// Date portion of an ISO-8601 timestamp, as written. An offset, if present,
/// does not move the date.
pub fn parse_timestamp_date(timestamp: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").ok()
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp_date(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid timestamp `{}`", raw)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub date: NaiveDate,
    pub count: u64,
}

impl From<&TrafficEntry> for Sample {
    fn from(entry: &TrafficEntry) -> Self {
        Self {
            date: entry.date,
            count: entry.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_key() {
        let repo = RepoRef::new("substrate-developer-hub", "recipes");
        assert_eq!(series_key(&repo, MetricKind::Clones), "recipes-clones");
        assert_eq!(series_key(&repo, MetricKind::Views), "recipes-views");
    }

    #[test]
    fn test_parse_clones_response() {
        let body = r#"{
            "count": 173,
            "uniques": 128,
            "clones": [
                {"timestamp": "2024-01-01T00:00:00Z", "count": 2, "uniques": 1},
                {"timestamp": "2024-01-02T00:00:00Z", "count": 8, "uniques": 7}
            ]
        }"#;

        let response: TrafficResponse = serde_json::from_str(body).unwrap();
        let samples: Vec<Sample> = response
            .into_entries(MetricKind::Clones)
            .unwrap()
            .iter()
            .map(Sample::from)
            .collect();

        assert_eq!(
            samples,
            vec![
                Sample { date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), count: 2 },
                Sample { date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), count: 8 },
            ]
        );
    }

    #[test]
    fn test_wrong_metric_array_is_absent() {
        let body = r#"{"count": 1, "uniques": 1, "views": []}"#;
        let response: TrafficResponse = serde_json::from_str(body).unwrap();
        assert!(response.into_entries(MetricKind::Clones).is_none());
    }

    #[test]
    fn test_timestamp_date_ignores_offset() {
        let entry: TrafficEntry =
            serde_json::from_str(r#"{"timestamp": "2024-01-01T00:30:00+02:00", "count": 4}"#)
                .unwrap();
        let sample = Sample::from(&entry);
        assert_eq!(sample.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(sample.count, 4);

        let late = parse_timestamp_date("2024-03-07T23:30:00-05:00").unwrap();
        assert_eq!(late, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
    }

    #[test]
    fn test_timestamp_without_offset() {
        let entry: TrafficEntry =
            serde_json::from_str(r#"{"timestamp": "2024-01-01T00:00:00", "count": 2}"#).unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert_eq!(
            parse_timestamp_date("2024-01-05T12:00:00.250"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_timestamp_date("2024-01-06"),
            NaiveDate::from_ymd_opt(2024, 1, 6)
        );
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        assert_eq!(parse_timestamp_date("yesterday"), None);
        let result: Result<TrafficEntry, _> =
            serde_json::from_str(r#"{"timestamp": "yesterday", "count": 1}"#);
        assert!(result.is_err());
    }
}
