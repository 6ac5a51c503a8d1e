use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::UnitId;
use crate::time::is_recent;

/// A previously scored session, as listed by the backend history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<UnitId>,
    #[serde(
        rename = "title",
        alias = "passageTitle",
        alias = "sectionTitle",
        alias = "testTitle",
        default
    )]
    pub title: Option<String>,
    #[serde(default)]
    pub band_score: Option<f64>,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub total_questions: Option<u32>,
    #[serde(default)]
    pub time_spent: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregates shown above the history list.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStats {
    pub sessions: usize,
    /// Mean band over sessions that have one, rounded to one decimal.
    pub average_band: Option<f64>,
    pub highest_band: Option<f64>,
    /// Sessions completed within the seven days before `now`.
    pub recent: usize,
}

impl HistoryStats {
    #[must_use]
    pub fn from_entries(entries: &[HistoryEntry], now: DateTime<Utc>) -> Self {
        let bands: Vec<f64> = entries.iter().filter_map(|entry| entry.band_score).collect();
        let average_band = if bands.is_empty() {
            None
        } else {
            let mean = bands.iter().sum::<f64>() / bands.len() as f64;
            Some((mean * 10.0).round() / 10.0)
        };
        let highest_band = bands.iter().copied().reduce(f64::max);
        let recent = entries
            .iter()
            .filter(|entry| entry.created_at.is_some_and(|at| is_recent(at, now)))
            .count();

        Self {
            sessions: entries.len(),
            average_band,
            highest_band,
            recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::time::fixed_now;

    fn entry(band: Option<f64>, days_ago: i64) -> HistoryEntry {
        HistoryEntry {
            id: None,
            title: None,
            band_score: band,
            score: None,
            total_questions: None,
            time_spent: None,
            created_at: Some(fixed_now() - Duration::days(days_ago)),
        }
    }

    #[test]
    fn stats_ignore_sessions_without_band() {
        let entries = vec![entry(Some(6.5), 1), entry(None, 2), entry(Some(7.0), 10)];
        let stats = HistoryStats::from_entries(&entries, fixed_now());

        assert_eq!(stats.sessions, 3);
        assert_eq!(stats.average_band, Some(6.8));
        assert_eq!(stats.highest_band, Some(7.0));
        assert_eq!(stats.recent, 2);
    }

    #[test]
    fn empty_history_has_no_bands() {
        let stats = HistoryStats::from_entries(&[], fixed_now());
        assert_eq!(stats.sessions, 0);
        assert_eq!(stats.average_band, None);
        assert_eq!(stats.highest_band, None);
    }

    #[test]
    fn parses_backend_history_rows() {
        let json = r#"{"_id": "abc", "passageTitle": "Bees", "score": 9,
                       "totalQuestions": 13, "bandScore": 6.5, "timeSpent": 900,
                       "createdAt": "2023-11-14T20:00:00Z"}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, Some(UnitId::new("abc")));
        assert_eq!(entry.title.as_deref(), Some("Bees"));
        assert_eq!(entry.band_score, Some(6.5));
        assert!(entry.created_at.is_some());
    }
}
