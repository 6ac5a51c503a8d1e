use prep_core::model::HistoryEntry;
use services::HistoryReport;

use crate::vm::format::{format_date, format_timer};
use crate::vm::results_vm::{ScoreTone, format_band};

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRowVm {
    pub title: String,
    pub band_label: String,
    pub tone: ScoreTone,
    pub score_label: Option<String>,
    pub time_label: Option<String>,
    pub date_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryVm {
    pub sessions_label: String,
    pub average_band_label: String,
    pub highest_band_label: String,
    pub recent_label: String,
    pub rows: Vec<HistoryRowVm>,
}

#[must_use]
pub fn map_history(report: &HistoryReport) -> HistoryVm {
    let stats = &report.stats;
    HistoryVm {
        sessions_label: stats.sessions.to_string(),
        average_band_label: stats.average_band.map_or_else(|| "-".into(), format_band),
        highest_band_label: stats.highest_band.map_or_else(|| "-".into(), format_band),
        recent_label: format!("{} this week", stats.recent),
        rows: report.entries.iter().map(map_row).collect(),
    }
}

fn map_row(entry: &HistoryEntry) -> HistoryRowVm {
    HistoryRowVm {
        title: entry
            .title
            .clone()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| "Practice session".into()),
        band_label: entry.band_score.map_or_else(|| "-".into(), format_band),
        tone: entry.band_score.map_or(ScoreTone::Low, ScoreTone::from_band),
        score_label: match (entry.score, entry.total_questions) {
            (Some(score), Some(total)) => Some(format!("{score} / {total}")),
            _ => None,
        },
        time_label: entry.time_spent.map(format_timer),
        date_label: entry.created_at.map(format_date),
    }
}

#[cfg(test)]
mod tests {
    use prep_core::model::{HistoryStats, PracticeModule};
    use prep_core::time::fixed_now;

    use super::*;

    fn entry(band: Option<f64>) -> HistoryEntry {
        HistoryEntry {
            id: None,
            title: Some("Coral reefs".into()),
            band_score: band,
            score: Some(10),
            total_questions: Some(13),
            time_spent: Some(900),
            created_at: Some(fixed_now()),
        }
    }

    #[test]
    fn maps_rows_and_stats() {
        let entries = vec![entry(Some(7.5)), entry(Some(5.5)), entry(None)];
        let report = HistoryReport {
            module: PracticeModule::Reading,
            stats: HistoryStats::from_entries(&entries, fixed_now()),
            entries,
        };
        let vm = map_history(&report);

        assert_eq!(vm.sessions_label, "3");
        assert_eq!(vm.average_band_label, "6.5");
        assert_eq!(vm.highest_band_label, "7.5");
        assert_eq!(vm.recent_label, "3 this week");
        assert_eq!(vm.rows[0].tone, ScoreTone::High);
        assert_eq!(vm.rows[1].tone, ScoreTone::Medium);
        assert_eq!(vm.rows[2].band_label, "-");
        assert_eq!(vm.rows[0].score_label.as_deref(), Some("10 / 13"));
        assert_eq!(vm.rows[0].time_label.as_deref(), Some("15:00"));
        assert_eq!(vm.rows[0].date_label.as_deref(), Some("Nov 14, 2023"));
    }

    #[test]
    fn untitled_entries_get_a_fallback_title() {
        let mut entry = entry(Some(6.0));
        entry.title = None;
        assert_eq!(map_row(&entry).title, "Practice session");
    }
}
