use chrono::{DateTime, Utc};

/// Countdown display, e.g. `9:05`.
#[must_use]
pub fn format_timer(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[must_use]
pub fn progress_label(answered: usize, total: u32) -> String {
    format!("Answered: {answered} / {total}")
}

/// CSS modifier for the countdown: urgent in the final minute, warning in the final five.
#[must_use]
pub fn timer_tone(remaining_secs: u32) -> &'static str {
    match remaining_secs {
        0..60 => "timer-critical",
        60..300 => "timer-warning",
        _ => "timer-normal",
    }
}

#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::time::fixed_now;

    #[test]
    fn timer_pads_seconds() {
        assert_eq!(format_timer(600), "10:00");
        assert_eq!(format_timer(545), "9:05");
        assert_eq!(format_timer(59), "0:59");
        assert_eq!(format_timer(0), "0:00");
        assert_eq!(format_timer(3600), "60:00");
    }

    #[test]
    fn progress_counts_answered_questions() {
        assert_eq!(progress_label(3, 13), "Answered: 3 / 13");
    }

    #[test]
    fn tone_escalates_near_the_end() {
        assert_eq!(timer_tone(1200), "timer-normal");
        assert_eq!(timer_tone(299), "timer-warning");
        assert_eq!(timer_tone(59), "timer-critical");
    }

    #[test]
    fn date_is_human_readable() {
        assert_eq!(format_date(fixed_now()), "Nov 14, 2023");
    }
}
