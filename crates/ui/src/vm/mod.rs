mod format;
mod history_vm;
mod results_vm;
mod unit_vm;

pub use format::{format_date, format_timer, progress_label, timer_tone};
pub use history_vm::{HistoryRowVm, HistoryVm, map_history};
pub use results_vm::{PartRowVm, ResultsVm, ReviewRowVm, ScoreTone, format_band, map_results};
pub use unit_vm::{ModeCardVm, UnitCardVm, map_mode_cards, map_unit_cards};
