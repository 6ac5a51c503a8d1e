use prep_core::model::{PracticeMode, PracticeModule, SessionKind, UnitId, UnitSummary};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeCardVm {
    pub mode: PracticeMode,
    pub title: String,
    pub duration_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitCardVm {
    pub id: UnitId,
    pub title: String,
    /// Topic and difficulty, when known.
    pub meta: Option<String>,
    pub description: Option<String>,
    /// Part titles of a full test.
    pub parts: Vec<String>,
}

#[must_use]
pub fn map_mode_cards(module: PracticeModule) -> Vec<ModeCardVm> {
    [PracticeMode::SingleUnit, PracticeMode::FullTest]
        .into_iter()
        .map(|mode| {
            let minutes = SessionKind::new(module, mode).duration_secs() / 60;
            let title = match mode {
                PracticeMode::SingleUnit => format!("Single {}", module.unit_noun()),
                PracticeMode::FullTest => "Full test".to_string(),
            };
            ModeCardVm {
                mode,
                title,
                duration_label: format!("{minutes} minutes"),
            }
        })
        .collect()
}

#[must_use]
pub fn map_unit_cards(units: &[UnitSummary]) -> Vec<UnitCardVm> {
    units
        .iter()
        .map(|unit| {
            let meta = [unit.topic.as_deref(), unit.difficulty.as_deref()]
                .into_iter()
                .flatten()
                .filter(|value| !value.trim().is_empty())
                .collect::<Vec<_>>();
            let title = if unit.title.trim().is_empty() {
                format!("Untitled ({})", unit.id)
            } else {
                unit.title.clone()
            };
            UnitCardVm {
                id: unit.id.clone(),
                title,
                meta: (!meta.is_empty()).then(|| meta.join(" | ")),
                description: unit.description.clone(),
                parts: unit.parts.iter().map(|part| part.title.clone()).collect(),
            }
        })
        .collect()
}
