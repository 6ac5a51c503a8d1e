use crate::model::{PracticeUnit, ScoredResult, SessionContent, SessionKind};

/// Where a practice screen currently is. Only `SessionMachine` transitions mutate it.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    ModeSelect,
    /// Listing units for `kind`. `loading` covers both the list and a selected unit.
    ContentSelect {
        kind: SessionKind,
        loading: bool,
    },
    Collecting {
        content: SessionContent,
        remaining_secs: u32,
        /// Part shown for full tests; always 0 for single units.
        part_index: usize,
    },
    Submitting {
        content: SessionContent,
        remaining_secs: u32,
    },
    Results(ScoredResult),
}

impl SessionState {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ModeSelect => "mode-select",
            Self::ContentSelect { .. } => "content-select",
            Self::Collecting { .. } => "collecting",
            Self::Submitting { .. } => "submitting",
            Self::Results(_) => "results",
        }
    }

    #[must_use]
    pub fn content(&self) -> Option<&SessionContent> {
        match self {
            Self::Collecting { content, .. } | Self::Submitting { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Part currently on screen while answering.
    #[must_use]
    pub fn current_part(&self) -> Option<&PracticeUnit> {
        match self {
            Self::Collecting {
                content,
                part_index,
                ..
            } => content.part(*part_index),
            Self::Submitting { content, .. } => content.part(0),
            _ => None,
        }
    }

    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        match self {
            Self::Collecting { remaining_secs, .. } | Self::Submitting { remaining_secs, .. } => {
                Some(*remaining_secs)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&ScoredResult> {
        match self {
            Self::Results(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }
}
