use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ten minutes for a single listening section.
pub const LISTENING_SECTION_SECS: u32 = 10 * 60;
/// Thirty minutes for a full listening test.
pub const LISTENING_FULL_TEST_SECS: u32 = 30 * 60;
/// Twenty minutes for a single reading passage.
pub const READING_PASSAGE_SECS: u32 = 20 * 60;
/// Sixty minutes for a full reading test.
pub const READING_FULL_TEST_SECS: u32 = 60 * 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown practice module: {0}")]
pub struct UnknownModule(pub String);

/// The timed practice modules backed by the content API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeModule {
    Listening,
    Reading,
}

impl PracticeModule {
    pub const ALL: [Self; 2] = [Self::Listening, Self::Reading];

    /// Path segment under the API root, e.g. `/listening/submit`.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Listening => "listening",
            Self::Reading => "reading",
        }
    }

    /// Collection holding single units (`/listening/sections`, `/reading/passages`).
    #[must_use]
    pub fn unit_collection(self) -> &'static str {
        match self {
            Self::Listening => "sections",
            Self::Reading => "passages",
        }
    }

    /// Singular unit noun, also the key wrapping a single unit in detail responses.
    #[must_use]
    pub fn unit_noun(self) -> &'static str {
        match self {
            Self::Listening => "section",
            Self::Reading => "passage",
        }
    }

    /// Body field identifying a single unit on submit.
    #[must_use]
    pub fn submit_id_field(self) -> &'static str {
        match self {
            Self::Listening => "sectionId",
            Self::Reading => "passageId",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Listening => "Listening",
            Self::Reading => "Reading",
        }
    }

    /// Whether units of this module carry a transcript meant to be played aloud.
    #[must_use]
    pub fn has_audio(self) -> bool {
        matches!(self, Self::Listening)
    }
}

impl fmt::Display for PracticeModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for PracticeModule {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "listening" => Ok(Self::Listening),
            "reading" => Ok(Self::Reading),
            other => Err(UnknownModule(other.to_string())),
        }
    }
}

/// Practise one unit at a time, or a multi-part test under a single timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PracticeMode {
    SingleUnit,
    FullTest,
}

impl PracticeMode {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SingleUnit => "Practice Mode",
            Self::FullTest => "Full Test Mode",
        }
    }
}

/// A module/mode pair; selects endpoints and the session duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKind {
    pub module: PracticeModule,
    pub mode: PracticeMode,
}

impl SessionKind {
    #[must_use]
    pub const fn new(module: PracticeModule, mode: PracticeMode) -> Self {
        Self { module, mode }
    }

    /// Countdown length for a session of this kind.
    #[must_use]
    pub const fn duration_secs(self) -> u32 {
        match (self.module, self.mode) {
            (PracticeModule::Listening, PracticeMode::SingleUnit) => LISTENING_SECTION_SECS,
            (PracticeModule::Listening, PracticeMode::FullTest) => LISTENING_FULL_TEST_SECS,
            (PracticeModule::Reading, PracticeMode::SingleUnit) => READING_PASSAGE_SECS,
            (PracticeModule::Reading, PracticeMode::FullTest) => READING_FULL_TEST_SECS,
        }
    }

    #[must_use]
    pub fn is_full_test(self) -> bool {
        matches!(self.mode, PracticeMode::FullTest)
    }
}
