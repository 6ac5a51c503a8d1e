mod answer;
mod history;
mod ids;
mod practice;
mod question;
mod result;
mod unit;

pub use answer::{AnswerKey, AnswerMap, AnswerValue};
pub use history::{HistoryEntry, HistoryStats};
pub use ids::{QuestionId, UnitId};
pub use practice::{
    LISTENING_FULL_TEST_SECS, LISTENING_SECTION_SECS, PracticeMode, PracticeModule,
    READING_FULL_TEST_SECS, READING_PASSAGE_SECS, SessionKind, UnknownModule,
};
pub use question::{Question, QuestionKind, TRUE_FALSE_NOT_GIVEN};
pub use result::{PartBreakdown, QuestionReview, ScoredResult};
pub use unit::{FullTest, PracticeUnit, SessionContent, UnitSummary};
