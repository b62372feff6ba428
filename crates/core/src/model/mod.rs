mod attempt;
mod catalog;
mod ids;
mod lenient;
mod question;
mod summary;
mod user;

pub use attempt::{AttemptHolder, AttemptStatus, AttemptTest, TestAttempt};
pub use catalog::{
    Book, CertificationTest, Chapter, LearningTrack, Quest, TestAction, resolve_media,
};
pub use ids::{BookId, ParseIdError, QuestionId, TestId, ToastId, TrackCode};
pub use question::{OPTION_COUNT, OptionSlot, Question, QuestionRecord};
pub use summary::{DashboardSummary, tests_locked};
pub use user::{LAST_LOGIN_FORMAT, SessionUser};

#[cfg(test)]
pub(crate) use question::sample_question;
