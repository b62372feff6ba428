//! Question sequencing, answer confirmation and scoring for quizzes.

mod engine;
mod options;
mod selection;

pub use engine::{
    DEFAULT_CERTIFICATION_SECONDS, DisplayOption, Evaluation, FINISH_DELAY, OptionFeedback,
    PRACTICE_FEEDBACK_DELAY, QuizConfig, QuizMode, QuizPhase, QuizSession, QuizStateError,
    QuizSummary, Step, TapOutcome, TickOutcome, Verdict, format_countdown,
};
pub use options::{CANONICAL_ORDER, CanonicalOrder, OptionOrder, OptionShuffler, ScriptedOrder};
pub use selection::{Selection, SelectionEvent};

/// Whole-percent share of `part` in `total`, rounded down; zero for an empty total.
#[must_use]
pub fn score_percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let value = part.min(total) * 100 / total;
    u32::try_from(value).unwrap_or(100)
}
