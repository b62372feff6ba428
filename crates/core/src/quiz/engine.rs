use std::time::Duration;

use thiserror::Error;

use super::options::{OptionOrder, OptionShuffler, sanitize};
use super::score_percent;
use super::selection::{Selection, SelectionEvent};
use crate::model::{OPTION_COUNT, Question, QuestionId};

/// Pause after a committed answer in practice mode so feedback styling is visible.
pub const PRACTICE_FEEDBACK_DELAY: Duration = Duration::from_millis(2500);
/// Pause between the last answer and submission.
pub const FINISH_DELAY: Duration = Duration::from_millis(2000);
/// Per-question seconds for certification tests when the link carries none.
pub const DEFAULT_CERTIFICATION_SECONDS: u32 = 40;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizStateError {
    #[error("quiz has no questions")]
    NoQuestions,
    #[error("no answer is awaiting resolution")]
    NotEvaluating,
    #[error("no explanation is open")]
    NotExplaining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    Practice,
    /// Graded certification ("CBT") run.
    Certification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    pub mode: QuizMode,
    /// Zero disables the countdown.
    pub seconds_per_question: u32,
    pub feedback_delay: Duration,
    pub finish_delay: Duration,
}

impl QuizConfig {
    #[must_use]
    pub fn practice(seconds_per_question: u32) -> Self {
        Self {
            mode: QuizMode::Practice,
            seconds_per_question,
            feedback_delay: PRACTICE_FEEDBACK_DELAY,
            finish_delay: FINISH_DELAY,
        }
    }

    #[must_use]
    pub fn certification(seconds_per_question: u32) -> Self {
        Self {
            mode: QuizMode::Certification,
            seconds_per_question,
            feedback_delay: Duration::ZERO,
            finish_delay: FINISH_DELAY,
        }
    }

    #[must_use]
    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    #[must_use]
    pub fn with_finish_delay(mut self, delay: Duration) -> Self {
        self.finish_delay = delay;
        self
    }

    #[must_use]
    pub fn is_timed(&self) -> bool {
        self.seconds_per_question > 0
    }
}

/// How an evaluated answer will be settled once its delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
    /// Wrong practice answer with an explanation; settles as failed on dismissal.
    NeedsExplanation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub question_id: Option<QuestionId>,
    /// `None` when the countdown expired.
    pub selected: Option<String>,
    pub verdict: Verdict,
    /// How long the view waits before calling [`QuizSession::resolve`].
    pub delay: Duration,
}

impl Evaluation {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.verdict == Verdict::Passed
    }

    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.selected.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    Presenting,
    Evaluating(Evaluation),
    Explaining(Evaluation),
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    Ignored,
    Highlighted(usize),
    Committed(Evaluation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Running(u32),
    TimedOut(Evaluation),
}

/// Where the session landed after an answer was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Presenting(usize),
    Explaining,
    Finished,
}

/// Styling hint for one on-screen option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFeedback {
    Neutral,
    Highlighted,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOption {
    pub position: usize,
    pub text: String,
    pub feedback: OptionFeedback,
}

/// Outcome of a finished quiz, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub mode: QuizMode,
    pub total: usize,
    pub passed: Vec<Question>,
    pub failed: Vec<Question>,
}

impl QuizSummary {
    /// Ids of the passed questions that carry one, for progress sync.
    #[must_use]
    pub fn passed_ids(&self) -> Vec<QuestionId> {
        self.passed.iter().filter_map(Question::id).collect()
    }

    #[must_use]
    pub fn score_percent(&self) -> u32 {
        score_percent(self.passed.len(), self.total)
    }
}

/// State machine for one run through a question list.
///
/// The session is time-free: the view owns the one-second ticker and the
/// feedback delays, and drives the session through `tick`, `tap`, `resolve`
/// and `dismiss_explanation`. Each question is evaluated exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    config: QuizConfig,
    questions: Vec<Question>,
    orders: Vec<OptionOrder>,
    index: usize,
    selection: Selection,
    remaining_secs: u32,
    phase: QuizPhase,
    passed: Vec<Question>,
    failed: Vec<Question>,
}

impl QuizSession {
    /// Start presenting the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizStateError::NoQuestions` for an empty list.
    pub fn start(
        questions: Vec<Question>,
        config: QuizConfig,
        shuffler: &mut dyn OptionShuffler,
    ) -> Result<Self, QuizStateError> {
        if questions.is_empty() {
            return Err(QuizStateError::NoQuestions);
        }
        let orders = questions.iter().map(|_| sanitize(shuffler.order())).collect();
        Ok(Self {
            config,
            questions,
            orders,
            index: 0,
            selection: Selection::None,
            remaining_secs: config.seconds_per_question,
            phase: QuizPhase::Presenting,
            passed: Vec::new(),
            failed: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> QuizConfig {
        self.config
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.config.mode
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == QuizPhase::Finished
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn passed(&self) -> &[Question] {
        &self.passed
    }

    #[must_use]
    pub fn failed(&self) -> &[Question] {
        &self.failed
    }

    #[must_use]
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Width of the progress bar, counting the question on screen.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        let shown = (self.index + 1).min(self.len());
        score_percent(shown, self.len())
    }

    #[must_use]
    pub fn countdown_label(&self) -> String {
        format_countdown(self.remaining_secs)
    }

    #[must_use]
    pub fn display_options(&self) -> Vec<DisplayOption> {
        let (Some(question), Some(order)) = (self.current(), self.orders.get(self.index)) else {
            return Vec::new();
        };
        let evaluation = match &self.phase {
            QuizPhase::Evaluating(evaluation) | QuizPhase::Explaining(evaluation) => {
                Some(evaluation)
            }
            QuizPhase::Presenting | QuizPhase::Finished => None,
        };
        order
            .iter()
            .enumerate()
            .map(|(position, &option_index)| {
                let feedback = match (evaluation, self.selection) {
                    (Some(evaluation), Selection::Committed(chosen)) if chosen == position => {
                        if evaluation.is_correct() {
                            OptionFeedback::Correct
                        } else {
                            OptionFeedback::Incorrect
                        }
                    }
                    (None, Selection::Highlighted(chosen)) if chosen == position => {
                        OptionFeedback::Highlighted
                    }
                    _ => OptionFeedback::Neutral,
                };
                DisplayOption {
                    position,
                    text: question.options()[option_index].clone(),
                    feedback,
                }
            })
            .collect()
    }

    /// Handle a tap on the option at `position` (on-screen order).
    pub fn tap(&mut self, position: usize) -> TapOutcome {
        if self.phase != QuizPhase::Presenting || position >= OPTION_COUNT {
            return TapOutcome::Ignored;
        }
        match self.selection.tap(position) {
            SelectionEvent::Highlighted(position) => TapOutcome::Highlighted(position),
            SelectionEvent::Committed(position) => {
                let text = self.option_text(position);
                TapOutcome::Committed(self.evaluate(text))
            }
            SelectionEvent::Ignored => TapOutcome::Ignored,
        }
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != QuizPhase::Presenting || !self.config.is_timed() {
            return TickOutcome::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            TickOutcome::TimedOut(self.evaluate(None))
        } else {
            TickOutcome::Running(self.remaining_secs)
        }
    }

    /// Settle the pending evaluation once its delay has elapsed.
    ///
    /// # Errors
    ///
    /// Returns `QuizStateError::NotEvaluating` if no answer is pending.
    pub fn resolve(&mut self) -> Result<Step, QuizStateError> {
        let QuizPhase::Evaluating(evaluation) = &self.phase else {
            return Err(QuizStateError::NotEvaluating);
        };
        if evaluation.verdict == Verdict::NeedsExplanation {
            self.phase = QuizPhase::Explaining(evaluation.clone());
            return Ok(Step::Explaining);
        }
        Ok(self.advance())
    }

    /// Close the explanation overlay; the question counts as failed.
    ///
    /// # Errors
    ///
    /// Returns `QuizStateError::NotExplaining` if no explanation is open.
    pub fn dismiss_explanation(&mut self) -> Result<Step, QuizStateError> {
        if !matches!(self.phase, QuizPhase::Explaining(_)) {
            return Err(QuizStateError::NotExplaining);
        }
        if let Some(question) = self.current().cloned() {
            self.failed.push(question);
        }
        Ok(self.advance())
    }

    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        if !self.is_finished() {
            return None;
        }
        Some(QuizSummary {
            mode: self.config.mode,
            total: self.len(),
            passed: self.passed.clone(),
            failed: self.failed.clone(),
        })
    }

    fn option_text(&self, position: usize) -> Option<String> {
        let question = self.current()?;
        let option_index = *self.orders.get(self.index)?.get(position)?;
        Some(question.options()[option_index].clone())
    }

    fn evaluate(&mut self, selected: Option<String>) -> Evaluation {
        let Some(question) = self.current().cloned() else {
            // Unreachable while presenting; treated as a timeout.
            return Evaluation {
                question_id: None,
                selected: None,
                verdict: Verdict::Failed,
                delay: Duration::ZERO,
            };
        };

        let correct = selected
            .as_deref()
            .is_some_and(|text| question.is_correct(text));
        let verdict = if correct {
            Verdict::Passed
        } else if selected.is_some()
            && self.config.mode == QuizMode::Practice
            && question.explanation().is_some()
        {
            Verdict::NeedsExplanation
        } else {
            Verdict::Failed
        };
        let delay = if selected.is_none() {
            Duration::ZERO
        } else {
            self.config.feedback_delay
        };

        match verdict {
            Verdict::Passed => self.passed.push(question.clone()),
            Verdict::Failed => self.failed.push(question.clone()),
            Verdict::NeedsExplanation => {}
        }

        let evaluation = Evaluation {
            question_id: question.id(),
            selected,
            verdict,
            delay,
        };
        self.phase = QuizPhase::Evaluating(evaluation.clone());
        evaluation
    }

    fn advance(&mut self) -> Step {
        self.index += 1;
        self.selection.reset();
        if self.index >= self.questions.len() {
            self.index = self.questions.len();
            self.phase = QuizPhase::Finished;
            return Step::Finished;
        }
        self.remaining_secs = self.config.seconds_per_question;
        self.phase = QuizPhase::Presenting;
        Step::Presenting(self.index)
    }
}

/// Formats seconds as `MM:SS`.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
