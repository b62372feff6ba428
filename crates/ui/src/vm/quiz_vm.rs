use std::time::Duration;

use portal_core::model::{OptionSlot, TestId, resolve_media};
use portal_core::quiz::{
    OptionFeedback, QuizMode, QuizPhase, QuizSession, Step, TapOutcome, TickOutcome,
};
use services::{QuizError, QuizLoopService};
use url::Url;

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Tap(usize),
    Tick,
    /// The feedback delay of the pending answer has elapsed.
    Resolve,
    DismissExplanation,
}

/// Follow-up work the view schedules after an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizEffect {
    None,
    ResolveAfter(Duration),
    SubmitAfter(Duration),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub position: usize,
    pub label: char,
    pub text: String,
    pub class: &'static str,
}

fn option_class(feedback: OptionFeedback) -> &'static str {
    match feedback {
        OptionFeedback::Neutral => "quiz-option",
        OptionFeedback::Highlighted => "quiz-option quiz-option--highlighted",
        OptionFeedback::Correct => "quiz-option quiz-option--correct",
        OptionFeedback::Incorrect => "quiz-option quiz-option--incorrect",
    }
}

pub struct QuizVm {
    test_id: TestId,
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(test_id: TestId, session: QuizSession) -> Self {
        Self { test_id, session }
    }

    #[must_use]
    pub fn test_id(&self) -> TestId {
        self.test_id
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self.session.mode() {
            QuizMode::Practice => "Practice Quest",
            QuizMode::Certification => "Certification Test",
        }
    }

    #[must_use]
    pub fn question_label(&self) -> String {
        let shown = (self.session.index() + 1).min(self.session.len());
        format!("Question {shown} of {}", self.session.len())
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.session.current().map(|question| question.prompt())
    }

    #[must_use]
    pub fn comprehension(&self) -> Option<&str> {
        self.session.current().and_then(|question| question.comprehension())
    }

    #[must_use]
    pub fn diagram_url(&self, media_domain: &Url) -> Option<Url> {
        self.session
            .current()
            .and_then(|question| question.diagram())
            .and_then(|path| resolve_media(media_domain, path))
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionVm> {
        self.session
            .display_options()
            .into_iter()
            .map(|option| OptionVm {
                position: option.position,
                label: OptionSlot::ALL
                    .get(option.position)
                    .map_or('?', |slot| slot.label()),
                text: option.text,
                class: option_class(option.feedback),
            })
            .collect()
    }

    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        self.session.progress_percent()
    }

    #[must_use]
    pub fn is_timed(&self) -> bool {
        self.session.config().is_timed()
    }

    #[must_use]
    pub fn countdown_label(&self) -> String {
        self.session.countdown_label()
    }

    /// Explanation text while the overlay is open.
    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        match self.session.phase() {
            QuizPhase::Explaining(_) => {
                self.session.current().and_then(|question| question.explanation())
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    pub fn apply(&mut self, intent: QuizIntent) -> QuizEffect {
        match intent {
            QuizIntent::Tap(position) => match self.session.tap(position) {
                TapOutcome::Committed(evaluation) => QuizEffect::ResolveAfter(evaluation.delay),
                TapOutcome::Highlighted(_) | TapOutcome::Ignored => QuizEffect::None,
            },
            QuizIntent::Tick => match self.session.tick() {
                TickOutcome::TimedOut(evaluation) => {
                    tracing::debug!(test_id = %self.test_id, question = ?evaluation.question_id, "question timed out");
                    QuizEffect::ResolveAfter(evaluation.delay)
                }
                TickOutcome::Running(_) | TickOutcome::Ignored => QuizEffect::None,
            },
            QuizIntent::Resolve => {
                let step = self.session.resolve().ok();
                self.after_step(step)
            }
            QuizIntent::DismissExplanation => {
                let step = self.session.dismiss_explanation().ok();
                self.after_step(step)
            }
        }
    }

    fn after_step(&self, step: Option<Step>) -> QuizEffect {
        match step {
            Some(Step::Finished) => {
                tracing::info!(test_id = %self.test_id, "quiz finished");
                QuizEffect::SubmitAfter(self.session.config().finish_delay)
            }
            Some(Step::Presenting(_) | Step::Explaining) | None => QuizEffect::None,
        }
    }
}

/// Parse the quiz link and fetch its questions.
///
/// # Errors
///
/// Returns `ViewError::InvalidCourse` for a bad `id`, `ViewError::EmptyQuiz`
/// when the bank is empty, `ViewError::NotSignedIn` without a stored user and
/// `ViewError::Unknown` for other failures.
pub async fn start_quiz(
    quiz_loop: &QuizLoopService,
    mode: QuizMode,
    id: &str,
    time: &str,
) -> Result<QuizVm, ViewError> {
    let test_id =
        QuizLoopService::parse_course_key(Some(id)).map_err(|_| ViewError::InvalidCourse)?;
    let seconds = QuizLoopService::parse_seconds(Some(time));
    let started = match mode {
        QuizMode::Practice => quiz_loop.start_practice(test_id, seconds).await,
        QuizMode::Certification => quiz_loop.start_certification(test_id, seconds).await,
    };
    match started {
        Ok(session) => Ok(QuizVm::new(test_id, session)),
        Err(QuizError::NoQuestions) => Err(ViewError::EmptyQuiz),
        Err(QuizError::NotSignedIn) => Err(ViewError::NotSignedIn),
        Err(err) => {
            tracing::warn!(error = %err, %test_id, "quiz could not start");
            Err(ViewError::Unknown)
        }
    }
}

#[cfg(test)]
mod tests {
    use portal_core::model::{Question, QuestionId};
    use portal_core::quiz::{CanonicalOrder, QuizConfig};

    use super::*;

    fn question(id: u64, answer: &str) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Question {id}?"),
            ["Debit".into(), "Credit".into(), "Asset".into(), "Equity".into()],
            answer,
        )
    }

    fn vm(config: QuizConfig, questions: Vec<Question>) -> QuizVm {
        let session = QuizSession::start(questions, config, &mut CanonicalOrder).unwrap();
        QuizVm::new(TestId::new(3), session)
    }

    #[test]
    fn first_tap_highlights_second_commits() {
        let mut vm = vm(QuizConfig::practice(30), vec![question(1, "Credit")]);
        assert_eq!(vm.apply(QuizIntent::Tap(1)), QuizEffect::None);
        assert_eq!(vm.options()[1].class, "quiz-option quiz-option--highlighted");

        let effect = vm.apply(QuizIntent::Tap(1));
        assert_eq!(effect, QuizEffect::ResolveAfter(Duration::from_millis(2500)));
        assert_eq!(vm.options()[1].class, "quiz-option quiz-option--correct");
        assert_eq!(vm.apply(QuizIntent::Tap(2)), QuizEffect::None);

        assert_eq!(
            vm.apply(QuizIntent::Resolve),
            QuizEffect::SubmitAfter(Duration::from_secs(2))
        );
        assert!(vm.is_finished());
    }

    #[test]
    fn wrong_practice_answer_opens_explanation() {
        let explained = question(1, "Debit").with_explanation("Assets increase on the debit side.");
        let mut vm = vm(QuizConfig::practice(0), vec![explained, question(2, "Asset")]);
        vm.apply(QuizIntent::Tap(3));
        vm.apply(QuizIntent::Tap(3));
        assert_eq!(vm.explanation(), None);
        assert_eq!(vm.apply(QuizIntent::Resolve), QuizEffect::None);
        assert_eq!(vm.explanation(), Some("Assets increase on the debit side."));

        assert_eq!(vm.apply(QuizIntent::DismissExplanation), QuizEffect::None);
        assert_eq!(vm.question_label(), "Question 2 of 2");
        assert_eq!(vm.explanation(), None);
    }

    #[test]
    fn countdown_expiry_resolves_immediately() {
        let mut vm = vm(QuizConfig::certification(2), vec![question(1, "Debit")]);
        assert_eq!(vm.countdown_label(), "00:02");
        assert_eq!(vm.apply(QuizIntent::Tick), QuizEffect::None);
        assert_eq!(vm.apply(QuizIntent::Tick), QuizEffect::ResolveAfter(Duration::ZERO));
        // Evaluated already; further ticks do nothing.
        assert_eq!(vm.apply(QuizIntent::Tick), QuizEffect::None);
    }

    #[test]
    fn untimed_quiz_ignores_ticks() {
        let mut vm = vm(QuizConfig::practice(0), vec![question(1, "Debit")]);
        assert!(!vm.is_timed());
        assert_eq!(vm.apply(QuizIntent::Tick), QuizEffect::None);
        assert_eq!(vm.title(), "Practice Quest");
        let labels: Vec<char> = vm.options().iter().map(|option| option.label).collect();
        assert_eq!(labels, vec!['A', 'B', 'C', 'D']);
    }

    #[test]
    fn diagram_resolves_against_media_domain() {
        let with_diagram = question(1, "Debit").with_diagram("/media/diagrams/t-account.png");
        let vm = vm(QuizConfig::certification(40), vec![with_diagram]);
        let domain = Url::parse("https://api.example.test").unwrap();
        assert_eq!(
            vm.diagram_url(&domain).unwrap().as_str(),
            "https://api.example.test/media/diagrams/t-account.png"
        );
    }
}
