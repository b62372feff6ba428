use portal_core::model::{Question, TestId};
use portal_core::quiz::{
    CanonicalOrder, DEFAULT_CERTIFICATION_SECONDS, OptionShuffler, QuizConfig, QuizMode,
    QuizSession, QuizSummary,
};
use storage::session_store::SessionStore;

use crate::api::PortalApi;
use crate::destination::Destination;
use crate::error::QuizError;
use crate::shuffle::RandomOrder;
use crate::toast::Notice;

pub const NOT_SIGNED_IN_NOTICE: &str = "User not logged in. Cannot save progress.";
pub const PROGRESS_FAILED_NOTICE: &str = "Failed to save progress. Connection Interrupted!";
pub const SCORE_SAVED_NOTICE: &str = "Your test attempt has been recorded.";
pub const SCORE_FAILED_NOTICE: &str = "Failed to save test score. Connection Interrupted!";

/// What happened when a finished quiz was handed in.
///
/// `destination` is `None` only when nobody is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub destination: Option<Destination>,
    pub notices: Vec<Notice>,
}

/// Loads question sets and hands finished quizzes back to the portal.
#[derive(Clone)]
pub struct QuizLoopService {
    api: PortalApi,
    session: SessionStore,
    shuffle_options: bool,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(api: PortalApi, session: SessionStore) -> Self {
        Self {
            api,
            session,
            shuffle_options: true,
        }
    }

    /// Keep options in backend order instead of shuffling them.
    #[must_use]
    pub fn with_canonical_order(mut self) -> Self {
        self.shuffle_options = false;
        self
    }

    /// Parses the `id` query parameter of a quiz link.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidCourse` for a missing or non-numeric id.
    pub fn parse_course_key(raw: Option<&str>) -> Result<TestId, QuizError> {
        raw.filter(|value| !value.trim().is_empty())
            .and_then(|value| value.parse().ok())
            .ok_or(QuizError::InvalidCourse)
    }

    /// Parses the `time` query parameter; anything unusable falls back to
    /// the certification default.
    #[must_use]
    pub fn parse_seconds(raw: Option<&str>) -> u32 {
        raw.and_then(|value| value.trim().parse().ok())
            .unwrap_or(DEFAULT_CERTIFICATION_SECONDS)
    }

    /// Start a practice run over a module's question bank.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty bank, otherwise
    /// `QuizError::NotSignedIn`, `QuizError::Api` or `QuizError::Storage`.
    pub async fn start_practice(
        &self,
        test_id: TestId,
        seconds_per_question: u32,
    ) -> Result<QuizSession, QuizError> {
        let username = self.username().await?.ok_or(QuizError::NotSignedIn)?;
        let questions = self.api.quest_questions(&username, test_id).await?;
        self.start(questions, QuizConfig::practice(seconds_per_question), test_id)
    }

    /// Start a certification attempt.
    ///
    /// # Errors
    ///
    /// Same as [`QuizLoopService::start_practice`].
    pub async fn start_certification(
        &self,
        test_id: TestId,
        seconds_per_question: u32,
    ) -> Result<QuizSession, QuizError> {
        let username = self.username().await?.ok_or(QuizError::NotSignedIn)?;
        let questions = self.api.test_questions(&username, test_id).await?;
        self.start(
            questions,
            QuizConfig::certification(seconds_per_question),
            test_id,
        )
    }

    /// Save the outcome of a finished quiz and decide where to go next.
    ///
    /// Network failures become notices; they never block navigation.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Unfinished` if the quiz is still running and
    /// `QuizError::Storage` if the local store fails.
    pub async fn submit(
        &self,
        test_id: TestId,
        session: &QuizSession,
    ) -> Result<SubmissionReport, QuizError> {
        let summary = session.summary().ok_or(QuizError::Unfinished)?;
        let Some(username) = self.username().await? else {
            return Ok(SubmissionReport {
                destination: None,
                notices: vec![Notice::error(NOT_SIGNED_IN_NOTICE)],
            });
        };
        match summary.mode {
            QuizMode::Practice => self.submit_practice(&username, test_id, summary).await,
            QuizMode::Certification => {
                Ok(self.submit_certification(&username, test_id, &summary).await)
            }
        }
    }

    async fn submit_practice(
        &self,
        username: &str,
        test_id: TestId,
        summary: QuizSummary,
    ) -> Result<SubmissionReport, QuizError> {
        let mut notices = Vec::new();
        let passed_ids = summary.passed_ids();
        if !passed_ids.is_empty() {
            if let Err(failure) = self.api.save_progress(username, &passed_ids).await {
                tracing::warn!(%failure, %test_id, "practice progress not saved");
                notices.push(Notice::error(PROGRESS_FAILED_NOTICE));
            }
        }
        self.session.set_corrections(&summary.failed).await?;
        tracing::info!(
            %test_id,
            passed = summary.passed.len(),
            failed = summary.failed.len(),
            "practice submitted"
        );
        Ok(SubmissionReport {
            destination: Some(Destination::PracticeResults {
                test_id,
                passed: summary.passed.len(),
            }),
            notices,
        })
    }

    async fn submit_certification(
        &self,
        username: &str,
        test_id: TestId,
        summary: &QuizSummary,
    ) -> SubmissionReport {
        let score = summary.score_percent();
        let notice = match self.api.save_test_score(username, test_id, score).await {
            Ok(_) => Notice::info(SCORE_SAVED_NOTICE),
            Err(failure) => {
                tracing::warn!(%failure, %test_id, "test score not saved");
                Notice::error(SCORE_FAILED_NOTICE)
            }
        };
        tracing::info!(%test_id, score, "certification submitted");
        SubmissionReport {
            destination: Some(Destination::Portal),
            notices: vec![notice],
        }
    }

    fn start(
        &self,
        questions: Vec<Question>,
        config: QuizConfig,
        test_id: TestId,
    ) -> Result<QuizSession, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        let mut shuffler: Box<dyn OptionShuffler> = if self.shuffle_options {
            Box::new(RandomOrder)
        } else {
            Box::new(CanonicalOrder)
        };
        let session = QuizSession::start(questions, config, shuffler.as_mut())?;
        tracing::info!(%test_id, mode = ?config.mode, questions = session.len(), "quiz started");
        Ok(session)
    }

    async fn username(&self) -> Result<Option<String>, QuizError> {
        Ok(self
            .session
            .user()
            .await?
            .map(|user| user.username)
            .filter(|name| !name.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_key_must_be_numeric() {
        assert_eq!(
            QuizLoopService::parse_course_key(Some(" 12 ")).unwrap(),
            TestId::new(12)
        );
        assert!(matches!(
            QuizLoopService::parse_course_key(Some("abc")),
            Err(QuizError::InvalidCourse)
        ));
        assert!(matches!(
            QuizLoopService::parse_course_key(None),
            Err(QuizError::InvalidCourse)
        ));
    }

    #[test]
    fn seconds_fall_back_to_default() {
        assert_eq!(QuizLoopService::parse_seconds(Some("25")), 25);
        assert_eq!(QuizLoopService::parse_seconds(Some("")), 40);
        assert_eq!(QuizLoopService::parse_seconds(None), 40);
    }
}
