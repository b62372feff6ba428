use portal_core::model::{Question, TestId};
use portal_core::quiz::score_percent;
use storage::session_store::SessionStore;

use crate::api::{PerformanceReport, PortalApi};
use crate::destination::Destination;
use crate::error::ResultsError;
use crate::quiz_service::SubmissionReport;
use crate::toast::Notice;

/// Minutes reported for every practice run; the client does not time runs.
pub const REPORTED_PRACTICE_MINUTES: &str = "6";
pub const PERFORMANCE_FAILED_NOTICE: &str = "Failed to save performance. Connection Interrupted!!";

/// A finished practice run as the results screen shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeResults {
    pub test_id: TestId,
    pub passed: u32,
    pub corrections: Vec<Question>,
}

impl PracticeResults {
    #[must_use]
    pub fn wrong(&self) -> u32 {
        u32::try_from(self.corrections.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.passed.saturating_add(self.wrong())
    }

    #[must_use]
    pub fn score_percent(&self) -> u32 {
        score_percent(self.passed as usize, self.answered() as usize)
    }

    #[must_use]
    pub fn report(&self) -> PerformanceReport {
        PerformanceReport {
            test_id: self.test_id,
            correctly_answered: self.passed,
            wrongly_answered: self.wrong(),
            time: REPORTED_PRACTICE_MINUTES.to_owned(),
        }
    }
}

/// Backs the practice results screen.
#[derive(Clone)]
pub struct ResultsService {
    api: PortalApi,
    session: SessionStore,
}

impl ResultsService {
    #[must_use]
    pub fn new(api: PortalApi, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Validate the results link and read back the cached corrections.
    ///
    /// # Errors
    ///
    /// Returns `ResultsError::InvalidCourse` when `id` or `passed` is missing
    /// or malformed, and `ResultsError::Storage` if the store fails.
    pub async fn load(
        &self,
        id: Option<&str>,
        passed: Option<&str>,
    ) -> Result<PracticeResults, ResultsError> {
        let test_id: TestId = id
            .filter(|value| !value.trim().is_empty())
            .and_then(|value| value.parse().ok())
            .ok_or(ResultsError::InvalidCourse)?;
        let passed: u32 = passed
            .and_then(|value| value.trim().parse().ok())
            .ok_or(ResultsError::InvalidCourse)?;
        let corrections = self.session.corrections().await?;
        Ok(PracticeResults {
            test_id,
            passed,
            corrections,
        })
    }

    /// Record the run's performance and head back to the track dashboard.
    ///
    /// # Errors
    ///
    /// Returns `ResultsError::NotSignedIn` without a stored user and
    /// `ResultsError::Storage` if the store fails. A failed request only
    /// adds a notice.
    pub async fn save_performance(
        &self,
        results: &PracticeResults,
    ) -> Result<SubmissionReport, ResultsError> {
        let user = self.session.user().await?.ok_or(ResultsError::NotSignedIn)?;
        let mut notices = Vec::new();
        if let Err(failure) = self
            .api
            .save_performance(&user.username, &results.report())
            .await
        {
            tracing::warn!(%failure, test_id = %results.test_id, "performance not saved");
            notices.push(Notice::error(PERFORMANCE_FAILED_NOTICE));
        }
        let destination = match self.session.lesson_track().await? {
            Some(code) => Destination::TrackDashboard { code },
            None => Destination::Portal,
        };
        Ok(SubmissionReport {
            destination: Some(destination),
            notices,
        })
    }
}
