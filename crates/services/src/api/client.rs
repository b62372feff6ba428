use std::sync::Arc;

use portal_core::model::{
    Book, BookId, CertificationTest, Chapter, LearningTrack, Quest, Question, QuestionId,
    QuestionRecord, SessionUser, TestAttempt, TestId, TrackCode,
};

use super::endpoints::Endpoints;
use super::response::{ApiFailure, ApiPayload};
use super::transport::{Transport, UploadFile, UploadForm};

/// Successful login: the welcome message and the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub message: String,
    pub user: SessionUser,
}

/// Fields of the professional signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Typed view of the portal backend.
#[derive(Clone)]
pub struct PortalApi {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
}

impl PortalApi {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or the body has no user.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ApiFailure> {
        let payload = self
            .transport
            .post_form(
                self.endpoints.login(),
                fields(&[("email", email), ("password", password)]),
            )
            .await?;
        let user = payload.field("user")?;
        Ok(LoginOutcome {
            message: payload.message,
            user,
        })
    }

    /// Returns the server message on success.
    ///
    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or is rejected.
    pub async fn signup(&self, form: &SignupForm) -> Result<String, ApiFailure> {
        let payload = self
            .transport
            .post_form(
                self.endpoints.signup(),
                fields(&[
                    ("first_name", &form.first_name),
                    ("last_name", &form.last_name),
                    ("email", &form.email),
                    ("password", &form.password),
                ]),
            )
            .await?;
        Ok(payload.message)
    }

    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or is rejected.
    pub async fn join_track(&self, username: &str, code: &TrackCode) -> Result<String, ApiFailure> {
        let payload = self
            .transport
            .post_form(
                self.endpoints.join_track(),
                fields(&[("username", username), ("cc", code.as_str())]),
            )
            .await?;
        Ok(payload.message)
    }

    /// Tracks the user joined. Accepts either a `learning_tracks` or a
    /// `tracks` list.
    ///
    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or the list is malformed.
    pub async fn learning_tracks(&self, username: &str) -> Result<Vec<LearningTrack>, ApiFailure> {
        let payload = self
            .transport
            .get(self.endpoints.learning_tracks(username))
            .await?;
        if payload.lookup("learning_tracks").is_some() {
            payload.list("learning_tracks")
        } else {
            payload.list("tracks")
        }
    }

    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or the list is malformed.
    pub async fn quests(&self, username: &str, track: &TrackCode) -> Result<Vec<Quest>, ApiFailure> {
        let payload = self
            .transport
            .get(self.endpoints.quests(username, track))
            .await?;
        payload.list("quests")
    }

    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or the list is malformed.
    pub async fn books(&self, username: &str, track: &TrackCode) -> Result<Vec<Book>, ApiFailure> {
        let payload = self
            .transport
            .get(self.endpoints.books(username, track))
            .await?;
        payload.list("books")
    }

    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or the list is malformed.
    pub async fn book_chapters(
        &self,
        username: &str,
        book_id: BookId,
    ) -> Result<Vec<Chapter>, ApiFailure> {
        let payload = self
            .transport
            .get(self.endpoints.book_chapters(username, book_id))
            .await?;
        payload.list("chapters")
    }

    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or the list is malformed.
    pub async fn tests(
        &self,
        username: &str,
        track: &TrackCode,
    ) -> Result<Vec<CertificationTest>, ApiFailure> {
        let payload = self
            .transport
            .get(self.endpoints.tests(username, track))
            .await?;
        payload.list("tests")
    }

    /// Practice questions for a module.
    ///
    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or the list is malformed.
    pub async fn quest_questions(
        &self,
        username: &str,
        test_id: TestId,
    ) -> Result<Vec<Question>, ApiFailure> {
        let payload = self
            .transport
            .get(self.endpoints.quest_questions(username, test_id))
            .await?;
        questions_from(&payload)
    }

    /// Questions for a certification attempt; fetching them starts the attempt.
    ///
    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or the list is malformed.
    pub async fn test_questions(
        &self,
        username: &str,
        test_id: TestId,
    ) -> Result<Vec<Question>, ApiFailure> {
        let payload = self
            .transport
            .get(self.endpoints.start_test(username, test_id))
            .await?;
        questions_from(&payload)
    }

    /// Marks questions as answered correctly.
    ///
    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or is rejected.
    pub async fn save_progress(
        &self,
        username: &str,
        question_ids: &[QuestionId],
    ) -> Result<(), ApiFailure> {
        self.transport
            .get(self.endpoints.save_progress(username, question_ids))
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or is rejected.
    pub async fn save_performance(
        &self,
        username: &str,
        report: &PerformanceReport,
    ) -> Result<String, ApiFailure> {
        let payload = self
            .transport
            .post_form(self.endpoints.save_performance(username), report.to_fields())
            .await?;
        Ok(payload.message)
    }

    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or is rejected.
    pub async fn save_test_score(
        &self,
        username: &str,
        test_id: TestId,
        score: u32,
    ) -> Result<String, ApiFailure> {
        let payload = self
            .transport
            .post_form(
                self.endpoints.save_test_score(username, test_id),
                vec![("score".to_owned(), score.to_string())],
            )
            .await?;
        Ok(payload.message)
    }

    /// # Errors
    ///
    /// Returns `ApiFailure` when the request fails or the attempt is missing.
    pub async fn test_attempt(
        &self,
        username: &str,
        test_id: TestId,
    ) -> Result<TestAttempt, ApiFailure> {
        let payload = self
            .transport
            .get(self.endpoints.test_attempt(username, test_id))
            .await?;
        payload.field("attempt")
    }

    /// # Errors
    ///
    /// Returns `ApiFailure` when the upload fails or is rejected.
    pub async fn upload_portrait(
        &self,
        email: &str,
        photo: UploadFile,
    ) -> Result<String, ApiFailure> {
        let form = UploadForm::new().file(photo).text("email", email);
        let payload = self
            .transport
            .post_multipart(self.endpoints.update_profile(), form)
            .await?;
        Ok(payload.message)
    }
}

/// Outcome of a practice run as the performance endpoint records it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceReport {
    pub test_id: TestId,
    pub correctly_answered: u32,
    pub wrongly_answered: u32,
    pub time: String,
}

impl PerformanceReport {
    #[must_use]
    pub fn total_answered(&self) -> u32 {
        self.correctly_answered.saturating_add(self.wrongly_answered)
    }

    fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            ("total_answered".to_owned(), self.total_answered().to_string()),
            (
                "correctly_answered".to_owned(),
                self.correctly_answered.to_string(),
            ),
            (
                "wrongly_answered".to_owned(),
                self.wrongly_answered.to_string(),
            ),
            ("time".to_owned(), self.time.clone()),
            ("testid".to_owned(), self.test_id.to_string()),
        ]
    }
}

fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect()
}

/// Decodes the `questions` list. Every record is kept so the score counts
/// the full list the server sent.
fn questions_from(payload: &ApiPayload) -> Result<Vec<Question>, ApiFailure> {
    let records: Vec<QuestionRecord> = payload.list("questions")?;
    let questions = records
        .into_iter()
        .map(|record| {
            if record.id.parse::<QuestionId>().is_err() {
                tracing::warn!(id = %record.id, "question id is not numeric; progress will skip it");
            }
            Question::from(record)
        })
        .collect();
    Ok(questions)
}
