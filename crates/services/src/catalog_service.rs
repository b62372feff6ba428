use portal_core::model::{
    Book, BookId, CertificationTest, Chapter, DashboardSummary, LearningTrack, Quest,
    SessionUser, TestAttempt, TestId, TrackCode, tests_locked,
};
use storage::session_store::SessionStore;

use crate::api::{ApiFailure, PortalApi};
use crate::destination::Destination;
use crate::error::CatalogError;
use crate::toast::Notice;

/// Everything shown on a track dashboard.
///
/// A failed fetch leaves its list empty and adds a notice; the other
/// lists still load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDashboard {
    pub code: TrackCode,
    pub track: Option<LearningTrack>,
    pub quests: Vec<Quest>,
    pub books: Vec<Book>,
    pub tests: Vec<CertificationTest>,
    pub summary: DashboardSummary,
    pub tests_locked: bool,
    pub notices: Vec<Notice>,
}

/// Learning tracks and the modules, books and tests inside them.
#[derive(Clone)]
pub struct CatalogService {
    api: PortalApi,
    session: SessionStore,
}

impl CatalogService {
    #[must_use]
    pub fn new(api: PortalApi, session: SessionStore) -> Self {
        Self { api, session }
    }

    #[must_use]
    pub fn api(&self) -> &PortalApi {
        &self.api
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotSignedIn`, `CatalogError::Api` or
    /// `CatalogError::Storage`.
    pub async fn learning_tracks(&self) -> Result<Vec<LearningTrack>, CatalogError> {
        let user = self.signed_in_user().await?;
        Ok(self.api.learning_tracks(&user.username).await?)
    }

    /// Join a track by its course code; returns the server message.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingCode` for a blank code, otherwise
    /// `CatalogError::NotSignedIn`, `CatalogError::Api` or `CatalogError::Storage`.
    pub async fn join_track(&self, code: &str) -> Result<String, CatalogError> {
        let code = TrackCode::new(code).map_err(|_| CatalogError::MissingCode)?;
        let user = self.signed_in_user().await?;
        let message = self.api.join_track(&user.username, &code).await?;
        tracing::info!(track = %code, "joined learning track");
        Ok(message)
    }

    /// Remember `track` as the active one and point at its dashboard.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the track cannot be stored.
    pub async fn open_track(&self, track: &LearningTrack) -> Result<Destination, CatalogError> {
        self.session.set_lesson_track(&track.code).await?;
        self.session.set_lesson_track_obj(track).await?;
        Ok(Destination::TrackDashboard {
            code: track.code.clone(),
        })
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the store cannot be read.
    pub async fn active_track(&self) -> Result<Option<TrackCode>, CatalogError> {
        Ok(self.session.lesson_track().await?)
    }

    /// Load quests, books and tests for a track, in that order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotSignedIn` or `CatalogError::Storage`.
    /// Fetch failures are reported through [`TrackDashboard::notices`].
    pub async fn track_dashboard(&self, code: &TrackCode) -> Result<TrackDashboard, CatalogError> {
        let user = self.signed_in_user().await?;
        let mut notices = Vec::new();

        let quests = collect(
            self.api.quests(&user.username, code).await,
            "quests",
            &mut notices,
        );
        let books = collect(
            self.api.books(&user.username, code).await,
            "books",
            &mut notices,
        );
        let tests = collect(
            self.api.tests(&user.username, code).await,
            "tests",
            &mut notices,
        );

        let summary = DashboardSummary::from_catalog(&quests, &tests);
        let locked = tests_locked(&quests);
        self.session.set_test_locked(locked).await?;
        let track = self
            .session
            .lesson_track_obj()
            .await?
            .filter(|track| &track.code == code);

        tracing::info!(
            track = %code,
            quests = quests.len(),
            books = books.len(),
            tests = tests.len(),
            failures = notices.len(),
            "track dashboard loaded"
        );
        Ok(TrackDashboard {
            code: code.clone(),
            track,
            quests,
            books,
            tests,
            summary,
            tests_locked: locked,
            notices,
        })
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotSignedIn`, `CatalogError::Api` or
    /// `CatalogError::Storage`.
    pub async fn book_chapters(&self, book_id: BookId) -> Result<Vec<Chapter>, CatalogError> {
        let user = self.signed_in_user().await?;
        Ok(self.api.book_chapters(&user.username, book_id).await?)
    }

    /// Certification tests of a track.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotSignedIn`, `CatalogError::Api` or
    /// `CatalogError::Storage`.
    pub async fn certification_tests(
        &self,
        code: &TrackCode,
    ) -> Result<Vec<CertificationTest>, CatalogError> {
        let user = self.signed_in_user().await?;
        Ok(self.api.tests(&user.username, code).await?)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotSignedIn`, `CatalogError::Api` or
    /// `CatalogError::Storage`.
    pub async fn test_attempt(&self, test_id: TestId) -> Result<TestAttempt, CatalogError> {
        let user = self.signed_in_user().await?;
        Ok(self.api.test_attempt(&user.username, test_id).await?)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the flag cannot be read.
    pub async fn tests_locked(&self) -> Result<bool, CatalogError> {
        Ok(self.session.is_test_locked().await?)
    }

    async fn signed_in_user(&self) -> Result<SessionUser, CatalogError> {
        self.session.user().await?.ok_or(CatalogError::NotSignedIn)
    }
}

fn collect<T>(result: Result<Vec<T>, ApiFailure>, what: &str, notices: &mut Vec<Notice>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(failure) => {
            tracing::warn!(%failure, what, "dashboard fetch failed");
            notices.push(Notice::error(failure.user_message()));
            Vec::new()
        }
    }
}
