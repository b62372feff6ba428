use portal_core::model::{BookId, QuestionId, TestId, TrackCode};
use thiserror::Error;
use url::Url;

/// Default portal API origin.
pub const DEFAULT_DOMAIN: &str = "https://api.learningpost.ng";

/// Questions requested per practice run.
pub const PRACTICE_QUESTION_COUNT: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EndpointError {
    #[error("invalid API domain {raw:?}: {reason}")]
    InvalidDomain { raw: String, reason: String },
}

/// URL builder for every backend route the client calls.
///
/// Path segments are percent-encoded, and all routes keep the trailing
/// slash the backend expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    domain: Url,
}

impl Endpoints {
    /// # Errors
    ///
    /// Returns `EndpointError::InvalidDomain` unless `raw` is an http(s) origin.
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let invalid = |reason: String| EndpointError::InvalidDomain {
            raw: raw.to_owned(),
            reason,
        };
        let domain = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
        if !matches!(domain.scheme(), "http" | "https") || domain.cannot_be_a_base() {
            return Err(invalid("expected an http(s) URL".to_owned()));
        }
        Ok(Self { domain })
    }

    #[must_use]
    pub fn domain(&self) -> &Url {
        &self.domain
    }

    #[must_use]
    pub fn login(&self) -> Url {
        self.route(&["professional", "professional-login"])
    }

    #[must_use]
    pub fn signup(&self) -> Url {
        self.route(&["professional", "professional-signup"])
    }

    #[must_use]
    pub fn update_profile(&self) -> Url {
        self.route(&["professional", "user-profile", "update"])
    }

    #[must_use]
    pub fn join_track(&self) -> Url {
        self.route(&["professional", "add-learning-track"])
    }

    #[must_use]
    pub fn learning_tracks(&self, username: &str) -> Url {
        self.route(&["professional", "get-learning-tracks", username])
    }

    #[must_use]
    pub fn quests(&self, username: &str, track: &TrackCode) -> Url {
        let mut url = self.route(&["professional", "get-quests", username]);
        url.query_pairs_mut().append_pair("code", track.as_str());
        url
    }

    #[must_use]
    pub fn quest_questions(&self, username: &str, test_id: TestId) -> Url {
        let test_id = test_id.to_string();
        let mut url = self.route(&["api", "quest", &test_id, "get-questions", username]);
        url.query_pairs_mut()
            .append_pair("count", &PRACTICE_QUESTION_COUNT.to_string());
        url
    }

    #[must_use]
    pub fn save_progress(&self, username: &str, question_ids: &[QuestionId]) -> Url {
        let joined = question_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.route(&["api", "question", &joined, "answered", username])
    }

    #[must_use]
    pub fn save_performance(&self, username: &str) -> Url {
        self.route(&["api", "save-performance", username])
    }

    #[must_use]
    pub fn books(&self, username: &str, track: &TrackCode) -> Url {
        let mut url = self.route(&["professional", "get-books", username]);
        url.query_pairs_mut().append_pair("code", track.as_str());
        url
    }

    #[must_use]
    pub fn book_chapters(&self, username: &str, book_id: BookId) -> Url {
        let book_id = book_id.to_string();
        self.route(&["api", username, "book", &book_id, "chapters"])
    }

    #[must_use]
    pub fn tests(&self, username: &str, track: &TrackCode) -> Url {
        let mut url = self.route(&["professional", "get-tests", username]);
        url.query_pairs_mut().append_pair("code", track.as_str());
        url
    }

    #[must_use]
    pub fn start_test(&self, username: &str, test_id: TestId) -> Url {
        let test_id = test_id.to_string();
        self.route(&["professional", "start-test", &test_id, username])
    }

    #[must_use]
    pub fn save_test_score(&self, username: &str, test_id: TestId) -> Url {
        let test_id = test_id.to_string();
        self.route(&["professional", "save-test-score", username, &test_id])
    }

    #[must_use]
    pub fn test_attempt(&self, username: &str, test_id: TestId) -> Url {
        let test_id = test_id.to_string();
        self.route(&["professional", "get-test-attempt", username, &test_id])
    }

    fn route(&self, segments: &[&str]) -> Url {
        let mut url = self.domain.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments).push("");
        }
        url
    }
}
