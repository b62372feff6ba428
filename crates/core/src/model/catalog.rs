use serde::{Deserialize, Serialize};
use url::Url;

use super::lenient;
use crate::model::{BookId, TestId, TrackCode};

/// Resolves a backend media path (`/media/...`) against the API domain.
///
/// Absolute URLs are returned unchanged; blank paths resolve to `None`.
#[must_use]
pub fn resolve_media(domain: &Url, path: &str) -> Option<Url> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if let Ok(absolute) = Url::parse(path) {
        return Some(absolute);
    }
    domain.join(path).ok()
}

/// A track the user has joined, as cached under `lessonTrackObj`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningTrack {
    pub code: TrackCode,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub logo: Option<String>,
}

/// A practice module ("quest") inside a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    #[serde(rename = "testid")]
    pub id: TestId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub cover: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub about: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub instructions: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub question_count: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub answered_count: u32,
    #[serde(rename = "time", default, deserialize_with = "lenient::count")]
    pub seconds_per_question: u32,
}

impl Quest {
    /// Whole-percent completion; zero when nothing was answered or the bank is empty.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        percent(self.answered_count, self.question_count)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.question_count > 0 && self.answered_count >= self.question_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "bookid")]
    pub id: BookId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub cover: Option<String>,
    #[serde(rename = "about", default, deserialize_with = "lenient::optional_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub about_author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
}

/// What tapping a certification test card does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestAction {
    /// Locked and never attempted; the card is inert.
    Locked,
    StartTest,
    ShowResults,
}

impl TestAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TestAction::Locked => "Locked",
            TestAction::StartTest => "Start Test",
            TestAction::ShowResults => "Show Results",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationTest {
    #[serde(rename = "testid")]
    pub id: TestId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub cover: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub question_count: u32,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_locked: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_attempted: bool,
    #[serde(rename = "time", default, deserialize_with = "lenient::count")]
    pub minutes: u32,
}

impl CertificationTest {
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        !(self.is_locked && !self.is_attempted)
    }

    #[must_use]
    pub fn action(&self) -> TestAction {
        if self.is_attempted {
            TestAction::ShowResults
        } else if self.is_locked {
            TestAction::Locked
        } else {
            TestAction::StartTest
        }
    }
}

pub(crate) fn percent(part: u32, whole: u32) -> u32 {
    if part == 0 || whole == 0 {
        return 0;
    }
    let value = u64::from(part) * 100 / u64::from(whole);
    u32::try_from(value).unwrap_or(u32::MAX)
}
