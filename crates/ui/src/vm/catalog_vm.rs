use portal_core::model::{
    CertificationTest, DashboardSummary, LearningTrack, Quest, TestAction, TestId, TrackCode,
    resolve_media,
};
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackCardVm {
    pub track: LearningTrack,
    pub logo: Option<Url>,
}

#[must_use]
pub fn map_track_cards(tracks: &[LearningTrack], media: &Url) -> Vec<TrackCardVm> {
    tracks
        .iter()
        .map(|track| TrackCardVm {
            logo: media_url(media, track.logo.as_deref()),
            track: track.clone(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestCardVm {
    pub id: TestId,
    pub title: String,
    pub cover: Option<Url>,
    pub about: String,
    pub instructions: String,
    pub progress: u32,
    pub progress_label: String,
    pub seconds_per_question: u32,
}

#[must_use]
pub fn map_quest_cards(quests: &[Quest], media: &Url) -> Vec<QuestCardVm> {
    quests
        .iter()
        .map(|quest| QuestCardVm {
            id: quest.id,
            title: quest.title.clone(),
            cover: media_url(media, quest.cover.as_deref()),
            about: quest.about.clone(),
            instructions: quest.instructions.clone(),
            progress: quest.progress_percent(),
            progress_label: format!(
                "{} of {} answered",
                quest.answered_count, quest.question_count
            ),
            seconds_per_question: quest.seconds_per_question,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCardVm {
    pub id: TestId,
    pub title: String,
    pub cover: Option<Url>,
    pub details: String,
    pub action: TestAction,
    pub interactive: bool,
    /// Passed through to the take-test link as its `time` parameter.
    pub time: u32,
}

#[must_use]
pub fn map_test_cards(tests: &[CertificationTest], media: &Url) -> Vec<TestCardVm> {
    tests
        .iter()
        .map(|test| TestCardVm {
            id: test.id,
            title: test.title.clone(),
            cover: media_url(media, test.cover.as_deref()),
            details: format!("{} questions · {} mins", test.question_count, test.minutes),
            action: test.action(),
            interactive: test.is_interactive(),
            time: test.minutes,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryTile {
    pub label: &'static str,
    pub value: String,
}

#[must_use]
pub fn summary_tiles(summary: &DashboardSummary) -> Vec<SummaryTile> {
    vec![
        SummaryTile {
            label: "Modules",
            value: summary.module_count.to_string(),
        },
        SummaryTile {
            label: "Questions answered",
            value: summary.questions_answered.to_string(),
        },
        SummaryTile {
            label: "Average progress",
            value: format!("{}%", summary.average_progress),
        },
        SummaryTile {
            label: "Pending tests",
            value: summary.pending_tests.to_string(),
        },
    ]
}

/// Accepts a `tc` query value; blank or malformed codes give `None`.
#[must_use]
pub fn parse_track_code(raw: &str) -> Option<TrackCode> {
    TrackCode::new(raw.trim()).ok()
}

fn media_url(media: &Url, path: Option<&str>) -> Option<Url> {
    path.and_then(|path| resolve_media(media, path))
}
