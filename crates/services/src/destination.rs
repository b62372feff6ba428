use portal_core::model::{TestId, TrackCode};
use url::form_urlencoded;

/// Where a flow wants the user taken next.
///
/// Services decide the destination; the UI maps it onto its router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Login,
    Portal,
    TrackDashboard { code: TrackCode },
    PracticeResults { test_id: TestId, passed: usize },
    CertificationTests { code: TrackCode },
}

impl Destination {
    /// Path and query in the portal's URL scheme.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Destination::Login => "/".to_owned(),
            Destination::Portal => "/portal".to_owned(),
            Destination::TrackDashboard { code } => {
                format!("/portal/dashboard?{}", track_query(code))
            }
            Destination::PracticeResults { test_id, passed } => {
                format!("/portal/practice-quest/results?id={test_id}&passed={passed}")
            }
            Destination::CertificationTests { code } => {
                format!("/certification-tests?{}", track_query(code))
            }
        }
    }
}

fn track_query(code: &TrackCode) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("tc", code.as_str())
        .finish()
}
