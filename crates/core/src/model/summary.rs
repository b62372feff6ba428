use crate::model::{CertificationTest, Quest};

/// Headline numbers shown above a track dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub module_count: u32,
    pub questions_answered: u32,
    pub average_progress: u32,
    pub pending_tests: u32,
}

impl DashboardSummary {
    #[must_use]
    pub fn from_catalog(quests: &[Quest], tests: &[CertificationTest]) -> Self {
        let module_count = u32::try_from(quests.len()).unwrap_or(u32::MAX);
        let questions_answered = quests
            .iter()
            .fold(0_u32, |acc, quest| acc.saturating_add(quest.answered_count));
        let progress_total: u64 = quests
            .iter()
            .map(|quest| u64::from(quest.progress_percent()))
            .sum();
        let average_progress = if module_count == 0 {
            0
        } else {
            u32::try_from(progress_total / u64::from(module_count)).unwrap_or(100)
        };
        let pending_tests = tests.iter().filter(|test| !test.is_attempted).count();

        Self {
            module_count,
            questions_answered,
            average_progress,
            pending_tests: u32::try_from(pending_tests).unwrap_or(u32::MAX),
        }
    }
}

/// Certification tests stay locked until every module in the track is complete.
#[must_use]
pub fn tests_locked(quests: &[Quest]) -> bool {
    quests.iter().any(|quest| !quest.is_complete())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestId;

    fn quest(id: u64, answered: u32, total: u32) -> Quest {
        Quest {
            id: TestId::new(id),
            title: format!("Quest {id}"),
            cover: None,
            about: String::new(),
            instructions: String::new(),
            question_count: total,
            answered_count: answered,
            seconds_per_question: 20,
        }
    }

    fn test(attempted: bool) -> CertificationTest {
        CertificationTest {
            id: TestId::new(50),
            title: "Exam".into(),
            cover: None,
            question_count: 10,
            is_locked: false,
            is_attempted: attempted,
            minutes: 30,
        }
    }

    #[test]
    fn summarizes_modules_and_tests() {
        let quests = [quest(1, 10, 10), quest(2, 5, 10), quest(3, 0, 0)];
        let summary = DashboardSummary::from_catalog(&quests, &[test(true), test(false)]);
        assert_eq!(summary.module_count, 3);
        assert_eq!(summary.questions_answered, 15);
        assert_eq!(summary.average_progress, 50);
        assert_eq!(summary.pending_tests, 1);
    }

    #[test]
    fn empty_track_is_all_zero() {
        assert_eq!(
            DashboardSummary::from_catalog(&[], &[]),
            DashboardSummary::default()
        );
        assert!(!tests_locked(&[]));
    }

    #[test]
    fn incomplete_module_locks_tests() {
        assert!(tests_locked(&[quest(1, 10, 10), quest(2, 1, 10)]));
        assert!(!tests_locked(&[quest(1, 10, 10)]));
    }
}
