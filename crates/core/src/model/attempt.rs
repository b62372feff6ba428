use serde::{Deserialize, Serialize};

use super::lenient;
use crate::model::TestId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptHolder {
    #[serde(default, deserialize_with = "lenient::text")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: String,
}

impl AttemptHolder {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptTest {
    pub id: TestId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub expires: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub pass_mark: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Voided,
    Passed,
    Failed,
}

impl AttemptStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AttemptStatus::Voided => "Voided",
            AttemptStatus::Passed => "Passed",
            AttemptStatus::Failed => "Failed",
        }
    }
}

/// A recorded certification attempt with its grading outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestAttempt {
    #[serde(rename = "user")]
    pub holder: AttemptHolder,
    pub test: AttemptTest,
    #[serde(default, deserialize_with = "lenient::text")]
    pub attempt_time: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_voided: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_attempted: bool,
    #[serde(default, deserialize_with = "lenient::count")]
    pub proctoring_failures: u32,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_passed: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub serial_number: String,
}

impl TestAttempt {
    /// Voiding wins over the pass flag.
    #[must_use]
    pub fn status(&self) -> AttemptStatus {
        if self.is_voided {
            AttemptStatus::Voided
        } else if self.is_passed {
            AttemptStatus::Passed
        } else {
            AttemptStatus::Failed
        }
    }

    #[must_use]
    pub fn certificate_available(&self) -> bool {
        self.status() == AttemptStatus::Passed
    }

    /// Date shown on the certificate: the first 16 characters of the attempt time.
    #[must_use]
    pub fn certificate_date(&self) -> &str {
        match self.attempt_time.char_indices().nth(16) {
            Some((end, _)) => &self.attempt_time[..end],
            None => &self.attempt_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt_json(voided: bool, passed: bool) -> String {
        format!(
            r#"{{
                "user": {{"id": 9, "first_name": "Grace", "last_name": "Hopper", "email": "g@h.io"}},
                "test": {{"id": "12", "title": "Compilers", "expires": null, "pass_mark": "50"}},
                "attempt_time": "2024-05-02T10:15:30Z",
                "score": 82,
                "is_voided": {voided},
                "is_attempted": true,
                "proctoring_failures": 0,
                "is_passed": {passed},
                "serial_number": "LP-0042"
            }}"#
        )
    }

    #[test]
    fn decodes_attempt_and_derives_status() {
        let attempt: TestAttempt = serde_json::from_str(&attempt_json(false, true)).unwrap();
        assert_eq!(attempt.status(), AttemptStatus::Passed);
        assert!(attempt.certificate_available());
        assert_eq!(attempt.holder.full_name(), "Grace Hopper");
        assert!((attempt.test.pass_mark - 50.0).abs() < f64::EPSILON);
        assert_eq!(attempt.certificate_date(), "2024-05-02T10:15");
    }

    #[test]
    fn voided_attempt_has_no_certificate() {
        let attempt: TestAttempt = serde_json::from_str(&attempt_json(true, true)).unwrap();
        assert_eq!(attempt.status(), AttemptStatus::Voided);
        assert!(!attempt.certificate_available());
    }

    #[test]
    fn failed_attempt() {
        let attempt: TestAttempt = serde_json::from_str(&attempt_json(false, false)).unwrap();
        assert_eq!(attempt.status().label(), "Failed");
    }

    #[test]
    fn short_attempt_time_is_kept_whole() {
        let mut attempt: TestAttempt = serde_json::from_str(&attempt_json(false, true)).unwrap();
        attempt.attempt_time = "2024-05-02".into();
        assert_eq!(attempt.certificate_date(), "2024-05-02");
    }
}
