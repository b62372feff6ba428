//! Certificates for passed certification attempts.

use std::fs;
use std::path::{Path, PathBuf};

use portal_core::model::TestAttempt;

use crate::error::CertificateError;

/// What a certificate shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub holder_first_name: String,
    pub holder_last_name: String,
    pub course_title: String,
    pub issued_on: String,
    pub serial_number: String,
}

impl Certificate {
    /// # Errors
    ///
    /// Returns `CertificateError::NotAvailable` unless the attempt passed and
    /// was not voided.
    pub fn from_attempt(attempt: &TestAttempt) -> Result<Self, CertificateError> {
        if !attempt.certificate_available() {
            return Err(CertificateError::NotAvailable);
        }
        Ok(Self {
            holder_first_name: attempt.holder.first_name.trim().to_owned(),
            holder_last_name: attempt.holder.last_name.trim().to_owned(),
            course_title: attempt.test.title.trim().to_owned(),
            issued_on: attempt.certificate_date().to_owned(),
            serial_number: attempt.serial_number.clone(),
        })
    }

    #[must_use]
    pub fn holder_name(&self) -> String {
        format!("{} {}", self.holder_first_name, self.holder_last_name)
            .trim()
            .to_owned()
    }

    /// `{TITLE}_CERTIFICATE_{first}_{last}.html`, with path separators removed.
    #[must_use]
    pub fn file_name(&self) -> String {
        let name = format!(
            "{}_CERTIFICATE_{}_{}.html",
            self.course_title.to_uppercase(),
            self.holder_first_name,
            self.holder_last_name
        );
        name.chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect()
    }

    /// Write rendered HTML into `dir` and return the file path.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::Io` if the directory or file cannot be written.
    pub fn save(&self, dir: &Path, html: &str) -> Result<PathBuf, CertificateError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, html)?;
        tracing::info!(path = %path.display(), serial = %self.serial_number, "certificate saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attempt(passed: bool, voided: bool) -> TestAttempt {
        serde_json::from_value(json!({
            "user": {"first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com"},
            "test": {"id": 5, "title": "Audit Basics", "pass_mark": 50},
            "attempt_time": "2024-03-09T10:15:42.000Z",
            "score": 80,
            "is_voided": voided,
            "is_attempted": true,
            "proctoring_failures": 0,
            "is_passed": passed,
            "serial_number": "LP-0001"
        }))
        .unwrap()
    }

    #[test]
    fn only_clean_passes_get_certificates() {
        assert!(Certificate::from_attempt(&attempt(true, false)).is_ok());
        assert!(matches!(
            Certificate::from_attempt(&attempt(true, true)),
            Err(CertificateError::NotAvailable)
        ));
        assert!(Certificate::from_attempt(&attempt(false, false)).is_err());
    }

    #[test]
    fn file_name_uses_upper_title() {
        let certificate = Certificate::from_attempt(&attempt(true, false)).unwrap();
        assert_eq!(
            certificate.file_name(),
            "AUDIT BASICS_CERTIFICATE_Ada_Lovelace.html"
        );
        assert_eq!(certificate.issued_on, "2024-03-09T10:15");
        assert_eq!(certificate.holder_name(), "Ada Lovelace");
    }

    #[test]
    fn save_writes_into_directory() {
        let dir = std::env::temp_dir().join(format!("portal-cert-{}", std::process::id()));
        let certificate = Certificate::from_attempt(&attempt(true, false)).unwrap();
        let path = certificate.save(&dir, "<html></html>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
        fs::remove_dir_all(dir).unwrap();
    }
}
