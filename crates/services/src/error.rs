//! Shared error types for the services crate.
//!
//! `Display` on these errors is the text the UI puts in an error toast.

use thiserror::Error;

use portal_core::quiz::QuizStateError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

use crate::api::{ApiFailure, EndpointError};

/// Errors emitted by `AccountService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccountError {
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error(transparent)]
    Api(#[from] ApiFailure),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("User not logged in.")]
    NotSignedIn,
    #[error("Please enter a course code.")]
    MissingCode,
    #[error(transparent)]
    Api(#[from] ApiFailure),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("User not logged in.")]
    NotSignedIn,
    #[error("Course key is invalid.")]
    InvalidCourse,
    #[error("No questions found for this test.")]
    NoQuestions,
    #[error("Quiz is still in progress.")]
    Unfinished,
    #[error(transparent)]
    State(#[from] QuizStateError),
    #[error(transparent)]
    Api(#[from] ApiFailure),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResultsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultsError {
    #[error("Course key is invalid.")]
    InvalidCourse,
    #[error("User not logged in.")]
    NotSignedIn,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the certificate exporter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CertificateError {
    #[error("No certificate is available for this attempt.")]
    NotAvailable,
    #[error("Failed to save certificate: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("User not logged in.")]
    NotSignedIn,
    #[error("No photo to upload. Please take a photo first.")]
    NoPhoto,
    #[error("Failed to read photo: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Api(#[from] ApiFailure),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
