#![forbid(unsafe_code)]

pub mod account_service;
pub mod api;
pub mod app_services;
pub mod catalog_service;
pub mod certificate;
pub mod config;
pub mod destination;
pub mod error;
pub mod profile_service;
pub mod quiz_service;
pub mod results_service;
pub mod shuffle;
pub mod smartlink;
pub mod toast;

pub use portal_core::Clock;

pub use account_service::AccountService;
pub use app_services::AppServices;
pub use catalog_service::{CatalogService, TrackDashboard};
pub use certificate::Certificate;
pub use config::PortalConfig;
pub use destination::Destination;
pub use error::{
    AccountError, AppServicesError, CatalogError, CertificateError, ProfileError, QuizError,
    ResultsError,
};
pub use profile_service::{PortraitPhoto, ProfileService};
pub use quiz_service::{QuizLoopService, SubmissionReport};
pub use results_service::{PracticeResults, ResultsService};
pub use toast::{Notice, Toast, ToastQueue, ToastSeverity};
