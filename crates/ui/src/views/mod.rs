pub mod certificate;
mod certification;
mod dashboard;
mod login;
mod portal;
mod profile;
pub(crate) mod quiz;
mod results;
mod signup;
mod state;
mod toast_host;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use certificate::{CertificateDocument, export_certificate, render_certificate_html};
pub use certification::CertificationTestsView;
pub use dashboard::DashboardView;
pub use login::LoginView;
pub use portal::PortalView;
pub use profile::CompleteProfileView;
pub use quiz::{PracticeQuestView, TakeTestView};
pub use results::PracticeResultsView;
pub use signup::SignupView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use toast_host::ToastHost;
