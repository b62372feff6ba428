//! HTTP access to the portal backend.

mod client;
mod endpoints;
mod response;
mod scripted;
mod transport;

pub use client::{LoginOutcome, PerformanceReport, PortalApi, SignupForm};
pub use endpoints::{DEFAULT_DOMAIN, EndpointError, Endpoints, PRACTICE_QUESTION_COUNT};
pub use response::{ApiFailure, ApiPayload, ApiReply};
pub use scripted::{RecordedRequest, RequestMethod, ScriptedTransport};
pub use transport::{ReqwestTransport, Transport, UploadFile, UploadForm};
