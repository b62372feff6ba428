use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, multipart};
use serde_json::Value;
use url::Url;

use super::response::{ApiFailure, ApiPayload, ApiReply};

/// A file part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Transport-neutral multipart body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<UploadFile>,
}

impl UploadForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn file(mut self, file: UploadFile) -> Self {
        self.files.push(file);
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The three request shapes the portal backend understands.
///
/// Every failure is folded into [`ApiFailure`]; implementations never panic
/// or surface transport-specific errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_form(&self, url: Url, fields: Vec<(String, String)>) -> ApiReply;

    async fn get(&self, url: Url) -> ApiReply;

    async fn post_multipart(&self, url: Url, form: UploadForm) -> ApiReply;
}

/// `reqwest`-backed transport used by the desktop app.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_form(&self, url: Url, fields: Vec<(String, String)>) -> ApiReply {
        tracing::debug!(%url, "POST form");
        let response = self
            .client
            .post(url.clone())
            .form(&fields)
            .send()
            .await
            .map_err(|err| connection_failure(&url, &err))?;
        json_reply(&url, response).await
    }

    async fn get(&self, url: Url) -> ApiReply {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| connection_failure(&url, &err))?;
        json_reply(&url, response).await
    }

    async fn post_multipart(&self, url: Url, form: UploadForm) -> ApiReply {
        tracing::debug!(%url, files = form.files.len(), "POST multipart");
        let mut body = multipart::Form::new();
        for (name, value) in form.fields {
            body = body.text(name, value);
        }
        for file in form.files {
            let part = multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime)
                .map_err(|err| connection_failure(&url, &err))?;
            body = body.part(file.field, part);
        }

        let response = self
            .client
            .post(url.clone())
            .multipart(body)
            .send()
            .await
            .map_err(|err| connection_failure(&url, &err))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "upload rejected");
            return Err(ApiFailure::HttpStatus(status.as_u16()));
        }
        let text = response
            .text()
            .await
            .map_err(|err| connection_failure(&url, &err))?;
        ApiPayload::from_upload_body(status.as_u16(), &text)
    }
}

async fn json_reply(url: &Url, response: Response) -> ApiReply {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%url, status = status.as_u16(), "request failed");
        return Err(ApiFailure::HttpStatus(status.as_u16()));
    }
    let body: Value = response
        .json()
        .await
        .map_err(|err| connection_failure(url, &err))?;
    let reply = ApiPayload::from_json_body(body);
    if let Err(failure) = &reply {
        tracing::warn!(%url, %failure, "request rejected by server");
    }
    reply
}

fn connection_failure(url: &Url, err: &reqwest::Error) -> ApiFailure {
    tracing::warn!(%url, error = %err, "connection failure");
    ApiFailure::Connection
}
