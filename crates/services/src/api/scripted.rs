use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::response::{ApiFailure, ApiPayload, ApiReply};
use super::transport::{Transport, UploadFile, UploadForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    PostForm,
    PostMultipart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: RequestMethod,
    pub url: Url,
    pub fields: Vec<(String, String)>,
    pub files: Vec<UploadFile>,
}

impl RecordedRequest {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// In-memory [`Transport`] that answers from canned replies.
///
/// Replies are keyed by a URL fragment; the first route whose fragment
/// occurs in the request URL answers. Each route replays its replies in
/// order and repeats the last one. Unrouted requests fail with HTTP 404.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: Mutex<Vec<(String, VecDeque<ApiReply>)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `reply` for requests whose URL contains `fragment`.
    pub fn respond(&self, fragment: &str, reply: ApiReply) -> &Self {
        if let Ok(mut routes) = self.routes.lock() {
            if let Some((_, replies)) = routes.iter_mut().find(|(key, _)| key == fragment) {
                replies.push_back(reply);
            } else {
                routes.push((fragment.to_owned(), VecDeque::from([reply])));
            }
        }
        self
    }

    /// Queues a JSON body, normalized the way a real response would be.
    pub fn respond_json(&self, fragment: &str, body: Value) -> &Self {
        self.respond(fragment, ApiPayload::from_json_body(body))
    }

    pub fn fail(&self, fragment: &str, failure: ApiFailure) -> &Self {
        self.respond(fragment, Err(failure))
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Requests whose URL contains `fragment`.
    #[must_use]
    pub fn requests_to(&self, fragment: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.url.as_str().contains(fragment))
            .collect()
    }

    fn answer(&self, request: RecordedRequest) -> ApiReply {
        let url = request.url.as_str().to_owned();
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let Ok(mut routes) = self.routes.lock() else {
            return Err(ApiFailure::Connection);
        };
        let Some((_, replies)) = routes
            .iter_mut()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
        else {
            return Err(ApiFailure::HttpStatus(404));
        };
        if replies.len() > 1 {
            replies.pop_front().unwrap_or(Err(ApiFailure::HttpStatus(404)))
        } else {
            replies.front().cloned().unwrap_or(Err(ApiFailure::HttpStatus(404)))
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_form(&self, url: Url, fields: Vec<(String, String)>) -> ApiReply {
        self.answer(RecordedRequest {
            method: RequestMethod::PostForm,
            url,
            fields,
            files: Vec::new(),
        })
    }

    async fn get(&self, url: Url) -> ApiReply {
        self.answer(RecordedRequest {
            method: RequestMethod::Get,
            url,
            fields: Vec::new(),
            files: Vec::new(),
        })
    }

    async fn post_multipart(&self, url: Url, form: UploadForm) -> ApiReply {
        self.answer(RecordedRequest {
            method: RequestMethod::PostMultipart,
            url,
            fields: form.fields,
            files: form.files,
        })
    }
}
