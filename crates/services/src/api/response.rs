use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Why a portal request did not produce a usable payload.
///
/// `Display` is the text shown to the user in an error toast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ApiFailure {
    /// The request could not be sent or the body could not be read.
    #[error("Connection Error")]
    Connection,
    #[error("HTTP Error {0}")]
    HttpStatus(u16),
    /// 2xx response whose body carried `success: false`.
    #[error("{message}")]
    Rejected { message: String },
    /// 2xx success body that lacks the data an endpoint promised.
    #[error("Unexpected response from server.")]
    Decode { reason: String },
}

impl ApiFailure {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiFailure::Rejected { message } if message.trim().is_empty() => {
                "Request failed.".to_owned()
            }
            other => other.to_string(),
        }
    }

    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        ApiFailure::Decode {
            reason: reason.into(),
        }
    }
}

pub type ApiReply = Result<ApiPayload, ApiFailure>;

/// A successful response: the server message plus the full JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiPayload {
    pub message: String,
    pub body: Value,
}

impl ApiPayload {
    #[must_use]
    pub fn new(message: impl Into<String>, body: Value) -> Self {
        Self {
            message: message.into(),
            body,
        }
    }

    /// Normalizes a JSON body from a form POST or GET.
    ///
    /// A body without `success: true` is an application-level rejection.
    pub fn from_json_body(body: Value) -> ApiReply {
        let message = message_of(&body).unwrap_or_default();
        if body.get("success").and_then(Value::as_bool) == Some(true) {
            Ok(Self { message, body })
        } else {
            Err(ApiFailure::Rejected { message })
        }
    }

    /// Normalizes the body of a successful (2xx) multipart upload.
    ///
    /// Uploads are lenient: a non-JSON body or a body without `success`
    /// still counts as accepted.
    pub fn from_upload_body(status: u16, text: &str) -> ApiReply {
        let Ok(body) = serde_json::from_str::<Value>(text) else {
            return Ok(Self {
                message: format!("Upload successful (HTTP {status}), no JSON response body."),
                body: Value::Null,
            });
        };
        let success = body.get("success").and_then(Value::as_bool).unwrap_or(true);
        let message = message_of(&body);
        if success {
            Ok(Self {
                message: message.unwrap_or_else(|| "Upload successful".to_owned()),
                body,
            })
        } else {
            Err(ApiFailure::Rejected {
                message: message.unwrap_or_default(),
            })
        }
    }

    /// Looks `key` up under the body's `data` object, then at the top level.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.body
            .get("data")
            .and_then(|data| data.get(key))
            .or_else(|| self.body.get(key))
            .filter(|value| !value.is_null())
    }

    /// Decodes the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ApiFailure::Decode` if the key is missing or has the wrong shape.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<T, ApiFailure> {
        let value = self
            .lookup(key)
            .ok_or_else(|| ApiFailure::decode(format!("missing `{key}`")))?;
        serde_json::from_value(value.clone())
            .map_err(|err| ApiFailure::decode(format!("invalid `{key}`: {err}")))
    }

    /// Like [`ApiPayload::field`], but a missing key reads as an empty list.
    ///
    /// # Errors
    ///
    /// Returns `ApiFailure::Decode` if the value is present but malformed.
    pub fn list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, ApiFailure> {
        if self.lookup(key).is_none() {
            return Ok(Vec::new());
        }
        self.field(key)
    }
}

fn message_of(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_texts_match_toasts() {
        assert_eq!(ApiFailure::Connection.user_message(), "Connection Error");
        assert_eq!(ApiFailure::HttpStatus(502).user_message(), "HTTP Error 502");
        let rejected = ApiFailure::Rejected {
            message: "Invalid credentials".into(),
        };
        assert_eq!(rejected.user_message(), "Invalid credentials");
        let silent = ApiFailure::Rejected {
            message: String::new(),
        };
        assert_eq!(silent.user_message(), "Request failed.");
    }

    #[test]
    fn json_body_requires_success_flag() {
        let ok = ApiPayload::from_json_body(json!({"success": true, "message": "Welcome"})).unwrap();
        assert_eq!(ok.message, "Welcome");

        let err = ApiPayload::from_json_body(json!({"success": false, "message": "Nope"}))
            .unwrap_err();
        assert_eq!(err, ApiFailure::Rejected { message: "Nope".into() });

        assert!(ApiPayload::from_json_body(json!({"message": "?"})).is_err());
    }

    #[test]
    fn upload_without_json_counts_as_success() {
        let ok = ApiPayload::from_upload_body(201, "<html>ok</html>").unwrap();
        assert_eq!(
            ok.message,
            "Upload successful (HTTP 201), no JSON response body."
        );
    }

    #[test]
    fn upload_json_defaults_success_and_message() {
        let ok = ApiPayload::from_upload_body(200, "{}").unwrap();
        assert_eq!(ok.message, "Upload successful");
        let err = ApiPayload::from_upload_body(200, r#"{"success":false,"message":"Too big"}"#)
            .unwrap_err();
        assert_eq!(err.user_message(), "Too big");
    }

    #[test]
    fn lookup_prefers_data_envelope() {
        let payload = ApiPayload::new(
            "",
            json!({"success": true, "data": {"quests": [1]}, "tests": [2, 3]}),
        );
        let quests: Vec<u8> = payload.field("quests").unwrap();
        let tests: Vec<u8> = payload.field("tests").unwrap();
        assert_eq!(quests, [1]);
        assert_eq!(tests, [2, 3]);
        let books: Vec<u8> = payload.list("books").unwrap();
        assert!(books.is_empty());
        assert!(matches!(
            payload.field::<Vec<u8>>("books"),
            Err(ApiFailure::Decode { .. })
        ));
    }
}
