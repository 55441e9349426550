//! Caption service adapter.
//!
//! The pipeline only ever sees the [`CaptionProvider`] trait: raw image bytes
//! in, caption text (or a [`CaptionError`]) out. The production implementation
//! is [`HttpCaptioner`], which POSTs the bytes to a per-model inference
//! endpoint with bearer auth and probes the JSON response for caption text.
//!
//! Failure policy: every transport, auth, timeout, and response-shape problem
//! surfaces as a `CaptionError` from this boundary — never a panic, never a
//! propagated reqwest error. The pipeline decides what a failed caption means
//! (it uses the empty string). One attempt per image; no retries, so a
//! still-warming model counts as a failed caption for this run.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Default captioning model when the config does not name one.
pub const DEFAULT_MODEL: &str = "Salesforce/blip-image-captioning-large";

/// Upper bound on a single captioning call.
pub const CAPTION_TIMEOUT: Duration = Duration::from_secs(60);

const INFERENCE_BASE: &str = "https://api-inference.huggingface.co/models";

/// Text-bearing fields probed in priority order.
const TEXT_FIELDS: &[&str] = &["generated_text", "caption", "text", "description"];

#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("no API token configured")]
    MissingToken,
    #[error("request to {0} failed: {1}")]
    Transport(String, String),
    #[error("captioning service returned HTTP {0}")]
    Status(u16),
    #[error("no caption text in service response")]
    MalformedResponse,
}

/// Injectable captioning capability: image bytes → caption text.
pub trait CaptionProvider {
    fn caption(&self, image: &[u8]) -> Result<String, CaptionError>;
}

/// HTTP captioner posting raw image bytes to a hosted inference endpoint.
pub struct HttpCaptioner {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

impl HttpCaptioner {
    /// Build a captioner for `model`. An empty `token` short-circuits every
    /// call to [`CaptionError::MissingToken`] without touching the network.
    pub fn new(token: &str, model: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: format!("{INFERENCE_BASE}/{model}"),
            token: token.to_string(),
        }
    }
}

impl CaptionProvider for HttpCaptioner {
    fn caption(&self, image: &[u8]) -> Result<String, CaptionError> {
        if self.token.is_empty() {
            return Err(CaptionError::MissingToken);
        }

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .timeout(CAPTION_TIMEOUT)
            .body(image.to_vec())
            .send()
            .map_err(|e| CaptionError::Transport(self.endpoint.clone(), e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CaptionError::Status(resp.status().as_u16()));
        }

        let json: Value = resp
            .json()
            .map_err(|e| CaptionError::Transport(self.endpoint.clone(), e.to_string()))?;

        extract_caption(&json).ok_or(CaptionError::MalformedResponse)
    }
}

/// Pull caption text out of a service response.
///
/// Accepts the shapes hosted inference endpoints actually return: an array of
/// result objects (first element wins), a bare result object, or an object
/// wrapping the result under `"result"`. Within an object, [`TEXT_FIELDS`]
/// are probed in priority order.
pub fn extract_caption(value: &Value) -> Option<String> {
    if let Some(items) = value.as_array() {
        return items.first().and_then(extract_caption);
    }
    if let Some(obj) = value.as_object() {
        for field in TEXT_FIELDS {
            if let Some(text) = obj.get(*field).and_then(Value::as_str) {
                return Some(text.to_string());
            }
        }
        if let Some(nested) = obj.get("result") {
            return extract_caption(nested);
        }
    }
    None
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Scripted provider for pipeline tests: hands out the queued responses
    /// in order, then `MalformedResponse` once exhausted.
    pub struct StubCaptioner {
        responses: Mutex<Vec<Result<String, CaptionError>>>,
        pub calls: Mutex<usize>,
    }

    impl StubCaptioner {
        pub fn with(responses: Vec<Result<String, CaptionError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl CaptionProvider for StubCaptioner {
        fn caption(&self, _image: &[u8]) -> Result<String, CaptionError> {
            *self.calls.lock().unwrap() += 1;
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Err(CaptionError::MalformedResponse)
            } else {
                responses.remove(0)
            }
        }
    }

    // =========================================================================
    // extract_caption tests
    // =========================================================================

    #[test]
    fn extracts_from_array_of_objects() {
        let v = json!([{"generated_text": "a dog on grass"}]);
        assert_eq!(extract_caption(&v).as_deref(), Some("a dog on grass"));
    }

    #[test]
    fn extracts_from_bare_object() {
        let v = json!({"caption": "city at night"});
        assert_eq!(extract_caption(&v).as_deref(), Some("city at night"));
    }

    #[test]
    fn extracts_from_nested_result_object() {
        let v = json!({"result": {"text": "two birds"}});
        assert_eq!(extract_caption(&v).as_deref(), Some("two birds"));
    }

    #[test]
    fn extracts_from_nested_result_array() {
        let v = json!({"result": [{"generated_text": "a lake"}]});
        assert_eq!(extract_caption(&v).as_deref(), Some("a lake"));
    }

    #[test]
    fn field_priority_order_wins() {
        let v = json!({"text": "lower", "generated_text": "higher"});
        assert_eq!(extract_caption(&v).as_deref(), Some("higher"));
    }

    #[test]
    fn no_known_field_is_none() {
        let v = json!({"error": "model loading", "estimated_time": 20.0});
        assert_eq!(extract_caption(&v), None);
    }

    #[test]
    fn empty_array_is_none() {
        assert_eq!(extract_caption(&json!([])), None);
    }

    #[test]
    fn non_string_field_is_skipped() {
        let v = json!({"generated_text": 42, "caption": "fallback"});
        assert_eq!(extract_caption(&v).as_deref(), Some("fallback"));
    }

    #[test]
    fn scalar_is_none() {
        assert_eq!(extract_caption(&json!("just a string")), None);
        assert_eq!(extract_caption(&json!(null)), None);
    }

    // =========================================================================
    // HttpCaptioner tests (no network)
    // =========================================================================

    #[test]
    fn empty_token_short_circuits() {
        let captioner = HttpCaptioner::new("", DEFAULT_MODEL);
        let result = captioner.caption(b"fake image bytes");
        assert!(matches!(result, Err(CaptionError::MissingToken)));
    }

    #[test]
    fn endpoint_includes_model() {
        let captioner = HttpCaptioner::new("tok", "some-org/some-model");
        assert!(captioner.endpoint.ends_with("/some-org/some-model"));
    }

    #[test]
    fn stub_returns_queued_responses_in_order() {
        let stub = StubCaptioner::with(vec![
            Ok("first".to_string()),
            Err(CaptionError::Status(503)),
            Ok("third".to_string()),
        ]);
        assert_eq!(stub.caption(b"a").unwrap(), "first");
        assert!(matches!(stub.caption(b"b"), Err(CaptionError::Status(503))));
        assert_eq!(stub.caption(b"c").unwrap(), "third");
        assert_eq!(stub.call_count(), 3);
    }
}
