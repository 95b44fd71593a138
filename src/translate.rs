//! Translation client and request sequencing.
//!
//! The endpoint answers `GET ?client=..&sl=..&tl=..&dt=t&q=..` with a nested
//! JSON array whose first element lists `[translated, original, ...]`
//! segments. The translated pieces are concatenated in order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text written to the result panel when a translation fails.
pub const TRANSLATION_ERROR_MESSAGE: &str = "Translation error. Please try again.";

/// Default endpoint of the public translation service.
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Default client identifier sent with every request.
pub const DEFAULT_CLIENT: &str = "gtx";

/// Error type for translation requests.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("request failed: {0}")]
    Http(#[from] ureq::Error),
    #[error("response is not JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    Malformed(&'static str),
}

/// Anything that can translate text between two language codes.
///
/// Implementations are called from worker threads.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError>;
}

/// Endpoint settings for [`GoogleTranslator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL, without query string
    pub url: String,
    /// Value of the `client` query parameter
    pub client: String,
    /// User-Agent header sent with each request
    pub user_agent: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            client: DEFAULT_CLIENT.to_string(),
            user_agent: concat!("babelterm/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Blocking HTTP client for the translation endpoint.
pub struct GoogleTranslator {
    agent: ureq::Agent,
    config: EndpointConfig,
}

impl GoogleTranslator {
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            config,
        }
    }

    /// Full request URL for one translation.
    pub fn request_url(&self, text: &str, source: &str, target: &str) -> String {
        request_url(&self.config, text, source, target)
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        let url = self.request_url(text, source, target);
        tracing::debug!(source, target, chars = text.chars().count(), "sending translation request");

        let response = self
            .agent
            .get(&url)
            .header("User-Agent", &self.config.user_agent)
            .call()?;
        let body = response.into_body().read_to_string()?;

        parse_response(&body)
    }
}

/// Build the request URL; the text is percent-encoded.
pub fn request_url(config: &EndpointConfig, text: &str, source: &str, target: &str) -> String {
    format!(
        "{}?client={}&sl={}&tl={}&dt=t&q={}",
        config.url,
        urlencoding::encode(&config.client),
        urlencoding::encode(source),
        urlencoding::encode(target),
        urlencoding::encode(text)
    )
}

/// Parse a response body and join its translated segments.
pub fn parse_response(body: &str) -> Result<String, TranslateError> {
    let json: Value = serde_json::from_str(body)?;
    join_segments(&json)
}

/// Concatenate element 0 of every segment listed in element 0 of `json`.
///
/// Segments whose first element is null contribute nothing.
pub fn join_segments(json: &Value) -> Result<String, TranslateError> {
    let segments = json
        .get(0)
        .and_then(Value::as_array)
        .ok_or(TranslateError::Malformed("missing segment list"))?;

    let mut translated = String::new();
    for segment in segments {
        let piece = segment
            .as_array()
            .and_then(|parts| parts.first())
            .ok_or(TranslateError::Malformed("segment is not an array"))?;
        match piece {
            Value::String(text) => translated.push_str(text),
            Value::Null => {}
            _ => return Err(TranslateError::Malformed("segment text is not a string")),
        }
    }
    Ok(translated)
}

/// One outbound translation, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    pub id: u64,
    pub text: String,
    pub source: String,
    pub target: String,
}

/// Hands out increasing request ids and tells stale completions apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    /// Reserve the id of a new request; every earlier id becomes stale.
    pub fn next_id(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn is_current(&self, id: u64) -> bool {
        id == self.latest
    }
}
