use serde::{Serialize, Deserialize};
use std::fmt;

pub const DEFAULT_FORMATS: [&str; 2] = ["text", "latex_styled"];

/// Marker the service puts in the body when an image exceeds its size limit.
pub const REQUEST_TOO_LARGE_MARKER: &str = "Request too large";

pub const HTTP_OK: u16 = 200;
pub const HTTP_TOO_MANY_REQUESTS: u16 = 429;

// Request types
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OcrRequest {
    pub src: String,
    pub formats: Vec<String>,
    pub data_options: DataOptions,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DataOptions {
    pub include_asciimath: bool,
    pub include_latex: bool,
}

impl Default for DataOptions {
    fn default() -> Self {
        Self { include_asciimath: true, include_latex: true }
    }
}

impl OcrRequest {
    pub fn new(data_uri: String) -> Self {
        Self {
            src: data_uri,
            formats: DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect(),
            data_options: DataOptions::default(),
        }
    }
}

// Response types
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Recognition {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub latex_styled: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Recognition {
    /// First `max_chars` characters of the recognized text, or `N/A`.
    pub fn text_preview(&self, max_chars: usize) -> String {
        match &self.text {
            Some(text) => text.chars().take(max_chars).collect(),
            None => "N/A".to_string(),
        }
    }
}

/// Why a probe failed. Every variant stops the size search the same way.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// The service rejected the payload as too large.
    RequestTooLarge { status: u16, body: String },
    /// HTTP 429. Possibly transient, still counted as a failure.
    RateLimited { body: String },
    Http { status: u16, body: String },
    /// 200 whose body was not the expected JSON.
    Decode { body: String, message: String },
    Timeout,
    Transport(String),
    /// The image could not be prepared; nothing was sent.
    Encoding(String),
}

impl FailureReason {
    /// Classify a non-200 response.
    pub fn from_status(status: u16, body: String) -> Self {
        if status == HTTP_TOO_MANY_REQUESTS {
            FailureReason::RateLimited { body }
        } else if body.contains(REQUEST_TOO_LARGE_MARKER) {
            FailureReason::RequestTooLarge { status, body }
        } else {
            FailureReason::Http { status, body }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FailureReason::RequestTooLarge { status, .. } | FailureReason::Http { status, .. } => Some(*status),
            FailureReason::RateLimited { .. } => Some(HTTP_TOO_MANY_REQUESTS),
            FailureReason::Decode { .. } => Some(HTTP_OK),
            FailureReason::Timeout | FailureReason::Transport(_) | FailureReason::Encoding(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FailureReason::RequestTooLarge { .. } => "request too large",
            FailureReason::RateLimited { .. } => "rate limited",
            FailureReason::Http { .. } => "HTTP error",
            FailureReason::Decode { .. } => "invalid response",
            FailureReason::Timeout => "timeout",
            FailureReason::Transport(_) => "network error",
            FailureReason::Encoding(_) => "encoding error",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::RequestTooLarge { body, .. }
            | FailureReason::RateLimited { body }
            | FailureReason::Http { body, .. } => write!(f, "{}: {}", self.label(), body),
            FailureReason::Decode { message, .. } => write!(f, "{}: {}", self.label(), message),
            FailureReason::Timeout => write!(f, "{}", self.label()),
            FailureReason::Transport(e) | FailureReason::Encoding(e) => write!(f, "{}: {}", self.label(), e),
        }
    }
}
