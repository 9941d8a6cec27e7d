use crate::common::{ApiConfig, Result};
use crate::core::encode::jpeg_data_uri;
use crate::service::protocol::{FailureReason, OcrRequest, Recognition, HTTP_OK};
use reqwest::blocking::Client;

pub type Submission = std::result::Result<Recognition, FailureReason>;

/// Something that can take an encoded JPEG to the OCR service and report back.
pub trait OcrSubmitter {
    fn submit(&self, jpeg: &[u8]) -> Submission;
}

impl<F> OcrSubmitter for F
where
    F: Fn(&[u8]) -> Submission,
{
    fn submit(&self, jpeg: &[u8]) -> Submission {
        self(jpeg)
    }
}

/// Blocking HTTP client for a MathPix-style `v3/text` endpoint.
pub struct HttpOcrClient {
    client: Client,
    endpoint: String,
    app_id: String,
    app_key: String,
}

impl HttpOcrClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            app_id: config.app_id.clone(),
            app_key: config.app_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl OcrSubmitter for HttpOcrClient {
    fn submit(&self, jpeg: &[u8]) -> Submission {
        let request = OcrRequest::new(jpeg_data_uri(jpeg));
        tracing::debug!("POST {} ({} byte payload)", self.endpoint, request.src.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header("app_id", &self.app_id)
            .header("app_key", &self.app_key)
            .json(&request)
            .send()
            .map_err(classify_transport)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(classify_transport)?;

        if status != HTTP_OK {
            return Err(FailureReason::from_status(status, body));
        }

        let recognition: Recognition = serde_json::from_str(&body).map_err(|e| FailureReason::Decode {
            message: e.to_string(),
            body,
        })?;

        if let Some(error) = &recognition.error {
            tracing::warn!("Service returned 200 with an error field: {}", error);
        }
        tracing::debug!(
            "latex_styled={:?} confidence={:?}",
            recognition.latex_styled,
            recognition.confidence
        );

        Ok(recognition)
    }
}

fn classify_transport(err: reqwest::Error) -> FailureReason {
    if err.is_timeout() {
        FailureReason::Timeout
    } else {
        FailureReason::Transport(err.to_string())
    }
}
