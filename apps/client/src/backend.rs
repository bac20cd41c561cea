//! The transport seam: one async call, multipart form, no retries and no
//! cancellation. Once a submission is in flight it runs to completion or
//! failure.

use async_trait::async_trait;

use crate::controller::SelectedFile;
use crate::error::SubmitError;
use crate::models::ApiEnvelope;

/// Backend the controller submits to. `HttpBackend` in production; tests
/// script their own.
#[async_trait]
pub trait AnalyzeBackend {
    async fn analyze(&self, file: &SelectedFile, jd_text: &str)
        -> Result<ApiEnvelope, SubmitError>;
}

/// Posts the analysis form to a gapscan API server.
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    /// `base_url` is the server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/analyze", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalyzeBackend for HttpBackend {
    async fn analyze(
        &self,
        file: &SelectedFile,
        jd_text: &str,
    ) -> Result<ApiEnvelope, SubmitError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = reqwest::multipart::Form::new()
            .part("resume", part)
            .text("jd_text", jd_text.to_string());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        // Error statuses still carry the JSON envelope; let the schema
        // validation sort success from failure.
        response
            .json::<ApiEnvelope>()
            .await
            .map_err(|e| SubmitError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_built_from_base_url() {
        let backend = HttpBackend::new("http://localhost:8080");
        assert_eq!(backend.endpoint(), "http://localhost:8080/api/analyze");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:8080/");
        assert_eq!(backend.endpoint(), "http://localhost:8080/api/analyze");
    }
}
