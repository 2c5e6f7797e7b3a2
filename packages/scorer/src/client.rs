//! HTTP client for the scoring service.

use async_trait::async_trait;
use common::{ScoredInterview, ScoringRequest, ScoringResponse};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config::ScorerConfig;
use crate::error::ScoringError;
use crate::traits::Scorer;

const PROCESS_PATH: &str = "/process_interview";

/// Scoring service client.
#[derive(Debug, Clone)]
pub struct ScoringClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScoringClient {
    pub fn new(config: &ScorerConfig) -> Result<Self, ScoringError> {
        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ScoringError::Config(format!("failed to create HTTP client: {e}")))?;

        // Normalize base URL (remove trailing slash)
        let base_url = config.url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Scorer for ScoringClient {
    async fn score(&self, request: &ScoringRequest) -> Result<ScoredInterview, ScoringError> {
        let url = format!("{}{}", self.base_url, PROCESS_PATH);
        debug!(url = %url, questions = request.questions.len(), "submitting interview for scoring");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let body = response.text().await?;
            warn!(body = %body, "scoring service rejected interview");
            return Err(ScoringError::Rejected { body });
        }

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoringError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: ScoringResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ScoringError::InvalidResponse(format!("failed to parse body: {e}")))?;

        debug!(
            questions = parsed.result.questions.len(),
            score = parsed.result.score,
            "scoring service responded"
        );
        Ok(parsed.result)
    }
}
