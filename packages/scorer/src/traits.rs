use async_trait::async_trait;
use common::{ScoredInterview, ScoringRequest};

use crate::error::ScoringError;

/// Something that can evaluate a batch of recorded answers.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Submit one interview's questions and wait for the evaluation.
    ///
    /// Implementations never retry; a failed call is reported once.
    async fn score(&self, request: &ScoringRequest) -> Result<ScoredInterview, ScoringError>;
}
