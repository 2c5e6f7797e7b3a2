//! Reading and writing the canonical interview result.

mod error;
pub mod memory;
pub mod sql;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use common::{InterviewResult, QuestionResult, ResultDocument};

pub use error::StoreError;
pub use memory::MemoryResultStore;
pub use sql::SqlResultStore;

/// Storage backend for interview results.
///
/// Reads never mutate. `persist` and `attach_video` each perform one write.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Materialize an interview from its assigned questions, their videos and
    /// the last persisted evaluation.
    ///
    /// `score` is the aggregate as last persisted. It is not recomputed when
    /// the question set has changed since; the next score run refreshes it.
    async fn fetch_by_public_id(
        &self,
        interview_public_id: &str,
    ) -> Result<InterviewResult, StoreError>;

    /// Overwrite the stored result document with `result.raw_result`.
    ///
    /// Unconditional: concurrent writers for the same interview race and the
    /// last one wins.
    async fn persist(&self, result: &InterviewResult) -> Result<(), StoreError>;

    /// Every interview with its last persisted result. Does not re-run the join.
    async fn fetch_all(&self) -> Result<Vec<InterviewResult>, StoreError>;

    /// Record `video_location` as the answer to a question.
    ///
    /// Without an interview id the owning interview is resolved from the
    /// question alone, which fails with `AmbiguousQuestion` when the question
    /// belongs to several interviews.
    async fn attach_video(
        &self,
        question_public_id: &str,
        interview_public_id: Option<&str>,
        video_location: &str,
    ) -> Result<(), StoreError>;
}

/// Run a storage call under a fixed deadline.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| StoreError::Timeout(deadline))?
}

/// Combine freshly joined questions with the stored document.
///
/// Evaluation fields are taken from the stored entry with the same question
/// id; identity, text and video always come from the join. The aggregate score
/// is the stored one even when questions were added or removed after it was
/// written.
pub(crate) fn materialize(
    public_id: String,
    candidate_public_id: String,
    mut questions: Vec<QuestionResult>,
    stored: Option<serde_json::Value>,
) -> Result<InterviewResult, StoreError> {
    let raw_result = stored.unwrap_or(serde_json::Value::Null);
    let document = ResultDocument::from_stored(&raw_result)?;

    for question in &mut questions {
        if let Some(previous) = document.find(&question.question_public_id) {
            question.overlay_evaluation(previous);
        }
    }

    Ok(InterviewResult {
        public_id,
        candidate_public_id,
        questions,
        score: document.score,
        raw_result,
    })
}
