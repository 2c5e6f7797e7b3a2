//! The score workflow: fetch, normalize, score, merge, persist.
//!
//! The orchestrator owns no state beyond its collaborators. Each call runs the
//! steps sequentially and either returns the merged result or one typed
//! failure tagged with the stage it happened at.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use common::{InterviewResult, ScoredInterview, ScoringRequest, aggregate_score};
use scorer::{Scorer, ScoringError};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::locks::InterviewLocks;
use crate::store::{ResultStore, StoreError};

/// Step of a workflow at which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Score,
    Merge,
    Persist,
    Attach,
    List,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Score => "score",
            Stage::Merge => "merge",
            Stage::Persist => "persist",
            Stage::Attach => "attach",
            Stage::List => "list",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("interview '{0}' not found")]
    NotFound(String),

    #[error("question '{0}' is not part of the interview")]
    QuestionNotFound(String),

    #[error("{0}")]
    Invalid(String),

    /// The scorer refused the input. Carries its diagnostic text verbatim.
    #[error("scoring rejected the interview: {0}")]
    ValidationRejected(String),

    #[error("scoring failed during {stage}: {source}")]
    TransportFailure {
        stage: Stage,
        #[source]
        source: ScoringError,
    },

    #[error("storage failed during {stage}: {source}")]
    StorageFailure {
        stage: Stage,
        #[source]
        source: StoreError,
    },
}

impl WorkflowError {
    /// Step the failure happened at.
    pub fn stage(&self) -> Stage {
        match self {
            WorkflowError::NotFound(_) => Stage::Fetch,
            WorkflowError::QuestionNotFound(_) | WorkflowError::Invalid(_) => Stage::Attach,
            WorkflowError::ValidationRejected(_) => Stage::Score,
            WorkflowError::TransportFailure { stage, .. }
            | WorkflowError::StorageFailure { stage, .. } => *stage,
        }
    }

    /// True when repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            WorkflowError::TransportFailure { source, .. } => source.is_retryable(),
            WorkflowError::StorageFailure { source, .. } => {
                matches!(source, StoreError::Timeout(_))
            }
            _ => false,
        }
    }

    /// Lookup misses become caller errors only at the stage that resolves ids.
    /// A persist hitting a deleted interview stays a `StorageFailure`.
    fn storage(stage: Stage, err: StoreError) -> Self {
        match (stage, err) {
            (Stage::Fetch, StoreError::NotFound(id)) => WorkflowError::NotFound(id),
            (Stage::Attach, StoreError::QuestionNotFound(id)) => {
                WorkflowError::QuestionNotFound(id)
            }
            (Stage::Attach, StoreError::AmbiguousQuestion(id)) => WorkflowError::Invalid(format!(
                "question '{id}' belongs to several interviews; interview_public_id is required"
            )),
            (stage, source) => WorkflowError::StorageFailure { stage, source },
        }
    }
}

/// Summary of merging one scorer response.
#[derive(Debug, Default, PartialEq, Eq)]
struct MergeOutcome {
    matched: usize,
    unknown: usize,
}

pub struct InterviewOrchestrator {
    store: Arc<dyn ResultStore>,
    scorer: Arc<dyn Scorer>,
    locks: Option<InterviewLocks>,
}

impl InterviewOrchestrator {
    pub fn new(store: Arc<dyn ResultStore>, scorer: Arc<dyn Scorer>) -> Self {
        Self {
            store,
            scorer,
            locks: None,
        }
    }

    /// Serialize `score_interview` calls for the same interview within this process.
    pub fn with_interview_locks(mut self) -> Self {
        self.locks = Some(InterviewLocks::new());
        self
    }

    /// Score an interview and persist the merged evaluation.
    #[instrument(skip(self))]
    pub async fn score_interview(
        &self,
        interview_public_id: &str,
    ) -> Result<InterviewResult, WorkflowError> {
        let _guard = match &self.locks {
            Some(locks) => Some(locks.acquire(interview_public_id).await),
            None => None,
        };

        let mut result = self
            .store
            .fetch_by_public_id(interview_public_id)
            .await
            .map_err(|e| WorkflowError::storage(Stage::Fetch, e))?;

        let request = ScoringRequest::from(&result);
        debug!(questions = request.questions.len(), "Normalized interview");

        let scored = self.scorer.score(&request).await.map_err(|e| match e {
            ScoringError::Rejected { body } => {
                warn!(body = %body, "Scoring rejected interview");
                WorkflowError::ValidationRejected(body)
            }
            source => {
                if let ScoringError::Status { status, body } = &source {
                    error!(status, body = %body, "Scoring service returned an error");
                } else {
                    error!(error = %source, "Scoring service unavailable");
                }
                WorkflowError::TransportFailure {
                    stage: Stage::Score,
                    source,
                }
            }
        })?;

        let outcome = merge_scores(&mut result, scored);
        let changed = result.has_drifted();
        result
            .refresh_raw_result()
            .map_err(|e| WorkflowError::StorageFailure {
                stage: Stage::Merge,
                source: StoreError::Serialization(e),
            })?;

        self.store
            .persist(&result)
            .await
            .map_err(|e| WorkflowError::storage(Stage::Persist, e))?;

        info!(
            matched = outcome.matched,
            unknown = outcome.unknown,
            score = result.score,
            changed,
            "Interview scored"
        );
        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn get_interview(
        &self,
        interview_public_id: &str,
    ) -> Result<InterviewResult, WorkflowError> {
        self.store
            .fetch_by_public_id(interview_public_id)
            .await
            .map_err(|e| WorkflowError::storage(Stage::Fetch, e))
    }

    #[instrument(skip(self))]
    pub async fn list_interviews(&self) -> Result<Vec<InterviewResult>, WorkflowError> {
        self.store
            .fetch_all()
            .await
            .map_err(|e| WorkflowError::storage(Stage::List, e))
    }

    #[instrument(skip(self))]
    pub async fn attach_video(
        &self,
        question_public_id: &str,
        interview_public_id: Option<&str>,
        video_location: &str,
    ) -> Result<(), WorkflowError> {
        if question_public_id.trim().is_empty() {
            return Err(WorkflowError::Invalid("question id must not be empty".into()));
        }
        if video_location.trim().is_empty() {
            return Err(WorkflowError::Invalid("video location must not be empty".into()));
        }

        self.store
            .attach_video(question_public_id, interview_public_id, video_location)
            .await
            .map_err(|e| WorkflowError::storage(Stage::Attach, e))?;

        info!("Video attached");
        Ok(())
    }
}

/// Overlay a scorer response onto the fetched result and recompute the aggregate.
///
/// Questions absent from the response lose their previous evaluation. When the
/// scorer repeats an id the last entry wins.
fn merge_scores(result: &mut InterviewResult, scored: ScoredInterview) -> MergeOutcome {
    let mut by_id: HashMap<String, _> = HashMap::with_capacity(scored.questions.len());
    for entry in scored.questions {
        by_id.insert(entry.public_id.clone(), entry);
    }

    let mut outcome = MergeOutcome::default();
    let mut scores = Vec::new();

    for question in &mut result.questions {
        question.clear_evaluation();
        let Some(entry) = by_id.remove(&question.question_public_id) else {
            continue;
        };

        outcome.matched += 1;
        question.answer = entry.answer;
        question.evaluation = entry.evaluation;
        question.emotion = entry.emotion;
        question.emotion_results = entry.emotion_results;
        if let Some(score) = entry.score {
            question.score = score;
            scores.push(score);
        }
    }

    for unknown in by_id.keys() {
        warn!(question_id = %unknown, "Dropping score for question not in interview");
    }
    outcome.unknown = by_id.len();

    result.score = aggregate_score(scores);
    outcome
}
