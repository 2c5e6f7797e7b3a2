//! Wire types exchanged with the external scoring service.

use serde::{Deserialize, Serialize};

use crate::interview::{EmotionResult, InterviewResult};

/// One question as sent to the scorer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringQuestion {
    pub question: String,
    pub public_id: String,
    pub video_link: String,
}

/// Body of `POST /process_interview`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub questions: Vec<ScoringQuestion>,
}

impl From<&InterviewResult> for ScoringRequest {
    fn from(interview: &InterviewResult) -> Self {
        Self {
            questions: interview
                .questions
                .iter()
                .map(|q| ScoringQuestion {
                    question: q.question_text.clone(),
                    public_id: q.question_public_id.clone(),
                    video_link: q.video_link.clone(),
                })
                .collect(),
        }
    }
}

/// Per-question evaluation returned by the scorer.
///
/// Only `public_id` is required; the scorer omits fields it could not compute.
/// A missing `score` means the question was not scored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredQuestion {
    pub public_id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub question_type: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub evaluation: String,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub emotion_results: Vec<EmotionResult>,
    #[serde(default)]
    pub video_link: String,
    #[serde(default)]
    pub video_public_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredInterview {
    #[serde(default)]
    pub questions: Vec<ScoredQuestion>,
    /// The scorer's own aggregate. Informational; the aggregate is always recomputed.
    #[serde(default)]
    pub score: i32,
}

/// Success body of `POST /process_interview`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringResponse {
    pub result: ScoredInterview,
}
