use serde::{Deserialize, Serialize};

/// One detected emotion segment inside an answer video.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EmotionResult {
    #[schema(example = "happy")]
    pub emotion: String,
    /// Offset from the start of the video, in seconds.
    #[schema(example = 12.5)]
    pub exact_time: f64,
    /// Length of the segment, in seconds.
    #[schema(example = 3.0)]
    pub duration: f64,
}

/// Evaluation of a single interview question.
///
/// Identity and text come from the question catalog, the video reference from
/// the most recent upload. Every other field is written by the external scorer
/// and stays empty until the interview has been scored once.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuestionResult {
    #[serde(rename = "public_id")]
    #[schema(example = "q1")]
    pub question_public_id: String,
    #[serde(rename = "question")]
    #[schema(example = "Why Go?")]
    pub question_text: String,
    #[serde(default)]
    pub question_type: String,
    /// Empty when no video was ever attached.
    #[serde(default)]
    pub video_public_id: String,
    /// Storage location of the answer video. Empty when no video was attached.
    #[serde(default)]
    #[schema(example = "/v/q1.mp4")]
    pub video_link: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    #[schema(example = "Good")]
    pub evaluation: String,
    #[serde(default)]
    #[schema(example = 80)]
    pub score: i32,
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub emotion_results: Vec<EmotionResult>,
}

impl QuestionResult {
    /// A question with no video and no evaluation yet.
    pub fn new(public_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            question_public_id: public_id.into(),
            question_text: text.into(),
            ..Default::default()
        }
    }

    /// Reset every scorer-owned field.
    pub fn clear_evaluation(&mut self) {
        self.answer.clear();
        self.evaluation.clear();
        self.score = 0;
        self.emotion.clear();
        self.emotion_results.clear();
    }

    /// Copy scorer-owned fields from a previously stored evaluation of the same question.
    pub fn overlay_evaluation(&mut self, stored: &QuestionResult) {
        self.answer.clone_from(&stored.answer);
        self.evaluation.clone_from(&stored.evaluation);
        self.score = stored.score;
        self.emotion.clone_from(&stored.emotion);
        self.emotion_results.clone_from(&stored.emotion_results);
    }
}

/// The serialized canonical result: what the `results` column holds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ResultDocument {
    #[serde(default)]
    pub questions: Vec<QuestionResult>,
    #[serde(default)]
    pub score: i32,
}

impl ResultDocument {
    /// Parse a stored document. `null` means the interview was never scored.
    pub fn from_stored(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(value)
    }

    pub fn find(&self, question_public_id: &str) -> Option<&QuestionResult> {
        self.questions
            .iter()
            .find(|q| q.question_public_id == question_public_id)
    }
}

/// Canonical evaluation of one interview.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InterviewResult {
    #[schema(example = "I1")]
    pub public_id: String,
    /// Empty when no candidate is assigned to the interview.
    #[schema(example = "c1")]
    pub candidate_public_id: String,
    /// In presentation order.
    pub questions: Vec<QuestionResult>,
    /// Mean of the per-question scores.
    #[schema(example = 80)]
    pub score: i32,
    /// Last persisted `{questions, score}` document, `null` before the first persist.
    #[serde(skip)]
    pub raw_result: serde_json::Value,
}

impl InterviewResult {
    /// The document form of the current `questions` and `score`.
    pub fn document(&self) -> ResultDocument {
        ResultDocument {
            questions: self.questions.clone(),
            score: self.score,
        }
    }

    /// True when `raw_result` no longer matches `questions`/`score`.
    pub fn has_drifted(&self) -> bool {
        match serde_json::to_value(self.document()) {
            Ok(current) => current != self.raw_result,
            Err(_) => true,
        }
    }

    /// Re-serialize `questions`/`score` into `raw_result`.
    pub fn refresh_raw_result(&mut self) -> Result<(), serde_json::Error> {
        self.raw_result = serde_json::to_value(self.document())?;
        Ok(())
    }

    /// Build a listing entry straight from a stored document.
    pub fn from_document(
        public_id: impl Into<String>,
        candidate_public_id: impl Into<String>,
        raw_result: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        let document = ResultDocument::from_stored(&raw_result)?;
        Ok(Self {
            public_id: public_id.into(),
            candidate_public_id: candidate_public_id.into(),
            questions: document.questions,
            score: document.score,
            raw_result,
        })
    }
}

/// Integer mean of the given scores, truncated toward zero. `0` for an empty set.
pub fn aggregate_score<I>(scores: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), s| (sum + i64::from(s), count + 1));

    if count == 0 {
        return 0;
    }
    (sum / count) as i32
}
