pub mod interview;
pub mod scoring;

pub use interview::{EmotionResult, InterviewResult, QuestionResult, ResultDocument, aggregate_score};
pub use scoring::{ScoredInterview, ScoredQuestion, ScoringQuestion, ScoringRequest, ScoringResponse};
