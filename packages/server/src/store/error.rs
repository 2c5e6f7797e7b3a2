use std::time::Duration;

use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("interview '{0}' not found")]
    NotFound(String),

    /// The question does not belong to the question set of the interview.
    #[error("question '{0}' not found in the interview's question set")]
    QuestionNotFound(String),

    #[error("question '{0}' belongs to more than one interview; interview id required")]
    AmbiguousQuestion(String),

    #[error("storage call exceeded {0:?}")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("stored result is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}
