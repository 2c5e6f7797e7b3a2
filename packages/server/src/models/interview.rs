use common::InterviewResult;
use serde::{Deserialize, Serialize};

/// Request body for recording an answer video.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AttachVideoRequest {
    /// Storage location of the uploaded video.
    #[schema(example = "/v/q1.mp4")]
    pub video: String,
    /// Interview the answer belongs to. Required when the question is used by
    /// more than one interview.
    #[schema(example = "I1")]
    pub interview_public_id: Option<String>,
}

/// Response DTO for listing interviews.
#[derive(Serialize, utoipa::ToSchema)]
pub struct InterviewListResponse {
    pub data: Vec<InterviewResult>,
    pub total: usize,
}

impl From<Vec<InterviewResult>> for InterviewListResponse {
    fn from(data: Vec<InterviewResult>) -> Self {
        Self {
            total: data.len(),
            data,
        }
    }
}
